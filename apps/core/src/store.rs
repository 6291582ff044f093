//! Project store: the single authoritative client-side state.
//!
//! The store never performs I/O. Mutations either come through the typed
//! methods or through [`Store::apply`] with an [`Action`]; transitions that
//! require a load return an [`Effect`] for the caller to hand to a fetch
//! coordinator.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::domain::{Project, ProjectType, ViewMode};
use crate::error::StoreError;

/// Mutation requests accepted by the store.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    ReplaceProjects(Vec<Project>),
    SetLoading(bool),
    SetError(String),
    SetSelectedType(Option<ProjectType>),
    SetViewMode(ViewMode),
    /// Re-run the load for the current filter without changing state.
    RequestReload,
}

/// Side effects declared by a transition and executed by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    LoadProjects(Option<ProjectType>),
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ClientState {
    pub projects: Vec<Project>,
    pub loading: bool,
    pub error: Option<String>,
    pub selected_type: Option<ProjectType>,
    pub view_mode: ViewMode,
}

/// Geographic extent of the loaded projects.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min_latitude: f64,
    pub max_latitude: f64,
    pub min_longitude: f64,
    pub max_longitude: f64,
}

#[derive(Debug, Clone, Default)]
pub struct Store {
    state: ClientState,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store seeded with an initial filter and view, e.g. from CLI flags.
    pub fn with_initial(selected_type: Option<ProjectType>, view_mode: ViewMode) -> Self {
        Self {
            state: ClientState {
                selected_type,
                view_mode,
                ..ClientState::default()
            },
        }
    }

    pub const fn state(&self) -> &ClientState {
        &self.state
    }

    pub fn projects(&self) -> &[Project] {
        &self.state.projects
    }

    pub const fn loading(&self) -> bool {
        self.state.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.state.error.as_deref()
    }

    pub const fn selected_type(&self) -> Option<ProjectType> {
        self.state.selected_type
    }

    pub const fn view_mode(&self) -> ViewMode {
        self.state.view_mode
    }

    /// Single transition function for every [`Action`].
    pub fn apply(&mut self, action: Action) -> Option<Effect> {
        tracing::trace!(?action, "store action");
        match action {
            Action::ReplaceProjects(projects) => {
                self.replace_projects(projects);
                None
            }
            Action::SetLoading(flag) => {
                self.set_loading(flag);
                None
            }
            Action::SetError(message) => {
                self.set_error(message);
                None
            }
            Action::SetSelectedType(selected) => self.set_selected_type(selected),
            Action::SetViewMode(mode) => {
                self.set_view_mode(mode);
                None
            }
            Action::RequestReload => Some(Effect::LoadProjects(self.state.selected_type)),
        }
    }

    pub fn replace_projects(&mut self, projects: Vec<Project>) {
        self.state.projects = projects;
        self.state.loading = false;
        self.state.error = None;
    }

    pub fn set_loading(&mut self, flag: bool) {
        self.state.loading = flag;
    }

    pub fn set_error(&mut self, message: impl Into<String>) {
        self.state.error = Some(message.into());
        self.state.loading = false;
    }

    pub(crate) fn clear_error(&mut self) {
        self.state.error = None;
    }

    /// Sets the filter. A load is only requested when the value changes.
    pub fn set_selected_type(&mut self, selected: Option<ProjectType>) -> Option<Effect> {
        if self.state.selected_type == selected {
            return None;
        }
        self.state.selected_type = selected;
        Some(Effect::LoadProjects(selected))
    }

    pub fn set_view_mode(&mut self, mode: ViewMode) {
        self.state.view_mode = mode;
    }

    /// Untyped entry point for view changes coming from the presentation
    /// layer. Out-of-domain values leave the view untouched.
    pub fn request_view_mode(&mut self, raw: &str) -> Result<ViewMode, StoreError> {
        let mode = raw.parse::<ViewMode>()?;
        self.set_view_mode(mode);
        Ok(mode)
    }

    pub fn toggle_view_mode(&mut self) -> ViewMode {
        let mode = self.state.view_mode.toggled();
        self.set_view_mode(mode);
        mode
    }

    /// Project counts keyed by raw type value, unrecognized types included.
    pub fn counts_by_type(&self) -> BTreeMap<&str, usize> {
        let mut counts = BTreeMap::new();
        for project in &self.state.projects {
            *counts.entry(project.kind.as_str()).or_insert(0) += 1;
        }
        counts
    }

    pub fn bounds(&self) -> Option<Bounds> {
        let mut projects = self.state.projects.iter();
        let first = projects.next()?;
        let seed = Bounds {
            min_latitude: first.latitude,
            max_latitude: first.latitude,
            min_longitude: first.longitude,
            max_longitude: first.longitude,
        };

        Some(projects.fold(seed, |bounds, project| Bounds {
            min_latitude: bounds.min_latitude.min(project.latitude),
            max_latitude: bounds.max_latitude.max(project.latitude),
            min_longitude: bounds.min_longitude.min(project.longitude),
            max_longitude: bounds.max_longitude.max(project.longitude),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn project(id: i64, kind: &str) -> Project {
        Project {
            id,
            name: format!("Project {id}"),
            kind: kind.to_string(),
            latitude: 40.0 + id as f64,
            longitude: -100.0 - id as f64,
        }
    }

    #[test]
    fn defaults_match_startup_state() {
        let store = Store::new();

        assert!(store.projects().is_empty());
        assert!(!store.loading());
        assert_eq!(store.error(), None);
        assert_eq!(store.selected_type(), None);
        assert_eq!(store.view_mode(), ViewMode::Map);
    }

    #[test]
    fn replace_projects_clears_loading_and_error() {
        let mut store = Store::new();
        store.set_loading(true);
        store.set_error("x");
        store.set_loading(true);

        store.replace_projects(vec![project(3, "wind")]);

        assert_eq!(store.projects(), &[project(3, "wind")]);
        assert!(!store.loading());
        assert_eq!(store.error(), None);
    }

    #[test]
    fn set_error_keeps_existing_projects() {
        let mut store = Store::new();
        store.replace_projects(vec![project(1, "solar"), project(2, "wind")]);
        store.set_loading(true);

        store.set_error("boom");

        assert_eq!(store.projects().len(), 2);
        assert_eq!(store.error(), Some("boom"));
        assert!(!store.loading());
    }

    #[test]
    fn filter_round_trip_requests_two_loads() {
        let mut store = Store::new();

        let effects: Vec<_> = [Some(ProjectType::Wind), None]
            .into_iter()
            .filter_map(|selected| store.apply(Action::SetSelectedType(selected)))
            .collect();

        assert_eq!(store.selected_type(), None);
        assert_eq!(
            effects,
            vec![
                Effect::LoadProjects(Some(ProjectType::Wind)),
                Effect::LoadProjects(None)
            ]
        );
    }

    #[test]
    fn reselecting_same_filter_does_not_reload() {
        let mut store = Store::new();
        assert!(store.set_selected_type(Some(ProjectType::Solar)).is_some());
        assert_eq!(store.set_selected_type(Some(ProjectType::Solar)), None);
    }

    #[test]
    fn reload_uses_current_filter_without_mutation() {
        let mut store = Store::with_initial(Some(ProjectType::Hydroelectric), ViewMode::List);
        let before = store.state().clone();

        let effect = store.apply(Action::RequestReload);

        assert_eq!(effect, Some(Effect::LoadProjects(Some(ProjectType::Hydroelectric))));
        assert_eq!(store.state(), &before);
    }

    #[test]
    fn invalid_view_mode_is_rejected_without_change() {
        let mut store = Store::new();
        assert_eq!(store.request_view_mode("list"), Ok(ViewMode::List));

        let result = store.request_view_mode("satellite");

        assert!(matches!(result, Err(StoreError::InvalidViewMode(_))));
        assert_eq!(store.view_mode(), ViewMode::List);
    }

    #[test]
    fn toggle_alternates_between_modes() {
        let mut store = Store::new();
        assert_eq!(store.toggle_view_mode(), ViewMode::List);
        assert_eq!(store.toggle_view_mode(), ViewMode::Map);
    }

    #[test]
    fn counts_include_unrecognized_types() {
        let mut store = Store::new();
        store.replace_projects(vec![
            project(1, "solar"),
            project(2, "solar"),
            project(3, "geothermal"),
        ]);

        let counts = store.counts_by_type();
        assert_eq!(counts.get("solar"), Some(&2));
        assert_eq!(counts.get("geothermal"), Some(&1));
    }

    #[test]
    fn bounds_cover_every_project() {
        let mut store = Store::new();
        assert_eq!(store.bounds(), None);

        store.replace_projects(vec![project(1, "solar"), project(4, "wind")]);
        let bounds = store.bounds().unwrap();

        assert!((bounds.min_latitude - 41.0).abs() < f64::EPSILON);
        assert!((bounds.max_latitude - 44.0).abs() < f64::EPSILON);
        assert!((bounds.min_longitude + 104.0).abs() < f64::EPSILON);
        assert!((bounds.max_longitude + 101.0).abs() < f64::EPSILON);
    }
}
