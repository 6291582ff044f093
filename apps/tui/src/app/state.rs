use crate::app::coordinator::FetchCoordinator;
use crate::app::input::helpers::cycle_index;
use crate::app::source::ProjectSource;
use crate::config::AppConfig;
use chrono::{DateTime, Local};
use renewables_core::{Action, Completion, Effect, Project, ProjectType, Store, ViewMode};
use std::sync::Arc;
use std::time::{Duration, Instant};
use throbber_widgets_tui::ThrobberState;

const THROBBER_TICK: Duration = Duration::from_millis(100);

/// Filter select options in display order; index 0 is "All Types".
pub const FILTER_OPTIONS: [Option<ProjectType>; 4] = [
    None,
    Some(ProjectType::Solar),
    Some(ProjectType::Wind),
    Some(ProjectType::Hydroelectric),
];

pub fn filter_index(filter: Option<ProjectType>) -> usize {
    filter.map_or(0, |kind| kind.index() + 1)
}

/// Composition root: owns the store, the fetch coordinator and the
/// presentation-only state (selection, help, spinner).
#[derive(Debug)]
pub struct App {
    pub running: bool,
    pub store: Store,
    pub coordinator: FetchCoordinator,
    pub selected_index: usize,
    pub show_help: bool,
    pub throbber_state: ThrobberState,
    pub last_frame: Instant,
    pub last_updated: Option<DateTime<Local>>,
}

impl App {
    pub fn new(config: &AppConfig, source: Arc<dyn ProjectSource>) -> Self {
        Self {
            running: true,
            store: Store::with_initial(config.initial_type, config.initial_view),
            coordinator: FetchCoordinator::new(source),
            selected_index: 0,
            show_help: false,
            throbber_state: ThrobberState::default(),
            last_frame: Instant::now(),
            last_updated: None,
        }
    }

    /// Issues the startup load for the initial filter.
    pub fn start(&mut self) {
        tracing::info!(filter = ?self.store.selected_type(), "starting initial load");
        self.dispatch(Action::RequestReload);
    }

    pub fn dispatch(&mut self, action: Action) {
        if let Some(effect) = self.store.apply(action) {
            self.run_effect(effect);
        }
    }

    fn run_effect(&mut self, effect: Effect) {
        match effect {
            Effect::LoadProjects(filter) => {
                self.coordinator.request(&mut self.store, filter);
            }
        }
    }

    pub fn select_filter(&mut self, filter: Option<ProjectType>) {
        self.dispatch(Action::SetSelectedType(filter));
    }

    pub fn cycle_filter(&mut self, forward: bool) {
        let current = filter_index(self.store.selected_type());
        let next = cycle_index(current, FILTER_OPTIONS.len(), forward);
        self.select_filter(FILTER_OPTIONS[next]);
    }

    pub fn set_view(&mut self, mode: ViewMode) {
        self.dispatch(Action::SetViewMode(mode));
    }

    pub fn toggle_view(&mut self) {
        self.set_view(self.store.view_mode().toggled());
    }

    pub fn reload(&mut self) {
        self.dispatch(Action::RequestReload);
    }

    /// Applies finished loads. Called once per frame from the event loop.
    pub fn pump(&mut self) -> Vec<Completion> {
        let completions = self.coordinator.drain(&mut self.store);
        self.after_completions(&completions);
        completions
    }

    /// Waits for the latest load to land; used by headless mode.
    pub async fn settle(&mut self) -> Option<Completion> {
        let completion = self.coordinator.settle(&mut self.store).await;
        if let Some(completion) = completion {
            self.after_completions(&[completion]);
        }
        completion
    }

    fn after_completions(&mut self, completions: &[Completion]) {
        if completions.contains(&Completion::Applied) {
            self.last_updated = Some(Local::now());
            self.clamp_selection();
        }
    }

    pub fn update(&mut self) {
        let now = Instant::now();
        if now.duration_since(self.last_frame) < THROBBER_TICK {
            return;
        }
        self.last_frame = now;

        if self.store.loading() {
            self.throbber_state.calc_next();
        }
    }

    pub fn selected_project(&self) -> Option<&Project> {
        self.store.projects().get(self.selected_index)
    }

    pub fn select_next(&mut self, step: usize) {
        let len = self.store.projects().len();
        if len == 0 {
            self.selected_index = 0;
            return;
        }
        self.selected_index = (self.selected_index + step).min(len - 1);
    }

    pub fn select_previous(&mut self, step: usize) {
        self.selected_index = self.selected_index.saturating_sub(step);
    }

    pub fn select_first(&mut self) {
        self.selected_index = 0;
    }

    pub fn select_last(&mut self) {
        self.selected_index = self.store.projects().len().saturating_sub(1);
    }

    fn clamp_selection(&mut self) {
        let len = self.store.projects().len();
        if self.selected_index >= len {
            self.selected_index = len.saturating_sub(1);
        }
    }

    pub fn quit(&mut self) {
        self.running = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use renewables_core::FetchError;

    #[derive(Debug)]
    struct StaticSource(Vec<Project>);

    #[async_trait]
    impl ProjectSource for StaticSource {
        async fn fetch(&self, filter: Option<ProjectType>) -> Result<Vec<Project>, FetchError> {
            Ok(self
                .0
                .iter()
                .filter(|p| filter.map_or(true, |kind| p.project_type() == Some(kind)))
                .cloned()
                .collect())
        }
    }

    fn project(id: i64, kind: &str) -> Project {
        Project {
            id,
            name: format!("Project {id}"),
            kind: kind.to_string(),
            latitude: 40.0,
            longitude: -100.0,
        }
    }

    fn app() -> App {
        let source = StaticSource(vec![
            project(1, "solar"),
            project(2, "wind"),
            project(3, "hydroelectric"),
        ]);
        App::new(&AppConfig::default(), Arc::new(source))
    }

    #[tokio::test]
    async fn startup_load_fills_store() {
        let mut app = app();
        app.start();
        assert!(app.store.loading());

        assert_eq!(app.settle().await, Some(Completion::Applied));

        assert_eq!(app.store.projects().len(), 3);
        assert!(!app.store.loading());
        assert!(app.last_updated.is_some());
    }

    #[tokio::test]
    async fn filter_change_reloads_with_filter() {
        let mut app = app();
        app.start();
        app.settle().await;

        app.select_filter(Some(ProjectType::Wind));
        app.settle().await;

        assert_eq!(app.store.projects(), &[project(2, "wind")]);
        assert_eq!(app.store.selected_type(), Some(ProjectType::Wind));
    }

    #[tokio::test]
    async fn cycle_filter_wraps_through_all_types() {
        let mut app = app();
        app.cycle_filter(false);
        assert_eq!(app.store.selected_type(), Some(ProjectType::Hydroelectric));
        app.cycle_filter(true);
        assert_eq!(app.store.selected_type(), None);
    }

    #[tokio::test]
    async fn selection_is_clamped_after_smaller_result() {
        let mut app = app();
        app.start();
        app.settle().await;
        app.select_last();
        assert_eq!(app.selected_index, 2);

        app.select_filter(Some(ProjectType::Solar));
        app.settle().await;

        assert_eq!(app.selected_index, 0);
        assert_eq!(app.selected_project().map(|p| p.id), Some(1));
    }

    #[test]
    fn filter_index_round_trips_options() {
        for (index, option) in FILTER_OPTIONS.iter().enumerate() {
            assert_eq!(filter_index(*option), index);
        }
    }
}
