use async_trait::async_trait;
use renewables_core::{Completion, FetchError, Project, ProjectType, Store};
use renewables_tui::app::FetchCoordinator;
use renewables_tui::ProjectSource;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::sync::oneshot;

type Outcome = Result<Vec<Project>, FetchError>;

/// Each filter's response is held back until the test releases it, so the
/// test decides the order in which loads resolve.
#[derive(Debug, Default)]
struct GatedSource {
    gates: Mutex<HashMap<Option<ProjectType>, oneshot::Receiver<Outcome>>>,
    calls: Mutex<Vec<Option<ProjectType>>>,
}

impl GatedSource {
    fn gate(&self, filter: Option<ProjectType>) -> oneshot::Sender<Outcome> {
        let (tx, rx) = oneshot::channel();
        self.gates.lock().unwrap().insert(filter, rx);
        tx
    }

    fn calls(&self) -> Vec<Option<ProjectType>> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ProjectSource for GatedSource {
    async fn fetch(&self, filter: Option<ProjectType>) -> Outcome {
        self.calls.lock().unwrap().push(filter);
        let gate = self.gates.lock().unwrap().remove(&filter);
        match gate {
            Some(rx) => rx
                .await
                .unwrap_or_else(|_| Err(FetchError::Transport("gate dropped".into()))),
            None => Err(FetchError::Transport("no gate".into())),
        }
    }
}

fn project(id: i64, kind: &str) -> Project {
    Project {
        id,
        name: format!("Project {id}"),
        kind: kind.to_string(),
        latitude: 45.0,
        longitude: -93.0,
    }
}

#[tokio::test]
async fn newer_load_wins_when_older_resolves_last() {
    let source = Arc::new(GatedSource::default());
    let release_solar = source.gate(Some(ProjectType::Solar));
    let release_wind = source.gate(Some(ProjectType::Wind));

    let mut store = Store::new();
    let mut coordinator = FetchCoordinator::new(source.clone());

    coordinator.request(&mut store, Some(ProjectType::Solar));
    coordinator.request(&mut store, Some(ProjectType::Wind));
    assert!(store.loading());

    release_wind.send(Ok(vec![project(2, "wind")])).unwrap();
    assert_eq!(
        coordinator.next_completion(&mut store).await,
        Some(Completion::Applied)
    );

    release_solar.send(Ok(vec![project(1, "solar")])).unwrap();
    assert_eq!(
        coordinator.next_completion(&mut store).await,
        Some(Completion::Discarded)
    );

    assert_eq!(store.projects(), &[project(2, "wind")]);
    assert!(!store.loading());
    assert_eq!(store.error(), None);
}

#[tokio::test]
async fn stale_failure_is_ignored() {
    let source = Arc::new(GatedSource::default());
    let release_all = source.gate(None);
    let release_hydro = source.gate(Some(ProjectType::Hydroelectric));

    let mut store = Store::new();
    let mut coordinator = FetchCoordinator::new(source.clone());

    coordinator.request(&mut store, None);
    coordinator.request(&mut store, Some(ProjectType::Hydroelectric));

    release_all
        .send(Err(FetchError::Status {
            code: 503,
            reason: "Service Unavailable".into(),
        }))
        .unwrap();
    assert_eq!(
        coordinator.next_completion(&mut store).await,
        Some(Completion::Discarded)
    );
    assert!(store.loading());
    assert_eq!(store.error(), None);

    release_hydro
        .send(Ok(vec![project(3, "hydroelectric")]))
        .unwrap();
    assert_eq!(coordinator.settle(&mut store).await, Some(Completion::Applied));
    assert_eq!(store.projects(), &[project(3, "hydroelectric")]);
}

#[tokio::test]
async fn failed_load_keeps_projects_and_sets_error() {
    let source = Arc::new(GatedSource::default());
    let release_all = source.gate(None);
    let release_solar = source.gate(Some(ProjectType::Solar));

    let mut store = Store::new();
    let mut coordinator = FetchCoordinator::new(source.clone());

    coordinator.request(&mut store, None);
    release_all
        .send(Ok(vec![project(1, "solar"), project(2, "wind")]))
        .unwrap();
    coordinator.settle(&mut store).await;

    coordinator.request(&mut store, Some(ProjectType::Solar));
    assert!(store.loading());
    release_solar
        .send(Err(FetchError::Transport("connection refused".into())))
        .unwrap();

    assert_eq!(coordinator.settle(&mut store).await, Some(Completion::Failed));
    assert_eq!(store.projects(), &[project(1, "solar"), project(2, "wind")]);
    assert_eq!(store.error(), Some("network error: connection refused"));
    assert!(!store.loading());
}

#[tokio::test]
async fn filter_round_trip_issues_one_request_per_change() {
    let source = Arc::new(GatedSource::default());
    let release_wind = source.gate(Some(ProjectType::Wind));
    let release_all = source.gate(None);

    let mut store = Store::new();
    let mut coordinator = FetchCoordinator::new(source.clone());

    for selected in [Some(ProjectType::Wind), None] {
        if let Some(renewables_core::Effect::LoadProjects(filter)) =
            store.set_selected_type(selected)
        {
            coordinator.request(&mut store, filter);
        }
    }

    release_wind.send(Ok(vec![project(2, "wind")])).unwrap();
    release_all.send(Ok(vec![project(1, "solar")])).unwrap();
    coordinator.settle(&mut store).await;

    assert_eq!(store.selected_type(), None);
    assert_eq!(store.projects(), &[project(1, "solar")]);

    let mut calls = source.calls();
    calls.sort_by_key(|filter| filter.map_or(0, |kind| kind.index() + 1));
    assert_eq!(calls, vec![None, Some(ProjectType::Wind)]);
}

#[tokio::test]
async fn drain_is_non_blocking() {
    let source = Arc::new(GatedSource::default());
    let _release_all = source.gate(None);

    let mut store = Store::new();
    let mut coordinator = FetchCoordinator::new(source.clone());
    coordinator.request(&mut store, None);

    assert!(coordinator.drain(&mut store).is_empty());
    assert!(store.loading());
    assert!(coordinator.is_outstanding());
}
