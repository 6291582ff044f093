use crate::app::source::ProjectSource;
use renewables_core::{
    Completion, FetchError, LoadTicket, LoadTracker, Project, ProjectType, Store,
};
use std::sync::Arc;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

/// Result of a spawned load, delivered back to the UI thread.
#[derive(Debug)]
pub struct FetchCompleted {
    pub ticket: LoadTicket,
    pub result: Result<Vec<Project>, FetchError>,
}

/// Runs project loads on tokio tasks and reconciles their outcomes into the
/// store on the caller's thread. The store is never touched from a task.
#[derive(Debug)]
pub struct FetchCoordinator {
    source: Arc<dyn ProjectSource>,
    tracker: LoadTracker,
    tx: UnboundedSender<FetchCompleted>,
    rx: UnboundedReceiver<FetchCompleted>,
}

impl FetchCoordinator {
    pub fn new(source: Arc<dyn ProjectSource>) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            source,
            tracker: LoadTracker::new(),
            tx,
            rx,
        }
    }

    /// Marks the store as loading and spawns the request. Must be called
    /// from within a tokio runtime.
    pub fn request(&mut self, store: &mut Store, filter: Option<ProjectType>) -> LoadTicket {
        let ticket = self.tracker.begin(store, filter);
        tracing::debug!(generation = ticket.generation, ?filter, "load requested");

        let source = Arc::clone(&self.source);
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = source.fetch(ticket.filter).await;
            if tx.send(FetchCompleted { ticket, result }).is_err() {
                tracing::debug!(generation = ticket.generation, "coordinator gone, dropping result");
            }
        });

        ticket
    }

    /// Applies every completion that has already arrived without waiting.
    pub fn drain(&mut self, store: &mut Store) -> Vec<Completion> {
        let mut completions = Vec::new();
        while let Ok(message) = self.rx.try_recv() {
            completions.push(self.apply(store, message));
        }
        completions
    }

    /// Waits for the next completion, stale or not, and applies it.
    pub async fn next_completion(&mut self, store: &mut Store) -> Option<Completion> {
        let message = self.rx.recv().await?;
        Some(self.apply(store, message))
    }

    /// Waits until the latest load has landed.
    pub async fn settle(&mut self, store: &mut Store) -> Option<Completion> {
        while self.tracker.is_outstanding() {
            match self.next_completion(store).await? {
                Completion::Discarded => {}
                landed => return Some(landed),
            }
        }
        None
    }

    pub const fn is_outstanding(&self) -> bool {
        self.tracker.is_outstanding()
    }

    fn apply(&mut self, store: &mut Store, message: FetchCompleted) -> Completion {
        self.tracker.complete(store, message.ticket, message.result)
    }
}
