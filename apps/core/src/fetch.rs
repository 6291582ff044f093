//! Latest-wins bookkeeping for project loads.
//!
//! Every load is issued a [`LoadTicket`] carrying a generation number. Only
//! the ticket of the most recently issued load may write its outcome into
//! the store; anything older is dropped on arrival. There is no
//! transport-level cancellation, superseded requests simply run out.

use crate::domain::{Project, ProjectType};
use crate::error::FetchError;
use crate::store::Store;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket {
    pub generation: u64,
    pub filter: Option<ProjectType>,
}

/// What happened to a finished load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    Applied,
    Failed,
    Discarded,
}

#[derive(Debug, Default)]
pub struct LoadTracker {
    issued: u64,
    outstanding: Option<u64>,
}

impl LoadTracker {
    pub const fn new() -> Self {
        Self {
            issued: 0,
            outstanding: None,
        }
    }

    /// Starts a load: supersedes any outstanding one, raises the loading
    /// flag and clears the previous error.
    pub fn begin(&mut self, store: &mut Store, filter: Option<ProjectType>) -> LoadTicket {
        self.issued += 1;
        if let Some(previous) = self.outstanding.replace(self.issued) {
            tracing::debug!(previous, current = self.issued, "superseding outstanding load");
        }
        store.set_loading(true);
        store.clear_error();

        LoadTicket {
            generation: self.issued,
            filter,
        }
    }

    pub fn complete(
        &mut self,
        store: &mut Store,
        ticket: LoadTicket,
        outcome: Result<Vec<Project>, FetchError>,
    ) -> Completion {
        if self.outstanding != Some(ticket.generation) {
            tracing::debug!(
                generation = ticket.generation,
                latest = self.issued,
                "discarding stale load result"
            );
            return Completion::Discarded;
        }
        self.outstanding = None;

        match outcome {
            Ok(projects) => {
                tracing::info!(
                    generation = ticket.generation,
                    count = projects.len(),
                    filter = ?ticket.filter,
                    "projects loaded"
                );
                store.replace_projects(projects);
                Completion::Applied
            }
            Err(error) => {
                tracing::warn!(generation = ticket.generation, %error, "project load failed");
                store.set_error(error.to_string());
                Completion::Failed
            }
        }
    }

    pub const fn is_outstanding(&self) -> bool {
        self.outstanding.is_some()
    }
}

/// `{base}/projects`, with `?project_type=` appended only for a filter.
pub fn projects_url(base: &str, filter: Option<ProjectType>) -> String {
    let base = base.trim_end_matches('/');
    filter.map_or_else(
        || format!("{base}/projects"),
        |kind| format!("{base}/projects?project_type={}", kind.as_str()),
    )
}

pub fn parse_projects(body: &[u8]) -> Result<Vec<Project>, FetchError> {
    serde_json::from_slice(body).map_err(FetchError::from)
}
