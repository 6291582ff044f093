// Shared state core for the renewables viewer front ends
pub mod domain;
pub mod error;
pub mod fetch;
pub mod store;

pub use domain::{filter_label, Project, ProjectType, ViewMode};
pub use error::{FetchError, StoreError};
pub use fetch::{parse_projects, projects_url, Completion, LoadTicket, LoadTracker};
pub use store::{Action, Bounds, ClientState, Effect, Store};
