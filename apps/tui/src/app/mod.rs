// App module for the renewables viewer
// Owns the store, the fetch coordinator and input handling

pub mod coordinator;
pub mod input;
pub mod source;
pub mod state;

pub use coordinator::{FetchCompleted, FetchCoordinator};
pub use input::handle_input;
pub use source::{HttpProjectSource, ProjectSource};
pub use state::App;
