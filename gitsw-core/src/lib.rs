pub mod action;
pub mod config;
pub mod git;
pub mod matcher;
pub mod paths;
pub mod pins;
pub mod state;
pub mod storage;
pub mod window;

// Re-export commonly used types at crate root
pub use action::Action;
pub use config::Config;
pub use git::GitProvider;
pub use pins::{NoopPinStore, PinChange, PinRegistry, PinStore};
pub use state::{SelectionOutcome, SelectionRequest, SelectionResult, SelectionState};
pub use storage::{FilePinStore, Storage};
