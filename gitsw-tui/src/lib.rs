pub mod app;
pub mod components;
pub mod event;
pub mod keymap;
pub mod terminal;
pub mod theme;

pub use app::{PickerOptions, pick, run_selection};
pub use event::{CrosstermEvents, EventSource, ScriptedEvents};
pub use terminal::TerminalGuard;
pub use theme::Theme;
