// Terminal UI implementation using ratatui
// The interactive face of the catalog

pub mod app;
pub mod help_ui;
pub mod runner;
pub mod ui;

pub use app::{App, InputMode, SourceRow};
pub use runner::{handle_key, run_tui};
