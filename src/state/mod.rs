//! Application state modules
//!
//! Each state struct owns its related fields and poll methods.

mod poems;
mod ui;

pub use poems::PoemsState;
pub use ui::UiState;

/// Events that state poll methods can return.
/// These communicate results back to PoemshelfApp without direct mutation.
#[derive(Debug, PartialEq, Eq)]
pub enum StateEvent {
    /// Update the status message
    StatusMessage(String),

    /// Log an error message
    LogError(String),

    /// Log an info message
    LogInfo(String),
}
