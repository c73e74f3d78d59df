//! # Quill Core
//!
//! Reversible editing on top of [`quill_buffer::Document`].
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌──────────────────────────────────────────────────────┐
//! │                      Session                          │
//! │  ┌──────────┐  ┌──────────────────────┐  ┌─────────┐ │
//! │  │  Config  │  │       History        │  │EventBus │ │
//! │  └──────────┘  │ [c0, c1, c2 | c3, c4]│  └─────────┘ │
//! │                │          ^ head      │              │
//! │                └──────────┬───────────┘              │
//! │                           │ execute / undo / redo    │
//! │                  ┌────────┴────────┐                  │
//! │                  │ DocumentHandle  │                  │
//! │                  └─────────────────┘                  │
//! └──────────────────────────────────────────────────────┘
//! ```
//!
//! Commands left of the cursor are reflected in the document; commands
//! right of it only exist so they can be redone, and are dropped as soon
//! as a new command is executed.

pub mod command;
pub mod config;
pub mod document;
pub mod event;
pub mod history;
pub mod session;

pub use command::{Command, CommandGroup, DeleteCommand, InsertCommand, ReplaceCommand};
pub use config::Config;
pub use document::{DocumentHandle, DocumentId, WeakDocument};
pub use event::{EventBus, EventHandler, HistoryEvent};
pub use history::History;
pub use session::Session;

/// Result type for core operations
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors that can occur in core operations
///
/// Undoing past the start or redoing past the end are not errors; those
/// boundaries are reported as `Ok(false)`.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Invalid command: {0}")]
    InvalidCommand(String),

    #[error("Document is already borrowed")]
    DocumentBusy,

    #[error("Buffer error: {0}")]
    Buffer(#[from] quill_buffer::BufferError),

    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
}
