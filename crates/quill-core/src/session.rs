//! One editing session.
//!
//! ## Learning: The Facade Pattern
//!
//! `Session` ties a document, its history and an event bus together so a
//! host (the CLI, a UI) deals with a single value. Each session is built
//! explicitly and passed around by reference; there is no process-wide
//! history.

use quill_buffer::Document;

use crate::CoreResult;
use crate::command::{Command, DeleteCommand, InsertCommand, ReplaceCommand};
use crate::config::Config;
use crate::document::DocumentHandle;
use crate::event::{EventBus, HistoryEvent};
use crate::history::History;

/// The state of one editing session.
///
/// ## Thread Safety
///
/// `Session` is owned by a single thread. Callers that accept edits from
/// several sources must funnel them through that thread, one
/// `execute`/`undo`/`redo` call at a time.
#[derive(Debug)]
pub struct Session {
    /// The document being edited
    document: DocumentHandle,

    /// Undo/redo log for the document
    history: History,

    /// Event bus for notifications
    events: EventBus,
}

impl Session {
    /// Creates a session with an empty document and default config.
    pub fn new() -> Self {
        Self::with_config(&Config::default())
    }

    /// Creates a session from configuration.
    pub fn with_config(config: &Config) -> Self {
        Self::with_document(Document::from(config.session.initial_text.as_str()), config)
    }

    /// Creates a session whose document starts with `text`.
    pub fn with_text(text: &str, config: &Config) -> Self {
        Self::with_document(Document::from(text), config)
    }

    /// Creates a session around an existing document.
    pub fn with_document(document: Document, config: &Config) -> Self {
        let document = DocumentHandle::new(document);
        tracing::info!(
            document = %document.id(),
            undo_limit = config.history.undo_limit,
            "Session started"
        );
        Self {
            document,
            history: History::with_limit(config.history.undo_limit),
            events: EventBus::new(),
        }
    }

    // ==================== Edits ====================

    /// Appends text.
    pub fn insert(&mut self, text: &str) -> CoreResult<()> {
        let command = InsertCommand::new(self.document.downgrade(), text);
        self.execute(Box::new(command))
    }

    /// Removes the last `count` chars (clamped).
    pub fn delete(&mut self, count: usize) -> CoreResult<()> {
        let command = DeleteCommand::new(self.document.downgrade(), count);
        self.execute(Box::new(command))
    }

    /// Replaces the last `count` chars with `text`.
    pub fn replace(&mut self, count: usize, text: &str) -> CoreResult<()> {
        let command = ReplaceCommand::new(self.document.downgrade(), count, text);
        self.execute(Box::new(command))
    }

    /// Executes and commits an arbitrary command.
    pub fn execute(&mut self, command: Box<dyn Command>) -> CoreResult<()> {
        let label = command.label();
        let discarded = self.history.redo_count();
        self.history.execute(command)?;
        self.events.emit(HistoryEvent::Executed { label, discarded });
        Ok(())
    }

    // ==================== Undo/Redo ====================

    /// Undoes the last applied command. `Ok(false)` if there is none.
    pub fn undo(&mut self) -> CoreResult<bool> {
        let label = self.history.head().and_then(|head| self.history.label_at(head));
        let undone = self.history.undo()?;
        if let (true, Some(label)) = (undone, label) {
            self.events.emit(HistoryEvent::Undone { label });
        }
        Ok(undone)
    }

    /// Redoes the next undone command. `Ok(false)` if there is none.
    pub fn redo(&mut self) -> CoreResult<bool> {
        let label = self.history.label_at(self.history.undo_count());
        let redone = self.history.redo()?;
        if let (true, Some(label)) = (redone, label) {
            self.events.emit(HistoryEvent::Redone { label });
        }
        Ok(redone)
    }

    /// Returns true if there are commands to undo.
    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    /// Returns true if there are commands to redo.
    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Forgets every committed command, keeping the content.
    pub fn clear_history(&mut self) {
        self.history.clear();
        self.events.emit(HistoryEvent::Cleared);
    }

    // ==================== Accessors ====================

    /// Returns a copy of the current content.
    pub fn text(&self) -> CoreResult<String> {
        self.document.snapshot()
    }

    /// Returns the session's document handle.
    pub fn document(&self) -> &DocumentHandle {
        &self.document
    }

    /// Returns the session's history.
    pub fn history(&self) -> &History {
        &self.history
    }

    /// Subscribes to history events.
    pub fn subscribe(&self) -> tokio::sync::broadcast::Receiver<HistoryEvent> {
        self.events.subscribe()
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
