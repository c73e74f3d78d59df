//! Reversible edit commands.
//!
//! ## Learning: The Command Pattern
//!
//! Each edit is an object that knows how to apply itself to a document
//! and how to take itself back:
//! - `execute()` applies the forward edit
//! - `undo()` applies the exact inverse
//! - `redo()` applies the forward edit again
//!
//! Commands store deltas, never copies of the document, so each variant
//! is responsible for being its own exact inverse: `execute(); undo();`
//! must leave the content byte-for-byte as it found it.
//!
//! ## Construction Is Pure
//!
//! Building a command never touches the document. The only thing that
//! mutates content is a call to `execute`, `undo` or `redo`, which
//! [`History`](crate::History) controls.

use std::fmt;

use quill_buffer::Document;

use crate::document::WeakDocument;
use crate::{CoreError, CoreResult};

/// A reversible unit of work against one document.
///
/// ## Learning: Trait Objects
///
/// [`History`](crate::History) stores `Box<dyn Command>`, so it only
/// depends on this capability, never on the concrete variants below.
/// New variants must satisfy the same round-trip law and must not reach
/// into the history that stores them.
pub trait Command: fmt::Debug {
    /// Short human-readable description, used in logs and listings.
    fn label(&self) -> String;

    /// Applies the forward edit.
    fn execute(&mut self) -> CoreResult<()>;

    /// Applies the exact inverse of the last forward edit.
    fn undo(&mut self) -> CoreResult<()>;

    /// Re-applies the forward edit after an undo.
    fn redo(&mut self) -> CoreResult<()> {
        self.execute()
    }
}

/// Shortens long payloads for labels.
fn preview(text: &str) -> String {
    const MAX: usize = 24;
    if text.chars().count() <= MAX {
        format!("{text:?}")
    } else {
        let head: String = text.chars().take(MAX).collect();
        format!("{head:?}...")
    }
}

/// Refuses to take back text that is no longer at the end of the document.
fn expect_suffix(doc: &Document, text: &str) -> CoreResult<()> {
    if doc.ends_with(text) {
        Ok(())
    } else {
        Err(CoreError::InvalidCommand(format!(
            "document no longer ends with {}",
            preview(text)
        )))
    }
}

// ==================== Insert ====================

/// Appends text to the document.
///
/// The inverse of inserting `text` is deleting `text.chars().count()`
/// chars from the end.
#[derive(Debug, Clone)]
pub struct InsertCommand {
    document: WeakDocument,
    text: String,
}

impl InsertCommand {
    /// Binds an insert to a document without applying it.
    pub fn new(document: WeakDocument, text: impl Into<String>) -> Self {
        Self {
            document,
            text: text.into(),
        }
    }

    /// The text this command appends.
    pub fn text(&self) -> &str {
        &self.text
    }
}

impl Command for InsertCommand {
    fn label(&self) -> String {
        format!("Insert {}", preview(&self.text))
    }

    fn execute(&mut self) -> CoreResult<()> {
        self.document.with_mut(|doc| {
            doc.insert(&self.text);
        })
    }

    fn undo(&mut self) -> CoreResult<()> {
        let text = &self.text;
        self.document.with_mut(|doc| {
            expect_suffix(doc, text)?;
            doc.delete(text.chars().count());
            Ok::<_, CoreError>(())
        })?
    }
}

// ==================== Delete ====================

/// Removes chars from the end of the document.
///
/// The removed text is captured on every forward application, so undo
/// restores exactly what was there even when the delete was clamped.
#[derive(Debug, Clone)]
pub struct DeleteCommand {
    document: WeakDocument,
    count: usize,
    removed: String,
}

impl DeleteCommand {
    /// Binds a delete of the last `count` chars without applying it.
    pub fn new(document: WeakDocument, count: usize) -> Self {
        Self {
            document,
            count,
            removed: String::new(),
        }
    }

    /// Text removed by the most recent forward application.
    pub fn removed(&self) -> &str {
        &self.removed
    }
}

impl Command for DeleteCommand {
    fn label(&self) -> String {
        format!("Delete {}", self.count)
    }

    fn execute(&mut self) -> CoreResult<()> {
        let count = self.count;
        self.removed = self.document.with_mut(|doc| doc.delete(count))?;
        Ok(())
    }

    fn undo(&mut self) -> CoreResult<()> {
        self.document.with_mut(|doc| {
            doc.insert(&self.removed);
        })
    }
}

// ==================== Replace ====================

/// Replaces the last `count` chars with new text.
#[derive(Debug, Clone)]
pub struct ReplaceCommand {
    document: WeakDocument,
    count: usize,
    text: String,
    removed: String,
}

impl ReplaceCommand {
    /// Binds a replacement without applying it.
    pub fn new(document: WeakDocument, count: usize, text: impl Into<String>) -> Self {
        Self {
            document,
            count,
            text: text.into(),
            removed: String::new(),
        }
    }
}

impl Command for ReplaceCommand {
    fn label(&self) -> String {
        format!("Replace {} with {}", self.count, preview(&self.text))
    }

    fn execute(&mut self) -> CoreResult<()> {
        let count = self.count;
        let text = &self.text;
        self.removed = self.document.with_mut(|doc| {
            let removed = doc.delete(count);
            doc.insert(text);
            removed
        })?;
        Ok(())
    }

    fn undo(&mut self) -> CoreResult<()> {
        let text = &self.text;
        let removed = &self.removed;
        self.document.with_mut(|doc| {
            expect_suffix(doc, text)?;
            doc.delete(text.chars().count());
            doc.insert(removed);
            Ok::<_, CoreError>(())
        })?
    }
}

// ==================== Group ====================

/// Several commands undone and redone as one history step.
///
/// Children run in order and are undone in reverse order. If a child
/// fails while executing, the children already applied are rolled back
/// before the error is returned.
#[derive(Debug)]
pub struct CommandGroup {
    label: String,
    commands: Vec<Box<dyn Command>>,
}

impl CommandGroup {
    /// Creates an empty group.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            commands: Vec::new(),
        }
    }

    /// Adds a command to the end of the group.
    pub fn with(mut self, command: impl Command + 'static) -> Self {
        self.commands.push(Box::new(command));
        self
    }

    /// Adds an already boxed command to the end of the group.
    pub fn push(&mut self, command: Box<dyn Command>) {
        self.commands.push(command);
    }

    /// Number of commands in the group.
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Returns true if the group holds no commands.
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    fn apply_all(&mut self, redo: bool) -> CoreResult<()> {
        for applied in 0..self.commands.len() {
            let command = &mut self.commands[applied];
            let result = if redo { command.redo() } else { command.execute() };

            if let Err(err) = result {
                tracing::debug!(group = %self.label, failed_at = applied, "Rolling back group");
                for done in self.commands[..applied].iter_mut().rev() {
                    if let Err(rollback) = done.undo() {
                        tracing::warn!(group = %self.label, "Rollback step failed: {}", rollback);
                    }
                }
                return Err(err);
            }
        }
        Ok(())
    }

    /// Undoes children in reverse. If one fails, the children already
    /// undone are redone so the group stays fully applied.
    fn undo_all(&mut self) -> CoreResult<()> {
        for index in (0..self.commands.len()).rev() {
            if let Err(err) = self.commands[index].undo() {
                tracing::debug!(group = %self.label, failed_at = index, "Restoring group");
                for undone in self.commands[index + 1..].iter_mut() {
                    if let Err(restore) = undone.redo() {
                        tracing::warn!(group = %self.label, "Restore step failed: {}", restore);
                    }
                }
                return Err(err);
            }
        }
        Ok(())
    }
}

impl Command for CommandGroup {
    fn label(&self) -> String {
        self.label.clone()
    }

    fn execute(&mut self) -> CoreResult<()> {
        self.apply_all(false)
    }

    fn undo(&mut self) -> CoreResult<()> {
        self.undo_all()
    }

    fn redo(&mut self) -> CoreResult<()> {
        self.apply_all(true)
    }
}
