//! Shared handles to the document being edited.
//!
//! ## Learning: Ownership Model
//!
//! The editing session owns the document through a [`DocumentHandle`].
//! Commands only ever hold a [`WeakDocument`]: they target the document
//! without keeping it alive. A command whose document has been dropped
//! is no longer bound to anything and every edit through it is rejected
//! with [`CoreError::InvalidCommand`] before anything is mutated.
//!
//! `DocumentId` is a newtype around `Uuid` so that log lines and events
//! can name a document without borrowing it.

use quill_buffer::Document;
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use uuid::Uuid;

use crate::{CoreError, CoreResult};

/// Unique identifier for a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DocumentId(Uuid);

impl DocumentId {
    /// Creates a new unique document ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for DocumentId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for DocumentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Owning handle to a document.
///
/// Cloning the handle shares the same document. The handle is neither
/// `Send` nor `Sync`: one editing session lives on one thread.
#[derive(Debug, Clone)]
pub struct DocumentHandle {
    id: DocumentId,
    inner: Rc<RefCell<Document>>,
}

impl DocumentHandle {
    /// Wraps a document in a new handle with a fresh ID.
    pub fn new(document: Document) -> Self {
        Self {
            id: DocumentId::new(),
            inner: Rc::new(RefCell::new(document)),
        }
    }

    /// Returns the document's ID.
    pub fn id(&self) -> DocumentId {
        self.id
    }

    /// Creates a non-owning reference for binding commands.
    pub fn downgrade(&self) -> WeakDocument {
        WeakDocument {
            id: self.id,
            inner: Rc::downgrade(&self.inner),
        }
    }

    /// Runs `f` with shared access to the document.
    ///
    /// Fails with [`CoreError::DocumentBusy`] if an edit currently holds
    /// the document.
    pub fn read<R>(&self, f: impl FnOnce(&Document) -> R) -> CoreResult<R> {
        let guard = self
            .inner
            .try_borrow()
            .map_err(|_| CoreError::DocumentBusy)?;
        Ok(f(&guard))
    }

    /// Returns a copy of the current content.
    pub fn snapshot(&self) -> CoreResult<String> {
        self.read(Document::snapshot)
    }

    /// Returns the content length in chars.
    pub fn len_chars(&self) -> CoreResult<usize> {
        self.read(Document::len_chars)
    }
}

impl Default for DocumentHandle {
    fn default() -> Self {
        Self::new(Document::new())
    }
}

/// Non-owning reference to a document, held by commands.
#[derive(Debug, Clone)]
pub struct WeakDocument {
    id: DocumentId,
    inner: Weak<RefCell<Document>>,
}

impl WeakDocument {
    /// Returns the ID of the targeted document.
    pub fn id(&self) -> DocumentId {
        self.id
    }

    /// Returns true while the targeted document still exists.
    pub fn is_alive(&self) -> bool {
        self.inner.strong_count() > 0
    }

    /// Runs `f` with exclusive access to the targeted document.
    ///
    /// `f` is never called when the document is gone or busy, so a
    /// failed call has no side effects.
    pub fn with_mut<R>(&self, f: impl FnOnce(&mut Document) -> R) -> CoreResult<R> {
        let document = self.inner.upgrade().ok_or_else(|| {
            CoreError::InvalidCommand(format!("document {} no longer exists", self.id))
        })?;
        let mut guard = document
            .try_borrow_mut()
            .map_err(|_| CoreError::DocumentBusy)?;
        Ok(f(&mut guard))
    }
}
