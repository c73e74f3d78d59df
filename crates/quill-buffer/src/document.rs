//! Rope-backed document content.
//!
//! ## Why Rope?
//!
//! Appending to and trimming the tail of a rope are both O(log n), and
//! the rope keeps char <-> byte bookkeeping for us, so clamped deletes
//! never need to rescan the whole text.
//!
//! ## Edit Model
//!
//! Only two primitives mutate content:
//! - `insert(text)` appends
//! - `delete(count)` removes the trailing `count` chars, clamped to the
//!   current length
//!
//! Both are each other's exact inverse when `delete` is given the char
//! length of what `insert` appended, which is what commands rely on.

use ropey::Rope;
use std::fmt;
use std::path::Path;

use crate::BufferResult;

/// Mutable text content targeted by edit commands.
///
/// # Thread Safety
///
/// `Document` is `Send` but not `Sync`. Sharing one between editing
/// sessions needs external serialization of every edit.
#[derive(Debug, Clone, Default)]
pub struct Document {
    /// The rope holding our text content
    rope: Rope,
}

impl Document {
    /// Creates a new empty document.
    ///
    /// # Example
    /// ```
    /// use quill_buffer::Document;
    ///
    /// let doc = Document::new();
    /// assert!(doc.is_empty());
    /// ```
    pub fn new() -> Self {
        Self { rope: Rope::new() }
    }

    /// Loads initial content from a UTF-8 file.
    pub fn from_file(path: impl AsRef<Path>) -> BufferResult<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Ok(Self::from(content))
    }

    // ==================== Mutations ====================

    /// Appends `text` to the end of the document.
    ///
    /// Returns the new length in chars.
    pub fn insert(&mut self, text: &str) -> usize {
        let end = self.rope.len_chars();
        self.rope.insert(end, text);
        self.rope.len_chars()
    }

    /// Removes the last `count` chars and returns them.
    ///
    /// Over-deletion is clamped: asking for more than the document holds
    /// empties it instead of failing.
    ///
    /// ```
    /// use quill_buffer::Document;
    ///
    /// let mut doc = Document::from("Hi");
    /// assert_eq!(doc.delete(10), "Hi");
    /// assert!(doc.is_empty());
    /// ```
    pub fn delete(&mut self, count: usize) -> String {
        let end = self.rope.len_chars();
        let start = end.saturating_sub(count);
        if start == end {
            return String::new();
        }

        let removed: String = self.rope.slice(start..end).into();
        self.rope.remove(start..end);
        removed
    }

    // ==================== Inspection ====================

    /// Returns a copy of the current content.
    pub fn snapshot(&self) -> String {
        self.rope.to_string()
    }

    /// Returns true if the document holds no text.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rope.len_chars() == 0
    }

    /// Returns the number of chars in the document.
    #[inline]
    pub fn len_chars(&self) -> usize {
        self.rope.len_chars()
    }

    /// Returns the number of bytes in the document.
    #[inline]
    pub fn len_bytes(&self) -> usize {
        self.rope.len_bytes()
    }

    /// Returns true if the content currently ends with `suffix`.
    pub fn ends_with(&self, suffix: &str) -> bool {
        let suffix_len = suffix.chars().count();
        let len = self.rope.len_chars();
        if suffix_len > len {
            return false;
        }
        self.rope.slice(len - suffix_len..) == suffix
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for chunk in self.rope.chunks() {
            f.write_str(chunk)?;
        }
        Ok(())
    }
}

impl From<&str> for Document {
    fn from(s: &str) -> Self {
        Self {
            rope: Rope::from_str(s),
        }
    }
}

impl From<String> for Document {
    fn from(s: String) -> Self {
        Self::from(s.as_str())
    }
}
