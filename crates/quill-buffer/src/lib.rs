//! # Quill Buffer
//!
//! The receiver side of the editing engine: a text document that only
//! grows at its end and only shrinks from its end.
//!
//! ## Key Concepts for Learning Rust
//!
//! ### Ownership & Borrowing
//! - `Document` owns the rope holding its content
//! - `snapshot()` copies the content out; nothing hands out a live view
//!   that could observe a half-applied edit
//! - Mutations require `&mut self` (exclusive access)
//!
//! ### Units
//! All lengths are measured in `char`s (Unicode scalar values), never
//! bytes, so deleting `n` units can never split a code point.

mod document;

pub use document::Document;

/// Result type for buffer operations
pub type BufferResult<T> = Result<T, BufferError>;

/// Errors that can occur during buffer operations
///
/// The two edit primitives are infallible; only seeding a document from
/// the outside world can fail.
#[derive(Debug, thiserror::Error)]
pub enum BufferError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_creation() {
        let doc = Document::new();
        assert!(doc.is_empty());
        assert_eq!(doc.len_chars(), 0);
    }

    #[test]
    fn test_document_from_string() {
        let doc = Document::from("Hello, World!");
        assert_eq!(doc.len_chars(), 13);
        assert_eq!(doc.snapshot(), "Hello, World!");
    }

    #[test]
    fn test_insert_and_delete() {
        let mut doc = Document::new();
        doc.insert("Hello");
        assert_eq!(doc.snapshot(), "Hello");

        doc.insert(", World!");
        assert_eq!(doc.snapshot(), "Hello, World!");

        doc.delete(8);
        assert_eq!(doc.snapshot(), "Hello");
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let result = Document::from_file("/definitely/not/here.txt");
        assert!(matches!(result, Err(BufferError::Io(_))));
    }
}
