use serde::{Deserialize, Serialize};

/// Unique identifier for a document view (one open buffer shown in the editor)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BufferId(pub usize);

/// A modification reported by the host buffer
///
/// The highlighter never tries to shift existing matches through an edit; any
/// edit invalidates the whole match set, so only the shape of the change is
/// kept for logging.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BufferEdit {
    /// Byte position where the modification happened
    pub position: usize,
    /// Inserted text (empty for pure deletions)
    pub inserted_text: String,
    /// Number of bytes removed at `position`
    pub deleted_len: usize,
}

impl BufferEdit {
    /// Edit that inserted `text` at `position`
    pub fn insert(position: usize, text: impl Into<String>) -> Self {
        Self {
            position,
            inserted_text: text.into(),
            deleted_len: 0,
        }
    }

    /// Edit that deleted `len` bytes at `position`
    pub fn delete(position: usize, len: usize) -> Self {
        Self {
            position,
            inserted_text: String::new(),
            deleted_len: len,
        }
    }
}
