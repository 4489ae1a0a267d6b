#[cfg(test)]
#[path = "note_format_test.rs"]
mod note_format_test;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::page::PageOp;

pub const NOTE_FILE_VERSION: u32 = 1;

/// The downloadable note document: every page's operation log, versioned.
///
/// This is a file exchange format only; nothing is persisted across reloads.
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct NoteFile {
    pub version: u32,
    pub pages: Vec<Vec<PageOp>>,
}

#[derive(Debug, Error)]
pub enum NoteFileError {
    #[error("unsupported note file version {0}")]
    UnsupportedVersion(u32),
    #[error("invalid note file: {0}")]
    Invalid(#[from] serde_json::Error),
}

pub fn encode_note_file(note: &NoteFile) -> Result<String, NoteFileError> {
    Ok(serde_json::to_string(note)?)
}

pub fn decode_note_file(text: &str) -> Result<NoteFile, NoteFileError> {
    let note: NoteFile = serde_json::from_str(text)?;
    if note.version != NOTE_FILE_VERSION {
        return Err(NoteFileError::UnsupportedVersion(note.version));
    }
    Ok(note)
}
