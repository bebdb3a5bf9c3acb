//! Selected source file.

use std::fmt;

use bytes::Bytes;

/// A user-selected file awaiting upload.
///
/// Immutable once selected; replacing the selection discards all downstream
/// workflow state.
#[derive(Clone)]
pub struct SourceFile {
    /// Display name as supplied by the user.
    pub name: String,
    /// Declared MIME type sent with the blob transfer.
    pub content_type: String,
    /// Raw payload.
    pub data: Bytes,
}

impl SourceFile {
    pub fn new(
        name: impl Into<String>,
        content_type: impl Into<String>,
        data: impl Into<Bytes>,
    ) -> Self {
        Self {
            name: name.into(),
            content_type: content_type.into(),
            data: data.into(),
        }
    }

    /// Build a source file, guessing the MIME type from the extension when
    /// the caller does not declare one.
    pub fn with_guessed_type(name: impl Into<String>, data: impl Into<Bytes>) -> Self {
        let name = name.into();
        let content_type = guess_content_type(&name).to_string();
        Self {
            name,
            content_type,
            data: data.into(),
        }
    }

    /// Payload size in bytes.
    pub fn size(&self) -> usize {
        self.data.len()
    }
}

impl fmt::Debug for SourceFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SourceFile")
            .field("name", &self.name)
            .field("content_type", &self.content_type)
            .field("bytes", &self.data.len())
            .finish()
    }
}

/// Map common video extensions to MIME types.
fn guess_content_type(name: &str) -> &'static str {
    let extension = name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase());

    match extension.as_deref() {
        Some("mp4" | "m4v") => "video/mp4",
        Some("mov") => "video/quicktime",
        Some("webm") => "video/webm",
        Some("mkv") => "video/x-matroska",
        Some("avi") => "video/x-msvideo",
        _ => "application/octet-stream",
    }
}
