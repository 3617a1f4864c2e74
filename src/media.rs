//! Encoding uploaded files into storable text.
//!
//! The persisted schema keeps media as data URLs
//! (`data:<mime>;base64,<payload>`), so a text-only key-value store can hold
//! them. For filesystem hosts, [`read_media_file`] stands in for a browser
//! file picker: it reads the bytes, guesses a MIME type from the extension
//! and produces the encoded form plus the metadata the record needs.

use std::fs;
use std::path::Path;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde::Serialize;

use crate::error::{StoreError, StoreResult};

/// An encoded upload, ready to drop into a create/update input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EncodedMedia {
    pub file_name: String,
    pub file_size: u64,
    pub data_url: String,
}

fn mime_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());
    match ext.as_deref() {
        Some("mp4") => "video/mp4",
        Some("webm") => "video/webm",
        Some("ogg" | "ogv") => "video/ogg",
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        _ => "application/octet-stream",
    }
}

/// Encodes raw bytes as a data URL with the given MIME type.
pub fn encode_data_url(mime: &str, bytes: &[u8]) -> String {
    format!("data:{mime};base64,{}", STANDARD.encode(bytes))
}

/// Reads a file and returns its encoded form. Failing to read the file
/// fails the enclosing create/update; nothing is persisted in that case.
pub fn read_media_file(path: impl AsRef<Path>) -> StoreResult<EncodedMedia> {
    let path = path.as_ref();
    let bytes = fs::read(path).map_err(|source| StoreError::MediaRead {
        path: path.display().to_string(),
        source,
    })?;
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default()
        .to_string();
    Ok(EncodedMedia {
        file_name,
        file_size: bytes.len() as u64,
        data_url: encode_data_url(mime_for(path), &bytes),
    })
}
