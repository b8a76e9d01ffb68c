use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use uuid::Uuid;

use super::error::ImportError;

pub const CSV_MEDIA_TYPE: &str = "text/csv";

/// File descriptor as delivered by the picker or a drop event.
#[derive(Debug, Clone, Deserialize)]
pub struct FileDescriptor {
    pub name: String,
    #[serde(rename = "type", default)]
    pub media_type: String,
    #[serde(default)]
    pub size: u64,
    #[serde(default)]
    pub path: Option<PathBuf>,
}

/// A file accepted for import. The id is what stale attempts are compared against
/// when the pending file gets replaced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileHandle {
    pub id: String,
    pub name: String,
    pub media_type: String,
    pub byte_len: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

impl FileHandle {
    pub fn accept(desc: FileDescriptor) -> Result<FileHandle, ImportError> {
        if !is_csv_media_type(&desc.media_type) {
            return Err(ImportError::UnsupportedFileType {
                media_type: desc.media_type,
            });
        }
        Ok(FileHandle {
            id: Uuid::new_v4().to_string(),
            name: desc.name,
            media_type: desc.media_type,
            byte_len: desc.size,
            path: desc.path,
        })
    }
}

pub fn is_csv_media_type(media_type: &str) -> bool {
    let essence = media_type.split(';').next().unwrap_or("").trim();
    essence.eq_ignore_ascii_case(CSV_MEDIA_TYPE)
}
