#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ImportError {
    #[error("unsupported file type: {media_type}")]
    UnsupportedFileType { media_type: String },

    #[error("no importable rows ({rows_parsed} parsed, 0 accepted)")]
    EmptyOrAllInvalid { rows_parsed: usize },

    #[error("submission failed: {0}")]
    SubmissionFailed(String),

    #[error("failed to read import file: {0}")]
    ReadFailed(String),

    #[error("no file selected for import")]
    NoPendingFile,

    #[error("an import is already in progress")]
    ImportInProgress,
}

impl ImportError {
    pub fn code(&self) -> &'static str {
        match self {
            ImportError::UnsupportedFileType { .. } => "unsupported_file_type",
            ImportError::EmptyOrAllInvalid { .. } => "empty_or_all_invalid",
            ImportError::SubmissionFailed(_) => "submission_failed",
            ImportError::ReadFailed(_) => "read_failed",
            ImportError::NoPendingFile => "no_pending_file",
            ImportError::ImportInProgress => "import_in_progress",
        }
    }

    /// Catalog key of the message shown to the user.
    pub fn message_key(&self) -> &'static str {
        match self {
            ImportError::UnsupportedFileType { .. } => "invalid_csv_file",
            ImportError::EmptyOrAllInvalid { .. } => "csv_import_empty",
            ImportError::SubmissionFailed(_) => "csv_import_failed",
            ImportError::ReadFailed(_) => "csv_read_failed",
            ImportError::NoPendingFile => "no_file_selected",
            ImportError::ImportInProgress => "import_in_progress",
        }
    }
}
