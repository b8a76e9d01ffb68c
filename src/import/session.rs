use serde::Serialize;
use uuid::Uuid;

use super::error::ImportError;
use super::payload::{FileDescriptor, FileHandle};

/// An import attempt that has been started but not yet finished.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attempt {
    pub token: String,
    pub file: FileHandle,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DialogState {
    pub open: bool,
    pub dragging: bool,
    pub pending_file: Option<FileHandle>,
    pub import_in_progress: bool,
}

/// State of one import dialog: the pending file, the drag highlight, and the
/// token of the attempt currently in flight. Any reset drops the token, so a
/// late completion for an older attempt is recognised as stale.
#[derive(Debug, Default)]
pub struct ImportSession {
    open: bool,
    dragging: bool,
    pending: Option<FileHandle>,
    in_flight: Option<String>,
}

impl ImportSession {
    pub fn open(&mut self) {
        self.open = true;
        self.dragging = false;
    }

    pub fn close(&mut self) {
        self.open = false;
        self.dragging = false;
        self.pending = None;
        self.in_flight = None;
    }

    pub fn drag_enter(&mut self) {
        self.dragging = true;
    }

    pub fn drag_leave(&mut self) {
        self.dragging = false;
    }

    pub fn select(&mut self, files: Vec<FileDescriptor>) -> Result<bool, ImportError> {
        self.acquire(files)
    }

    pub fn drop_files(&mut self, files: Vec<FileDescriptor>) -> Result<bool, ImportError> {
        self.dragging = false;
        self.acquire(files)
    }

    /// Returns `Ok(false)` when the event carried no files.
    fn acquire(&mut self, files: Vec<FileDescriptor>) -> Result<bool, ImportError> {
        let Some(first) = files.into_iter().next() else {
            return Ok(false);
        };
        self.in_flight = None;
        match FileHandle::accept(first) {
            Ok(handle) => {
                self.pending = Some(handle);
                Ok(true)
            }
            Err(e) => {
                self.pending = None;
                Err(e)
            }
        }
    }

    pub fn pending_file(&self) -> Option<&FileHandle> {
        self.pending.as_ref()
    }

    pub fn in_progress(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn begin(&mut self) -> Result<Attempt, ImportError> {
        if self.in_flight.is_some() {
            return Err(ImportError::ImportInProgress);
        }
        let Some(file) = self.pending.clone() else {
            return Err(ImportError::NoPendingFile);
        };
        let token = Uuid::new_v4().to_string();
        self.in_flight = Some(token.clone());
        Ok(Attempt { token, file })
    }

    pub fn is_current(&self, token: &str) -> bool {
        self.in_flight.as_deref() == Some(token)
    }

    /// Ends the attempt. A successful import resets the dialog; a failed one
    /// keeps the pending file for a retry. Returns false for a stale token.
    pub fn finish(&mut self, token: &str, succeeded: bool) -> bool {
        if !self.is_current(token) {
            return false;
        }
        self.in_flight = None;
        if succeeded {
            self.close();
        }
        true
    }

    pub fn snapshot(&self) -> DialogState {
        DialogState {
            open: self.open,
            dragging: self.dragging,
            pending_file: self.pending.clone(),
            import_in_progress: self.in_progress(),
        }
    }
}
