use std::path::PathBuf;

use rusqlite::Connection;
use serde::Deserialize;

use crate::i18n::Language;
use crate::import::{EntityKind, ImportSession, NotificationQueue, Submitter};

#[derive(Debug, Deserialize, Clone)]
pub struct Request {
    pub id: String,
    pub method: String,
    #[serde(default)]
    pub params: serde_json::Value,
}

#[derive(Debug, Default)]
pub struct Preferences {
    pub username: Option<String>,
    pub language: Language,
}

/// One import dialog per entity screen.
#[derive(Debug, Default)]
pub struct ImportDialogs {
    students: ImportSession,
    teachers: ImportSession,
}

impl ImportDialogs {
    pub fn get_mut(&mut self, kind: EntityKind) -> &mut ImportSession {
        match kind {
            EntityKind::Student => &mut self.students,
            EntityKind::Teacher => &mut self.teachers,
        }
    }
}

pub struct AppState {
    pub workspace: Option<PathBuf>,
    pub db: Option<Connection>,
    pub prefs: Preferences,
    pub imports: ImportDialogs,
    pub notifications: NotificationQueue,
    pub submitter: Box<dyn Submitter>,
}
