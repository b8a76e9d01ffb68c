//! Sidecar for the tuition-management front-end: CSV bulk import of student
//! and teacher records, the translation catalog for import messages, and the
//! JSON-lines IPC protocol the front-end speaks to it.

pub mod config;
pub mod db;
pub mod i18n;
pub mod import;
pub mod ipc;
