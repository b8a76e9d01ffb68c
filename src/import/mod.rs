//! CSV bulk import: file acquisition, parsing, validation and submission.

pub mod error;
pub mod importer;
pub mod notify;
pub mod outcome;
pub mod parse;
pub mod payload;
pub mod schema;
pub mod session;
pub mod submit;
pub mod validate;

pub use error::ImportError;
pub use importer::{Acquisition, ImportContext, ImportReport};
pub use notify::{Notification, NotificationQueue, Notifier, Severity};
pub use payload::FileDescriptor;
pub use schema::EntityKind;
pub use session::ImportSession;
pub use submit::{HttpSubmitter, Submitter};
