use serde_json::{json, Value};

use crate::i18n::{translate, Language};

use super::error::ImportError;
use super::notify::{Notification, Notifier, Severity};
use super::outcome::ImportOutcome;
use super::payload::FileDescriptor;
use super::schema::EntityKind;
use super::session::{Attempt, ImportSession};
use super::submit::{SubmitError, Submitter};
use super::validate::build_outcome;

/// Collaborators and caller context for one import action.
pub struct ImportContext<'a> {
    pub language: Language,
    pub principal: Option<&'a str>,
    pub submitter: &'a dyn Submitter,
    pub notifier: &'a mut dyn Notifier,
}

impl ImportContext<'_> {
    fn notify_error(&mut self, e: &ImportError) {
        let message = translate(self.language, e.message_key());
        let action = translate(self.language, "close");
        self.notifier
            .notify(Notification::snackbar(Severity::Error, message, action));
    }

    fn notify_success(&mut self) {
        let message = translate(self.language, "csv_import_success");
        let action = translate(self.language, "close");
        self.notifier
            .notify(Notification::snackbar(Severity::Success, message, action));
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Acquisition {
    Select,
    Drop,
}

#[derive(Debug)]
pub struct ImportReport {
    pub kind: EntityKind,
    pub stale: bool,
    pub outcome: Option<ImportOutcome>,
    pub submitted: usize,
    pub error: Option<ImportError>,
}

impl ImportReport {
    fn stale(kind: EntityKind) -> Self {
        ImportReport {
            kind,
            stale: true,
            outcome: None,
            submitted: 0,
            error: None,
        }
    }

    pub fn succeeded(&self) -> bool {
        !self.stale && self.error.is_none()
    }

    pub fn to_json(&self) -> Value {
        json!({
            "kind": self.kind,
            "stale": self.stale,
            "succeeded": self.succeeded(),
            "submitted": self.submitted,
            "outcome": self.outcome.as_ref().map(|o| o.summary_json()),
            "error": self.error.as_ref().map(|e| json!({
                "code": e.code(),
                "message": e.to_string(),
            })),
        })
    }
}

/// Handles a picker selection or a drop. Rejections are reported through the
/// notifier; the caller only sees whether a file is now pending.
pub fn acquire(
    session: &mut ImportSession,
    via: Acquisition,
    files: Vec<FileDescriptor>,
    ctx: &mut ImportContext<'_>,
) -> Result<bool, ImportError> {
    let result = match via {
        Acquisition::Select => session.select(files),
        Acquisition::Drop => session.drop_files(files),
    };
    if let Err(e) = &result {
        tracing::warn!(error = %e, ?via, "import file rejected");
        ctx.notify_error(e);
    }
    result
}

pub fn begin(session: &mut ImportSession, ctx: &mut ImportContext<'_>) -> Result<Attempt, ImportError> {
    match session.begin() {
        Ok(attempt) => {
            tracing::debug!(token = %attempt.token, file = %attempt.file.name, "import attempt started");
            Ok(attempt)
        }
        Err(e) => {
            ctx.notify_error(&e);
            Err(e)
        }
    }
}

/// Resumes an attempt once the file text (or a read error) is available.
/// Results for a token that is no longer current are dropped silently.
pub fn complete(
    session: &mut ImportSession,
    kind: EntityKind,
    token: &str,
    read: Result<String, String>,
    ctx: &mut ImportContext<'_>,
) -> ImportReport {
    if !session.is_current(token) {
        tracing::debug!(token, "discarding stale import completion");
        return ImportReport::stale(kind);
    }

    let text = match read {
        Ok(t) => t,
        Err(msg) => return fail(session, kind, token, None, ImportError::ReadFailed(msg), ctx),
    };

    let outcome = build_outcome(&text, &kind.schema());
    tracing::info!(
        kind = kind.as_str(),
        rows_parsed = outcome.rows_parsed,
        accepted = outcome.accepted_count(),
        rejected = outcome.rejected.len(),
        "parsed import payload"
    );
    if outcome.accepted.is_empty() {
        let e = ImportError::EmptyOrAllInvalid {
            rows_parsed: outcome.rows_parsed,
        };
        return fail(session, kind, token, Some(outcome), e, ctx);
    }

    let submitted = match ctx.principal.filter(|p| !p.trim().is_empty()) {
        None => Err(SubmitError::MissingPrincipal),
        Some(principal) => ctx.submitter.submit(kind, principal, &outcome.accepted),
    };
    if let Err(se) = submitted {
        let e = ImportError::SubmissionFailed(se.to_string());
        return fail(session, kind, token, Some(outcome), e, ctx);
    }

    if !session.finish(token, true) {
        return ImportReport::stale(kind);
    }
    ctx.notify_success();
    let submitted = outcome.accepted_count();
    tracing::info!(kind = kind.as_str(), submitted, "import batch accepted by server");
    ImportReport {
        kind,
        stale: false,
        outcome: Some(outcome),
        submitted,
        error: None,
    }
}

fn fail(
    session: &mut ImportSession,
    kind: EntityKind,
    token: &str,
    outcome: Option<ImportOutcome>,
    error: ImportError,
    ctx: &mut ImportContext<'_>,
) -> ImportReport {
    if !session.finish(token, false) {
        return ImportReport::stale(kind);
    }
    tracing::warn!(kind = kind.as_str(), error = %error, "import attempt failed");
    ctx.notify_error(&error);
    ImportReport {
        kind,
        stale: false,
        outcome,
        submitted: 0,
        error: Some(error),
    }
}

/// One-shot import of a pending file that lives on disk.
pub fn run_pending(
    session: &mut ImportSession,
    kind: EntityKind,
    ctx: &mut ImportContext<'_>,
) -> Result<ImportReport, ImportError> {
    let attempt = begin(session, ctx)?;
    let read = match attempt.file.path.as_ref() {
        Some(path) => std::fs::read_to_string(path).map_err(|e| e.to_string()),
        None => Err("file has no local path; send its text with import.complete".to_string()),
    };
    Ok(complete(session, kind, &attempt.token, read, ctx))
}
