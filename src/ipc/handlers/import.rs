use crate::i18n::{self, Language};
use crate::import::importer::{self, Acquisition, ImportContext};
use crate::import::schema::{ColumnSchema, DEFAULT_STATUS};
use crate::import::session::DialogState;
use crate::import::validate::build_outcome;
use crate::import::{EntityKind, FileDescriptor, ImportError, ImportSession};
use crate::ipc::error::{ok, HandlerErr};
use crate::ipc::helpers::{get_kind, get_required_str, language_for};
use crate::ipc::types::{AppState, Request};
use serde_json::{json, Value};

fn split_state(
    state: &mut AppState,
    kind: EntityKind,
    language: Language,
) -> (&mut ImportSession, ImportContext<'_>) {
    let AppState {
        imports,
        notifications,
        submitter,
        prefs,
        ..
    } = state;
    let ctx = ImportContext {
        language,
        principal: prefs.username.as_deref(),
        submitter: &**submitter,
        notifier: notifications,
    };
    (imports.get_mut(kind), ctx)
}

/// Attaches the dialog state and any queued notifications to a result.
fn respond(state: &mut AppState, id: &str, dialog: DialogState, mut result: Value) -> Value {
    result["state"] = json!(dialog);
    result["notifications"] = json!(state.notifications.drain());
    ok(id, result)
}

fn error_json(e: &ImportError) -> Value {
    json!({ "code": e.code(), "message": e.to_string() })
}

fn kind_and_language(state: &AppState, req: &Request) -> Result<(EntityKind, Language), HandlerErr> {
    Ok((get_kind(&req.params)?, language_for(state, &req.params)?))
}

fn handle_dialog_event(state: &mut AppState, req: &Request, apply: fn(&mut ImportSession)) -> Value {
    let kind = match get_kind(&req.params) {
        Ok(v) => v,
        Err(e) => return e.response(&req.id),
    };
    let session = state.imports.get_mut(kind);
    apply(session);
    let dialog = session.snapshot();
    respond(state, &req.id, dialog, json!({ "kind": kind }))
}

fn handle_acquire(state: &mut AppState, req: &Request, via: Acquisition) -> Value {
    let (kind, language) = match kind_and_language(state, req) {
        Ok(v) => v,
        Err(e) => return e.response(&req.id),
    };
    let files: Vec<FileDescriptor> = match req.params.get("files") {
        None | Some(Value::Null) => Vec::new(),
        Some(v) => match serde_json::from_value(v.clone()) {
            Ok(files) => files,
            Err(e) => return HandlerErr::bad_params(format!("invalid files: {}", e)).response(&req.id),
        },
    };

    let (session, mut ctx) = split_state(state, kind, language);
    let result = importer::acquire(session, via, files, &mut ctx);
    let dialog = session.snapshot();
    let body = match result {
        Ok(changed) => json!({ "kind": kind, "accepted": changed }),
        Err(e) => json!({ "kind": kind, "accepted": false, "error": error_json(&e) }),
    };
    respond(state, &req.id, dialog, body)
}

fn handle_schema(state: &mut AppState, req: &Request) -> Value {
    let (kind, language) = match kind_and_language(state, req) {
        Ok(v) => v,
        Err(e) => return e.response(&req.id),
    };
    let schema = kind.schema();
    let columns: Vec<Value> = schema
        .columns()
        .iter()
        .map(|c| {
            json!({
                "key": c,
                "label": i18n::translate(language, c),
                "required": c == "first_name" || c == "last_name",
            })
        })
        .collect();
    ok(
        &req.id,
        json!({
            "kind": kind,
            "columns": columns,
            "headerLine": schema.columns().join(","),
            "statusColumn": schema.has_status_column(),
            "statusDefault": DEFAULT_STATUS,
        }),
    )
}

/// `params.columns` overrides the built-in layout for a preview.
fn preview_schema(kind: EntityKind, params: &Value) -> Result<ColumnSchema, HandlerErr> {
    let columns = match params.get("columns") {
        None | Some(Value::Null) => return Ok(kind.schema()),
        Some(v) => serde_json::from_value::<Vec<String>>(v.clone())
            .map_err(|e| HandlerErr::bad_params(format!("invalid columns: {}", e)))?,
    };
    ColumnSchema::new(columns.as_slice()).ok_or_else(|| HandlerErr {
        code: "bad_params",
        message: "columns must include first_name and last_name".to_string(),
        details: Some(json!({ "columns": columns })),
    })
}

fn handle_preview(state: &mut AppState, req: &Request) -> Value {
    let kind = match get_kind(&req.params) {
        Ok(v) => v,
        Err(e) => return e.response(&req.id),
    };
    let Some(text) = req.params.get("text").and_then(|v| v.as_str()) else {
        return HandlerErr::bad_params("missing text").response(&req.id);
    };
    let schema = match preview_schema(kind, &req.params) {
        Ok(v) => v,
        Err(e) => return e.response(&req.id),
    };
    let outcome = build_outcome(text, &schema);
    let dialog = state.imports.get_mut(kind).snapshot();
    let mut body = outcome.summary_json();
    body["kind"] = json!(kind);
    body["records"] = json!(outcome.accepted);
    respond(state, &req.id, dialog, body)
}

fn handle_begin(state: &mut AppState, req: &Request) -> Value {
    let (kind, language) = match kind_and_language(state, req) {
        Ok(v) => v,
        Err(e) => return e.response(&req.id),
    };
    let (session, mut ctx) = split_state(state, kind, language);
    let result = importer::begin(session, &mut ctx);
    let dialog = session.snapshot();
    let body = match result {
        Ok(attempt) => json!({
            "kind": kind,
            "started": true,
            "attemptToken": attempt.token,
            "file": attempt.file,
        }),
        Err(e) => json!({ "kind": kind, "started": false, "error": error_json(&e) }),
    };
    respond(state, &req.id, dialog, body)
}

fn handle_complete(state: &mut AppState, req: &Request) -> Value {
    let (kind, language) = match kind_and_language(state, req) {
        Ok(v) => v,
        Err(e) => return e.response(&req.id),
    };
    let token = match get_required_str(&req.params, "attemptToken") {
        Ok(v) => v,
        Err(e) => return e.response(&req.id),
    };
    let text = req.params.get("text").and_then(|v| v.as_str());
    let read_error = req.params.get("readError").and_then(|v| v.as_str());
    let read = match (text, read_error) {
        (_, Some(msg)) => Err(msg.to_string()),
        (Some(t), None) => Ok(t.to_string()),
        (None, None) => return HandlerErr::bad_params("missing text or readError").response(&req.id),
    };

    let (session, mut ctx) = split_state(state, kind, language);
    let report = importer::complete(session, kind, &token, read, &mut ctx);
    let dialog = session.snapshot();
    respond(state, &req.id, dialog, report.to_json())
}

fn handle_run(state: &mut AppState, req: &Request) -> Value {
    let (kind, language) = match kind_and_language(state, req) {
        Ok(v) => v,
        Err(e) => return e.response(&req.id),
    };
    let (session, mut ctx) = split_state(state, kind, language);
    let body = match importer::run_pending(session, kind, &mut ctx) {
        Ok(report) => report.to_json(),
        Err(e) => json!({ "kind": kind, "stale": false, "succeeded": false, "error": error_json(&e) }),
    };
    let dialog = session.snapshot();
    respond(state, &req.id, dialog, body)
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<Value> {
    match req.method.as_str() {
        "import.open" => Some(handle_dialog_event(state, req, ImportSession::open)),
        "import.close" => Some(handle_dialog_event(state, req, ImportSession::close)),
        "import.dragEnter" => Some(handle_dialog_event(state, req, ImportSession::drag_enter)),
        "import.dragLeave" => Some(handle_dialog_event(state, req, ImportSession::drag_leave)),
        "import.state" => Some(handle_dialog_event(state, req, |_| {})),
        "import.select" => Some(handle_acquire(state, req, Acquisition::Select)),
        "import.drop" => Some(handle_acquire(state, req, Acquisition::Drop)),
        "import.schema" => Some(handle_schema(state, req)),
        "import.preview" => Some(handle_preview(state, req)),
        "import.begin" => Some(handle_begin(state, req)),
        "import.complete" => Some(handle_complete(state, req)),
        "import.run" => Some(handle_run(state, req)),
        _ => None,
    }
}
