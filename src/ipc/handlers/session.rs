use crate::db;
use crate::i18n::{self, Language};
use crate::ipc::error::{ok, HandlerErr};
use crate::ipc::helpers::{get_required_str, language_for};
use crate::ipc::types::{AppState, Request};
use serde_json::{json, Map, Value};

fn handle_session_get(state: &mut AppState, req: &Request) -> Value {
    ok(
        &req.id,
        json!({
            "username": state.prefs.username,
            "language": state.prefs.language,
        }),
    )
}

fn handle_session_set_user(state: &mut AppState, req: &Request) -> Value {
    let username = req
        .params
        .get("username")
        .and_then(|v| v.as_str())
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty());

    if let Some(conn) = state.db.as_ref() {
        let stored = match username.as_deref() {
            Some(u) => db::settings_set(conn, db::SETTING_USERNAME, u),
            None => db::settings_delete(conn, db::SETTING_USERNAME),
        };
        if let Err(e) = stored {
            return HandlerErr::storage(e).response(&req.id);
        }
    }
    tracing::info!(signed_in = username.is_some(), "session user updated");
    state.prefs.username = username;
    ok(&req.id, json!({ "username": state.prefs.username }))
}

fn handle_set_language(state: &mut AppState, req: &Request) -> Value {
    let raw = match get_required_str(&req.params, "language") {
        Ok(v) => v,
        Err(e) => return e.response(&req.id),
    };
    let Some(language) = Language::parse(&raw) else {
        return HandlerErr::bad_params(format!("unknown language: {}", raw)).response(&req.id);
    };
    if let Some(conn) = state.db.as_ref() {
        if let Err(e) = db::settings_set(conn, db::SETTING_LANGUAGE, language.as_str()) {
            return HandlerErr::storage(e).response(&req.id);
        }
    }
    state.prefs.language = language;
    ok(&req.id, json!({ "language": language }))
}

fn handle_translate(state: &mut AppState, req: &Request) -> Value {
    let key = match get_required_str(&req.params, "key") {
        Ok(v) => v,
        Err(e) => return e.response(&req.id),
    };
    let language = match language_for(state, &req.params) {
        Ok(v) => v,
        Err(e) => return e.response(&req.id),
    };
    ok(
        &req.id,
        json!({
            "key": key,
            "language": language,
            "text": i18n::translate(language, &key),
        }),
    )
}

fn handle_catalog(state: &mut AppState, req: &Request) -> Value {
    let language = match language_for(state, &req.params) {
        Ok(v) => v,
        Err(e) => return e.response(&req.id),
    };
    let entries: Map<String, Value> = i18n::catalog(language)
        .into_iter()
        .map(|(k, v)| (k.to_string(), Value::String(v.to_string())))
        .collect();
    ok(&req.id, json!({ "language": language, "entries": entries }))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<Value> {
    match req.method.as_str() {
        "session.get" => Some(handle_session_get(state, req)),
        "session.setUser" => Some(handle_session_set_user(state, req)),
        "i18n.setLanguage" => Some(handle_set_language(state, req)),
        "i18n.translate" => Some(handle_translate(state, req)),
        "i18n.catalog" => Some(handle_catalog(state, req)),
        _ => None,
    }
}
