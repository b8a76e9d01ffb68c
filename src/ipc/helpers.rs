use serde_json::Value;

use super::error::HandlerErr;
use super::types::AppState;
use crate::i18n::Language;
use crate::import::EntityKind;

pub fn get_required_str(params: &Value, key: &str) -> Result<String, HandlerErr> {
    params
        .get(key)
        .and_then(|v| v.as_str())
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .ok_or_else(|| HandlerErr::bad_params(format!("missing {}", key)))
}

pub fn get_kind(params: &Value) -> Result<EntityKind, HandlerErr> {
    let raw = get_required_str(params, "kind")?;
    EntityKind::parse(&raw).ok_or_else(|| HandlerErr {
        code: "bad_params",
        message: format!("unknown kind: {}", raw),
        details: Some(serde_json::json!({ "allowed": ["student", "teacher"] })),
    })
}

/// `params.language` when given, otherwise the stored preference.
pub fn language_for(state: &AppState, params: &Value) -> Result<Language, HandlerErr> {
    match params.get("language").and_then(|v| v.as_str()) {
        Some(raw) => Language::parse(raw)
            .ok_or_else(|| HandlerErr::bad_params(format!("unknown language: {}", raw))),
        None => Ok(state.prefs.language),
    }
}
