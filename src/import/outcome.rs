use serde::Serialize;
use std::collections::BTreeMap;

/// A row that passed the required-field policy with defaults applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidatedRecord {
    #[serde(skip)]
    pub line_no: usize,
    #[serde(flatten)]
    pub fields: BTreeMap<String, String>,
}

impl ValidatedRecord {
    pub fn get(&self, column: &str) -> Option<&str> {
        self.fields.get(column).map(String::as_str)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectReason {
    MissingFirstName,
    MissingLastName,
    MissingName,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RejectedRow {
    pub line: usize,
    pub reason: RejectReason,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldWarning {
    pub line: usize,
    pub code: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeStatus {
    Success,
    Partial,
    Failed,
    EmptyInput,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportOutcome {
    pub rows_parsed: usize,
    pub accepted: Vec<ValidatedRecord>,
    pub rejected: Vec<RejectedRow>,
    pub warnings: Vec<FieldWarning>,
}

impl ImportOutcome {
    pub fn accepted_count(&self) -> usize {
        self.accepted.len()
    }

    pub fn status(&self) -> OutcomeStatus {
        if self.rows_parsed == 0 {
            OutcomeStatus::EmptyInput
        } else if self.accepted.is_empty() {
            OutcomeStatus::Failed
        } else if !self.rejected.is_empty() {
            OutcomeStatus::Partial
        } else {
            OutcomeStatus::Success
        }
    }

    pub fn summary_json(&self) -> serde_json::Value {
        serde_json::json!({
            "status": self.status(),
            "rowsParsed": self.rows_parsed,
            "accepted": self.accepted_count(),
            "rejected": self.rejected,
            "warnings": self.warnings,
        })
    }
}
