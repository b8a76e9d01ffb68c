use chrono::NaiveDate;
use std::collections::BTreeMap;

use super::outcome::{FieldWarning, ImportOutcome, RejectReason, RejectedRow, ValidatedRecord};
use super::parse::parse_rows;
use super::schema::{ColumnSchema, ImportRecordDraft, DATE_COLUMNS, DEFAULT_STATUS, STATUS_COLUMN};

fn reject_reason(draft: &ImportRecordDraft) -> Option<RejectReason> {
    let first_missing = draft.first_name().trim().is_empty();
    let last_missing = draft.last_name().trim().is_empty();
    match (first_missing, last_missing) {
        (false, false) => None,
        (true, true) => Some(RejectReason::MissingName),
        (true, false) => Some(RejectReason::MissingFirstName),
        (false, true) => Some(RejectReason::MissingLastName),
    }
}

fn field_warnings(draft: &ImportRecordDraft, out: &mut Vec<FieldWarning>) {
    for (column, value) in &draft.fields {
        if value.is_empty() || !DATE_COLUMNS.contains(&column.as_str()) {
            continue;
        }
        if NaiveDate::parse_from_str(value, "%Y-%m-%d").is_err() {
            out.push(FieldWarning {
                line: draft.line_no,
                code: "invalid_date",
                field: Some(column.clone()),
                message: format!("{} is not a YYYY-MM-DD date: {}", column, value),
            });
        }
    }
    if draft.extra_fields > 0 {
        out.push(FieldWarning {
            line: draft.line_no,
            code: "extra_fields",
            field: None,
            message: format!("{} field(s) beyond the last column were ignored", draft.extra_fields),
        });
    }
}

fn finalize(draft: ImportRecordDraft) -> ValidatedRecord {
    let line_no = draft.line_no;
    let mut fields: BTreeMap<String, String> = draft.fields.into_iter().collect();
    let status = fields.entry(STATUS_COLUMN.to_string()).or_default();
    if status.is_empty() {
        *status = DEFAULT_STATUS.to_string();
    }
    ValidatedRecord { line_no, fields }
}

pub fn validate_drafts(drafts: Vec<ImportRecordDraft>) -> ImportOutcome {
    let rows_parsed = drafts.len();
    let mut accepted = Vec::new();
    let mut rejected = Vec::new();
    let mut warnings = Vec::new();
    for draft in drafts {
        if let Some(reason) = reject_reason(&draft) {
            rejected.push(RejectedRow {
                line: draft.line_no,
                reason,
            });
            continue;
        }
        field_warnings(&draft, &mut warnings);
        accepted.push(finalize(draft));
    }
    ImportOutcome {
        rows_parsed,
        accepted,
        rejected,
        warnings,
    }
}

/// Parse, map and validate one payload. Pure: no I/O, no shared state.
pub fn build_outcome(text: &str, schema: &ColumnSchema) -> ImportOutcome {
    let drafts = parse_rows(text)
        .iter()
        .map(|row| schema.map_row(row))
        .collect();
    validate_drafts(drafts)
}
