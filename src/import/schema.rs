use serde::Serialize;

use super::parse::DelimitedRow;

pub const DEFAULT_STATUS: &str = "Active";
pub const STATUS_COLUMN: &str = "status";
pub const DATE_COLUMNS: &[&str] = &["date_of_birth", "enrollment_date", "hire_date"];

const STUDENT_COLUMNS: &[&str] = &[
    "student_id",
    "first_name",
    "last_name",
    "date_of_birth",
    "gender",
    "contact_number",
    "email",
    "address",
    "enrollment_date",
];

const TEACHER_COLUMNS: &[&str] = &[
    "teacher_id",
    "first_name",
    "last_name",
    "contact_number",
    "email",
    "address",
    "hire_date",
    "specialization",
    "status",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Student,
    Teacher,
}

impl EntityKind {
    pub fn parse(s: &str) -> Option<EntityKind> {
        match s.trim().to_ascii_lowercase().as_str() {
            "student" | "students" => Some(EntityKind::Student),
            "teacher" | "teachers" => Some(EntityKind::Teacher),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Student => "student",
            EntityKind::Teacher => "teacher",
        }
    }

    /// REST collection segment for this entity.
    pub fn collection(&self) -> &'static str {
        match self {
            EntityKind::Student => "students",
            EntityKind::Teacher => "teachers",
        }
    }

    pub fn schema(&self) -> ColumnSchema {
        let columns = match self {
            EntityKind::Student => STUDENT_COLUMNS,
            EntityKind::Teacher => TEACHER_COLUMNS,
        };
        // Both built-in column lists carry the name columns.
        ColumnSchema::from_columns(columns.iter().map(|c| c.to_string()).collect(), 1, 2)
    }
}

/// Positional column layout for one record kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSchema {
    columns: Vec<String>,
    first_name_col: usize,
    last_name_col: usize,
}

impl ColumnSchema {
    /// Builds a schema from an ordered column list. Returns `None` unless both
    /// `first_name` and `last_name` are present.
    pub fn new<S: AsRef<str>>(columns: &[S]) -> Option<ColumnSchema> {
        let columns: Vec<String> = columns
            .iter()
            .map(|c| c.as_ref().trim().to_ascii_lowercase())
            .collect();
        let first = columns.iter().position(|c| c == "first_name")?;
        let last = columns.iter().position(|c| c == "last_name")?;
        Some(ColumnSchema::from_columns(columns, first, last))
    }

    fn from_columns(columns: Vec<String>, first_name_col: usize, last_name_col: usize) -> Self {
        ColumnSchema {
            columns,
            first_name_col,
            last_name_col,
        }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn has_status_column(&self) -> bool {
        self.columns.iter().any(|c| c == STATUS_COLUMN)
    }

    pub fn map_row(&self, row: &DelimitedRow) -> ImportRecordDraft {
        let fields = self
            .columns
            .iter()
            .enumerate()
            .map(|(i, c)| (c.clone(), row.field(i).to_string()))
            .collect();
        ImportRecordDraft {
            line_no: row.line_no,
            fields,
            first_name_col: self.first_name_col,
            last_name_col: self.last_name_col,
            extra_fields: row.fields.len().saturating_sub(self.columns.len()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportRecordDraft {
    pub line_no: usize,
    /// One entry per schema column, in schema order.
    pub fields: Vec<(String, String)>,
    first_name_col: usize,
    last_name_col: usize,
    pub extra_fields: usize,
}

impl ImportRecordDraft {
    pub fn get(&self, column: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(c, _)| c == column)
            .map(|(_, v)| v.as_str())
    }

    pub fn first_name(&self) -> &str {
        self.fields
            .get(self.first_name_col)
            .map(|(_, v)| v.as_str())
            .unwrap_or("")
    }

    pub fn last_name(&self) -> &str {
        self.fields
            .get(self.last_name_col)
            .map(|(_, v)| v.as_str())
            .unwrap_or("")
    }
}
