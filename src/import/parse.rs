#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DelimitedRow {
    /// 1-based line number in the source text.
    pub line_no: usize,
    pub fields: Vec<String>,
}

impl DelimitedRow {
    pub fn field(&self, idx: usize) -> &str {
        self.fields.get(idx).map(String::as_str).unwrap_or("")
    }
}

fn split_record(line: &str) -> Vec<String> {
    line.split(',').map(|f| f.trim().to_string()).collect()
}

/// Splits the payload into rows. The first line is always treated as a header
/// and dropped; lines with nothing but separators and whitespace are not rows.
pub fn parse_rows(text: &str) -> Vec<DelimitedRow> {
    let mut rows = Vec::new();
    for (i, line) in text.split('\n').enumerate().skip(1) {
        let fields = split_record(line);
        if fields.iter().all(|f| f.is_empty()) {
            continue;
        }
        rows.push(DelimitedRow {
            line_no: i + 1,
            fields,
        });
    }
    rows
}
