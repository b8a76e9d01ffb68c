//! Translation catalog for user-facing text.
//!
//! There is no process-wide "current language": every lookup takes the
//! language explicitly. Missing entries fall back to English, then to the key.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    English,
    Sinhala,
}

impl Language {
    pub fn parse(s: &str) -> Option<Language> {
        match s.trim().to_ascii_lowercase().as_str() {
            "english" | "en" => Some(Language::English),
            "sinhala" | "si" => Some(Language::Sinhala),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Language::English => "english",
            Language::Sinhala => "sinhala",
        }
    }

    fn table(&self) -> &'static [(&'static str, &'static str)] {
        match self {
            Language::English => ENGLISH,
            Language::Sinhala => SINHALA,
        }
    }
}

const ENGLISH: &[(&str, &str)] = &[
    ("students", "Students"),
    ("teachers", "Teachers"),
    ("add_student", "Add Student"),
    ("add_teacher", "Add Teacher"),
    ("import_student_list", "Import Student List"),
    ("import_teacher_list", "Import Teacher List"),
    ("drag_drop_csv", "Drag & Drop CSV File Here"),
    ("choose_file", "Choose File"),
    ("cancel", "Cancel"),
    ("import", "Import"),
    ("close", "Close"),
    ("csv_import_success", "CSV import successful"),
    ("csv_import_failed", "CSV import failed"),
    ("csv_import_empty", "No valid rows found in the CSV file"),
    ("csv_read_failed", "Could not read the selected file"),
    ("invalid_csv_file", "Please select a valid CSV file"),
    ("no_file_selected", "Select a CSV file first"),
    ("import_in_progress", "An import is already running"),
    ("student_id", "Student ID"),
    ("teacher_id", "Teacher ID"),
    ("id", "ID"),
    ("first_name", "First Name"),
    ("last_name", "Last Name"),
    ("date_of_birth", "Date of Birth"),
    ("gender", "Gender"),
    ("contact_number", "Contact Number"),
    ("email", "Email"),
    ("address", "Address"),
    ("enrollment_date", "Admission Date"),
    ("hire_date", "Hire Date"),
    ("specialization", "Subject"),
    ("status", "Status"),
];

const SINHALA: &[(&str, &str)] = &[
    ("students", "සිසුන්"),
    ("teachers", "ගුරුවරු"),
    ("add_student", "සිසුවෙකු එකතු කරන්න"),
    ("add_teacher", "ගුරුවරයෙකු එකතු කරන්න"),
    ("import_teacher_list", "ගුරු ලැයිස්තුව ආයාත කරන්න"),
    ("drag_drop_csv", "CSV ගොනුව මෙහි ඇද දමන්න"),
    ("choose_file", "ගොනුව තෝරන්න"),
    ("cancel", "අවලංගු කරන්න"),
    ("import", "ආයාත කරන්න"),
    ("close", "වසන්න"),
    ("csv_import_success", "CSV ආයාත කිරීම සාර්ථකයි"),
    ("csv_import_failed", "CSV ආයාත කිරීම අසාර්ථකයි"),
    ("invalid_csv_file", "කරුණාකර වලංගු CSV ගොනුවක් තෝරන්න"),
    ("student_id", "සිසු අංකය"),
    ("teacher_id", "ගුරු අංකය"),
    ("first_name", "මුල් නම"),
    ("last_name", "අවසන් නම"),
    ("date_of_birth", "උපන් දිනය"),
    ("gender", "ස්ත්‍රී පුරුෂ භාවය"),
    ("contact_number", "සම්බන්ධතා අංකය"),
    ("email", "ඊමේල්"),
    ("address", "ලිපිනය"),
    ("enrollment_date", "ඇතුලත් වූ දිනය"),
    ("specialization", "විෂය"),
];

fn lookup(table: &'static [(&'static str, &'static str)], key: &str) -> Option<&'static str> {
    table.iter().find(|(k, _)| *k == key).map(|(_, v)| *v)
}

pub fn translate<'a>(language: Language, key: &'a str) -> &'a str {
    lookup(language.table(), key)
        .or_else(|| lookup(ENGLISH, key))
        .unwrap_or(key)
}

/// Every known key rendered in `language`, in catalog order.
pub fn catalog(language: Language) -> Vec<(&'static str, &'static str)> {
    ENGLISH
        .iter()
        .map(|&(k, _)| (k, translate(language, k)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_uses_requested_language() {
        assert_eq!(translate(Language::English, "csv_import_failed"), "CSV import failed");
        assert_eq!(translate(Language::Sinhala, "cancel"), "අවලංගු කරන්න");
    }

    #[test]
    fn missing_entries_fall_back_to_english_then_key() {
        assert_eq!(translate(Language::Sinhala, "hire_date"), "Hire Date");
        assert_eq!(translate(Language::Sinhala, "no_such_key"), "no_such_key");
    }

    #[test]
    fn sinhala_keys_are_a_subset_of_english() {
        for (k, _) in SINHALA {
            assert!(lookup(ENGLISH, k).is_some(), "{} missing from english", k);
        }
    }

    #[test]
    fn language_parse_accepts_codes() {
        assert_eq!(Language::parse("SI"), Some(Language::Sinhala));
        assert_eq!(Language::parse("english"), Some(Language::English));
        assert_eq!(Language::parse("fr"), None);
    }

    #[test]
    fn catalog_covers_every_english_key() {
        assert_eq!(catalog(Language::Sinhala).len(), ENGLISH.len());
    }
}
