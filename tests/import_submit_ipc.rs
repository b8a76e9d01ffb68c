mod test_support;

use serde_json::json;
use std::io::BufReader;
use std::process::{ChildStdin, ChildStdout};
use test_support::{
    mock_import_api, received_imports, request_ok, spawn_sidecar, temp_dir, write_csv, DEAD_API,
};
use tokio::runtime::Runtime;

const STUDENTS_CSV: &str = "student_id,first_name,last_name,date_of_birth,gender,contact_number,email,address,enrollment_date\n\
S1, Ann ,Lee,2010-04-01,F,0771234567,ann@example.com,Colombo,2024-01-10\n\
S2,Bo,Kim\n\
S3,,Ng\n\
S4,Cy,Perera\n";

fn sign_in(stdin: &mut ChildStdin, reader: &mut BufReader<ChildStdout>) {
    let _ = request_ok(stdin, reader, "u", "session.setUser", json!({ "username": "admin" }));
}

fn select_file(
    stdin: &mut ChildStdin,
    reader: &mut BufReader<ChildStdout>,
    id: &str,
    kind: &str,
    path: &std::path::Path,
) {
    let selected = request_ok(
        stdin,
        reader,
        id,
        "import.select",
        json!({
            "kind": kind,
            "files": [{
                "name": path.file_name().and_then(|n| n.to_str()).unwrap_or("import.csv"),
                "type": "text/csv",
                "size": std::fs::metadata(path).map(|m| m.len()).unwrap_or(0),
                "path": path.to_string_lossy(),
            }]
        }),
    );
    assert_eq!(selected["accepted"], true, "{}", selected);
}

#[test]
fn successful_run_posts_accepted_rows_and_resets_dialog() {
    let dir = temp_dir("tuition-import-ok");
    let csv = write_csv(&dir, "students.csv", STUDENTS_CSV);
    let rt = Runtime::new().expect("tokio runtime");
    let api = mock_import_api(&rt, "students", 200);
    let (_child, mut stdin, mut reader) = spawn_sidecar(&api.uri());
    sign_in(&mut stdin, &mut reader);

    let _ = request_ok(&mut stdin, &mut reader, "1", "import.open", json!({ "kind": "student" }));
    select_file(&mut stdin, &mut reader, "2", "student", &csv);
    let run = request_ok(&mut stdin, &mut reader, "3", "import.run", json!({ "kind": "student" }));

    assert_eq!(run["succeeded"], true, "{}", run);
    assert_eq!(run["submitted"], 3);
    assert_eq!(run["outcome"]["rowsParsed"], 4);
    assert_eq!(run["outcome"]["status"], "partial");
    assert_eq!(run["state"]["open"], false);
    assert!(run["state"]["pendingFile"].is_null());
    assert_eq!(run["notifications"][0]["severity"], "success");
    assert_eq!(run["notifications"][0]["message"], "CSV import successful");

    let received = received_imports(&rt, &api);
    assert_eq!(received.len(), 1);
    assert_eq!(received[0].url.path(), "/students/import/");
    assert_eq!(received[0].url.query(), Some("username=admin"));
    let body: serde_json::Value = received[0].body_json().expect("json body");
    let rows = body.as_array().expect("array body");
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0]["first_name"], "Ann");
    assert_eq!(rows[0]["email"], "ann@example.com");
    assert_eq!(rows[0]["status"], "Active");
    assert_eq!(rows[1]["last_name"], "Kim");
    assert_eq!(rows[1]["enrollment_date"], "");
    assert_eq!(rows[2]["last_name"], "Perera");
}

#[test]
fn failed_submission_keeps_file_for_retry() {
    let dir = temp_dir("tuition-import-fail");
    let csv = write_csv(&dir, "teachers.csv", "h\nT1,Ann,Lee\nT2,Bo,Kim\nT3,Cy,Ng\n");
    let rt = Runtime::new().expect("tokio runtime");
    let api = mock_import_api(&rt, "teachers", 500);
    let (_child, mut stdin, mut reader) = spawn_sidecar(&api.uri());
    sign_in(&mut stdin, &mut reader);

    let _ = request_ok(&mut stdin, &mut reader, "1", "import.open", json!({ "kind": "teacher" }));
    select_file(&mut stdin, &mut reader, "2", "teacher", &csv);
    let run = request_ok(&mut stdin, &mut reader, "3", "import.run", json!({ "kind": "teacher" }));

    assert_eq!(run["succeeded"], false);
    assert_eq!(run["error"]["code"], "submission_failed");
    assert_eq!(run["outcome"]["accepted"], 3);
    assert_eq!(run["state"]["open"], true);
    assert_eq!(run["state"]["pendingFile"]["name"], "teachers.csv");
    assert_eq!(run["state"]["importInProgress"], false);
    assert_eq!(run["notifications"][0]["message"], "CSV import failed");

    let received = received_imports(&rt, &api);
    assert_eq!(received.len(), 1);
    assert_eq!(received[0].url.path(), "/teachers/import/");
    let body: serde_json::Value = received[0].body_json().expect("json body");
    assert_eq!(body.as_array().map(|rows| rows.len()), Some(3));
}

#[test]
fn all_invalid_rows_never_reach_the_server() {
    let dir = temp_dir("tuition-import-invalid");
    let csv = write_csv(&dir, "students.csv", "h\nS1,,Lee\nS2,Bo,\n");
    // A submission against the dead endpoint would surface as submission_failed.
    let (_child, mut stdin, mut reader) = spawn_sidecar(DEAD_API);
    sign_in(&mut stdin, &mut reader);

    select_file(&mut stdin, &mut reader, "1", "student", &csv);
    let run = request_ok(&mut stdin, &mut reader, "2", "import.run", json!({ "kind": "student" }));
    assert_eq!(run["error"]["code"], "empty_or_all_invalid");
    assert_eq!(run["outcome"]["rowsParsed"], 2);
    assert_eq!(run["outcome"]["status"], "failed");
    assert_eq!(
        run["notifications"][0]["message"],
        "No valid rows found in the CSV file"
    );
    assert_eq!(run["state"]["pendingFile"]["name"], "students.csv");
}

#[test]
fn closing_the_dialog_makes_a_late_completion_stale() {
    let (_child, mut stdin, mut reader) = spawn_sidecar(DEAD_API);
    sign_in(&mut stdin, &mut reader);

    let _ = request_ok(
        &mut stdin,
        &mut reader,
        "1",
        "import.select",
        json!({
            "kind": "student",
            "files": [{ "name": "students.csv", "type": "text/csv", "size": 20 }]
        }),
    );
    let begun = request_ok(&mut stdin, &mut reader, "2", "import.begin", json!({ "kind": "student" }));
    assert_eq!(begun["started"], true);
    assert_eq!(begun["state"]["importInProgress"], true);
    let token = begun["attemptToken"].as_str().expect("token").to_string();

    let again = request_ok(&mut stdin, &mut reader, "3", "import.begin", json!({ "kind": "student" }));
    assert_eq!(again["started"], false);
    assert_eq!(again["error"]["code"], "import_in_progress");

    let _ = request_ok(&mut stdin, &mut reader, "4", "import.close", json!({ "kind": "student" }));
    let late = request_ok(
        &mut stdin,
        &mut reader,
        "5",
        "import.complete",
        json!({
            "kind": "student",
            "attemptToken": token,
            "text": "h\nS1,Ann,Lee\n"
        }),
    );
    assert_eq!(late["stale"], true);
    assert_eq!(late["notifications"], json!([]));
    assert!(late["state"]["pendingFile"].is_null());
}

#[test]
fn read_errors_end_the_attempt_with_a_notification() {
    let (_child, mut stdin, mut reader) = spawn_sidecar(DEAD_API);

    let _ = request_ok(
        &mut stdin,
        &mut reader,
        "1",
        "import.select",
        json!({
            "kind": "teacher",
            "files": [{ "name": "teachers.csv", "type": "text/csv", "size": 20 }]
        }),
    );
    let begun = request_ok(&mut stdin, &mut reader, "2", "import.begin", json!({ "kind": "teacher" }));
    let token = begun["attemptToken"].as_str().expect("token").to_string();
    let done = request_ok(
        &mut stdin,
        &mut reader,
        "3",
        "import.complete",
        json!({
            "kind": "teacher",
            "attemptToken": token,
            "readError": "NotReadableError"
        }),
    );
    assert_eq!(done["error"]["code"], "read_failed");
    assert_eq!(done["state"]["importInProgress"], false);
    assert_eq!(done["notifications"][0]["severity"], "error");

    let retry = request_ok(&mut stdin, &mut reader, "4", "import.begin", json!({ "kind": "teacher" }));
    assert_eq!(retry["started"], true);
}

#[test]
fn missing_username_fails_without_a_request() {
    let (_child, mut stdin, mut reader) = spawn_sidecar(DEAD_API);

    let _ = request_ok(
        &mut stdin,
        &mut reader,
        "1",
        "import.select",
        json!({
            "kind": "student",
            "files": [{ "name": "students.csv", "type": "text/csv", "size": 20 }]
        }),
    );
    let begun = request_ok(&mut stdin, &mut reader, "2", "import.begin", json!({ "kind": "student" }));
    let token = begun["attemptToken"].as_str().expect("token").to_string();
    let done = request_ok(
        &mut stdin,
        &mut reader,
        "3",
        "import.complete",
        json!({
            "kind": "student",
            "attemptToken": token,
            "text": "h\nS1,Ann,Lee\n"
        }),
    );
    assert_eq!(done["error"]["code"], "submission_failed");
    assert_eq!(done["error"]["message"], "submission failed: username not set");
}
