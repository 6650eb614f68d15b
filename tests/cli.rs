//! End-to-end behaviour of the quiz-report binary.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

const RESULTS: &str = "Student,Topic,Question,Correct,Score,Notes\n\
Avery Lee,Algebra,Q1,1,10,\n\
Jules Moreno,Algebra,Q1,0,0,late\n\
Avery Lee,Algebra,Q2,0,0,\n\
Avery Lee,Biology,Q3,1,5,\n\
Jules Moreno,Biology,Q3,1,5,\n";

fn quiz_cmd() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_quiz-report"));
    cmd.env_remove("PERPLEXITY_API_KEY")
        .env_remove("QUIZ_REPORT_ENDPOINT")
        .env_remove("QUIZ_REPORT_MODEL");
    cmd
}

fn write_csv(dir: &TempDir, contents: &str) -> PathBuf {
    let path = dir.path().join("results.csv");
    fs::write(&path, contents).unwrap();
    path
}

#[test]
fn lists_students_in_file_order() {
    let dir = TempDir::new().unwrap();
    let csv = write_csv(&dir, RESULTS);
    quiz_cmd()
        .arg("students")
        .arg("--csv")
        .arg(&csv)
        .assert()
        .success()
        .stdout("Avery Lee\nJules Moreno\n");
}

#[test]
fn summary_prints_classification_and_text() {
    let dir = TempDir::new().unwrap();
    let csv = write_csv(&dir, RESULTS);
    quiz_cmd()
        .args(["summary", "--student", "Avery Lee", "--csv"])
        .arg(&csv)
        .assert()
        .success()
        .stdout(predicate::str::contains("Accuracy: 66.67%"))
        .stdout(predicate::str::contains("- Practice more questions on Algebra."))
        .stdout(predicate::str::contains(
            "Avery Lee scored 15 with an accuracy of 66.67%. Strengths: Biology. Weaknesses: Algebra.",
        ));
}

#[test]
fn summary_defaults_to_first_student() {
    let dir = TempDir::new().unwrap();
    let csv = write_csv(&dir, RESULTS);
    quiz_cmd()
        .args(["summary", "--csv"])
        .arg(&csv)
        .assert()
        .success()
        .stdout(predicate::str::contains("Quiz Performance Report for Avery Lee"));
}

#[test]
fn missing_score_column_fails_with_column_name() {
    let dir = TempDir::new().unwrap();
    let csv = write_csv(&dir, "Student,Topic,Question,Correct\nAvery Lee,Algebra,Q1,1\n");
    quiz_cmd()
        .args(["summary", "--csv"])
        .arg(&csv)
        .assert()
        .failure()
        .stderr(predicate::str::contains("missing required columns: Score"));
}

#[test]
fn bad_row_reports_row_and_field() {
    let dir = TempDir::new().unwrap();
    let csv = write_csv(
        &dir,
        "Student,Topic,Question,Correct,Score\nAvery Lee,Algebra,Q1,1,10\nAvery Lee,Algebra,Q2,perhaps,0\n",
    );
    quiz_cmd()
        .args(["summary", "--csv"])
        .arg(&csv)
        .assert()
        .failure()
        .stderr(predicate::str::contains("row 2").and(predicate::str::contains("Correct")));
}

#[test]
fn unknown_student_is_reported() {
    let dir = TempDir::new().unwrap();
    let csv = write_csv(&dir, RESULTS);
    quiz_cmd()
        .args(["summary", "--student", "Kiara Patel", "--csv"])
        .arg(&csv)
        .assert()
        .failure()
        .stderr(predicate::str::contains("student not found: Kiara Patel"));
}

#[test]
fn report_is_written_when_provider_is_unreachable() {
    let dir = TempDir::new().unwrap();
    let csv = write_csv(&dir, RESULTS);
    let pdf = dir.path().join("avery.pdf");
    let chart = dir.path().join("avery.json");

    quiz_cmd()
        .args(["report", "--student", "Avery Lee", "--endpoint", "http://127.0.0.1:9/chat/completions"])
        .arg("--csv")
        .arg(&csv)
        .arg("--out")
        .arg(&pdf)
        .arg("--chart")
        .arg(&chart)
        .assert()
        .success()
        .stdout(predicate::str::contains("Error generating feedback:"))
        .stdout(predicate::str::contains("Report written to"));

    let bytes = fs::read(&pdf).unwrap();
    assert!(bytes.starts_with(b"%PDF-1.5"));

    let spec: serde_json::Value = serde_json::from_str(&fs::read_to_string(&chart).unwrap()).unwrap();
    assert_eq!(spec["encoding"]["x"]["sort"], serde_json::json!(["Biology", "Algebra"]));
}
