use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use crate::error::QuizError;
use crate::models::QuizRecord;

pub const REQUIRED_COLUMNS: [&str; 5] = ["Student", "Topic", "Question", "Correct", "Score"];

#[derive(Deserialize)]
struct CsvRow {
    #[serde(rename = "Student")]
    student: String,
    #[serde(rename = "Topic")]
    topic: String,
    #[serde(rename = "Question")]
    question: String,
    #[serde(rename = "Correct")]
    correct: String,
    #[serde(rename = "Score")]
    score: String,
}

pub fn load_path(csv_path: &Path) -> Result<Vec<QuizRecord>, QuizError> {
    let file = std::fs::File::open(csv_path)?;
    load_records(file)
}

/// Parses a quiz-results table. Columns are matched by header name and extra
/// columns are ignored; any invalid row aborts the whole load.
pub fn load_records<R: Read>(input: R) -> Result<Vec<QuizRecord>, QuizError> {
    let mut reader = csv::Reader::from_reader(input);

    let headers = reader.headers()?.clone();
    let missing: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .filter(|column| !headers.iter().any(|header| header == **column))
        .map(|column| column.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(QuizError::Schema { missing });
    }

    let mut records = Vec::new();
    for (index, result) in reader.deserialize::<CsvRow>().enumerate() {
        let row = index + 1;
        let raw = result?;
        records.push(QuizRecord {
            student: required_text(row, "Student", raw.student)?,
            topic: required_text(row, "Topic", raw.topic)?,
            question: required_text(row, "Question", raw.question)?,
            correct: parse_correct(row, &raw.correct)?,
            score: parse_score(row, &raw.score)?,
        });
    }

    tracing::debug!(rows = records.len(), "loaded quiz records");
    Ok(records)
}

fn required_text(row: usize, field: &'static str, value: String) -> Result<String, QuizError> {
    if value.trim().is_empty() {
        return Err(row_error(row, field, &value, "value is missing"));
    }
    Ok(value)
}

pub fn parse_correct(row: usize, value: &str) -> Result<bool, QuizError> {
    let trimmed = value.trim();
    match trimmed.to_ascii_lowercase().as_str() {
        "" => Err(row_error(row, "Correct", value, "value is missing")),
        "true" | "t" | "yes" | "y" => Ok(true),
        "false" | "f" | "no" | "n" => Ok(false),
        other => match other.parse::<f64>() {
            Ok(number) if number.is_finite() => Ok(number != 0.0),
            _ => Err(row_error(row, "Correct", value, "expected a boolean or 0/1")),
        },
    }
}

pub fn parse_score(row: usize, value: &str) -> Result<f64, QuizError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(row_error(row, "Score", value, "value is missing"));
    }
    match trimmed.parse::<f64>() {
        Ok(number) if number.is_finite() => Ok(number),
        _ => Err(row_error(row, "Score", value, "expected a number")),
    }
}

fn row_error(row: usize, field: &'static str, value: &str, reason: &str) -> QuizError {
    QuizError::RowParse {
        row,
        field,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}
