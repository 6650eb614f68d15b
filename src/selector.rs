use std::collections::HashSet;

use crate::error::QuizError;
use crate::models::QuizRecord;

/// Distinct students in first-occurrence order.
pub fn list_students(records: &[QuizRecord]) -> Vec<String> {
    let mut seen = HashSet::new();
    records
        .iter()
        .filter(|record| seen.insert(record.student.as_str()))
        .map(|record| record.student.clone())
        .collect()
}

pub fn select(records: &[QuizRecord], student: &str) -> Result<Vec<QuizRecord>, QuizError> {
    let subset: Vec<QuizRecord> = records
        .iter()
        .filter(|record| record.student == student)
        .cloned()
        .collect();

    if subset.is_empty() {
        return Err(QuizError::NotFound(student.to_string()));
    }
    Ok(subset)
}
