use std::cmp::Ordering;
use std::collections::HashMap;

use crate::error::QuizError;
use crate::models::{Classification, QuizRecord, StudentAnalysis, StudentSummary, TopicStat};

/// Topics at or above this accuracy are strengths.
pub const STRENGTH_THRESHOLD: f64 = 70.0;

pub fn analyze(student: &str, subset: &[QuizRecord]) -> Result<StudentAnalysis, QuizError> {
    let summary = compute_summary(subset)?;
    let topics = compute_topic_stats(subset);
    let classification = classify(&topics);
    let summary_text = render_summary_text(student, &summary, &classification);

    Ok(StudentAnalysis {
        student: student.to_string(),
        summary,
        topics,
        classification,
        summary_text,
    })
}

pub fn compute_summary(subset: &[QuizRecord]) -> Result<StudentSummary, QuizError> {
    if subset.is_empty() {
        return Err(QuizError::InvalidInput(
            "cannot summarize a student with no quiz records".to_string(),
        ));
    }

    let total_questions = subset.len();
    let correct_answers = subset.iter().filter(|record| record.correct).count();
    let total_score = subset.iter().map(|record| record.score).sum();

    Ok(StudentSummary {
        total_questions,
        correct_answers,
        accuracy: accuracy(correct_answers, total_questions),
        total_score,
    })
}

/// Groups by exact topic string, in the order each topic first appears.
pub fn compute_topic_stats(subset: &[QuizRecord]) -> Vec<TopicStat> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut stats: Vec<TopicStat> = Vec::new();

    for record in subset {
        let slot = *index.entry(record.topic.as_str()).or_insert_with(|| {
            stats.push(TopicStat {
                topic: record.topic.clone(),
                attempted: 0,
                correct: 0,
                accuracy: 0.0,
            });
            stats.len() - 1
        });

        let entry = &mut stats[slot];
        entry.attempted += 1;
        if record.correct {
            entry.correct += 1;
        }
    }

    for stat in stats.iter_mut() {
        stat.accuracy = accuracy(stat.correct, stat.attempted);
    }
    stats
}

pub fn classify(topics: &[TopicStat]) -> Classification {
    let (mut strengths, mut weaknesses): (Vec<TopicStat>, Vec<TopicStat>) = topics
        .iter()
        .cloned()
        .partition(|stat| is_strength(stat.accuracy));

    // sort_by is stable, so ties keep grouping order
    strengths.sort_by(|a, b| b.accuracy.partial_cmp(&a.accuracy).unwrap_or(Ordering::Equal));
    weaknesses.sort_by(|a, b| a.accuracy.partial_cmp(&b.accuracy).unwrap_or(Ordering::Equal));

    Classification {
        strengths,
        weaknesses,
    }
}

pub fn is_strength(accuracy: f64) -> bool {
    accuracy >= STRENGTH_THRESHOLD
}

pub fn render_summary_text(
    student: &str,
    summary: &StudentSummary,
    classification: &Classification,
) -> String {
    format!(
        "{} scored {} with an accuracy of {:.2}%. Strengths: {}. Weaknesses: {}.",
        student,
        summary.total_score,
        summary.accuracy,
        join_topics(&classification.strengths),
        join_topics(&classification.weaknesses),
    )
}

pub fn recommendations(classification: &Classification) -> Vec<String> {
    classification
        .weaknesses
        .iter()
        .map(|stat| format!("Practice more questions on {}.", stat.topic))
        .collect()
}

fn join_topics(stats: &[TopicStat]) -> String {
    stats
        .iter()
        .map(|stat| stat.topic.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

fn accuracy(correct: usize, attempted: usize) -> f64 {
    100.0 * correct as f64 / attempted as f64
}
