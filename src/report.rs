use std::fmt::Write;

use chrono::NaiveDate;

use crate::analytics;
use crate::models::{StudentAnalysis, StudentReport};

/// Console view of the analytics, without the narrative.
pub fn build_summary(analysis: &StudentAnalysis) -> String {
    let mut output = String::new();
    let summary = &analysis.summary;
    let classification = &analysis.classification;

    let _ = writeln!(output, "# Quiz Performance Report for {}", analysis.student);
    let _ = writeln!(output);
    let _ = writeln!(output, "## Summary");
    let _ = writeln!(output, "Accuracy: {:.2}%", summary.accuracy);
    let _ = writeln!(output, "Total Score: {}", summary.total_score);
    let _ = writeln!(
        output,
        "Questions: {} ({} correct)",
        summary.total_questions, summary.correct_answers
    );

    let _ = writeln!(output);
    let _ = writeln!(output, "## Strengths");
    if classification.strengths.is_empty() {
        let _ = writeln!(output, "No strong areas identified.");
    } else {
        for stat in classification.strengths.iter() {
            let _ = writeln!(output, "- {}: {:.2}%", stat.topic, stat.accuracy);
        }
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Weaknesses");
    if classification.weaknesses.is_empty() {
        let _ = writeln!(output, "No weak areas identified.");
    } else {
        for stat in classification.weaknesses.iter() {
            let _ = writeln!(output, "- {}: {:.2}%", stat.topic, stat.accuracy);
        }
    }

    let recommendations = analytics::recommendations(classification);
    if !recommendations.is_empty() {
        let _ = writeln!(output);
        let _ = writeln!(output, "## Recommendations");
        for line in recommendations {
            let _ = writeln!(output, "- {line}");
        }
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "{}", analysis.summary_text);

    output
}

pub fn build_report(report: &StudentReport, generated_on: NaiveDate) -> String {
    let mut output = build_summary(&report.analysis);
    let _ = writeln!(output);
    let _ = writeln!(output, "## AI Feedback");
    let _ = writeln!(output, "{}", report.narrative);
    let _ = writeln!(output);
    let _ = writeln!(output, "Generated on {generated_on}");
    output
}
