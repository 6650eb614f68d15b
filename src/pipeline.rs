use crate::analytics;
use crate::error::QuizError;
use crate::models::{QuizRecord, StudentReport};
use crate::narrative::{self, NarrativeProvider};
use crate::selector;

/// Runs selection, analytics and the narrative request for one student.
/// Nothing is cached between calls.
pub async fn run<P: NarrativeProvider + ?Sized>(
    records: &[QuizRecord],
    student: &str,
    provider: &P,
) -> Result<StudentReport, QuizError> {
    let subset = selector::select(records, student)?;
    tracing::info!(student, questions = subset.len(), "selected student");

    let analysis = analytics::analyze(student, &subset)?;
    let narrative = narrative::request_narrative(provider, &analysis.summary_text).await;

    Ok(StudentReport {
        analysis,
        narrative,
    })
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::narrative::NarrativeError;

    #[derive(Default)]
    struct RecordingProvider {
        prompts: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl NarrativeProvider for RecordingProvider {
        async fn narrate(&self, summary: &str) -> Result<String, NarrativeError> {
            self.prompts.lock().unwrap().push(summary.to_string());
            Ok("Keep practicing.".to_string())
        }
    }

    struct DownProvider;

    #[async_trait]
    impl NarrativeProvider for DownProvider {
        async fn narrate(&self, _summary: &str) -> Result<String, NarrativeError> {
            Err(NarrativeError::Status {
                status: reqwest::StatusCode::INTERNAL_SERVER_ERROR,
                body: String::new(),
            })
        }
    }

    fn records() -> Vec<QuizRecord> {
        let row = |student: &str, topic: &str, correct: bool, score: f64| QuizRecord {
            student: student.to_string(),
            topic: topic.to_string(),
            question: "Q".to_string(),
            correct,
            score,
        };
        vec![
            row("Avery", "A", true, 10.0),
            row("Jules", "A", false, 0.0),
            row("Avery", "A", false, 0.0),
            row("Avery", "B", true, 5.0),
        ]
    }

    #[tokio::test]
    async fn feeds_summary_text_to_provider() {
        let provider = RecordingProvider::default();
        let report = run(&records(), "Avery", &provider).await.unwrap();

        assert_eq!(report.narrative, "Keep practicing.");
        assert_eq!(report.analysis.summary.total_questions, 3);
        assert_eq!(
            provider.prompts.lock().unwrap().as_slice(),
            [report.analysis.summary_text.clone()]
        );
    }

    #[tokio::test]
    async fn every_run_requests_a_fresh_narrative() {
        let provider = RecordingProvider::default();
        run(&records(), "Avery", &provider).await.unwrap();
        run(&records(), "Avery", &provider).await.unwrap();
        assert_eq!(provider.prompts.lock().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn provider_failure_still_yields_a_report() {
        let report = run(&records(), "Jules", &DownProvider).await.unwrap();
        assert!(report.narrative.starts_with("Error generating feedback:"));
        assert_eq!(report.analysis.summary.accuracy, 0.0);
    }

    #[tokio::test]
    async fn unknown_student_fails_before_provider_call() {
        let provider = RecordingProvider::default();
        let result = run(&records(), "Kiara", &provider).await;
        assert!(matches!(result, Err(QuizError::NotFound(_))));
        assert!(provider.prompts.lock().unwrap().is_empty());
    }
}
