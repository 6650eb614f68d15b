/// One answered quiz question, as loaded from the results table.
#[derive(Debug, Clone, PartialEq)]
pub struct QuizRecord {
    pub student: String,
    pub topic: String,
    pub question: String,
    pub correct: bool,
    pub score: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StudentSummary {
    pub total_questions: usize,
    pub correct_answers: usize,
    pub accuracy: f64,
    pub total_score: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TopicStat {
    pub topic: String,
    pub attempted: usize,
    pub correct: usize,
    pub accuracy: f64,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Classification {
    /// Accuracy descending.
    pub strengths: Vec<TopicStat>,
    /// Accuracy ascending, worst first.
    pub weaknesses: Vec<TopicStat>,
}

/// Everything the analytics engine derives for one student.
#[derive(Debug, Clone, PartialEq)]
pub struct StudentAnalysis {
    pub student: String,
    pub summary: StudentSummary,
    pub topics: Vec<TopicStat>,
    pub classification: Classification,
    pub summary_text: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StudentReport {
    pub analysis: StudentAnalysis,
    pub narrative: String,
}
