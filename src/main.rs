use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod analytics;
mod chart;
mod config;
mod error;
mod loader;
mod models;
mod narrative;
mod pdf;
mod pipeline;
mod report;
mod selector;

use crate::config::{NarrativeConfig, DEFAULT_ENDPOINT, DEFAULT_MODEL};
use crate::models::QuizRecord;
use crate::narrative::ChatCompletionsClient;

#[derive(Parser)]
#[command(name = "quiz-report")]
#[command(about = "Quiz performance reports with topic strengths, weaknesses and AI feedback", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct Selection {
    /// Quiz results CSV with Student, Topic, Question, Correct and Score columns
    #[arg(long)]
    csv: PathBuf,
    /// Student to report on; defaults to the first student in the file
    #[arg(long)]
    student: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// List the students found in a results file
    Students {
        #[arg(long)]
        csv: PathBuf,
    },
    /// Print accuracy, strengths and weaknesses for a student
    Summary {
        #[command(flatten)]
        selection: Selection,
    },
    /// Generate the PDF report and chart, including AI feedback
    Report {
        #[command(flatten)]
        selection: Selection,
        /// PDF output path [default: <student>_report.pdf]
        #[arg(long)]
        out: Option<PathBuf>,
        /// Vega-Lite chart output path [default: <student>_chart.json]
        #[arg(long)]
        chart: Option<PathBuf>,
        #[arg(long, env = "PERPLEXITY_API_KEY", hide_env_values = true)]
        api_key: Option<String>,
        #[arg(long, env = "QUIZ_REPORT_ENDPOINT", default_value = DEFAULT_ENDPOINT)]
        endpoint: String,
        #[arg(long, env = "QUIZ_REPORT_MODEL", default_value = DEFAULT_MODEL)]
        model: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Students { csv } => {
            let records = load(&csv)?;
            for student in selector::list_students(&records) {
                println!("{student}");
            }
        }
        Commands::Summary { selection } => {
            let records = load(&selection.csv)?;
            let student = resolve_student(&records, selection.student)?;
            let subset = selector::select(&records, &student)?;
            let analysis = analytics::analyze(&student, &subset)?;
            print!("{}", report::build_summary(&analysis));
        }
        Commands::Report {
            selection,
            out,
            chart,
            api_key,
            endpoint,
            model,
        } => {
            let records = load(&selection.csv)?;
            let student = resolve_student(&records, selection.student)?;

            let provider = ChatCompletionsClient::new(NarrativeConfig::new(endpoint, model, api_key));
            let student_report = pipeline::run(&records, &student, &provider).await?;

            let topic_chart = chart::render_chart(&student_report.analysis.topics);
            let chart_path = chart.unwrap_or_else(|| PathBuf::from(format!("{student}_chart.json")));
            let chart_json = serde_json::to_string_pretty(&topic_chart.to_vega_lite())?;
            std::fs::write(&chart_path, chart_json)
                .with_context(|| format!("failed to write chart to {}", chart_path.display()))?;
            tracing::info!(path = %chart_path.display(), "chart written");

            let pdf_path = out.unwrap_or_else(|| PathBuf::from(format!("{student}_report.pdf")));
            let pdf_bytes = pdf::render_report(&student_report, &topic_chart)?;
            std::fs::write(&pdf_path, pdf_bytes)
                .with_context(|| format!("failed to write report to {}", pdf_path.display()))?;
            tracing::info!(path = %pdf_path.display(), "report written");

            let today = chrono::Local::now().date_naive();
            print!("{}", report::build_report(&student_report, today));
            println!("Report written to {}.", pdf_path.display());
        }
    }

    Ok(())
}

fn load(csv: &Path) -> anyhow::Result<Vec<QuizRecord>> {
    let records = loader::load_path(csv)
        .with_context(|| format!("failed to load quiz results from {}", csv.display()))?;
    tracing::info!(rows = records.len(), path = %csv.display(), "loaded quiz results");
    Ok(records)
}

fn resolve_student(records: &[QuizRecord], student: Option<String>) -> anyhow::Result<String> {
    match student {
        Some(student) => Ok(student),
        None => selector::list_students(records)
            .into_iter()
            .next()
            .context("the results file contains no quiz records"),
    }
}
