//! CLI runner — multi-agent debates over a legal QA dataset.
//!
//! Loads questions from a JSON-lines file, runs one debate per question,
//! scores decisions against the gold answers, and prints an aggregate
//! report. Per-question failures are logged and zero-scored; the debate
//! core itself never retries.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info};

use debate::{
    DebateConfig, DebateOrchestrator, DebateVariant, GroqClient, GroqConfig, PositionPolicy,
    ReasoningClient,
};
use evaluation::{
    aggregate, citation_f1, extract_citations, similarity, CitationScore, QuestionMetrics,
    SimilarityScore,
};

#[derive(Parser, Debug)]
#[command(name = "mad", about = "Multi-agent debate over legal QA questions")]
struct Args {
    /// JSON-lines dataset of questions.
    #[arg(long)]
    dataset: PathBuf,

    /// Number of questions to run (default: all).
    #[arg(long)]
    sample_size: Option<usize>,

    /// Debate variant: vanilla, irac, or hybrid.
    #[arg(long, default_value = "vanilla")]
    variant: DebateVariant,

    /// Let debaters pick their own positions instead of assigning A vs B.
    #[arg(long)]
    free_choice: bool,

    /// Model identifier for the reasoning endpoint.
    #[arg(long)]
    model: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let args = Args::parse();

    let mut groq_config = GroqConfig::default();
    if let Some(model) = &args.model {
        groq_config.model = model.clone();
    }
    let api_key = std::env::var("GROQ_API_KEY").context("GROQ_API_KEY not set")?;
    let client: Arc<dyn ReasoningClient> = Arc::new(GroqClient::new(api_key, groq_config)?);

    let mut config = DebateConfig::for_variant(args.variant);
    if args.free_choice {
        config = config.with_positions(PositionPolicy::FreeChoice);
    }
    let orchestrator = DebateOrchestrator::with_config(client, config);

    let questions = evaluation::load_bar_exam_qa(&args.dataset, args.sample_size)?;
    info!(
        count = questions.len(),
        variant = %args.variant,
        "starting debate runs"
    );

    let mut correct = 0usize;
    let mut failed = 0usize;
    let mut decided = 0usize;
    let mut metrics: Vec<QuestionMetrics> = Vec::new();

    // Zero scores substituted when a run fails; the core itself never
    // downgrades errors.
    let zero_metrics = QuestionMetrics {
        citations: CitationScore {
            precision: 0.0,
            recall: 0.0,
            f1: 0.0,
            predicted_count: 0,
            expected_count: 0,
            matched_count: 0,
        },
        similarity: SimilarityScore {
            precision: 0.0,
            recall: 0.0,
            f1: 0.0,
        },
        llm_judge: None,
    };

    for question in &questions {
        let choices = question.choices();
        let outcome = match orchestrator
            .run_debate(&question.id, &question.question, &question.prompt, &choices)
            .await
        {
            Ok(outcome) => outcome,
            Err(e) => {
                error!(question = %question.id, error = %e, "debate run failed");
                failed += 1;
                metrics.push(zero_metrics.clone());
                continue;
            }
        };

        let decision = outcome.decision.decision();
        let gold = question.answer_position();
        if gold == Some(decision) {
            correct += 1;
        }

        let predicted_citations = extract_citations(outcome.decision.rationale());
        let expected_citations = extract_citations(&question.gold_passage);
        metrics.push(QuestionMetrics {
            citations: citation_f1(&predicted_citations, &expected_citations),
            similarity: similarity(outcome.decision.rationale(), &question.gold_passage),
            llm_judge: None,
        });

        info!(
            question = %question.id,
            decision = %decision,
            gold = %question.answer,
            winner = %outcome.decision.winner(),
            "debate decided"
        );
        decided += 1;
    }

    let report = aggregate(&metrics);
    let total = questions.len();
    let accuracy = if total > 0 {
        correct as f64 / total as f64
    } else {
        0.0
    };

    println!("questions:        {}", total);
    println!("decided:          {}", decided);
    println!("failed runs:      {}", failed);
    println!("accuracy:         {:.2}%", accuracy * 100.0);
    println!("citation F1:      {:.4}", report.citation_f1);
    println!("similarity F1:    {:.4}", report.similarity_f1);

    Ok(())
}
