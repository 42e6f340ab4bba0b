//! Post-debate evaluation for legal QA.
//!
//! Independent, stateless scoring utilities consumed after a debate run
//! completes: citation extraction and F1, lexical answer similarity,
//! LLM-graded rubric scoring, and dataset loading. None of this
//! participates in the debate protocol itself — failures here zero-score
//! rather than aborting runs.

#![allow(clippy::uninlined_format_args)]

pub mod citations;
pub mod dataset;
pub mod llm_judge;
pub mod metrics;

pub use citations::extract_citations;
pub use dataset::{load_bar_exam_qa, DatasetError, Question};
pub use llm_judge::{evaluate_with_llm_judge, RubricScore};
pub use metrics::{
    aggregate, citation_f1, similarity, AggregateReport, CitationScore, QuestionMetrics,
    RubricMeans, SimilarityScore,
};
