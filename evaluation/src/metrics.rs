//! Automatic scoring — citation F1, lexical similarity, and aggregation.
//!
//! Stateless utilities consumed after a debate completes; none of this is
//! part of the debate protocol itself.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::llm_judge::RubricScore;

fn round4(x: f64) -> f64 {
    (x * 10_000.0).round() / 10_000.0
}

/// Precision/recall/F1 over citation sets.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CitationScore {
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
    pub predicted_count: usize,
    pub expected_count: usize,
    pub matched_count: usize,
}

/// Exact-match citation F1.
///
/// Both sides empty counts as a perfect match; one side empty scores zero.
pub fn citation_f1(predicted: &[String], expected: &[String]) -> CitationScore {
    if predicted.is_empty() && expected.is_empty() {
        return CitationScore {
            precision: 1.0,
            recall: 1.0,
            f1: 1.0,
            predicted_count: 0,
            expected_count: 0,
            matched_count: 0,
        };
    }

    if predicted.is_empty() || expected.is_empty() {
        return CitationScore {
            precision: 0.0,
            recall: 0.0,
            f1: 0.0,
            predicted_count: predicted.len(),
            expected_count: expected.len(),
            matched_count: 0,
        };
    }

    let predicted_set: HashSet<&str> = predicted.iter().map(String::as_str).collect();
    let expected_set: HashSet<&str> = expected.iter().map(String::as_str).collect();
    let matched = predicted_set.intersection(&expected_set).count();

    let precision = matched as f64 / predicted_set.len() as f64;
    let recall = matched as f64 / expected_set.len() as f64;
    let f1 = if precision + recall > 0.0 {
        2.0 * precision * recall / (precision + recall)
    } else {
        0.0
    };

    CitationScore {
        precision: round4(precision),
        recall: round4(recall),
        f1: round4(f1),
        predicted_count: predicted.len(),
        expected_count: expected.len(),
        matched_count: matched,
    }
}

/// Precision/recall/F1 over answer tokens.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimilarityScore {
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
}

fn tokens(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(str::to_lowercase)
        .collect()
}

fn counts(tokens: &[String]) -> HashMap<&str, usize> {
    let mut map: HashMap<&str, usize> = HashMap::new();
    for token in tokens {
        *map.entry(token.as_str()).or_insert(0) += 1;
    }
    map
}

/// Token-overlap similarity between a prediction and a reference answer.
///
/// A lexical measure: case-folded alphanumeric tokens matched as
/// multisets. Reported in the same precision/recall/F1 shape as the
/// citation score. Either side empty scores zero.
pub fn similarity(prediction: &str, reference: &str) -> SimilarityScore {
    let predicted = tokens(prediction);
    let expected = tokens(reference);

    if predicted.is_empty() || expected.is_empty() {
        return SimilarityScore {
            precision: 0.0,
            recall: 0.0,
            f1: 0.0,
        };
    }

    let predicted_counts = counts(&predicted);
    let expected_counts = counts(&expected);

    let overlap: usize = predicted_counts
        .iter()
        .map(|(token, &count)| count.min(*expected_counts.get(token).unwrap_or(&0)))
        .sum();

    let precision = overlap as f64 / predicted.len() as f64;
    let recall = overlap as f64 / expected.len() as f64;
    let f1 = if precision + recall > 0.0 {
        2.0 * precision * recall / (precision + recall)
    } else {
        0.0
    };

    SimilarityScore {
        precision: round4(precision),
        recall: round4(recall),
        f1: round4(f1),
    }
}

/// All scores for one question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionMetrics {
    pub citations: CitationScore,
    pub similarity: SimilarityScore,
    /// Present only when LLM-graded scoring ran.
    pub llm_judge: Option<RubricScore>,
}

/// Mean scores across all evaluated questions.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AggregateReport {
    pub questions: usize,
    pub citation_precision: f64,
    pub citation_recall: f64,
    pub citation_f1: f64,
    pub similarity_precision: f64,
    pub similarity_recall: f64,
    pub similarity_f1: f64,
    /// Mean rubric scores over the questions that carried them.
    pub llm_judge: Option<RubricMeans>,
}

/// Mean LLM-judge rubric scores.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct RubricMeans {
    pub correctness: f64,
    pub reasoning: f64,
    pub citations: f64,
    pub total: f64,
    pub normalized: f64,
}

/// Aggregate per-question metrics into means.
pub fn aggregate(all: &[QuestionMetrics]) -> AggregateReport {
    if all.is_empty() {
        return AggregateReport::default();
    }

    let n = all.len() as f64;
    let mut report = AggregateReport {
        questions: all.len(),
        ..Default::default()
    };

    for metrics in all {
        report.citation_precision += metrics.citations.precision;
        report.citation_recall += metrics.citations.recall;
        report.citation_f1 += metrics.citations.f1;
        report.similarity_precision += metrics.similarity.precision;
        report.similarity_recall += metrics.similarity.recall;
        report.similarity_f1 += metrics.similarity.f1;
    }
    report.citation_precision = round4(report.citation_precision / n);
    report.citation_recall = round4(report.citation_recall / n);
    report.citation_f1 = round4(report.citation_f1 / n);
    report.similarity_precision = round4(report.similarity_precision / n);
    report.similarity_recall = round4(report.similarity_recall / n);
    report.similarity_f1 = round4(report.similarity_f1 / n);

    let graded: Vec<&RubricScore> = all.iter().filter_map(|m| m.llm_judge.as_ref()).collect();
    if !graded.is_empty() {
        let g = graded.len() as f64;
        let mut means = RubricMeans::default();
        for score in &graded {
            means.correctness += score.correctness;
            means.reasoning += score.reasoning;
            means.citations += score.citations;
            means.total += score.total;
            means.normalized += score.normalized;
        }
        means.correctness = round4(means.correctness / g);
        means.reasoning = round4(means.reasoning / g);
        means.citations = round4(means.citations / g);
        means.total = round4(means.total / g);
        means.normalized = round4(means.normalized / g);
        report.llm_judge = Some(means);
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cites(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_citation_f1_partial_match() {
        let predicted = cites(&["Art. 74, § 1º, CF/88", "Lei 8.112/1990"]);
        let expected = cites(&["Art. 74, § 1º, CF/88", "Lei 9.784/1999"]);
        let score = citation_f1(&predicted, &expected);
        assert_eq!(score.precision, 0.5);
        assert_eq!(score.recall, 0.5);
        assert_eq!(score.f1, 0.5);
        assert_eq!(score.matched_count, 1);
    }

    #[test]
    fn test_citation_f1_both_empty_is_perfect() {
        let score = citation_f1(&[], &[]);
        assert_eq!(score.precision, 1.0);
        assert_eq!(score.recall, 1.0);
        assert_eq!(score.f1, 1.0);
        assert_eq!(score.matched_count, 0);
    }

    #[test]
    fn test_citation_f1_one_empty_is_zero() {
        let predicted = cites(&["Lei 8.112/1990"]);
        let score = citation_f1(&predicted, &[]);
        assert_eq!(score.f1, 0.0);
        assert_eq!(score.predicted_count, 1);
        assert_eq!(score.expected_count, 0);

        let score = citation_f1(&[], &predicted);
        assert_eq!(score.f1, 0.0);
    }

    #[test]
    fn test_citation_f1_duplicates_collapse_for_matching() {
        // Counts report the raw lists; precision/recall match on sets.
        let predicted = cites(&["Lei 8.112/1990", "Lei 8.112/1990"]);
        let expected = cites(&["Lei 8.112/1990"]);
        let score = citation_f1(&predicted, &expected);
        assert_eq!(score.precision, 1.0);
        assert_eq!(score.predicted_count, 2);
        assert_eq!(score.matched_count, 1);
    }

    #[test]
    fn test_similarity_identical_texts() {
        let score = similarity("a penalidade é demissão", "a penalidade é demissão");
        assert_eq!(score.f1, 1.0);
    }

    #[test]
    fn test_similarity_disjoint_texts() {
        let score = similarity("completely different words", "nada em comum aqui");
        assert_eq!(score.f1, 0.0);
    }

    #[test]
    fn test_similarity_empty_is_zero() {
        assert_eq!(similarity("", "reference").f1, 0.0);
        assert_eq!(similarity("prediction", "").f1, 0.0);
    }

    #[test]
    fn test_similarity_is_case_insensitive() {
        let score = similarity("A Penalidade", "a penalidade");
        assert_eq!(score.f1, 1.0);
    }

    #[test]
    fn test_similarity_partial_overlap() {
        let score = similarity("sim conforme a lei", "não conforme a lei");
        // 3 of 4 tokens overlap on each side.
        assert_eq!(score.precision, 0.75);
        assert_eq!(score.recall, 0.75);
        assert_eq!(score.f1, 0.75);
    }

    #[test]
    fn test_aggregate_means() {
        let high = QuestionMetrics {
            citations: citation_f1(
                &cites(&["Lei 8.112/1990"]),
                &cites(&["Lei 8.112/1990"]),
            ),
            similarity: similarity("same text", "same text"),
            llm_judge: None,
        };
        let low = QuestionMetrics {
            citations: citation_f1(&cites(&["Lei 1/2001"]), &cites(&["Lei 2/2002"])),
            similarity: similarity("alpha beta", "gamma delta"),
            llm_judge: None,
        };
        let report = aggregate(&[high, low]);
        assert_eq!(report.questions, 2);
        assert_eq!(report.citation_f1, 0.5);
        assert_eq!(report.similarity_f1, 0.5);
        assert!(report.llm_judge.is_none());
    }

    #[test]
    fn test_aggregate_empty_is_default() {
        let report = aggregate(&[]);
        assert_eq!(report.questions, 0);
        assert_eq!(report.citation_f1, 0.0);
    }

    #[test]
    fn test_aggregate_includes_rubric_means_when_present() {
        let with_judge = QuestionMetrics {
            citations: citation_f1(&[], &[]),
            similarity: similarity("x", "x"),
            llm_judge: Some(RubricScore {
                correctness: 4.0,
                reasoning: 3.0,
                citations: 4.0,
                total: 11.0,
                normalized: 1.0,
                justification: "perfect".to_string(),
            }),
        };
        let report = aggregate(&[with_judge]);
        let means = report.llm_judge.unwrap();
        assert_eq!(means.total, 11.0);
        assert_eq!(means.normalized, 1.0);
    }
}
