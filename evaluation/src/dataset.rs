//! Legal-QA dataset loading.
//!
//! Reads bar-exam multiple-choice questions from JSON-lines files, one
//! record per line:
//!
//! ```json
//! {"id": "17", "prompt": "...", "question": "...",
//!  "choices": ["...", "...", "...", "..."], "answer": "B",
//!  "gold_passage": "...", "gold_idx": "..."}
//! ```

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use debate::{Choices, Position};

/// Errors from dataset loading.
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("failed to read dataset: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed record at line {line}: {source}")]
    Parse {
        line: usize,
        source: serde_json::Error,
    },

    #[error("record at line {line} has {count} choices, expected 4")]
    ChoiceCount { line: usize, count: usize },
}

/// One multiple-choice legal question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub id: String,
    /// Context/prompt preceding the question, possibly empty.
    #[serde(default)]
    pub prompt: String,
    pub question: String,
    /// Exactly four option texts, A..D order.
    pub choices: Vec<String>,
    /// Gold answer label.
    pub answer: String,
    #[serde(default)]
    pub gold_passage: String,
    #[serde(default)]
    pub gold_idx: String,
}

impl Question {
    /// The four options as a typed `Choices` value.
    pub fn choices(&self) -> Choices {
        Choices::new(std::array::from_fn(|i| {
            self.choices.get(i).cloned().unwrap_or_default()
        }))
    }

    /// The gold answer as a position label, when it is one.
    pub fn answer_position(&self) -> Option<Position> {
        Position::parse(&self.answer)
    }
}

/// Load bar-exam questions from a JSON-lines file.
///
/// Blank lines are skipped; `sample_size` truncates after that many
/// records.
pub fn load_bar_exam_qa(
    path: &Path,
    sample_size: Option<usize>,
) -> Result<Vec<Question>, DatasetError> {
    let reader = BufReader::new(File::open(path)?);
    let mut questions = Vec::new();

    for (index, line) in reader.lines().enumerate() {
        if let Some(limit) = sample_size {
            if questions.len() >= limit {
                break;
            }
        }

        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let question: Question =
            serde_json::from_str(&line).map_err(|source| DatasetError::Parse {
                line: index + 1,
                source,
            })?;
        if question.choices.len() != 4 {
            return Err(DatasetError::ChoiceCount {
                line: index + 1,
                count: question.choices.len(),
            });
        }
        questions.push(question);
    }

    info!(
        path = %path.display(),
        count = questions.len(),
        "loaded bar-exam questions"
    );
    Ok(questions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn record(id: &str, answer: &str) -> String {
        format!(
            r#"{{"id": "{}", "prompt": "ctx", "question": "Q?", "choices": ["a", "b", "c", "d"], "answer": "{}"}}"#,
            id, answer
        )
    }

    fn write_dataset(lines: &[String]) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        for line in lines {
            writeln!(file, "{}", line).unwrap();
        }
        file
    }

    #[test]
    fn test_load_all_records() {
        let file = write_dataset(&[record("1", "A"), record("2", "B")]);
        let questions = load_bar_exam_qa(file.path(), None).unwrap();
        assert_eq!(questions.len(), 2);
        assert_eq!(questions[0].id, "1");
        assert_eq!(questions[1].answer_position(), Some(Position::B));
    }

    #[test]
    fn test_sample_size_truncates() {
        let file = write_dataset(&[record("1", "A"), record("2", "B"), record("3", "C")]);
        let questions = load_bar_exam_qa(file.path(), Some(2)).unwrap();
        assert_eq!(questions.len(), 2);
    }

    #[test]
    fn test_blank_lines_skipped() {
        let file = write_dataset(&[record("1", "A"), String::new(), record("2", "D")]);
        let questions = load_bar_exam_qa(file.path(), None).unwrap();
        assert_eq!(questions.len(), 2);
    }

    #[test]
    fn test_malformed_record_reports_line() {
        let file = write_dataset(&[record("1", "A"), "not json".to_string()]);
        let err = load_bar_exam_qa(file.path(), None).unwrap_err();
        match err {
            DatasetError::Parse { line, .. } => assert_eq!(line, 2),
            other => panic!("expected parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_wrong_choice_count_rejected() {
        let file = write_dataset(&[
            r#"{"id": "1", "question": "Q?", "choices": ["a", "b"], "answer": "A"}"#.to_string(),
        ]);
        let err = load_bar_exam_qa(file.path(), None).unwrap_err();
        assert!(matches!(err, DatasetError::ChoiceCount { count: 2, .. }));
    }

    #[test]
    fn test_choices_conversion() {
        let file = write_dataset(&[record("1", "A")]);
        let questions = load_bar_exam_qa(file.path(), None).unwrap();
        let choices = questions[0].choices();
        assert_eq!(choices.as_prompt_block(), "A) a\nB) b\nC) c\nD) d");
    }

    #[test]
    fn test_non_label_answer_has_no_position() {
        let file = write_dataset(&[record("1", "ANULADA")]);
        let questions = load_bar_exam_qa(file.path(), None).unwrap();
        assert_eq!(questions[0].answer_position(), None);
    }
}
