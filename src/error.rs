//! Error types shared by the tree model, the repairer, the mapper and the
//! table loaders.
//!
//! Fatal errors (`Structural`, `MissingParent`) abort processing of one
//! sentence. `NonProjective` and `NoRuleMatch` are expected outcomes that
//! callers recover from. Wellformedness problems are never errors; they are
//! returned as [`crate::issue::FlaggedIssue`] values.

use crate::catib_plus::TargetField;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, TreeError>;

/// Why a sentence failed structural validation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StructuralReason {
    /// Token ids are not the sequence `1..n`
    IdSequence,
    /// HEAD points at a token that does not exist
    DanglingHead,
}

impl std::fmt::Display for StructuralReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StructuralReason::IdSequence => write!(f, "ids are not consecutive from 1"),
            StructuralReason::DanglingHead => write!(f, "head references a nonexistent token"),
        }
    }
}

#[derive(Debug, Error)]
pub enum TreeError {
    #[error("structural error in sentence {}: token {id}: {reason}", display_sentence(.sentence))]
    Structural {
        sentence: Option<usize>,
        id: usize,
        reason: StructuralReason,
    },

    #[error("token {id} has no parent with id {head}")]
    MissingParent { id: usize, head: usize },

    #[error("tree is not projective")]
    NonProjective,

    #[error("no {field} rule matches")]
    NoRuleMatch { field: TargetField },

    #[error("Parse error at line {line_num}: {message}")]
    Parse { line_num: usize, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

fn display_sentence(sentence: &Option<usize>) -> String {
    match sentence {
        Some(n) => n.to_string(),
        None => "?".to_string(),
    }
}

impl TreeError {
    /// Attach a sentence number to a structural error
    pub fn with_sentence(self, number: usize) -> Self {
        match self {
            TreeError::Structural { id, reason, .. } => TreeError::Structural {
                sentence: Some(number),
                id,
                reason,
            },
            other => other,
        }
    }

    /// Fatal errors stop processing of the sentence they occur in
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            TreeError::Structural { .. } | TreeError::MissingParent { .. }
        )
    }

    pub(crate) fn parse(line_num: usize, message: impl Into<String>) -> Self {
        TreeError::Parse {
            line_num,
            message: message.into(),
        }
    }
}

impl From<serde_json::Error> for TreeError {
    fn from(e: serde_json::Error) -> Self {
        TreeError::Config(e.to_string())
    }
}
