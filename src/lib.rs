//! Catibcheck: wellformedness checking and repair for CATiB treebanks
//!
//! Validates Arabic dependency trees annotated in the CATiB scheme, repairs
//! misattached commas, and relabels tokens with a CATiB+ rule table.
//! Core implementation in Rust with optional Python bindings.

// Tree model and structural analysis
pub mod error;
pub mod projectivity; // Surface-order projectivity test
pub mod root; // Root connectivity
pub mod tags; // CATiB tag and relation inventories
pub mod tree;

// Checking, repair and relabeling
pub mod buckwalter;
pub mod catib_plus; // Wildcard rule matching
pub mod checks;
pub mod config;
pub mod issue;
pub mod repair; // Comma reattachment and clitic tags
pub mod report; // Issue aggregation

// I/O
pub mod conllx;
pub mod treebank;
mod tsv;

// Python bindings
#[cfg(feature = "pyo3")]
pub mod python;

// Re-exports for convenience
pub use catib_plus::{
    EnrichOptions, EnrichSummary, LexEncoding, MappingRule, RuleTable, SentenceToken, TargetField,
    best_match, enrich, enrich_in_place,
};
pub use checks::{Analysis, DictionaryAnalyzer, MorphAnalyzer, Quadruple, QuadrupleTable};
pub use config::Config;
pub use conllx::{ConllxReader, RawSentence, to_conllx_string, write_sentence};
pub use error::{Result, TreeError};
pub use issue::{FlaggedIssue, IssueKind, IssueRecord};
pub use projectivity::{ProjectivityResult, is_projective};
pub use repair::{RepairOutcome, repair_commas, repair_sentence};
pub use report::{CheckContext, check_sentence};
pub use tree::{ROOT_ID, Sentence, Token, TokenId};
pub use treebank::{Treebank, TreebankReport};
