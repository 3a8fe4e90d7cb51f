//! Wellformedness checkers
//!
//! Token-level checkers return [`TokenFinding`](crate::issue::TokenFinding)s;
//! sentence-level checkers return whether the sentence passes. None of them
//! modify the tree.

pub mod clitic;
pub mod deprel;
pub mod element;
pub mod form_pos;
pub mod ids;
pub mod mid_pnx;
pub mod pattern;
pub mod pnx_position;

pub use form_pos::{Analysis, DictionaryAnalyzer, MorphAnalyzer};
pub use pattern::{PunctBuckets, Quadruple, QuadrupleTable};
