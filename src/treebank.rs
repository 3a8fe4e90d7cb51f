//! Treebank-level processing
//!
//! A [`Treebank`] wraps one CoNLL-X source (a string or a file) and runs the
//! checker, repairer or relabeler over every sentence. Sentences that cannot
//! be built are logged and skipped; the run carries on with the rest.

use crate::catib_plus::{EnrichOptions, RuleTable, enrich_in_place};
use crate::config::Config;
use crate::conllx::{ConllxReader, RawSentence};
use crate::error::{Result, TreeError};
use crate::issue::{FlaggedIssue, IssueKind, IssueRecord};
use crate::repair::repair_sentence;
use crate::report::{CheckContext, check_sentence, structural_issue};
use crate::tree::Sentence;
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Source of sentences for a treebank
#[derive(Debug, Clone)]
enum TreebankSource {
    /// In-memory CoNLL-X text
    String(String),
    /// Single file path (`.gz` allowed)
    File(PathBuf),
}

#[derive(Debug, Clone)]
pub struct Treebank {
    source: TreebankSource,
}

/// A sentence left out of processing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedSentence {
    pub sentence_number: usize,
    pub reason: String,
}

#[derive(Debug, Clone, Default)]
pub struct TreebankReport {
    /// Issues in sentence order
    pub issues: Vec<FlaggedIssue>,
    pub skipped: Vec<SkippedSentence>,
    pub sentence_count: usize,
    pub token_count: usize,
    /// Tokens that are not clitics
    pub word_count: usize,
}

impl TreebankReport {
    pub fn records(&self) -> Vec<IssueRecord> {
        self.issues.iter().map(FlaggedIssue::to_record).collect()
    }

    pub fn count(&self, kind: IssueKind) -> usize {
        self.issues.iter().filter(|i| i.kind() == kind).count()
    }

    fn absorb(&mut self, outcome: SentenceOutcome) {
        self.sentence_count += 1;
        self.token_count += outcome.tokens;
        self.word_count += outcome.words;
        self.issues.extend(outcome.issues);
        self.skipped.extend(outcome.skipped);
    }
}

/// Result of checking one sentence
struct SentenceOutcome {
    issues: Vec<FlaggedIssue>,
    skipped: Option<SkippedSentence>,
    tokens: usize,
    words: usize,
}

impl SentenceOutcome {
    fn skipped(sentence_number: usize, reason: &TreeError) -> Self {
        warn!("skipping sentence {}: {}", sentence_number, reason);
        Self {
            issues: Vec::new(),
            skipped: Some(SkippedSentence {
                sentence_number,
                reason: reason.to_string(),
            }),
            tokens: 0,
            words: 0,
        }
    }
}

/// Check one sentence. Only I/O errors escape; everything else is folded into
/// the outcome.
fn check_one(
    sentence_number: usize,
    raw: Result<RawSentence>,
    ctx: &CheckContext,
) -> Result<SentenceOutcome> {
    let raw = match raw {
        Ok(raw) => raw,
        Err(e @ TreeError::Io(_)) => return Err(e),
        Err(e) => return Ok(SentenceOutcome::skipped(sentence_number, &e)),
    };

    let tokens = raw.tokens.len();
    let words = raw.tokens.iter().filter(|t| !t.form.contains('+')).count();
    let text = raw.text();

    let sentence = match raw.into_sentence() {
        Ok(sentence) => sentence,
        Err(e) => {
            let e = e.with_sentence(sentence_number);
            let mut outcome = SentenceOutcome::skipped(sentence_number, &e);
            if matches!(e, TreeError::Structural { .. }) {
                outcome.issues.push(structural_issue(sentence_number, &text));
            }
            outcome.tokens = tokens;
            outcome.words = words;
            return Ok(outcome);
        }
    };

    let (issues, skipped) = match check_sentence(&sentence, sentence_number, ctx) {
        Ok(issues) => (issues, None),
        Err(e) => {
            warn!("skipping sentence {}: {}", sentence_number, e);
            let skipped = SkippedSentence {
                sentence_number,
                reason: e.to_string(),
            };
            (Vec::new(), Some(skipped))
        }
    };
    Ok(SentenceOutcome {
        issues,
        skipped,
        tokens,
        words,
    })
}

impl Treebank {
    /// Create from an in-memory CoNLL-X string
    pub fn from_string(text: &str) -> Self {
        Self {
            source: TreebankSource::String(text.to_string()),
        }
    }

    /// Create from a single file path
    pub fn from_file(path: impl AsRef<Path>) -> Self {
        Self {
            source: TreebankSource::File(path.as_ref().to_path_buf()),
        }
    }

    /// Raw sentences in file order
    pub fn raw_sentences(&self) -> Result<Box<dyn Iterator<Item = Result<RawSentence>> + '_>> {
        match &self.source {
            TreebankSource::String(text) => Ok(Box::new(ConllxReader::from_str(text))),
            TreebankSource::File(path) => Ok(Box::new(ConllxReader::from_file(path)?)),
        }
    }

    /// Built sentences; sentences that fail to parse or build are logged and
    /// left out
    pub fn sentences(&self) -> Result<Vec<Sentence>> {
        let mut sentences = Vec::new();
        for (idx, raw) in self.raw_sentences()?.enumerate() {
            match raw.and_then(RawSentence::into_sentence) {
                Ok(sentence) => sentences.push(sentence),
                Err(e @ TreeError::Io(_)) => return Err(e),
                Err(e) => warn!("skipping sentence {}: {}", idx + 1, e.with_sentence(idx + 1)),
            }
        }
        Ok(sentences)
    }

    /// Check every sentence in order
    pub fn check(&self, ctx: &CheckContext) -> Result<TreebankReport> {
        let mut report = TreebankReport::default();
        for (idx, raw) in self.raw_sentences()?.enumerate() {
            report.absorb(check_one(idx + 1, raw, ctx)?);
        }
        Ok(report)
    }

    /// Like [`check`](Self::check), with sentences checked in parallel.
    /// Issues come out in the same order.
    pub fn check_parallel(&self, ctx: &CheckContext) -> Result<TreebankReport> {
        let raws: Vec<Result<RawSentence>> = self.raw_sentences()?.collect();
        let outcomes: Vec<Result<SentenceOutcome>> = raws
            .into_par_iter()
            .enumerate()
            .map(|(idx, raw)| check_one(idx + 1, raw, ctx))
            .collect();

        let mut report = TreebankReport::default();
        for outcome in outcomes {
            report.absorb(outcome?);
        }
        Ok(report)
    }

    /// Repaired copies of every sentence that could be built
    pub fn repair(&self, config: &Config) -> Result<Vec<Sentence>> {
        let mut sentences = self.sentences()?;
        for sentence in &mut sentences {
            repair_sentence(sentence, config);
        }
        Ok(sentences)
    }

    /// Relabeled copies of every sentence that could be built
    pub fn enrich(&self, table: &RuleTable, options: EnrichOptions) -> Result<Vec<Sentence>> {
        let mut sentences = self.sentences()?;
        for (idx, sentence) in sentences.iter_mut().enumerate() {
            if let Err(e) = enrich_in_place(sentence, table, options) {
                warn!("sentence {} left unlabeled: {}", idx + 1, e);
            }
        }
        Ok(sentences)
    }
}
