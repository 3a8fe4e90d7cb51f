//! Syntactic pattern check
//!
//! Every arc is summarized as a quadruple (child tag, relation, parent tag,
//! direction) and looked up in a table of attested patterns. Tags are
//! normalized first: punctuation is split by attachment bucket, clitics are
//! marked with `#` on the side of their host, and proper nouns, foreign words
//! and passive verbs fall in with their base class.

use super::clitic::{is_clitic, is_enclitic, is_proclitic};
use crate::config::PunctuationConfig;
use crate::error::{Result, TreeError};
use crate::issue::{IssueKind, TokenFinding};
use crate::tags::{CatibTag, Direction};
use crate::tree::{Sentence, Token};
use crate::tsv::TsvTable;
use regex::Regex;
use rustc_hash::FxHashSet;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Quadruple {
    pub child_upos: String,
    pub child_deprel: String,
    pub parent_upos: String,
    pub direction: Direction,
}

impl Quadruple {
    pub fn new(child_upos: &str, child_deprel: &str, parent_upos: &str, direction: Direction) -> Self {
        Self {
            child_upos: child_upos.to_string(),
            child_deprel: child_deprel.to_string(),
            parent_upos: parent_upos.to_string(),
            direction,
        }
    }
}

/// Attested patterns
#[derive(Debug, Clone, Default)]
pub struct QuadrupleTable {
    allowed: FxHashSet<Quadruple>,
}

impl QuadrupleTable {
    /// Load patterns from TSV with columns `UPOS_child`, `DEPREL_child`,
    /// `UPOS_parent` and `direction`. When a `Final` column is present only
    /// rows marked `OK` are kept.
    pub fn from_tsv_str(text: &str) -> Result<Self> {
        let table = TsvTable::parse(text)?;
        let child = table.require("UPOS_child")?;
        let deprel = table.require("DEPREL_child")?;
        let parent = table.require("UPOS_parent")?;
        let direction = table.require("direction")?;
        let status = table.column("Final");

        let mut allowed = FxHashSet::default();
        for (line_num, row) in table.rows() {
            if status.is_some_and(|col| row[col].trim() != "OK") {
                continue;
            }
            let dir = Direction::parse(row[direction].trim()).ok_or_else(|| {
                TreeError::parse(*line_num, format!("bad direction `{}`", row[direction]))
            })?;
            allowed.insert(Quadruple::new(
                row[child].trim(),
                row[deprel].trim(),
                row[parent].trim(),
                dir,
            ));
        }
        Ok(Self { allowed })
    }

    pub fn from_tsv_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_tsv_str(&text)
    }

    pub fn contains(&self, quadruple: &Quadruple) -> bool {
        self.allowed.contains(quadruple)
    }

    pub fn len(&self) -> usize {
        self.allowed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.allowed.is_empty()
    }
}

impl FromIterator<Quadruple> for QuadrupleTable {
    fn from_iter<I: IntoIterator<Item = Quadruple>>(iter: I) -> Self {
        Self {
            allowed: iter.into_iter().collect(),
        }
    }
}

/// Compiled punctuation bucket regexes, anchored at the start of the form
#[derive(Debug, Clone)]
pub struct PunctBuckets {
    backward: Regex,
    forward: Regex,
    either: Regex,
}

fn anchored(pattern: &str) -> Result<Regex> {
    Regex::new(&format!("^(?:{pattern})")).map_err(|e| TreeError::Config(e.to_string()))
}

impl PunctBuckets {
    pub fn new(punctuation: &PunctuationConfig) -> Result<Self> {
        Ok(Self {
            backward: anchored(&punctuation.bucket_backward)?,
            forward: anchored(&punctuation.bucket_forward)?,
            either: anchored(&punctuation.bucket_either)?,
        })
    }

    /// `B`, `A` or `AB`, whichever bucket matches first
    pub fn bucket(&self, form: &str) -> Option<&'static str> {
        if self.backward.is_match(form) {
            Some("B")
        } else if self.forward.is_match(form) {
            Some("A")
        } else if self.either.is_match(form) {
            Some("AB")
        } else {
            None
        }
    }
}

/// Tag with punctuation bucket and clitic markers applied
pub fn marked_tag(form: &str, upos: &str, buckets: &PunctBuckets) -> String {
    let tag = match buckets.bucket(form) {
        Some(bucket) if upos == CatibTag::Pnx.as_str() => format!("{upos}-{bucket}"),
        _ => upos.to_string(),
    };
    if is_clitic(form) && is_proclitic(form) {
        format!("{tag}#")
    } else if is_clitic(form) && is_enclitic(form) {
        format!("#{tag}")
    } else {
        tag
    }
}

/// Fold a (possibly `#`-marked) tag into its pattern class
pub fn collapse_tag(tag: &str) -> String {
    let prefix = if tag.starts_with('#') { "#" } else { "" };
    let suffix = if tag.len() > prefix.len() && tag.ends_with('#') { "#" } else { "" };
    let core = &tag[prefix.len()..tag.len() - suffix.len()];
    match CatibTag::parse(core) {
        Some(t) => format!("{prefix}{}{suffix}", t.pattern_class().as_str()),
        None => tag.to_string(),
    }
}

fn quadruple_of(child: &Token, parent: &Token, buckets: &PunctBuckets) -> (Quadruple, String, String) {
    let child_tag = marked_tag(&child.form, &child.upos, buckets);
    let parent_tag = marked_tag(&parent.form, &parent.upos, buckets);
    let direction = if parent.id > child.id {
        Direction::ChildParent
    } else {
        Direction::ParentChild
    };
    let quadruple = Quadruple {
        child_upos: collapse_tag(&child_tag),
        child_deprel: child.deprel.clone(),
        parent_upos: collapse_tag(&parent_tag),
        direction,
    };
    (quadruple, child_tag, parent_tag)
}

/// Flag arcs whose normalized quadruple is not attested. Findings carry the
/// marked tags of child and parent.
pub fn check(sentence: &Sentence, table: &QuadrupleTable, buckets: &PunctBuckets) -> Vec<TokenFinding> {
    let mut findings = Vec::new();
    for child in sentence.tokens() {
        let Ok(parent) = sentence.parent(child.id) else {
            continue;
        };
        let (quadruple, child_tag, parent_tag) = quadruple_of(child, parent, buckets);
        if !table.contains(&quadruple) {
            findings.push(TokenFinding {
                token_id: child.id,
                kind: IssueKind::FlagUnkSyntaxPattern,
                pos_tag: Some(child_tag),
                parent_pos_tag: Some(parent_tag),
            });
        }
    }
    findings
}
