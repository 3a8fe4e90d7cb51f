//! CATiB+ relabeling
//!
//! Each token is projected onto eight features (its lemma, tags and relation,
//! the same for its parent, and the arc direction) and matched against a
//! table of wildcard rules. The rule matching the most features wins; ties
//! go to the most specific rule, then either surface every tied value or fall
//! back to the earliest row.

use crate::buckwalter::ar2bw;
use crate::error::{Result, TreeError};
use crate::tags::Direction;
use crate::tree::{Sentence, Token, TokenId};
use crate::tsv::TsvTable;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::LazyLock;
use tracing::debug;

const WILDCARD: &str = "*";

/// Feature columns of a rule, in projection order
pub const FEATURES: [&str; 8] = [
    "lex",
    "catib_pos",
    "mada_pos",
    "parent_lex",
    "parent_catib_pos",
    "parent_mada_pos",
    "rel",
    "order",
];

/// Which token field a rule rewrites
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TargetField {
    Pos,
    Rel,
}

impl TargetField {
    pub fn as_str(&self) -> &'static str {
        match self {
            TargetField::Pos => "POS",
            TargetField::Rel => "REL",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "POS" => Some(TargetField::Pos),
            "REL" => Some(TargetField::Rel),
            _ => None,
        }
    }
}

impl std::fmt::Display for TargetField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One pattern cell of a rule
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cell {
    Any,
    Literal(String),
}

impl Cell {
    pub fn parse(s: &str) -> Self {
        if s == WILDCARD {
            Cell::Any
        } else {
            Cell::Literal(s.to_string())
        }
    }

    pub fn matches(&self, value: &str) -> bool {
        match self {
            Cell::Any => true,
            Cell::Literal(lit) => lit == value,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappingRule {
    /// Original row index, used to break ties
    pub index: usize,
    pub target_field: TargetField,
    pub cells: [Cell; 8],
    pub target_value: String,
    /// Number of literal cells
    pub specificity: usize,
}

impl MappingRule {
    pub fn new(index: usize, target_field: TargetField, cells: [&str; 8], target_value: &str) -> Self {
        let cells = cells.map(Cell::parse);
        let specificity = cells.iter().filter(|c| **c != Cell::Any).count();
        Self {
            index,
            target_field,
            cells,
            target_value: target_value.to_string(),
            specificity,
        }
    }

    /// Number of cells matching the projection
    pub fn match_sum(&self, token: &SentenceToken) -> usize {
        self.cells
            .iter()
            .zip(token.values())
            .filter(|(cell, value)| cell.matches(value))
            .count()
    }
}

/// Read-only rule table
#[derive(Debug, Clone, Default)]
pub struct RuleTable {
    rules: Vec<MappingRule>,
}

impl RuleTable {
    pub fn new(rules: Vec<MappingRule>) -> Self {
        Self { rules }
    }

    /// Load rules from TSV. Required columns are `target_field`, the eight
    /// feature columns and `target_value` (or `target_value_long`). An
    /// `index` column, when present, gives the tie-break index; otherwise
    /// the row position does. Specificity is always recomputed.
    pub fn from_tsv_str(text: &str) -> Result<Self> {
        let table = TsvTable::parse(text)?;
        let field_col = table.require("target_field")?;
        let value_col = match table.column("target_value") {
            Some(col) => col,
            None => table.require("target_value_long")?,
        };
        let index_col = table.column("index");
        let mut feature_cols = [0; 8];
        for (slot, name) in feature_cols.iter_mut().zip(FEATURES) {
            *slot = table.require(name)?;
        }

        let mut rules = Vec::with_capacity(table.rows().len());
        for (position, (line_num, row)) in table.rows().iter().enumerate() {
            let target_field = TargetField::parse(row[field_col].trim()).ok_or_else(|| {
                TreeError::parse(*line_num, format!("bad target_field `{}`", row[field_col]))
            })?;
            let index = match index_col {
                Some(col) => row[col].trim().parse().map_err(|_| {
                    TreeError::parse(*line_num, format!("bad index `{}`", row[col]))
                })?,
                None => position,
            };
            let cells = feature_cols.map(|col| row[col].trim());
            rules.push(MappingRule::new(index, target_field, cells, row[value_col].trim()));
        }
        Ok(Self { rules })
    }

    pub fn from_tsv_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_tsv_str(&text)
    }

    pub fn rules(&self) -> &[MappingRule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// How lemmas are written in the projection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LexEncoding {
    Arabic,
    /// Rule tables written in Buckwalter transliteration
    #[default]
    Buckwalter,
}

/// Mapper view of a token and its parent
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentenceToken {
    pub lex: String,
    pub catib_pos: String,
    pub mada_pos: String,
    pub parent_lex: String,
    pub parent_catib_pos: String,
    pub parent_mada_pos: String,
    pub rel: String,
    pub order: Direction,
}

fn lex_of(token: &Token, encoding: LexEncoding) -> String {
    if token.lemma == "_" {
        return WILDCARD.to_string();
    }
    match encoding {
        LexEncoding::Arabic => token.lemma.clone(),
        LexEncoding::Buckwalter => ar2bw(&token.lemma),
    }
}

/// MADA tag in MISC: `mada=noun` or `mada=noun_prop`
static MADA_MISC: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"mada=([a-z]+_?[a-z]+)").ok());

fn mada_from_misc(misc: &str) -> Option<&str> {
    let captures = MADA_MISC.as_ref()?.captures(misc)?;
    captures.get(1).map(|m| m.as_str())
}

/// MADA part of speech: the `pos=` attribute in the second FEATS item, or
/// `mada=` in MISC, or `*`
pub fn mada_pos(feats: &str, misc: &str) -> String {
    let Some(second) = feats.split('|').nth(1) else {
        return WILDCARD.to_string();
    };
    let value = if second.starts_with("pos") {
        second.split('=').nth(1)
    } else {
        mada_from_misc(misc)
    };
    value.unwrap_or(WILDCARD).to_string()
}

impl SentenceToken {
    /// Project token `id` and its parent. The virtual root projects as
    /// `ROOT` in every parent field.
    pub fn from_sentence(sentence: &Sentence, id: TokenId, encoding: LexEncoding) -> Result<Self> {
        let token = sentence
            .token(id)
            .ok_or(TreeError::MissingParent { id, head: id })?;
        let parent = sentence.parent(id)?;
        let (parent_lex, parent_catib_pos, parent_mada_pos) = if parent.is_root() {
            ("ROOT".to_string(), "ROOT".to_string(), "ROOT".to_string())
        } else {
            (
                lex_of(parent, encoding),
                parent.upos.clone(),
                mada_pos(&parent.feats, &parent.misc),
            )
        };
        Ok(Self {
            lex: lex_of(token, encoding),
            catib_pos: token.upos.clone(),
            mada_pos: mada_pos(&token.feats, &token.misc),
            parent_lex,
            parent_catib_pos,
            parent_mada_pos,
            rel: token.deprel.clone(),
            order: Direction::of(parent.id, token.id),
        })
    }

    /// Feature values in [`FEATURES`] order
    pub fn values(&self) -> [&str; 8] {
        [
            self.lex.as_str(),
            self.catib_pos.as_str(),
            self.mada_pos.as_str(),
            self.parent_lex.as_str(),
            self.parent_catib_pos.as_str(),
            self.parent_mada_pos.as_str(),
            self.rel.as_str(),
            self.order.as_str(),
        ]
    }
}

/// Best target value for `field`.
///
/// With `return_all_ties`, several equally good rules yield their distinct
/// values joined by `|` in table order; otherwise the rule with the lowest
/// index wins.
pub fn best_match(
    token: &SentenceToken,
    table: &RuleTable,
    field: TargetField,
    return_all_ties: bool,
) -> Result<String> {
    let scored: Vec<(&MappingRule, usize)> = table
        .rules()
        .iter()
        .filter(|r| r.target_field == field)
        .map(|r| (r, r.match_sum(token)))
        .collect();

    let Some(best_sum) = scored.iter().map(|&(_, sum)| sum).max() else {
        return Err(TreeError::NoRuleMatch { field });
    };
    let best_specificity = scored
        .iter()
        .filter(|&&(_, sum)| sum == best_sum)
        .map(|(r, _)| r.specificity)
        .max()
        .unwrap_or(0);
    let top: Vec<&MappingRule> = scored
        .iter()
        .filter(|&&(r, sum)| sum == best_sum && r.specificity == best_specificity)
        .map(|&(r, _)| r)
        .collect();

    if return_all_ties && top.len() > 1 {
        let mut values: Vec<&str> = Vec::new();
        for rule in &top {
            if !values.contains(&rule.target_value.as_str()) {
                values.push(&rule.target_value);
            }
        }
        return Ok(values.join("|"));
    }

    top.iter()
        .min_by_key(|r| r.index)
        .map(|r| r.target_value.clone())
        .ok_or(TreeError::NoRuleMatch { field })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnrichOptions {
    pub encoding: LexEncoding,
    pub return_all_ties: bool,
}

impl Default for EnrichOptions {
    fn default() -> Self {
        Self {
            encoding: LexEncoding::Buckwalter,
            return_all_ties: true,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EnrichSummary {
    pub pos_changed: usize,
    pub rel_changed: usize,
    /// Token fields left as they were because no rule targets them
    pub unresolved: usize,
}

fn resolve(
    projection: &SentenceToken,
    table: &RuleTable,
    field: TargetField,
    options: EnrichOptions,
    id: TokenId,
    summary: &mut EnrichSummary,
) -> Result<Option<String>> {
    match best_match(projection, table, field, options.return_all_ties) {
        Ok(value) => Ok(Some(value)),
        Err(TreeError::NoRuleMatch { field }) => {
            debug!("token {}: no {} rule, keeping original", id, field);
            summary.unresolved += 1;
            Ok(None)
        }
        Err(e) => Err(e),
    }
}

/// Relabel every non-root token in place.
///
/// All new labels are computed from the original annotation before any is
/// written. A field no rule targets keeps its value.
pub fn enrich_in_place(
    sentence: &mut Sentence,
    table: &RuleTable,
    options: EnrichOptions,
) -> Result<EnrichSummary> {
    let mut summary = EnrichSummary::default();
    let mut updates = Vec::with_capacity(sentence.len());
    for id in 1..=sentence.len() {
        let projection = SentenceToken::from_sentence(sentence, id, options.encoding)?;
        if projection.lex == "ROOT" {
            continue;
        }
        let pos = resolve(&projection, table, TargetField::Pos, options, id, &mut summary)?;
        let rel = resolve(&projection, table, TargetField::Rel, options, id, &mut summary)?;
        updates.push((id, pos, rel));
    }

    for (id, pos, rel) in updates {
        let Some(token) = sentence.token_mut(id) else {
            continue;
        };
        if let Some(pos) = pos.filter(|p| *p != token.upos) {
            token.upos = pos;
            summary.pos_changed += 1;
        }
        if let Some(rel) = rel.filter(|r| *r != token.deprel) {
            token.deprel = rel;
            summary.rel_changed += 1;
        }
    }
    Ok(summary)
}

/// Relabel with the default options, returning the new sentence
pub fn enrich(mut sentence: Sentence, table: &RuleTable) -> Result<Sentence> {
    enrich_in_place(&mut sentence, table, EnrichOptions::default())?;
    Ok(sentence)
}
