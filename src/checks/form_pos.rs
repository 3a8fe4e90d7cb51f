//! FORM/UPOS validity
//!
//! Clitics are checked against the clitic lexicon. Other tokens must be
//! written in Arabic script, and when a morphological analyzer is available
//! the form must be known to it with a matching tag.

use super::clitic::{ELISION_MARK, is_clitic, strip_elision};
use crate::config::Config;
use crate::error::Result;
use crate::issue::{IssueKind, TokenFinding};
use crate::tags::CatibTag;
use crate::tree::{Sentence, Token};
use crate::tsv::TsvTable;
use rustc_hash::FxHashMap;
use std::path::Path;

/// One analysis of a surface form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Analysis {
    /// Tokenized form of the analysis; contains `+` when it splits clitics
    pub surface_form: String,
    /// CATiB tag of the analysis
    pub pos_tag: String,
}

/// Source of morphological analyses
pub trait MorphAnalyzer: Sync {
    fn analyze(&self, form: &str) -> Vec<Analysis>;
}

/// Analyzer backed by a lookup table
#[derive(Debug, Clone, Default)]
pub struct DictionaryAnalyzer {
    entries: FxHashMap<String, Vec<Analysis>>,
}

impl DictionaryAnalyzer {
    pub fn insert(&mut self, form: &str, surface_form: &str, pos_tag: &str) {
        self.entries.entry(form.to_string()).or_default().push(Analysis {
            surface_form: surface_form.to_string(),
            pos_tag: pos_tag.to_string(),
        });
    }

    /// Load from TSV with columns `form`, `surface_form` and `pos_tag`
    pub fn from_tsv_str(text: &str) -> Result<Self> {
        let table = TsvTable::parse(text)?;
        let form = table.require("form")?;
        let surface = table.require("surface_form")?;
        let pos = table.require("pos_tag")?;

        let mut analyzer = Self::default();
        for (_, row) in table.rows() {
            analyzer.insert(row[form].trim(), row[surface].trim(), row[pos].trim());
        }
        Ok(analyzer)
    }

    pub fn from_tsv_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_tsv_str(&text)
    }
}

impl MorphAnalyzer for DictionaryAnalyzer {
    fn analyze(&self, form: &str) -> Vec<Analysis> {
        self.entries.get(form).cloned().unwrap_or_default()
    }
}

/// Remove Arabic diacritics and tatweel
pub fn dediacritize(form: &str) -> String {
    form.chars()
        .filter(|&c| !matches!(c, '\u{064B}'..='\u{0652}' | '\u{0670}' | '\u{0640}'))
        .collect()
}

/// Arabic letters, diacritics and punctuation (Arabic-Indic digits excluded)
fn is_arabic_char(c: char) -> bool {
    match c {
        '\u{0660}'..='\u{0669}' | '\u{06F0}'..='\u{06F9}' => false,
        '\u{0600}'..='\u{06FF}'
        | '\u{0750}'..='\u{077F}'
        | '\u{08A0}'..='\u{08FF}'
        | '\u{FB50}'..='\u{FDFF}'
        | '\u{FE70}'..='\u{FEFF}' => true,
        _ => false,
    }
}

/// True unless the form, with elision marks removed, is non-empty Arabic
pub fn has_invalid_characters(form: &str) -> bool {
    let stripped = form.replace(ELISION_MARK, "");
    stripped.is_empty() || !stripped.chars().all(is_arabic_char)
}

fn is_number(form: &str, upos: &str) -> bool {
    let numeric =
        (!form.is_empty() && form.chars().all(char::is_numeric)) || form.parse::<f64>().is_ok();
    numeric && (upos == CatibTag::Nom.as_str() || upos == CatibTag::Prop.as_str())
}

fn is_matching_form(form: &str, analysis: &Analysis) -> bool {
    !analysis.surface_form.contains('+') && dediacritize(&analysis.surface_form) == dediacritize(form)
}

fn check_clitic(token: &Token, config: &Config) -> Option<IssueKind> {
    match config.clitic_tags(strip_elision(&token.form)) {
        None => Some(IssueKind::FlagFormOov),
        Some(tags) if tags.iter().any(|t| *t == token.upos) => None,
        Some(_) => Some(IssueKind::FlagFormPosMismatch),
    }
}

fn check_token(token: &Token, config: &Config, analyzer: Option<&dyn MorphAnalyzer>) -> Option<IssueKind> {
    let form = token.form.as_str();
    if form.is_empty() {
        return Some(IssueKind::FlagFormOov);
    }
    if is_clitic(form) {
        return check_clitic(token, config);
    }
    if token.upos == CatibTag::Foreign.as_str()
        || token.upos == CatibTag::Pnx.as_str()
        || is_number(form, &token.upos)
    {
        return None;
    }
    if has_invalid_characters(form) {
        return Some(IssueKind::FlagFormOov);
    }

    let analyzer = analyzer?;
    let analyses = analyzer.analyze(form);
    if analyses.is_empty() {
        return Some(IssueKind::FlagFormOov);
    }

    let mut form_match = false;
    let mut pos_match = false;
    for analysis in &analyses {
        if is_matching_form(form, analysis) {
            form_match = true;
            if analysis.pos_tag == token.upos {
                pos_match = true;
                break;
            }
        }
    }

    if !form_match && !config.form_exceptions.iter().any(|e| e == form) {
        Some(IssueKind::FlagFormOov)
    } else if !pos_match {
        Some(IssueKind::FlagFormPosMismatch)
    } else {
        None
    }
}

pub fn check(
    sentence: &Sentence,
    config: &Config,
    analyzer: Option<&dyn MorphAnalyzer>,
) -> Vec<TokenFinding> {
    sentence
        .tokens()
        .iter()
        .filter_map(|t| check_token(t, config, analyzer).map(|kind| TokenFinding::new(t.id, kind)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const LEXICON: &str = "form\tsurface_form\tpos_tag
كتب\tكَتَبَ\tVRB
كتب\tكُتُب\tNOM
بالكتاب\tب+الكتاب\tPRT
لقد\tل+قد\tPRT
";

    fn kinds(rows: &[(&str, &str)], analyzer: Option<&dyn MorphAnalyzer>) -> Vec<(usize, IssueKind)> {
        let tokens = rows
            .iter()
            .enumerate()
            .map(|(idx, &(form, upos))| Token::new(idx + 1, form, upos, 0, "---"))
            .collect();
        let sentence = Sentence::new(tokens).unwrap();
        check(&sentence, &Config::default(), analyzer)
            .into_iter()
            .map(|f| (f.token_id, f.kind))
            .collect()
    }

    #[test]
    fn test_dediacritize() {
        assert_eq!(dediacritize("كَتَبَ"), "كتب");
        assert_eq!(dediacritize("كـتـاب"), "كتاب");
    }

    #[test]
    fn test_clitics() {
        assert_eq!(
            kinds(&[("و+", "PRT"), ("+ها", "PRT"), ("ز+", "PRT"), ("ل+(*)", "PRT")], None),
            vec![(2, IssueKind::FlagFormPosMismatch), (3, IssueKind::FlagFormOov)]
        );
    }

    #[test]
    fn test_without_analyzer() {
        assert_eq!(
            kinds(
                &[
                    ("كتاب", "NOM"),
                    ("Google", "FOREIGN"),
                    ("12", "NOM"),
                    ("3.5", "PROP"),
                    ("12", "VRB"),
                    ("abc", "NOM"),
                    ("و(+)", "PRT"),
                    ("(*)", "NOM"),
                    ("!", "PNX"),
                ],
                None
            ),
            vec![
                (5, IssueKind::FlagFormOov),
                (6, IssueKind::FlagFormOov),
                (7, IssueKind::FlagFormOov),
                (8, IssueKind::FlagFormOov),
            ]
        );
    }

    #[test]
    fn test_with_analyzer() {
        let analyzer = DictionaryAnalyzer::from_tsv_str(LEXICON).unwrap();
        let analyzer: &dyn MorphAnalyzer = &analyzer;
        assert_eq!(
            kinds(
                &[
                    ("كتب", "NOM"),
                    ("كتب", "PRT"),
                    ("قلم", "NOM"),
                    ("بالكتاب", "NOM"),
                    ("لقد", "PRT"),
                ],
                Some(analyzer)
            ),
            vec![
                (2, IssueKind::FlagFormPosMismatch),
                (3, IssueKind::FlagFormOov),
                (4, IssueKind::FlagFormOov),
                (5, IssueKind::FlagFormPosMismatch),
            ]
        );
    }
}
