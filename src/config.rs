//! Checker configuration
//!
//! All tag inventories, punctuation classes and lexicons the checkers consult
//! live here, so tests and callers can substitute their own. The defaults
//! describe CATiB-annotated Arabic.

use crate::error::Result;
use crate::tags::{CatibTag, DeprelLabel};
use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Punctuation classes used by the position and pattern checks
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PunctuationConfig {
    /// Marks whose parent must precede them
    pub ending: String,
    /// Marks whose parent must follow them
    pub opening: String,
    /// Closing brackets, parent must precede them
    pub closing: String,
    /// Marks that may attach in either direction
    pub either: String,
    /// Regex for the backward-attaching bucket (`PNX-B`)
    pub bucket_backward: String,
    /// Regex for the forward-attaching bucket (`PNX-A`)
    pub bucket_forward: String,
    /// Regex for the either-direction bucket (`PNX-AB`)
    pub bucket_either: String,
}

impl Default for PunctuationConfig {
    fn default() -> Self {
        Self {
            ending: "..,;:?!؟،؛!.".to_string(),
            opening: "«([{".to_string(),
            closing: "»)]}".to_string(),
            either: "—\"'`".to_string(),
            bucket_backward: r"[.,;:?!؟،؛!.%\)»\]}>]+".to_string(),
            bucket_forward: r"[\(«\[{<]+".to_string(),
            bucket_either: r#"["'_\-/\\+=—–\*\^~♫]+"#.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub catib_tags: Vec<String>,
    pub deprel_labels: Vec<String>,
    /// Maximum number of dependents per head carrying each label
    pub single_relations: FxHashMap<String, usize>,
    pub punctuation: PunctuationConfig,
    /// Clitic form to the UPOS tags it may carry
    pub clitic_lexicon: FxHashMap<String, Vec<String>>,
    pub comma_forms: Vec<String>,
    /// Characters that end a sentence
    pub sentence_final_marks: String,
    /// Forms accepted even when the analyzer does not know them
    pub form_exceptions: Vec<String>,
}

const CLITICS: &[(&str, &[&str])] = &[
    ("أ+", &["PRT"]),
    ("ف+", &["PRT"]),
    ("و+", &["PRT"]),
    ("ب+", &["PRT"]),
    ("ك+", &["PRT"]),
    ("ل+", &["PRT"]),
    ("س+", &["PRT"]),
    ("لا+", &["PRT"]),
    ("ما+", &["PRT"]),
    ("+ني", &["NOM"]),
    ("+ي", &["NOM"]),
    ("+نا", &["NOM"]),
    ("+ك", &["NOM"]),
    ("+كما", &["NOM"]),
    ("+كم", &["NOM"]),
    ("+كن", &["NOM"]),
    ("+ه", &["NOM"]),
    ("+ها", &["NOM"]),
    ("+هما", &["NOM"]),
    ("+هم", &["NOM"]),
    ("+هن", &["NOM"]),
    ("+من", &["NOM"]),
    ("+ما", &["NOM", "PRT"]),
    ("+لا", &["PRT"]),
    ("+م", &["NOM"]),
    ("+كو", &["NOM"]),
    ("+كي", &["NOM"]),
    ("+ش", &["PRT"]),
    ("+ج", &["NOM"]),
    ("ع+", &["PRT"]),
    ("ش+", &["NOM"]),
    ("ه+", &["NOM"]),
];

impl Default for Config {
    fn default() -> Self {
        Self {
            catib_tags: CatibTag::ALL.iter().map(|t| t.as_str().to_string()).collect(),
            deprel_labels: DeprelLabel::ALL
                .iter()
                .map(|l| l.as_str().to_string())
                .collect(),
            single_relations: DeprelLabel::SINGLE
                .iter()
                .map(|l| (l.as_str().to_string(), 1))
                .collect(),
            punctuation: PunctuationConfig::default(),
            clitic_lexicon: CLITICS
                .iter()
                .map(|(form, tags)| {
                    (
                        form.to_string(),
                        tags.iter().map(|t| t.to_string()).collect(),
                    )
                })
                .collect(),
            comma_forms: vec![",".to_string(), "،".to_string()],
            sentence_final_marks: ".?!؟".to_string(),
            form_exceptions: vec!["إيا".to_string(), "لقد".to_string()],
        }
    }
}

impl Config {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    pub fn is_comma(&self, form: &str) -> bool {
        self.comma_forms.iter().any(|c| c == form)
    }

    pub fn is_valid_upos(&self, upos: &str) -> bool {
        self.catib_tags.iter().any(|t| t == upos)
    }

    pub fn is_valid_deprel(&self, deprel: &str) -> bool {
        self.deprel_labels.iter().any(|l| l == deprel)
    }

    /// UPOS tags allowed for a clitic form, if the form is a known clitic
    pub fn clitic_tags(&self, form: &str) -> Option<&[String]> {
        self.clitic_lexicon.get(form).map(|v| v.as_slice())
    }

    /// Labels with a per-head limit, and the limit
    pub fn relation_limit(&self, deprel: &str) -> Option<usize> {
        self.single_relations.get(deprel).copied()
    }

    pub(crate) fn tag_set(&self) -> FxHashSet<&str> {
        self.catib_tags.iter().map(String::as_str).collect()
    }
}
