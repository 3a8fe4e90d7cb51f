//! Per-head relation cardinality
//!
//! Some relations (subject, topic, predicate, idafa, tamyiz) may appear on at
//! most one dependent of a head. Every dependent carrying an over-used label
//! is flagged. Dependents of the virtual root are not counted.

use crate::config::Config;
use crate::issue::{IssueKind, TokenFinding};
use crate::tree::Sentence;
use rustc_hash::FxHashMap;

pub fn check(sentence: &Sentence, config: &Config) -> Vec<TokenFinding> {
    let mut findings = Vec::new();
    for head in sentence.tokens() {
        let children = sentence.children(head.id);
        if children.len() < 2 {
            continue;
        }

        let mut counts: FxHashMap<&str, usize> = FxHashMap::default();
        for &child in children {
            if let Some(token) = sentence.token(child) {
                *counts.entry(token.deprel.as_str()).or_default() += 1;
            }
        }

        for &child in children {
            let Some(token) = sentence.token(child) else {
                continue;
            };
            let over = config
                .relation_limit(&token.deprel)
                .zip(counts.get(token.deprel.as_str()))
                .is_some_and(|(limit, &count)| count > limit);
            if over {
                findings.push(TokenFinding::new(child, IssueKind::FlagMultipleDeprelLabels));
            }
        }
    }
    findings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::Token;

    #[test]
    fn test_two_subjects() {
        let sentence = Sentence::new(vec![
            Token::new(1, "قال", "VRB", 0, "---"),
            Token::new(2, "زيد", "PROP", 1, "SBJ"),
            Token::new(3, "عمرو", "PROP", 1, "SBJ"),
            Token::new(4, "شيئا", "NOM", 1, "OBJ"),
            Token::new(5, "آخر", "NOM", 4, "MOD"),
        ])
        .unwrap();

        let ids: Vec<_> = check(&sentence, &Config::default())
            .into_iter()
            .map(|f| (f.token_id, f.kind))
            .collect();
        assert_eq!(
            ids,
            vec![
                (2, IssueKind::FlagMultipleDeprelLabels),
                (3, IssueKind::FlagMultipleDeprelLabels)
            ]
        );
    }

    #[test]
    fn test_unlimited_labels() {
        let sentence = Sentence::new(vec![
            Token::new(1, "قال", "VRB", 0, "---"),
            Token::new(2, "أمس", "NOM", 1, "MOD"),
            Token::new(3, "هنا", "NOM", 1, "MOD"),
            Token::new(4, "زيد", "PROP", 1, "SBJ"),
        ])
        .unwrap();
        assert!(check(&sentence, &Config::default()).is_empty());
    }

    #[test]
    fn test_root_dependents_not_counted() {
        let sentence = Sentence::new(vec![
            Token::new(1, "أ", "NOM", 0, "SBJ"),
            Token::new(2, "ب", "NOM", 0, "SBJ"),
        ])
        .unwrap();
        assert!(check(&sentence, &Config::default()).is_empty());
    }

    #[test]
    fn test_custom_limit() {
        let config = Config::from_json_str(r#"{"single_relations": {"OBJ": 2}}"#).unwrap();
        let sentence = Sentence::new(vec![
            Token::new(1, "أعطى", "VRB", 0, "---"),
            Token::new(2, "زيدا", "PROP", 1, "OBJ"),
            Token::new(3, "كتابا", "NOM", 1, "OBJ"),
            Token::new(4, "قلما", "NOM", 1, "OBJ"),
        ])
        .unwrap();
        assert_eq!(check(&sentence, &config).len(), 3);
    }
}
