//! Tag-set validity: UPOS must be a CATiB tag and DEPREL a CATiB relation

use crate::config::Config;
use crate::issue::{IssueKind, TokenFinding};
use crate::tree::Sentence;

/// One finding per token with an unknown UPOS, then one per token with an
/// unknown DEPREL
pub fn check(sentence: &Sentence, config: &Config) -> Vec<TokenFinding> {
    let tags = config.tag_set();
    let upos_errors = sentence
        .tokens()
        .iter()
        .filter(|t| !tags.contains(t.upos.as_str()))
        .map(|t| TokenFinding::new(t.id, IssueKind::FlagCatibTags));
    let deprel_errors = sentence
        .tokens()
        .iter()
        .filter(|t| !config.is_valid_deprel(&t.deprel))
        .map(|t| TokenFinding::new(t.id, IssueKind::FlagDeprelLabels));
    upos_errors.chain(deprel_errors).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::Token;

    #[test]
    fn test_invalid_upos_flagged_once() {
        let sentence = Sentence::new(vec![
            Token::new(1, "كتاب", "XYZ", 2, "MOD"),
            Token::new(2, "قرأ", "VRB", 0, "---"),
        ])
        .unwrap();

        let findings = check(&sentence, &Config::default());
        assert_eq!(findings, vec![TokenFinding::new(1, IssueKind::FlagCatibTags)]);
    }

    #[test]
    fn test_valid_tags() {
        let sentence = Sentence::new(vec![
            Token::new(1, "كتاب", "NOM", 2, "OBJ"),
            Token::new(2, "قرئ", "VRB-PASS", 0, "---"),
        ])
        .unwrap();
        assert!(check(&sentence, &Config::default()).is_empty());
    }

    #[test]
    fn test_upos_errors_before_deprel_errors() {
        let sentence = Sentence::new(vec![
            Token::new(1, "a", "NOM", 2, "nsubj"),
            Token::new(2, "b", "VERB", 0, "---"),
        ])
        .unwrap();

        let kinds: Vec<_> = check(&sentence, &Config::default())
            .into_iter()
            .map(|f| (f.token_id, f.kind))
            .collect();
        assert_eq!(
            kinds,
            vec![
                (2, IssueKind::FlagCatibTags),
                (1, IssueKind::FlagDeprelLabels)
            ]
        );
    }
}
