//! Punctuation attachment direction
//!
//! Ending marks and closing brackets attach to something before them,
//! opening brackets to something after them. Quotes and dashes may go
//! either way.

use crate::config::PunctuationConfig;
use crate::issue::{IssueKind, TokenFinding};
use crate::tree::Sentence;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PunctClass {
    Ending,
    Opening,
    Closing,
    Either,
}

/// Class of a punctuation form, checked in the order ending, opening,
/// closing, either. The form matches a class when it occurs in that class's
/// character string.
pub fn classify(form: &str, punctuation: &PunctuationConfig) -> Option<PunctClass> {
    if form.is_empty() {
        return None;
    }
    [
        (&punctuation.ending, PunctClass::Ending),
        (&punctuation.opening, PunctClass::Opening),
        (&punctuation.closing, PunctClass::Closing),
        (&punctuation.either, PunctClass::Either),
    ]
    .into_iter()
    .find(|(chars, _)| chars.contains(form))
    .map(|(_, class)| class)
}

pub fn check(sentence: &Sentence, punctuation: &PunctuationConfig) -> Vec<TokenFinding> {
    let mut findings = Vec::new();
    for token in sentence.tokens() {
        let Ok(parent) = sentence.parent(token.id) else {
            continue;
        };
        // Repeated marks (`!!`, `..`) may chain onto each other
        if parent.form == token.form {
            continue;
        }
        let misplaced = match classify(&token.form, punctuation) {
            Some(PunctClass::Ending | PunctClass::Closing) => parent.id > token.id,
            Some(PunctClass::Opening) => parent.id < token.id,
            Some(PunctClass::Either) | None => false,
        };
        if misplaced {
            findings.push(TokenFinding::new(token.id, IssueKind::FlagPnxPosition));
        }
    }
    findings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::Token;

    fn sentence(rows: &[(&str, usize)]) -> Sentence {
        let tokens = rows
            .iter()
            .enumerate()
            .map(|(idx, &(form, head))| Token::new(idx + 1, form, "PNX", head, "MOD"))
            .collect();
        Sentence::new(tokens).unwrap()
    }

    fn flagged(rows: &[(&str, usize)]) -> Vec<usize> {
        check(&sentence(rows), &PunctuationConfig::default())
            .into_iter()
            .map(|f| f.token_id)
            .collect()
    }

    #[test]
    fn test_classify() {
        let p = PunctuationConfig::default();
        assert_eq!(classify("،", &p), Some(PunctClass::Ending));
        assert_eq!(classify("«", &p), Some(PunctClass::Opening));
        assert_eq!(classify(")", &p), Some(PunctClass::Closing));
        assert_eq!(classify("\"", &p), Some(PunctClass::Either));
        assert_eq!(classify("كتاب", &p), None);
        assert_eq!(classify("", &p), None);
    }

    #[test]
    fn test_ending_mark_attached_forward() {
        // the comma attaches to the word after it
        assert_eq!(flagged(&[("قال", 0), ("،", 3), ("ذهب", 1)]), vec![2]);
        assert!(flagged(&[("قال", 0), ("،", 1), ("ذهب", 1)]).is_empty());
    }

    #[test]
    fn test_brackets() {
        // ( 2 ) : opening attached forward, closing attached back
        assert!(flagged(&[("قال", 0), ("(", 3), ("نعم", 1), (")", 3)]).is_empty());
        assert_eq!(
            flagged(&[("قال", 0), ("(", 1), ("نعم", 1), (")", 1)]),
            vec![2]
        );
    }

    #[test]
    fn test_opening_bracket_on_root() {
        assert_eq!(flagged(&[("«", 0), ("نعم", 1)]), vec![1]);
    }

    #[test]
    fn test_repeated_marks_chain() {
        // second ! hangs on a later !; same form, not flagged
        assert!(flagged(&[("قال", 0), ("!", 1), ("!", 4), ("!", 1)]).is_empty());
    }

    #[test]
    fn test_either_direction() {
        assert!(flagged(&[("قال", 0), ("\"", 3), ("نعم", 1), ("\"", 3)]).is_empty());
    }
}
