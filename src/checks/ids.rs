//! ID and HEAD column validity

use crate::tree::{ROOT_ID, Sentence, Token};
use rustc_hash::FxHashSet;

/// Ids are exactly `1..=n` in order
pub fn is_valid_id_list(tokens: &[Token]) -> bool {
    tokens.iter().enumerate().all(|(idx, t)| t.id == idx + 1)
}

/// Every head is 0 or the id of a token in the sentence
pub fn is_valid_head_list(tokens: &[Token]) -> bool {
    let ids: FxHashSet<usize> = tokens.iter().map(|t| t.id).collect();
    tokens
        .iter()
        .all(|t| t.head == ROOT_ID || ids.contains(&t.head))
}

/// Check raw token rows, before a [`Sentence`] is built from them
pub fn check_rows(tokens: &[Token]) -> bool {
    is_valid_id_list(tokens) && is_valid_head_list(tokens)
}

pub fn check(sentence: &Sentence) -> bool {
    check_rows(sentence.tokens())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_rows() {
        let rows = vec![
            Token::new(1, "كتاب", "NOM", 2, "MOD"),
            Token::new(2, "قرأ", "VRB", 0, "---"),
        ];
        assert!(check_rows(&rows));
        assert!(check(&Sentence::new(rows).unwrap()));
    }

    #[test]
    fn test_gap_in_ids() {
        let rows = vec![
            Token::new(1, "a", "NOM", 0, "---"),
            Token::new(3, "b", "NOM", 1, "MOD"),
        ];
        assert!(!is_valid_id_list(&rows));
        assert!(is_valid_head_list(&rows));
        assert!(!check_rows(&rows));
    }

    #[test]
    fn test_unknown_head() {
        let rows = vec![
            Token::new(1, "a", "NOM", 0, "---"),
            Token::new(2, "b", "NOM", 7, "MOD"),
        ];
        assert!(is_valid_id_list(&rows));
        assert!(!is_valid_head_list(&rows));
    }

    #[test]
    fn test_empty() {
        assert!(check_rows(&[]));
    }
}
