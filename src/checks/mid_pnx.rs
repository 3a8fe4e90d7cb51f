//! Attachment of sentence-final punctuation that occurs mid-sentence
//!
//! A `.`, `?` or `!` inside a sentence usually closes a clause. Tokens to its
//! left should not attach across it to the right, and tokens to its right
//! should not attach back across it, unless the mark sits inside a quote or
//! bracket.

use crate::config::Config;
use crate::tree::{ROOT_ID, Sentence, Token, TokenId};
use regex::Regex;

/// Regex matching a sentence-final mark between an opening and a closing
/// bracket or quote
pub fn nested_mark_pattern(marks: &str) -> String {
    format!(
        r#"([«(\[{{"']).*[{}].*([»)\]}}'"])"#,
        regex::escape(marks)
    )
}

fn is_mark(form: &str, marks: &str) -> bool {
    form.chars().any(|c| marks.contains(c))
}

/// True if the sentence passes: every mid-sentence mark is either nested in
/// brackets or quotes, or not crossed by any arc.
///
/// Trailing marks at the end of the sentence are ignored, and so are the
/// tokens they occupy.
pub fn check(sentence: &Sentence, config: &Config, nested: &Regex) -> bool {
    let tokens = sentence.tokens();
    let marks = config.sentence_final_marks.as_str();
    let mut mark_ids: Vec<TokenId> = tokens
        .iter()
        .filter(|t| is_mark(&t.form, marks))
        .map(|t| t.id)
        .collect();

    let mut end = tokens.len();
    while end > 0 && mark_ids.last() == Some(&tokens[end - 1].id) {
        mark_ids.pop();
        end -= 1;
    }
    let kept = &tokens[..end];

    if mark_ids.len() == kept.len() {
        return true;
    }

    let joined = kept
        .iter()
        .map(|t| t.form.as_str())
        .collect::<Vec<_>>()
        .join(" ");
    if nested.is_match(&joined) {
        return false;
    }

    mark_ids.iter().all(|&id| attachments_valid(kept, id))
}

/// Attaches at or before `id` (ignoring the root)
fn attaches_back(token: &Token, id: TokenId) -> bool {
    token.head != ROOT_ID && token.head <= id
}

fn attachments_valid(kept: &[Token], id: TokenId) -> bool {
    let current = &kept[id - 1];
    let before = if id == 1 { None } else { kept.get(id - 2) };
    let after = if id == kept.len() { None } else { kept.get(id) };

    let before_ok = before.is_none_or(|t| t.form == current.form || t.head < id);
    let after_ok = after.is_none_or(|t| t.form == current.form || !attaches_back(t, id));
    let far_before_ok = kept[..id.saturating_sub(2)].iter().all(|t| t.head < id);
    let far_after_ok = kept
        .get(id + 1..)
        .unwrap_or(&[])
        .iter()
        .all(|t| !attaches_back(t, id));

    before_ok && after_ok && far_before_ok && far_after_ok
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nested() -> Regex {
        Regex::new(&nested_mark_pattern(&Config::default().sentence_final_marks)).unwrap()
    }

    fn sentence(rows: &[(&str, usize)]) -> Sentence {
        let tokens = rows
            .iter()
            .enumerate()
            .map(|(idx, &(form, head))| Token::new(idx + 1, form, "NOM", head, "MOD"))
            .collect();
        Sentence::new(tokens).unwrap()
    }

    fn passes(rows: &[(&str, usize)]) -> bool {
        check(&sentence(rows), &Config::default(), &nested())
    }

    #[test]
    fn test_no_mid_sentence_mark() {
        assert!(passes(&[("ذهب", 0), ("زيد", 1), (".", 1)]));
    }

    #[test]
    fn test_clauses_kept_apart() {
        // ذهب زيد . جاء عمرو .
        assert!(passes(&[
            ("ذهب", 0),
            ("زيد", 1),
            (".", 1),
            ("جاء", 0),
            ("عمرو", 4),
            (".", 4),
        ]));
    }

    #[test]
    fn test_arc_crosses_mark() {
        // زيد attaches forward over the full stop
        assert!(!passes(&[
            ("ذهب", 0),
            ("زيد", 4),
            (".", 1),
            ("جاء", 0),
            ("عمرو", 4),
        ]));
    }

    #[test]
    fn test_right_side_attaches_back() {
        // عمرو attaches to ذهب, back across the mark
        assert!(!passes(&[
            ("ذهب", 0),
            ("زيد", 1),
            ("؟", 1),
            ("جاء", 0),
            ("عمرو", 1),
        ]));
    }

    #[test]
    fn test_repeated_mark_tolerates_neighbour() {
        // ذهب زيد ! ! جاء عمرو: each ! attaches across the other
        assert!(passes(&[
            ("ذهب", 0),
            ("زيد", 1),
            ("!", 5),
            ("!", 1),
            ("جاء", 0),
            ("عمرو", 5),
        ]));
    }

    #[test]
    fn test_different_marks_do_not_tolerate_neighbour() {
        // same arcs, but ! followed by ؟
        assert!(!passes(&[
            ("ذهب", 0),
            ("زيد", 1),
            ("!", 5),
            ("؟", 1),
            ("جاء", 0),
            ("عمرو", 5),
        ]));
    }

    #[test]
    fn test_mark_inside_quotes() {
        assert!(!passes(&[
            ("قال", 0),
            ("«", 3),
            ("نعم", 1),
            (".", 3),
            ("»", 3),
            ("ثم", 1),
        ]));
    }

    #[test]
    fn test_only_marks() {
        assert!(passes(&[(".", 0), ("!", 1)]));
        assert!(passes(&[]));
    }

    #[test]
    fn test_pattern_escapes_marks() {
        let re = nested();
        assert!(re.is_match("« نعم . »"));
        assert!(!re.is_match("« نعم »"));
    }
}
