//! Root connectivity
//!
//! A sentence is well rooted when at least one token attaches to the virtual
//! root and every token reaches the root by following head links.

use crate::tree::{ROOT_ID, Sentence, TokenId};

/// At least one token has head 0
pub fn root_exists(sentence: &Sentence) -> bool {
    !sentence.children(ROOT_ID).is_empty()
}

/// Every token reaches the root without revisiting a token.
///
/// Tokens already proven connected are remembered, so each ascent stops as
/// soon as it meets one of them.
pub fn all_connected_to_root(sentence: &Sentence) -> bool {
    let n = sentence.len();
    let mut reaches_root = vec![false; n + 1];
    reaches_root[ROOT_ID] = true;
    let mut on_path = vec![false; n + 1];
    let mut path: Vec<TokenId> = Vec::new();

    for token in sentence.tokens() {
        let mut current = token.id;
        while !reaches_root[current] {
            if on_path[current] {
                return false;
            }
            on_path[current] = true;
            path.push(current);
            match sentence.head_of(current) {
                Some(head) if head <= n => current = head,
                _ => return false,
            }
        }
        for id in path.drain(..) {
            on_path[id] = false;
            reaches_root[id] = true;
        }
    }
    true
}

pub fn check(sentence: &Sentence) -> bool {
    root_exists(sentence) && all_connected_to_root(sentence)
}
