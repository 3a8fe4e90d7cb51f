//! Projectivity analysis
//!
//! Builds the surface order implied by the tree: starting from `[0]`, each
//! node is replaced in place by the sorted block of itself and its children.
//! The tree is projective exactly when this order is the identity
//! `[0, 1, ..., n]`, i.e. every subtree covers a contiguous span.

use crate::tree::{ROOT_ID, Sentence, TokenId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectivityResult {
    pub is_projective: bool,
    /// The order produced by the traversal. Tokens that cannot be reached
    /// from the root are missing from it.
    pub order: Vec<TokenId>,
}

/// Order implied by nesting each node's children around it
pub fn projection_order(sentence: &Sentence) -> Vec<TokenId> {
    let mut order = vec![ROOT_ID];
    let mut visited = vec![false; sentence.len() + 1];
    let mut stack = vec![ROOT_ID];

    while let Some(node) = stack.pop() {
        if std::mem::replace(&mut visited[node], true) {
            continue;
        }
        let children = sentence.children(node);
        if children.is_empty() {
            continue;
        }

        let mut block: Vec<TokenId> = children.to_vec();
        block.push(node);
        block.sort_unstable();

        // node is always present: it was spliced in by its parent
        if let Some(pos) = order.iter().position(|&id| id == node) {
            order.splice(pos..=pos, block);
        }

        // Splicing is position-stable, so sibling order does not matter
        stack.extend(children.iter().rev().filter(|&&c| !visited[c]));
    }

    order
}

pub fn analyze(sentence: &Sentence) -> ProjectivityResult {
    let order = projection_order(sentence);
    let is_projective = order.len() == sentence.len() + 1
        && order.iter().enumerate().all(|(idx, &id)| idx == id);
    ProjectivityResult {
        is_projective,
        order,
    }
}

pub fn is_projective(sentence: &Sentence) -> bool {
    analyze(sentence).is_projective
}
