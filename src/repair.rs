//! Tree repair: comma reattachment and clitic tag correction
//!
//! Commas are often attached to the token after them. Each comma is moved
//! back onto the token before it and then climbs that token's ancestors for
//! as long as the new arc stays legal: it may not reach the root, may not
//! point forward and may not make the tree non-projective.

use crate::config::Config;
use crate::error::{Result, TreeError};
use crate::projectivity::is_projective;
use crate::tree::{ROOT_ID, Sentence, TokenId};
use tracing::debug;

/// What the comma repairer did with a sentence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepairOutcome {
    /// Commas were processed; `moved` of them changed head
    Repaired { moved: usize },
    /// The tree is not projective, so it was left alone
    NotProjective,
    /// Every root dependent is a comma; there is nothing better to attach to
    OnlyCommasAtRoot,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RepairSummary {
    pub commas: RepairOutcome,
    /// Clitic tokens whose UPOS was rewritten
    pub retagged: usize,
}

/// Ids of comma tokens, ascending
pub fn comma_ids(sentence: &Sentence, config: &Config) -> Vec<TokenId> {
    sentence
        .tokens()
        .iter()
        .filter(|t| config.is_comma(&t.form))
        .map(|t| t.id)
        .collect()
}

/// True if no token other than a comma attaches to the root (including the
/// case of no root dependents at all)
pub fn only_commas_at_root(sentence: &Sentence, config: &Config) -> bool {
    sentence.children(ROOT_ID).iter().all(|&id| {
        sentence
            .token(id)
            .is_some_and(|t| config.is_comma(&t.form))
    })
}

/// Would attaching `comma_id` to `new_parent` be legal?
fn can_move(sentence: &mut Sentence, comma_id: TokenId, new_parent: TokenId) -> Result<bool> {
    if new_parent == ROOT_ID || new_parent >= comma_id {
        return Ok(false);
    }
    let old_head = sentence.head_of(comma_id).ok_or(TreeError::MissingParent {
        id: comma_id,
        head: new_parent,
    })?;
    sentence.set_head(comma_id, new_parent)?;
    let projective = is_projective(sentence);
    sentence.set_head(comma_id, old_head)?;
    Ok(projective)
}

/// Reattach a single comma. Returns whether its head changed.
///
/// Fails with [`TreeError::NonProjective`] if the tree is not projective.
pub fn fix_comma(sentence: &mut Sentence, comma_id: TokenId) -> Result<bool> {
    if !is_projective(sentence) {
        return Err(TreeError::NonProjective);
    }
    let current = sentence.head_of(comma_id).ok_or(TreeError::MissingParent {
        id: comma_id,
        head: comma_id,
    })?;

    // A sentence-initial comma keeps its head
    let mut new_parent = comma_id - 1;
    if new_parent == ROOT_ID || !can_move(sentence, comma_id, new_parent)? {
        return Ok(false);
    }

    // Each step moves strictly up an acyclic chain, so len() bounds the climb
    for _ in 0..sentence.len() {
        let Some(possible) = sentence.head_of(new_parent) else {
            break;
        };
        if !can_move(sentence, comma_id, possible)? {
            break;
        }
        new_parent = possible;
    }

    sentence.set_head(comma_id, new_parent)?;
    Ok(new_parent != current)
}

/// Reattach every comma in ascending id order. Later commas see the heads
/// earlier commas were given.
///
/// This is a single pass. An earlier comma blocked by a later one is not
/// revisited, so with several commas a second call can still move it.
pub fn repair_commas_in_place(sentence: &mut Sentence, config: &Config) -> RepairOutcome {
    if only_commas_at_root(sentence, config) {
        debug!("only commas attach to the root, skipping comma repair");
        return RepairOutcome::OnlyCommasAtRoot;
    }

    let mut moved = 0;
    for comma_id in comma_ids(sentence, config) {
        match fix_comma(sentence, comma_id) {
            Ok(true) => moved += 1,
            Ok(false) => {}
            Err(TreeError::NonProjective) => {
                debug!("tree is not projective, declining comma repair");
                return RepairOutcome::NotProjective;
            }
            Err(e) => {
                debug!("comma {} left in place: {}", comma_id, e);
            }
        }
    }
    RepairOutcome::Repaired { moved }
}

/// Reattach commas, returning the (possibly unchanged) sentence
pub fn repair_commas(mut sentence: Sentence, config: &Config) -> Sentence {
    repair_commas_in_place(&mut sentence, config);
    sentence
}

/// Give clitic tokens a tag their form allows: a known clitic carrying a tag
/// outside its lexicon entry gets the first listed tag.
pub fn rewrite_clitic_tags(sentence: &mut Sentence, config: &Config) -> usize {
    let mut retagged = 0;
    for id in 1..=sentence.len() {
        let Some(token) = sentence.token_mut(id) else {
            continue;
        };
        let Some(allowed) = config.clitic_tags(&token.form) else {
            continue;
        };
        if allowed.iter().any(|t| *t == token.upos) {
            continue;
        }
        if let Some(first) = allowed.first() {
            token.upos = first.clone();
            retagged += 1;
        }
    }
    retagged
}

/// Comma repair followed by clitic tag correction
pub fn repair_sentence(sentence: &mut Sentence, config: &Config) -> RepairSummary {
    let commas = repair_commas_in_place(sentence, config);
    let retagged = rewrite_clitic_tags(sentence, config);
    RepairSummary { commas, retagged }
}
