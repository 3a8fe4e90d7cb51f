//! Clitic attachment order
//!
//! Clitics are written as separate tokens marked with `+`: a proclitic
//! (`و+`) must be followed by its host, an enclitic (`+ها`) must follow one.
//! A trailing `(*)` marks an elided letter and is ignored when deciding
//! whether a form is a clitic.

use crate::issue::{IssueKind, TokenFinding};
use crate::tree::Sentence;

pub(crate) const ELISION_MARK: &str = "(*)";

/// The form without a trailing elision mark
pub fn strip_elision(form: &str) -> &str {
    form.strip_suffix(ELISION_MARK).unwrap_or(form)
}

pub fn is_enclitic(form: &str) -> bool {
    form.starts_with('+')
}

pub fn is_proclitic(form: &str) -> bool {
    form.ends_with('+')
}

/// A `+`-marked form that is not just a run of plus signs
pub fn is_clitic(form: &str) -> bool {
    let form = strip_elision(form);
    let plus_run = !form.is_empty() && form.chars().all(|c| c == '+');
    (is_enclitic(form) || is_proclitic(form)) && !plus_run
}

/// An enclitic needs a host before it: a base word or another enclitic
fn has_host_before(forms: &[&str], idx: usize) -> bool {
    if idx == 0 {
        return false;
    }
    let prev = forms[idx - 1];
    is_enclitic(prev) || !is_proclitic(prev)
}

/// A proclitic needs a host after it: anything but an enclitic
fn has_host_after(forms: &[&str], idx: usize) -> bool {
    forms.get(idx + 1).is_some_and(|next| !is_enclitic(next))
}

pub fn check(sentence: &Sentence) -> Vec<TokenFinding> {
    let forms: Vec<&str> = sentence.tokens().iter().map(|t| t.form.as_str()).collect();

    let mut findings: Vec<TokenFinding> = forms
        .iter()
        .enumerate()
        .filter(|&(idx, form)| is_clitic(form) && is_enclitic(form) && !has_host_before(&forms, idx))
        .map(|(idx, _)| TokenFinding::new(idx + 1, IssueKind::FlagEnclitic))
        .collect();

    findings.extend(
        forms
            .iter()
            .enumerate()
            .filter(|&(idx, form)| {
                is_clitic(form) && is_proclitic(form) && !has_host_after(&forms, idx)
            })
            .map(|(idx, _)| TokenFinding::new(idx + 1, IssueKind::FlagProclitic)),
    );
    findings
}
