//! Issue aggregation
//!
//! Runs every checker over a sentence and attaches the token, parent and
//! sentence context each issue is reported with. Token-level issues come
//! first, in checker order (tags, clitics, form/POS, punctuation position,
//! patterns, relation cardinality), then sentence-level issues (projectivity,
//! root, mid-sentence punctuation, ids).

use crate::checks::{self, MorphAnalyzer, PunctBuckets, QuadrupleTable};
use crate::config::Config;
use crate::error::{Result, TreeError};
use crate::issue::{FlaggedIssue, IssueKind, SentenceIssue, TokenFinding, TokenIssue};
use crate::projectivity::is_projective;
use crate::root;
use crate::tags::Direction;
use crate::tree::Sentence;
use regex::Regex;

/// Everything the checkers read besides the sentence itself. Built once and
/// shared across sentences (and threads).
pub struct CheckContext<'a> {
    pub config: &'a Config,
    /// Attested patterns; the pattern check is skipped without them
    pub quadruples: Option<&'a QuadrupleTable>,
    /// Morphological oracle for the form/POS check
    pub analyzer: Option<&'a dyn MorphAnalyzer>,
    buckets: PunctBuckets,
    nested_mark: Regex,
}

impl<'a> CheckContext<'a> {
    /// Compile the punctuation patterns of `config`
    pub fn new(config: &'a Config) -> Result<Self> {
        let nested = checks::mid_pnx::nested_mark_pattern(&config.sentence_final_marks);
        Ok(Self {
            config,
            quadruples: None,
            analyzer: None,
            buckets: PunctBuckets::new(&config.punctuation)?,
            nested_mark: Regex::new(&nested).map_err(|e| TreeError::Config(e.to_string()))?,
        })
    }

    pub fn with_quadruples(mut self, table: &'a QuadrupleTable) -> Self {
        self.quadruples = Some(table);
        self
    }

    pub fn with_analyzer(mut self, analyzer: &'a dyn MorphAnalyzer) -> Self {
        self.analyzer = Some(analyzer);
        self
    }
}

/// Token-level findings of every checker, in reporting order
pub fn token_findings(sentence: &Sentence, ctx: &CheckContext) -> Vec<TokenFinding> {
    let mut findings = checks::element::check(sentence, ctx.config);
    findings.extend(checks::clitic::check(sentence));
    findings.extend(checks::form_pos::check(sentence, ctx.config, ctx.analyzer));
    findings.extend(checks::pnx_position::check(sentence, &ctx.config.punctuation));
    if let Some(table) = ctx.quadruples {
        findings.extend(checks::pattern::check(sentence, table, &ctx.buckets));
    }
    findings.extend(checks::deprel::check(sentence, ctx.config));
    findings
}

/// Sentence-level issue kinds, in reporting order
pub fn sentence_kinds(sentence: &Sentence, ctx: &CheckContext) -> Vec<IssueKind> {
    let mut kinds = Vec::new();
    if !is_projective(sentence) {
        kinds.push(IssueKind::FlagNonprojective);
    }
    if !root::check(sentence) {
        kinds.push(IssueKind::FlagRootAtt);
    }
    if !checks::mid_pnx::check(sentence, ctx.config, &ctx.nested_mark) {
        kinds.push(IssueKind::FlagMidPnxAtt);
    }
    if !checks::ids::check(sentence) {
        kinds.push(IssueKind::FlagIdOrHead);
    }
    kinds
}

fn with_context(
    finding: TokenFinding,
    sentence: &Sentence,
    sentence_number: usize,
    text: &str,
) -> Result<TokenIssue> {
    let id = finding.token_id;
    let token = sentence
        .token(id)
        .ok_or(TreeError::MissingParent { id, head: id })?;
    let parent = sentence.parent(id)?;
    Ok(TokenIssue {
        kind: finding.kind,
        sentence_number,
        token_id: id,
        form: token.form.clone(),
        pos_tag: finding.pos_tag.unwrap_or_else(|| token.upos.clone()),
        label: token.deprel.clone(),
        parent_id: parent.id,
        parent_form: parent.form.clone(),
        parent_pos_tag: finding.parent_pos_tag.unwrap_or_else(|| parent.upos.clone()),
        direction: Direction::of(parent.id, id),
        text: text.to_string(),
    })
}

/// All issues of one sentence. `sentence_number` is 1-based.
pub fn check_sentence(
    sentence: &Sentence,
    sentence_number: usize,
    ctx: &CheckContext,
) -> Result<Vec<FlaggedIssue>> {
    let text = sentence.text();
    let mut issues = Vec::new();
    for finding in token_findings(sentence, ctx) {
        let issue = with_context(finding, sentence, sentence_number, &text)?;
        issues.push(FlaggedIssue::Token(issue));
    }
    issues.extend(sentence_kinds(sentence, ctx).into_iter().map(|kind| {
        FlaggedIssue::Sentence(SentenceIssue {
            kind,
            sentence_number,
            text: text.clone(),
        })
    }));
    Ok(issues)
}

/// The issue reported for a sentence whose ids or heads kept it from being
/// built at all
pub fn structural_issue(sentence_number: usize, text: &str) -> FlaggedIssue {
    FlaggedIssue::Sentence(SentenceIssue {
        kind: IssueKind::FlagIdOrHead,
        sentence_number,
        text: text.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checks::Quadruple;
    use crate::tree::Token;

    fn kinds(issues: &[FlaggedIssue]) -> Vec<(Option<usize>, IssueKind)> {
        issues.iter().map(|i| (i.token_id(), i.kind())).collect()
    }

    #[test]
    fn test_clean_two_token_sentence() {
        let config = Config::default();
        let ctx = CheckContext::new(&config).unwrap();
        let sentence = Sentence::new(vec![
            Token::new(1, "كتاب", "NOM", 2, "MOD"),
            Token::new(2, "قرأ", "VRB", 0, "---"),
        ])
        .unwrap();

        assert!(is_projective(&sentence));
        assert!(sentence_kinds(&sentence, &ctx).is_empty());
        assert!(check_sentence(&sentence, 1, &ctx).unwrap().is_empty());
    }

    #[test]
    fn test_token_context() {
        let config = Config::default();
        let ctx = CheckContext::new(&config).unwrap();
        let mut sentence = Sentence::new(vec![
            Token::new(1, "كتاب", "XYZ", 2, "MOD"),
            Token::new(2, "قرأ", "VRB", 0, "---"),
        ])
        .unwrap();
        sentence.sentence_text = Some("كتاب قرأ .".to_string());

        let issues = check_sentence(&sentence, 4, &ctx).unwrap();
        assert_eq!(issues.len(), 1);
        let FlaggedIssue::Token(issue) = &issues[0] else {
            panic!("expected a token issue");
        };
        assert_eq!(issue.kind, IssueKind::FlagCatibTags);
        assert_eq!(issue.sentence_number, 4);
        assert_eq!(issue.form, "كتاب");
        assert_eq!(issue.pos_tag, "XYZ");
        assert_eq!(issue.label, "MOD");
        assert_eq!(issue.parent_id, 2);
        assert_eq!(issue.parent_form, "قرأ");
        assert_eq!(issue.parent_pos_tag, "VRB");
        assert_eq!(issue.direction, Direction::ChildParent);
        assert_eq!(issue.text, "كتاب قرأ .");
    }

    #[test]
    fn test_reporting_order() {
        let config = Config::default();
        let table: QuadrupleTable = [Quadruple::new("VRB", "---", "ROOT", Direction::ParentChild)]
            .into_iter()
            .collect();
        let ctx = CheckContext::new(&config).unwrap().with_quadruples(&table);

        // +ه opens the sentence; 1 and 3 form a cycle away from the root
        let sentence = Sentence::new(vec![
            Token::new(1, "+ه", "NOM", 3, "SBJ"),
            Token::new(2, "قال", "VRB", 0, "---"),
            Token::new(3, "زيد", "NOM", 1, "SBJ"),
        ])
        .unwrap();

        let issues = check_sentence(&sentence, 1, &ctx).unwrap();
        assert_eq!(
            kinds(&issues),
            vec![
                (Some(1), IssueKind::FlagEnclitic),
                (Some(1), IssueKind::FlagUnkSyntaxPattern),
                (Some(3), IssueKind::FlagUnkSyntaxPattern),
                (None, IssueKind::FlagNonprojective),
                (None, IssueKind::FlagRootAtt),
            ]
        );

        let FlaggedIssue::Token(pattern) = &issues[1] else {
            panic!("expected a token issue");
        };
        assert_eq!(pattern.pos_tag, "#NOM");
        assert_eq!(pattern.parent_pos_tag, "NOM");
    }

    #[test]
    fn test_bad_bucket_regex() {
        let mut config = Config::default();
        config.punctuation.bucket_forward = "[".to_string();
        assert!(matches!(
            CheckContext::new(&config),
            Err(TreeError::Config(_))
        ));
    }

    #[test]
    fn test_structural_issue() {
        let issue = structural_issue(2, "نص");
        assert_eq!(issue.kind(), IssueKind::FlagIdOrHead);
        assert_eq!(issue.sentence_number(), 2);
    }
}
