//! Flagged wellformedness issues
//!
//! Checkers report [`TokenFinding`]s (token id and kind, plus any tag
//! overrides) or sentence-level kinds. The aggregator in [`crate::report`]
//! turns them into [`FlaggedIssue`]s carrying the token and sentence context.

use crate::tags::Direction;
use crate::tree::TokenId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IssueKind {
    FlagEnclitic,
    FlagProclitic,
    FlagIdOrHead,
    FlagMultipleDeprelLabels,
    FlagCatibTags,
    FlagDeprelLabels,
    FlagFormOov,
    FlagFormPosMismatch,
    FlagMidPnxAtt,
    FlagUnkSyntaxPattern,
    FlagPnxPosition,
    FlagNonprojective,
    FlagRootAtt,
}

impl IssueKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            IssueKind::FlagEnclitic => "FLAG_ENCLITIC",
            IssueKind::FlagProclitic => "FLAG_PROCLITIC",
            IssueKind::FlagIdOrHead => "FLAG_ID_OR_HEAD",
            IssueKind::FlagMultipleDeprelLabels => "FLAG_MULTIPLE_DEPREL_LABELS",
            IssueKind::FlagCatibTags => "FLAG_CATIB_TAGS",
            IssueKind::FlagDeprelLabels => "FLAG_DEPREL_LABELS",
            IssueKind::FlagFormOov => "FLAG_FORM_OOV",
            IssueKind::FlagFormPosMismatch => "FLAG_FORM_POS_MISMATCH",
            IssueKind::FlagMidPnxAtt => "FLAG_MID_PNX_ATT",
            IssueKind::FlagUnkSyntaxPattern => "FLAG_UNK_SYNTAX_PATTERN",
            IssueKind::FlagPnxPosition => "FLAG_PNX_POSITION",
            IssueKind::FlagNonprojective => "FLAG_NONPROJECTIVE",
            IssueKind::FlagRootAtt => "FLAG_ROOT_ATT",
        }
    }
}

impl std::fmt::Display for IssueKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A token-level problem as reported by a checker, before context is added
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenFinding {
    pub token_id: TokenId,
    pub kind: IssueKind,
    /// Replaces the token's UPOS in the report (the pattern check reports
    /// the normalized tag it compared)
    pub pos_tag: Option<String>,
    pub parent_pos_tag: Option<String>,
}

impl TokenFinding {
    pub fn new(token_id: TokenId, kind: IssueKind) -> Self {
        Self {
            token_id,
            kind,
            pos_tag: None,
            parent_pos_tag: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenIssue {
    pub kind: IssueKind,
    pub sentence_number: usize,
    pub token_id: TokenId,
    pub form: String,
    pub pos_tag: String,
    pub label: String,
    pub parent_id: TokenId,
    pub parent_form: String,
    pub parent_pos_tag: String,
    pub direction: Direction,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentenceIssue {
    pub kind: IssueKind,
    pub sentence_number: usize,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlaggedIssue {
    Token(TokenIssue),
    Sentence(SentenceIssue),
}

/// Flat record for downstream reporting; token fields are empty for
/// sentence-level issues
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IssueRecord {
    pub flagged_issue: IssueKind,
    pub sentence_number: usize,
    pub token_id: Option<TokenId>,
    pub form: Option<String>,
    pub pos_tag: Option<String>,
    pub label: Option<String>,
    pub parent_id: Option<TokenId>,
    pub parent_form: Option<String>,
    pub parent_pos_tag: Option<String>,
    pub direction: Option<Direction>,
    pub text: String,
}

impl FlaggedIssue {
    pub fn kind(&self) -> IssueKind {
        match self {
            FlaggedIssue::Token(t) => t.kind,
            FlaggedIssue::Sentence(s) => s.kind,
        }
    }

    pub fn sentence_number(&self) -> usize {
        match self {
            FlaggedIssue::Token(t) => t.sentence_number,
            FlaggedIssue::Sentence(s) => s.sentence_number,
        }
    }

    pub fn token_id(&self) -> Option<TokenId> {
        match self {
            FlaggedIssue::Token(t) => Some(t.token_id),
            FlaggedIssue::Sentence(_) => None,
        }
    }

    pub fn to_record(&self) -> IssueRecord {
        match self {
            FlaggedIssue::Token(t) => IssueRecord {
                flagged_issue: t.kind,
                sentence_number: t.sentence_number,
                token_id: Some(t.token_id),
                form: Some(t.form.clone()),
                pos_tag: Some(t.pos_tag.clone()),
                label: Some(t.label.clone()),
                parent_id: Some(t.parent_id),
                parent_form: Some(t.parent_form.clone()),
                parent_pos_tag: Some(t.parent_pos_tag.clone()),
                direction: Some(t.direction),
                text: t.text.clone(),
            },
            FlaggedIssue::Sentence(s) => IssueRecord {
                flagged_issue: s.kind,
                sentence_number: s.sentence_number,
                token_id: None,
                form: None,
                pos_tag: None,
                label: None,
                parent_id: None,
                parent_form: None,
                parent_pos_tag: None,
                direction: None,
                text: s.text.clone(),
            },
        }
    }
}
