//! Sentence tree model
//!
//! A [`Sentence`] owns its tokens in id order plus a synthetic root token
//! (id 0). Children lists are kept alongside so that traversals do not scan
//! the whole sentence for every node.

use crate::error::{Result, StructuralReason, TreeError};
use crate::tags::Direction;

/// Token id; 0 is the virtual root
pub type TokenId = usize;

pub const ROOT_ID: TokenId = 0;

/// One token row of a sentence
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub id: TokenId,
    pub form: String,
    pub lemma: String,
    pub upos: String,
    pub xpos: Option<String>,
    pub feats: String,
    pub head: TokenId,
    pub deprel: String,
    /// Column 9, DEPS in CoNLL-U or PHEAD/PDEPREL in CoNLL-X, kept verbatim
    pub deps: String,
    pub misc: String,
}

impl Token {
    /// Create a token with the fields the checkers look at; the remaining
    /// columns are left empty (`_`)
    pub fn new(id: TokenId, form: &str, upos: &str, head: TokenId, deprel: &str) -> Self {
        Self {
            id,
            form: form.to_string(),
            lemma: form.to_string(),
            upos: upos.to_string(),
            xpos: None,
            feats: "_".to_string(),
            head,
            deprel: deprel.to_string(),
            deps: "_".to_string(),
            misc: "_".to_string(),
        }
    }

    fn root() -> Self {
        Self {
            id: ROOT_ID,
            form: "ROOT".to_string(),
            lemma: "ROOT".to_string(),
            upos: "ROOT".to_string(),
            xpos: None,
            feats: "_".to_string(),
            head: ROOT_ID,
            deprel: "---".to_string(),
            deps: "_".to_string(),
            misc: "_".to_string(),
        }
    }

    pub fn is_root(&self) -> bool {
        self.id == ROOT_ID
    }

    /// Direction of the arc to this token's parent
    pub fn direction(&self) -> Direction {
        Direction::of(self.head, self.id)
    }
}

/// A dependency tree (sentence)
#[derive(Debug, Clone, PartialEq)]
pub struct Sentence {
    root: Token,
    tokens: Vec<Token>,
    /// children[id] = ids of tokens whose head is `id`, ascending
    children: Vec<Vec<TokenId>>,
    pub sentence_text: Option<String>,
    /// Comment lines other than the text line, without the leading `#`
    pub comments: Vec<String>,
}

impl Sentence {
    /// Build a sentence from token rows.
    ///
    /// Fails with a structural error if the ids are not `1..n` in order or a
    /// head refers to a token that does not exist. Cycles are accepted here;
    /// the root connectivity check reports them.
    pub fn new(tokens: Vec<Token>) -> Result<Self> {
        Self::with_text(tokens, None)
    }

    pub fn with_text(tokens: Vec<Token>, sentence_text: Option<String>) -> Result<Self> {
        for (idx, token) in tokens.iter().enumerate() {
            if token.id != idx + 1 {
                return Err(TreeError::Structural {
                    sentence: None,
                    id: token.id,
                    reason: StructuralReason::IdSequence,
                });
            }
        }
        for token in &tokens {
            if token.head > tokens.len() {
                return Err(TreeError::Structural {
                    sentence: None,
                    id: token.id,
                    reason: StructuralReason::DanglingHead,
                });
            }
        }

        let mut children = vec![Vec::new(); tokens.len() + 1];
        for token in &tokens {
            children[token.head].push(token.id);
        }

        Ok(Self {
            root: Token::root(),
            tokens,
            children,
            sentence_text,
            comments: Vec::new(),
        })
    }

    /// Number of real tokens (the root is not counted)
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Real tokens in id order
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Look up a token by id; id 0 is the virtual root
    pub fn token(&self, id: TokenId) -> Option<&Token> {
        if id == ROOT_ID {
            Some(&self.root)
        } else {
            self.tokens.get(id - 1)
        }
    }

    /// Parent of the token with the given id
    pub fn parent(&self, id: TokenId) -> Result<&Token> {
        let token = self
            .token(id)
            .ok_or(TreeError::MissingParent { id, head: id })?;
        if token.is_root() {
            return Err(TreeError::MissingParent { id, head: id });
        }
        self.token(token.head).ok_or(TreeError::MissingParent {
            id,
            head: token.head,
        })
    }

    /// Ids of the tokens attached to `id`, ascending; empty if none
    pub fn children(&self, id: TokenId) -> &[TokenId] {
        self.children.get(id).map(|c| c.as_slice()).unwrap_or(&[])
    }

    /// Head of the token with the given id; the root has no head
    pub fn head_of(&self, id: TokenId) -> Option<TokenId> {
        if id == ROOT_ID {
            None
        } else {
            self.tokens.get(id - 1).map(|t| t.head)
        }
    }

    /// Reattach a token. Only the repairer moves arcs.
    pub(crate) fn set_head(&mut self, id: TokenId, new_head: TokenId) -> Result<()> {
        if id == ROOT_ID || id > self.tokens.len() {
            return Err(TreeError::MissingParent { id, head: new_head });
        }
        if new_head > self.tokens.len() {
            return Err(TreeError::Structural {
                sentence: None,
                id,
                reason: StructuralReason::DanglingHead,
            });
        }
        let old_head = self.tokens[id - 1].head;
        if old_head == new_head {
            return Ok(());
        }
        self.children[old_head].retain(|&c| c != id);
        let siblings = &mut self.children[new_head];
        let pos = siblings.partition_point(|&c| c < id);
        siblings.insert(pos, id);
        self.tokens[id - 1].head = new_head;
        Ok(())
    }

    pub(crate) fn token_mut(&mut self, id: TokenId) -> Option<&mut Token> {
        if id == ROOT_ID {
            None
        } else {
            self.tokens.get_mut(id - 1)
        }
    }

    /// The sentence text from the `# text` comment, or the forms joined by
    /// spaces when there is none
    pub fn text(&self) -> String {
        match &self.sentence_text {
            Some(text) => text.clone(),
            None => self
                .tokens
                .iter()
                .map(|t| t.form.as_str())
                .collect::<Vec<_>>()
                .join(" "),
        }
    }
}
