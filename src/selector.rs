//! Container scoping selectors.
//!
//! A container declares which spottable nodes belong to it via a small
//! CSS-like selector language: `*` (any node), `Kind` (node kind), `#id`
//! (stable node id), `.class`, and compounds such as `MenuItem.primary` or
//! `#sidebar.wide`. Selectors are tokenized with logos and matched against
//! [`NodeMeta`](crate::node::NodeMeta) — the engine never queries a concrete
//! UI tree.

use logos::Logos;

use crate::node::NodeMeta;

// ---------------------------------------------------------------------------
// Tokens
// ---------------------------------------------------------------------------

/// Selector token produced by the lexer.
///
/// Longest match wins in logos; with only idents and single-char punctuation
/// there are no priority conflicts to order around.
#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\n\r]+")]
enum Token {
    /// Kind names, ids, class names.
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_-]*")]
    Ident,

    /// `#` introducing an id component.
    #[token("#")]
    Hash,

    /// `.` introducing a class component.
    #[token(".")]
    Dot,

    /// `*` universal selector.
    #[token("*")]
    Star,
}

// ---------------------------------------------------------------------------
// SelectorError
// ---------------------------------------------------------------------------

/// Error produced when a selector string fails to parse.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SelectorError {
    #[error("empty selector")]
    Empty,

    #[error("unexpected character at position {0}")]
    UnexpectedChar(usize),

    #[error("expected identifier after `{0}`")]
    ExpectedIdent(char),

    #[error("`*` cannot be combined with other components")]
    UniversalNotAlone,

    #[error("duplicate kind component: {0}")]
    DuplicateKind(String),

    #[error("duplicate id component: {0}")]
    DuplicateId(String),
}

// ---------------------------------------------------------------------------
// Selector
// ---------------------------------------------------------------------------

/// A parsed compound selector: optional kind, optional id, any number of
/// classes, or the universal `*`.
///
/// A node matches when every present component matches; the universal
/// selector matches every node.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Selector {
    kind: Option<String>,
    id: Option<String>,
    classes: Vec<String>,
    universal: bool,
}

impl Selector {
    /// The universal selector `*`, matching every node.
    pub fn universal() -> Self {
        Self { universal: true, ..Self::default() }
    }

    /// Parse a selector from its textual form.
    ///
    /// Accepted grammar: `*` alone, or a compound of at most one kind ident,
    /// at most one `#id`, and any number of `.class` components, in any order.
    pub fn parse(input: &str) -> Result<Self, SelectorError> {
        let mut lexer = Token::lexer(input);
        let mut selector = Selector::default();
        let mut saw_component = false;

        while let Some(result) = lexer.next() {
            let token = result.map_err(|()| SelectorError::UnexpectedChar(lexer.span().start))?;
            match token {
                Token::Star => {
                    selector.universal = true;
                    saw_component = true;
                }
                Token::Ident => {
                    let name = lexer.slice().to_owned();
                    if let Some(existing) = selector.kind.replace(name) {
                        return Err(SelectorError::DuplicateKind(existing));
                    }
                    saw_component = true;
                }
                Token::Hash => {
                    let name = expect_ident(&mut lexer, '#')?;
                    if let Some(existing) = selector.id.replace(name) {
                        return Err(SelectorError::DuplicateId(existing));
                    }
                    saw_component = true;
                }
                Token::Dot => {
                    let name = expect_ident(&mut lexer, '.')?;
                    if !selector.classes.contains(&name) {
                        selector.classes.push(name);
                    }
                    saw_component = true;
                }
            }
        }

        if !saw_component {
            return Err(SelectorError::Empty);
        }
        if selector.universal
            && (selector.kind.is_some() || selector.id.is_some() || !selector.classes.is_empty())
        {
            return Err(SelectorError::UniversalNotAlone);
        }
        Ok(selector)
    }

    /// Whether this is the universal selector.
    pub fn is_universal(&self) -> bool {
        self.universal
    }

    /// Check whether a node's metadata satisfies this selector.
    pub fn matches(&self, meta: &NodeMeta) -> bool {
        if self.universal {
            return true;
        }
        if let Some(kind) = &self.kind {
            if meta.kind != *kind {
                return false;
            }
        }
        if let Some(id) = &self.id {
            if meta.id.as_deref() != Some(id.as_str()) {
                return false;
            }
        }
        self.classes.iter().all(|class| meta.has_class(class))
    }
}

impl std::str::FromStr for Selector {
    type Err = SelectorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Selector::parse(s)
    }
}

/// Consume the ident that must follow a `#` or `.` introducer.
fn expect_ident(lexer: &mut logos::Lexer<'_, Token>, introducer: char) -> Result<String, SelectorError> {
    match lexer.next() {
        Some(Ok(Token::Ident)) => Ok(lexer.slice().to_owned()),
        _ => Err(SelectorError::ExpectedIdent(introducer)),
    }
}

// ===========================================================================
// Tests
// ===========================================================================
