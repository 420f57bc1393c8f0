//! Reserved words.
//!
//! The keyword table is an explicit, immutable mapping from spelling to
//! [`TokenKind`]. It is built once ([`KeywordTable::standard`]) and passed by
//! reference into the lexer. Lookup is case-sensitive: `var` is a keyword,
//! `Var` is an identifier.

use crate::TokenKind;
use once_cell::sync::Lazy;
use std::collections::HashMap;

static STANDARD: Lazy<KeywordTable> = Lazy::new(|| {
    use TokenKind::*;
    KeywordTable::from_pairs([
        ("array", Array),
        ("boolean", Boolean),
        ("break", Break),
        ("char", Char),
        ("continue", Continue),
        ("do", Do),
        ("else", Else),
        ("false", False),
        ("function", Function),
        ("if", If),
        ("integer", Integer),
        ("of", Of),
        ("return", Return),
        ("string", String),
        ("struct", Struct),
        ("true", True),
        ("type", Type),
        ("var", Var),
        ("while", While),
    ])
});

#[derive(Debug, Clone)]
pub struct KeywordTable {
    words: HashMap<&'static str, TokenKind>,
}

impl KeywordTable {
    /// The shared table of the language's reserved words.
    pub fn standard() -> &'static KeywordTable {
        &STANDARD
    }

    pub fn from_pairs(pairs: impl IntoIterator<Item = (&'static str, TokenKind)>) -> Self {
        Self {
            words: pairs.into_iter().collect(),
        }
    }

    pub fn lookup(&self, word: &str) -> Option<TokenKind> {
        self.words.get(word).copied()
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}
