//! Error types for the parser engine and the table loader.

use crate::{ProdID, Span, StateID, SymbolID, Token};
use std::fmt::Debug;
use thiserror::Error;

/// Failure of a [`Parser::parse`](crate::Parser::parse) run.
///
/// `E` is the lexer's error type (semantic hook errors are converted into it),
/// `T` is the token type.
#[derive(Debug, Error)]
pub enum ParserError<E, T>
where
    E: std::error::Error + 'static,
    T: Debug,
{
    /// The action table has no entry for the current state and lookahead.
    #[error("syntax error: unexpected {token:?} in state {state}")]
    UnexpectedToken { state: StateID, token: T },

    /// The token stream ran dry before the end-of-input token was seen.
    #[error("unexpected end of token stream in state {state}")]
    UnexpectedEndOfInput { state: StateID },

    /// The tables contradict themselves (missing goto, unknown production,
    /// a reduction deeper than the stack).
    #[error("malformed parser table at state {state}, symbol {symbol}: {detail}")]
    MalformedTable {
        state: StateID,
        symbol: SymbolID,
        detail: &'static str,
    },

    #[error("lexer error: {0}")]
    Lexer(#[source] E),

    /// The semantic hook rejected a shift (`prod_id` is `None`) or a reduction.
    #[error("semantic action failed: {source}")]
    Action {
        prod_id: Option<ProdID>,
        #[source]
        source: E,
    },
}

impl<E, T> ParserError<E, T>
where
    E: std::error::Error + 'static,
    T: Token,
{
    /// Source span of the offending token, where there is one.
    pub fn span(&self) -> Option<Span> {
        match self {
            ParserError::UnexpectedToken { token, .. } => token.span(),
            _ => None,
        }
    }
}

/// Failure to assemble or load a [`ParserData`](crate::ParserData).
#[derive(Debug, Error)]
pub enum TableError {
    #[error("line {line}: {message}")]
    Syntax { line: usize, message: String },

    #[error("line {line}: unknown symbol {name:?}")]
    UnknownSymbol { line: usize, name: String },

    #[error("conflicting actions for state {state}, symbol {symbol}")]
    Conflict { state: StateID, symbol: SymbolID },

    #[error("action code 0 for state {state}, symbol {symbol}")]
    InvalidCode { state: StateID, symbol: SymbolID },

    #[error("production {0} defined twice")]
    DuplicateProd(ProdID),

    #[error("missing `{0}` directive")]
    Missing(&'static str),

    #[error("line {line}: {source}")]
    Line {
        line: usize,
        #[source]
        source: Box<TableError>,
    },
}

impl TableError {
    /// Attaches the text line this error was raised for.
    pub fn at(self, line: usize) -> Self {
        match self {
            e @ (TableError::Syntax { .. }
            | TableError::UnknownSymbol { .. }
            | TableError::Line { .. }) => e,
            e => TableError::Line {
                line,
                source: Box::new(e),
            },
        }
    }
}
