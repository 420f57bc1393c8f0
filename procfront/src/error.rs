//! # Front-end error types
//!
//! [`LexicalError`] covers scanning problems, [`ProcError`] is the unified
//! error surface of the lexer and the semantic hooks. Conversions from the
//! underlying error types are derived with `#[from]`, so `?` works at call
//! sites returning `Result<T, ProcError>`.
use crate::PoolError;
use parsekit::Span;
use smartstring::alias::String;
use thiserror::Error;

/// Problems found while scanning source text.
///
/// - [`LexicalError::UnknownCharacter`] is recoverable: the lexer records it,
///   emits an `UNKNOWN` token and keeps scanning.
/// - [`LexicalError::UnterminatedLiteral`] is fatal for the current input.
///
/// # Example
/// ```rust
/// # use procfront::LexicalError;
/// # use parsekit::span;
/// let err = LexicalError::UnterminatedLiteral { span: span!(0, 4, 0, 9).unwrap() };
/// assert!(err.to_string().contains("unterminated"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexicalError {
    #[error("unknown character {ch:?} at {}", .span.display())]
    UnknownCharacter { ch: char, span: Span },

    #[error("unterminated literal at {}", .span.display())]
    UnterminatedLiteral { span: Span },
}

/// Represents all errors raised by the front end.
///
/// # Example
/// ```rust
/// # use procfront::ProcError;
/// # fn demo(s: &str) -> Result<i64, ProcError> {
/// let n: i64 = s.parse()?; // ParseIntError -> ProcError via #[from]
/// # Ok(n) }
/// assert!(matches!(demo("x"), Err(ProcError::ParseInt(_))));
/// ```
#[derive(Debug, Error)]
pub enum ProcError {
    #[error("lexical error: {0}")]
    Lexical(#[from] LexicalError),

    /// A numeral did not fit the integer constant type.
    #[error("unable to parse integer literal: {0}")]
    ParseInt(#[from] std::num::ParseIntError),

    #[error("utf8 error {0:?}")]
    FromUtf8(#[from] std::string::FromUtf8Error),

    #[error("pool error: {0}")]
    Pool(#[from] PoolError),

    /// A `Decl` reduction whose shifted tokens do not form a declaration.
    /// The hook and the tables disagree about the grammar.
    #[error("malformed declaration: {detail}")]
    MalformedDeclaration {
        detail: &'static str,
        span: Option<Span>,
    },

    /// A semantic hook saw the same name declared twice.
    #[error("{name:?} is already declared")]
    Redeclared { name: String, span: Option<Span> },
}
