//! # parsekit
//!
//! Runtime pieces for table-driven front ends:
//!
//! - [`Lexer`] / [`LexerCtx`]: a pull-based byte lexer skeleton. Implementors
//!   write one `action` per lexeme and an `end` hook; tokens are handed out
//!   one at a time through [`Lexer::try_next`].
//! - [`ParserData`]: precomputed action/goto and production tables, built in
//!   code or loaded from a text description.
//! - [`Parser`]: the shift-reduce engine. It drives a [`SemanticHook`] with
//!   one callback per reduction.
//! - [`Span`] / [`Position`]: source locations attached to tokens and errors.
//!
//! Table construction (LR automaton generation) is out of scope; tables are
//! produced elsewhere and consumed as data.

mod cursor;
mod data;
mod error;
mod lexer;
mod parser;

pub use crate::cursor::{LexerCursor, Position, Span};
pub use crate::data::{ParserAction, ParserData, Prod, ProdID, StateID, SymbolID};
pub use crate::error::{ParserError, TableError};
pub use crate::lexer::{Lexer, LexerCtx, LexerStats, Token};
pub use crate::parser::{Parser, ParserStats, SemanticHook};
