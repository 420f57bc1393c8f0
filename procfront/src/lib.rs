//! # procfront
//!
//! Front end of a small procedural-language compiler, built on **parsekit**.
//! It turns source bytes into a validated parse:
//!
//! - [`lexer`]: maximal-munch tokenizer producing [`ProcToken`]s and filling
//!   the constant/identifier [`Pool`],
//! - [`grammar`]: precomputed tables for the declaration grammar and a loader
//!   for tables over the same symbols,
//! - [`hooks`]: stock semantic hooks ([`RuleLog`], [`DeclarationCollector`]),
//! - [`parser`]: the streaming [`ProcParser`] pipeline.
//!
//! ## Example
//!
//! ```rust
//! use procfront::{grammar, KeywordTable, Pool, ProcParser, RuleLog, TokenKind};
//!
//! let data = grammar::declarations().unwrap();
//! let mut pool = Pool::new();
//! let src = "var x : integer;";
//! let keywords = KeywordTable::standard();
//! let mut parser = ProcParser::new(src.bytes().fuse(), keywords, &data, RuleLog::new());
//! parser.parse(&mut pool).unwrap();
//!
//! assert_eq!(parser.error_count(), 0);
//! assert_eq!(parser.hook().pairs()[0], (grammar::prod::TYPE_INTEGER, TokenKind::SemiColon));
//! assert_eq!(pool.identifier(0).unwrap(), "x");
//! ```
pub mod error;
pub mod grammar;
pub mod hooks;
pub mod keywords;
pub mod lexer;
pub mod parser;
pub mod pool;
pub mod token;

pub use error::{LexicalError, ProcError};
pub use hooks::{DeclType, Declaration, DeclarationCollector, RuleLog};
pub use keywords::KeywordTable;
pub use lexer::{tokenize, ProcLexer, TokenStream};
pub use parser::{ProcParseError, ProcParser};
pub use pool::{Constant, Pool, PoolError};
pub use token::{ProcToken, TokenKind, TokenValue};
