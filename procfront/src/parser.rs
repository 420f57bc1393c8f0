//! # Parser pipeline
//!
//! [`ProcParser`] wires the [`ProcLexer`] to the table-driven
//! [`parsekit::Parser`]. Tokens are pulled one at a time as the automaton
//! needs them, so the token stream is never materialized. The [`Pool`] is
//! passed in as context and filled while the input is read.

use crate::{KeywordTable, LexicalError, Pool, ProcError, ProcLexer, ProcToken};
use parsekit::{
    Lexer, LexerStats, Parser, ParserData, ParserError, ParserStats, SemanticHook, StateID,
};
use std::iter::FusedIterator;

pub type ProcParseError = ParserError<ProcError, ProcToken>;

/// Lexer and parser engine for one compilation unit.
///
/// Lexical errors that are recoverable (`UNKNOWN` tokens) do not stop the
/// lexer; they reach the parser as tokens that no table entry accepts.
/// Callers report [`error_count`](Self::error_count) alongside the verdict.
pub struct ProcParser<'a, I, H>
where
    I: FusedIterator<Item = u8>,
{
    parser: Parser<'a, ProcLexer<'a, I>, H>,
}

impl<'a, I, H> ProcParser<'a, I, H>
where
    I: FusedIterator<Item = u8>,
    H: SemanticHook<ProcToken, Pool>,
    H::Error: Into<ProcError>,
{
    pub fn new(input: I, keywords: &'a KeywordTable, data: &'a ParserData, hook: H) -> Self {
        let lexer = ProcLexer::new(input, keywords);
        Self {
            parser: Parser::new(lexer, hook, data),
        }
    }

    /// Parses the whole input. `Ok` means the input was accepted.
    pub fn parse(&mut self, pool: &mut Pool) -> Result<(), ProcParseError> {
        let res = self.parser.parse(pool);
        let stats = self.parser.stats();
        log::debug!(
            "parse finished: {} tokens, {} shifts, {} reductions, {} lexical errors",
            stats.tokens,
            stats.shifts,
            stats.reductions,
            self.error_count()
        );
        res
    }

    pub fn hook(&self) -> &H {
        &self.parser.hook
    }

    pub fn into_hook(self) -> H {
        self.parser.into_parts().1
    }

    /// Number of `UNKNOWN` tokens read so far.
    pub fn error_count(&self) -> usize {
        self.parser.lexer.error_count()
    }

    pub fn lexical_errors(&self) -> &[LexicalError] {
        self.parser.lexer.diagnostics()
    }

    pub fn lexer_stats(&self) -> LexerStats {
        self.parser.lexer.stats()
    }

    pub fn parser_stats(&self) -> ParserStats {
        self.parser.stats()
    }

    pub fn states(&self) -> &[StateID] {
        self.parser.states()
    }
}
