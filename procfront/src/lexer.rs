//! # Lexer
//!
//! A hand-written maximal-munch scanner for the procedural language, built on
//! the [`parsekit::Lexer`] runtime.
//!
//! Each call to the lexer `action` scans one lexeme starting at the next
//! unread byte:
//!
//! - whitespace (space, tab, CR, LF, VT, FF) is skipped,
//! - an ASCII letter starts a word (letters, digits, `_`), which is either a
//!   keyword or an `IDENTIFIER` interned in the [`Pool`],
//! - a digit starts a `NUMERAL`, interned as an integer constant,
//! - `"` starts a `STRING_LITERAL` and `'` a `CHAR_LITERAL`; delimiters are
//!   not part of the stored constant,
//! - anything else is matched against the one- and two-byte operators,
//!   longest match first.
//!
//! Characters that start no lexeme become `UNKNOWN` tokens. Outside words and
//! numerals the input is decoded one UTF-8 scalar at a time, so an accented
//! letter is one `UNKNOWN` token, not one per byte. Each is recorded as a
//! recoverable [`LexicalError::UnknownCharacter`] diagnostic and counted;
//! scanning continues. Reaching end of input inside a literal is fatal.
//! Invalid UTF-8 inside a literal decodes to U+FFFD.

use crate::{KeywordTable, LexicalError, Pool, ProcError, ProcToken, TokenKind, TokenValue};
use parsekit::{Lexer, LexerCtx};
use std::iter::{Fuse, FusedIterator};

/// The procedural-language lexer.
///
/// The [`Pool`] is supplied as the lexer context on every
/// [`try_next`](Lexer::try_next) call, so a single pool can outlive the lexer
/// and be read by later stages.
///
/// # Example
///
/// ```rust
/// # use procfront::{KeywordTable, Pool, ProcLexer, TokenKind};
/// # use parsekit::Lexer;
/// let mut pool = Pool::new();
/// let mut lexer = ProcLexer::new("var n : integer;".bytes().fuse(), KeywordTable::standard());
/// let mut kinds = Vec::new();
/// while let Some(t) = lexer.try_next(&mut pool).unwrap() {
///     kinds.push(t.kind);
/// }
/// assert_eq!(kinds.first(), Some(&TokenKind::Var));
/// assert_eq!(kinds.last(), Some(&TokenKind::EndOfFile));
/// assert_eq!(pool.count_identifiers(), 1);
/// ```
pub struct ProcLexer<'k, I>
where
    I: FusedIterator<Item = u8>,
{
    ctx: LexerCtx<I, ProcToken>,
    keywords: &'k KeywordTable,
    diagnostics: Vec<LexicalError>,
}

impl<'k, I> ProcLexer<'k, I>
where
    I: FusedIterator<Item = u8>,
{
    pub fn new(input: I, keywords: &'k KeywordTable) -> Self {
        Self {
            ctx: LexerCtx::new(input),
            keywords,
            diagnostics: Vec::new(),
        }
    }

    /// Number of `UNKNOWN` tokens produced so far.
    pub fn error_count(&self) -> usize {
        self.stats().errors
    }

    /// Recoverable errors recorded so far, in input order.
    pub fn diagnostics(&self) -> &[LexicalError] {
        &self.diagnostics
    }

    /// Drives the lexer to exhaustion and collects the whole stream.
    pub fn tokenize(&mut self, pool: &mut Pool) -> Result<TokenStream, ProcError> {
        let mut tokens = Vec::new();
        while let Some(token) = self.try_next(pool)? {
            tokens.push(token);
        }
        Ok(TokenStream {
            tokens,
            errors: self.error_count(),
        })
    }

    fn emit(&mut self, kind: TokenKind, value: TokenValue) {
        let token = ProcToken::new(kind, value, Some(self.ctx.span()));
        log::debug!("token {:?}", token);
        self.ctx.yield_token(token);
    }

    fn unterminated(&self) -> ProcError {
        LexicalError::UnterminatedLiteral {
            span: self.ctx.span(),
        }
        .into()
    }

    fn word(&mut self, pool: &mut Pool) -> Result<(), ProcError> {
        self.ctx.bump_while(|b| b.is_ascii_alphanumeric() || b == b'_');
        let text = self.ctx.take_str()?;
        match self.keywords.lookup(&text) {
            Some(kind) => self.emit(kind, TokenValue::None),
            None => {
                let handle = pool.intern_identifier(&text);
                self.emit(TokenKind::Identifier, TokenValue::Ident(handle));
            }
        }
        Ok(())
    }

    fn numeral(&mut self, pool: &mut Pool) -> Result<(), ProcError> {
        self.ctx.bump_while(|b| b.is_ascii_digit());
        let value = self.ctx.take_str()?.parse::<i64>()?;
        let handle = pool.intern_integer(value);
        self.emit(TokenKind::Numeral, TokenValue::Const(handle));
        Ok(())
    }

    fn string_literal(&mut self, pool: &mut Pool) -> Result<(), ProcError> {
        self.ctx.skip();
        loop {
            match self.ctx.peek() {
                None => return Err(self.unterminated()),
                Some(b'"') => {
                    self.ctx.skip();
                    break;
                }
                Some(_) => {
                    self.ctx.bump();
                }
            }
        }
        // invalid UTF-8 is replaced, never fatal
        let handle = pool.intern_string(self.ctx.take_str_lossy());
        self.emit(TokenKind::StringLiteral, TokenValue::Const(handle));
        Ok(())
    }

    fn char_literal(&mut self, pool: &mut Pool) -> Result<(), ProcError> {
        self.ctx.skip();
        let Some(value) = self.ctx.skip_char() else {
            return Err(self.unterminated());
        };
        if !self.ctx.eat(b'\'') {
            return Err(self.unterminated());
        }
        let handle = pool.intern_char(value);
        self.emit(TokenKind::CharLiteral, TokenValue::Const(handle));
        Ok(())
    }

    fn operator(&mut self) {
        use TokenKind::*;
        let Some(c) = self.ctx.skip_char() else {
            return;
        };
        let kind = match c {
            ':' => Colon,
            ';' => SemiColon,
            ',' => Comma,
            '[' => LeftSquare,
            ']' => RightSquare,
            '{' => LeftBraces,
            '}' => RightBraces,
            '(' => LeftParenthesis,
            ')' => RightParenthesis,
            '*' => Times,
            '/' => Divide,
            '.' => Dot,
            '+' => self.either(b'+', PlusPlus, Plus),
            '-' => self.either(b'-', MinusMinus, Minus),
            '!' => self.either(b'=', NotEqual, Not),
            '=' => self.either(b'=', EqualEqual, Equals),
            '<' => self.either(b'=', LessOrEqual, LessThan),
            '>' => self.either(b'=', GreaterOrEqual, GreaterThan),
            // no single-character `&` or `|` operators
            '&' => self.either(b'&', And, Unknown),
            '|' => self.either(b'|', Or, Unknown),
            _ => Unknown,
        };
        if kind == Unknown {
            let err = LexicalError::UnknownCharacter {
                ch: c,
                span: self.ctx.span(),
            };
            log::warn!("{}", err);
            self.ctx.record_error();
            self.diagnostics.push(err);
        }
        self.emit(kind, TokenValue::None);
    }

    /// Two-byte form if the next byte is `second`, otherwise the one-byte
    /// form with the next byte left unread.
    fn either(&mut self, second: u8, double: TokenKind, single: TokenKind) -> TokenKind {
        if self.ctx.eat(second) {
            double
        } else {
            single
        }
    }
}

impl<'k, I> Lexer for ProcLexer<'k, I>
where
    I: FusedIterator<Item = u8>,
{
    type Input = I;
    type Token = ProcToken;
    type Context = Pool;
    type Error = ProcError;

    fn ctx(&self) -> &LexerCtx<Self::Input, Self::Token> {
        &self.ctx
    }

    fn ctx_mut(&mut self) -> &mut LexerCtx<Self::Input, Self::Token> {
        &mut self.ctx
    }

    fn action(&mut self, pool: &mut Pool) -> Result<(), ProcError> {
        match self.ctx.peek() {
            Some(b' ' | b'\t' | b'\r' | b'\n' | 0x0b | 0x0c) => {
                self.ctx.skip();
            }
            Some(b) if b.is_ascii_alphabetic() => self.word(pool)?,
            Some(b) if b.is_ascii_digit() => self.numeral(pool)?,
            Some(b'"') => self.string_literal(pool)?,
            Some(b'\'') => self.char_literal(pool)?,
            Some(_) => self.operator(),
            None => {}
        }
        Ok(())
    }

    fn end(&mut self, _pool: &mut Pool) -> Result<(), ProcError> {
        self.emit(TokenKind::EndOfFile, TokenValue::None);
        Ok(())
    }
}

/// A fully materialized token stream, ending in `END_OF_FILE`.
#[derive(Debug, Clone, Default)]
pub struct TokenStream {
    tokens: Vec<ProcToken>,
    errors: usize,
}

impl TokenStream {
    pub fn tokens(&self) -> &[ProcToken] {
        &self.tokens
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Number of `UNKNOWN` tokens in the stream.
    pub fn error_count(&self) -> usize {
        self.errors
    }

    pub fn is_clean(&self) -> bool {
        self.errors == 0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ProcToken> {
        self.tokens.iter()
    }
}

impl IntoIterator for TokenStream {
    type Item = ProcToken;
    type IntoIter = std::vec::IntoIter<ProcToken>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.into_iter()
    }
}

/// Lexical analysis pass: tokenizes `source` with the standard keywords and
/// counts the `UNKNOWN` tokens.
///
/// ```rust
/// # use procfront::{tokenize, Pool};
/// let mut pool = Pool::new();
/// let stream = tokenize("a & b".bytes(), &mut pool).unwrap();
/// assert_eq!(stream.len(), 4);
/// assert_eq!(stream.error_count(), 1);
/// ```
pub fn tokenize<S>(source: S, pool: &mut Pool) -> Result<TokenStream, ProcError>
where
    S: IntoIterator<Item = u8>,
{
    let input: Fuse<S::IntoIter> = source.into_iter().fuse();
    ProcLexer::new(input, KeywordTable::standard()).tokenize(pool)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Constant;
    use parsekit::span;
    use TokenKind::*;

    fn init_logger() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn lex(src: &str) -> (TokenStream, Pool) {
        init_logger();
        let mut pool = Pool::new();
        let stream = tokenize(src.bytes(), &mut pool).unwrap();
        (stream, pool)
    }

    fn kinds(stream: &TokenStream) -> Vec<TokenKind> {
        stream.iter().map(|t| t.kind).collect()
    }

    #[test]
    fn whitespace_only_yields_end_marker() {
        for src in ["", " ", "\t\r\n", " \x0b\x0c \n\n  "] {
            let (stream, _) = lex(src);
            assert_eq!(kinds(&stream), vec![EndOfFile], "input {:?}", src);
            assert!(stream.is_clean());
        }
    }

    #[test]
    fn keywords_are_never_identifiers() {
        let src = "array boolean break char continue do else false function if \
                   integer of return string struct true type var while";
        let (stream, pool) = lex(src);
        assert_eq!(stream.len(), 20);
        assert!(stream.iter().all(|t| t.kind != Identifier));
        assert!(stream.iter().all(|t| t.secondary().is_none()));
        assert_eq!(pool.count_identifiers(), 0);
    }

    #[test]
    fn identifiers_share_handles_by_name() {
        let (stream, pool) = lex("alpha beta alpha Alpha a_1");
        let handles: Vec<_> = stream.iter().filter_map(|t| t.secondary()).collect();
        assert_eq!(handles, vec![0, 1, 0, 2, 3]);
        assert_eq!(pool.identifier(3).unwrap(), "a_1");
    }

    #[test]
    fn maximal_munch_operators() {
        let (stream, _) = lex("++ +x");
        assert_eq!(kinds(&stream), vec![PlusPlus, Plus, Identifier, EndOfFile]);

        let (stream, _) = lex("<= < >= > == = != ! --- && || : ; , . [ ] { } ( ) * /");
        assert_eq!(
            kinds(&stream),
            vec![
                LessOrEqual,
                LessThan,
                GreaterOrEqual,
                GreaterThan,
                EqualEqual,
                Equals,
                NotEqual,
                Not,
                MinusMinus,
                Minus,
                And,
                Or,
                Colon,
                SemiColon,
                Comma,
                Dot,
                LeftSquare,
                RightSquare,
                LeftBraces,
                RightBraces,
                LeftParenthesis,
                RightParenthesis,
                Times,
                Divide,
                EndOfFile,
            ]
        );
    }

    #[test]
    fn digits_then_letters_split() {
        let (stream, pool) = lex("12a");
        assert_eq!(kinds(&stream), vec![Numeral, Identifier, EndOfFile]);
        let handle = stream.tokens()[0].secondary().unwrap();
        assert_eq!(pool.constant(handle).unwrap(), &Constant::Integer(12));
        assert_eq!(pool.identifier(0).unwrap(), "a");
    }

    #[test]
    fn lone_ampersand_is_unknown_and_counted() {
        init_logger();
        let mut pool = Pool::new();
        let mut lexer = ProcLexer::new("&x".bytes().fuse(), KeywordTable::standard());
        let stream = lexer.tokenize(&mut pool).unwrap();
        assert_eq!(kinds(&stream), vec![Unknown, Identifier, EndOfFile]);
        assert_eq!(stream.error_count(), 1);
        assert_eq!(
            lexer.diagnostics(),
            &[LexicalError::UnknownCharacter {
                ch: '&',
                span: span!(0, 0, 0, 1).unwrap(),
            }]
        );
        assert_eq!(pool.identifier(0).unwrap(), "x");
    }

    #[test]
    fn unknown_characters_do_not_stop_scanning() {
        let (stream, _) = lex("a | b # _c \u{e9}");
        assert_eq!(
            kinds(&stream),
            vec![
                Identifier, Unknown, Identifier, Unknown, Unknown, Identifier, Unknown, EndOfFile,
            ]
        );
        // `|`, `#`, `_` and the accented letter
        assert_eq!(stream.error_count(), 4);
    }

    #[test]
    fn non_ascii_character_is_one_unknown() {
        init_logger();
        let mut pool = Pool::new();
        let mut lexer = ProcLexer::new("\u{e9}".bytes().fuse(), KeywordTable::standard());
        let stream = lexer.tokenize(&mut pool).unwrap();
        assert_eq!(kinds(&stream), vec![Unknown, EndOfFile]);
        assert_eq!(stream.error_count(), 1);
        assert_eq!(
            lexer.diagnostics(),
            &[LexicalError::UnknownCharacter {
                ch: '\u{e9}',
                span: span!(0, 0, 0, 2).unwrap(),
            }]
        );
    }

    #[test]
    fn char_literal_holds_one_scalar() {
        let (stream, pool) = lex("'\u{e9}' '\u{20ac}'");
        assert_eq!(kinds(&stream), vec![CharLiteral, CharLiteral, EndOfFile]);
        assert!(stream.is_clean());
        assert_eq!(pool.constant(0).unwrap(), &Constant::Char('\u{e9}'));
        assert_eq!(pool.constant(1).unwrap(), &Constant::Char('\u{20ac}'));
        assert_eq!(stream.tokens()[0].span, span!(0, 0, 0, 4));
    }

    #[test]
    fn latin1_literals_are_replaced_not_fatal() {
        let mut pool = Pool::new();
        let src = vec![b'"', 0xe9, b'"', b' ', b'\'', 0xe9, b'\''];
        let stream = tokenize(src, &mut pool).unwrap();
        assert_eq!(kinds(&stream), vec![StringLiteral, CharLiteral, EndOfFile]);
        assert_eq!(pool.constant(0).unwrap(), &Constant::String("\u{fffd}".into()));
        assert_eq!(
            pool.constant(1).unwrap(),
            &Constant::Char(char::REPLACEMENT_CHARACTER)
        );
    }

    #[test]
    fn literals_exclude_delimiters_and_never_deduplicate() {
        let (stream, pool) = lex("\"hi there\" \"hi there\" 'c' 7 7");
        assert_eq!(
            kinds(&stream),
            vec![StringLiteral, StringLiteral, CharLiteral, Numeral, Numeral, EndOfFile]
        );
        let handles: Vec<_> = stream.iter().filter_map(|t| t.secondary()).collect();
        assert_eq!(handles, vec![0, 1, 2, 3, 4]);
        assert_eq!(pool.constant(0).unwrap(), &Constant::String("hi there".into()));
        assert_eq!(pool.constant(2).unwrap(), &Constant::Char('c'));
        assert_eq!(pool.constant(4).unwrap(), &Constant::Integer(7));
        assert_eq!(stream.tokens()[0].span, span!(0, 0, 0, 10));
    }

    #[test]
    fn empty_string_literal() {
        let (stream, pool) = lex("\"\"");
        assert_eq!(kinds(&stream), vec![StringLiteral, EndOfFile]);
        assert_eq!(pool.constant(0).unwrap(), &Constant::String("".into()));
    }

    #[test]
    fn unterminated_literals_fail() {
        for src in ["\"abc", "'", "'a", "'ab'", "x = \"never closed\n"] {
            let mut pool = Pool::new();
            let res = tokenize(src.bytes(), &mut pool);
            assert!(
                matches!(
                    res,
                    Err(ProcError::Lexical(LexicalError::UnterminatedLiteral { .. }))
                ),
                "input {:?}",
                src
            );
        }
    }

    #[test]
    fn oversized_numeral_is_parse_error() {
        let mut pool = Pool::new();
        let res = tokenize("99999999999999999999".bytes(), &mut pool);
        assert!(matches!(res, Err(ProcError::ParseInt(_))));
    }

    #[test]
    fn spans_track_lines() {
        let (stream, _) = lex("var\n  x ;");
        let spans: Vec<_> = stream.iter().map(|t| t.span).collect();
        assert_eq!(
            spans,
            vec![
                span!(0, 0, 0, 3),
                span!(1, 2, 1, 3),
                span!(1, 4, 1, 5),
                span!(1, 5, 1, 5),
            ]
        );
    }

    #[test]
    fn lexer_streams_lazily() {
        let mut pool = Pool::new();
        let mut lexer = ProcLexer::new("a b".bytes().fuse(), KeywordTable::standard());
        let first = lexer.try_next(&mut pool).unwrap().unwrap();
        assert_eq!(first.kind, Identifier);
        assert_eq!(lexer.stats().chars, 2);
        assert_eq!(pool.count_identifiers(), 1);
    }
}
