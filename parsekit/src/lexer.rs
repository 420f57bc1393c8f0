use crate::{LexerCursor, Span};
use smartstring::alias::String;
use std::collections::VecDeque;
use std::fmt::Debug;
use std::iter::FusedIterator;
use std::mem;

/// A token as seen by the [`Parser`](crate::Parser).
///
/// The parser only needs the token's grammar symbol; the span is used for
/// diagnostics. Everything else (payload, handles) is opaque to the runtime.
pub trait Token: Clone + Debug {
    type TokenID: Copy + Debug + Into<usize>;

    fn token_id(&self) -> Self::TokenID;
    fn span(&self) -> Option<Span>;
}

/// A pull-based lexer over a byte source.
///
/// Implementors own a [`LexerCtx`] and provide two hooks:
///
/// - [`action`](Lexer::action) scans one lexeme starting at the next unread
///   byte. It must consume at least one byte and may yield zero or more
///   tokens (skipping whitespace yields none).
/// - [`end`](Lexer::end) runs exactly once after the input is exhausted and
///   is expected to yield the end-of-input marker token.
///
/// The provided [`try_next`](Lexer::try_next) drives both and hands tokens
/// out one at a time, so a consumer never needs the whole stream in memory.
pub trait Lexer {
    type Input: FusedIterator<Item = u8>;
    type Token: Token;
    type Context;
    type Error: std::error::Error + 'static;

    fn ctx(&self) -> &LexerCtx<Self::Input, Self::Token>;
    fn ctx_mut(&mut self) -> &mut LexerCtx<Self::Input, Self::Token>;

    fn action(&mut self, context: &mut Self::Context) -> Result<(), Self::Error>;

    fn end(&mut self, context: &mut Self::Context) -> Result<(), Self::Error>;

    fn stats(&self) -> LexerStats {
        self.ctx().stats.clone()
    }

    #[inline]
    fn try_next(
        &mut self,
        context: &mut Self::Context,
    ) -> Result<Option<Self::Token>, Self::Error> {
        if let Some(t) = self.ctx_mut().pop_token() {
            return Ok(Some(t));
        }

        if self.ctx().end_flag {
            return Ok(None);
        }

        while self.ctx_mut().peek().is_some() {
            let pos = self.ctx().cursor.pos;
            self.ctx_mut().begin();
            self.action(context)?;
            debug_assert!(
                self.ctx().cursor.pos > pos,
                "lexer action consumed no input"
            );

            if let Some(t) = self.ctx_mut().pop_token() {
                return Ok(Some(t));
            }
        }
        self.ctx_mut().end_flag = true;

        self.ctx_mut().begin();
        self.end(context)?;

        Ok(self.ctx_mut().pop_token())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LexerStats {
    /// Bytes pulled from the input.
    pub chars: usize,
    /// Tokens handed out by `try_next`.
    pub tokens: usize,
    /// Recoverable errors recorded by the lexer actions.
    pub errors: usize,
}

/// Scanning state shared by every [`Lexer`] implementation.
pub struct LexerCtx<I, T> {
    input: I,
    unread: Vec<u8>,

    /// Bytes accumulated for the current lexeme.
    pub buffer: Vec<u8>,
    pub cursor: LexerCursor,

    pub end_flag: bool,
    tokens: VecDeque<T>,

    stats: LexerStats,
}

impl<I, T> LexerCtx<I, T>
where
    I: FusedIterator<Item = u8>,
    T: Token,
{
    pub fn new(input: I) -> Self {
        Self {
            input,
            unread: Vec::new(),
            buffer: Vec::new(),
            cursor: LexerCursor::new(),
            end_flag: false,
            tokens: VecDeque::new(),
            stats: LexerStats::default(),
        }
    }

    /// Returns the next byte without consuming it.
    pub fn peek(&mut self) -> Option<u8> {
        if let Some(&b) = self.unread.last() {
            return Some(b);
        }
        let b = self.input.next()?;
        self.stats.chars += 1;
        self.unread.push(b);
        Some(b)
    }

    /// Consumes the next byte, advancing the cursor. The byte is not
    /// accumulated; see [`bump`](Self::bump).
    pub fn skip(&mut self) -> Option<u8> {
        let b = match self.unread.pop() {
            Some(b) => b,
            None => {
                let b = self.input.next()?;
                self.stats.chars += 1;
                b
            }
        };
        self.cursor.advance(b);
        Some(b)
    }

    /// Consumes the next byte and appends it to the lexeme buffer.
    pub fn bump(&mut self) -> Option<u8> {
        let b = self.skip()?;
        self.buffer.push(b);
        Some(b)
    }

    /// Consumes bytes while `pred` holds, accumulating them.
    pub fn bump_while(&mut self, pred: impl Fn(u8) -> bool) -> usize {
        let mut n = 0;
        while let Some(b) = self.peek() {
            if !pred(b) {
                break;
            }
            self.bump();
            n += 1;
        }
        n
    }

    /// Consumes one UTF-8 encoded scalar value without accumulating it.
    ///
    /// A malformed or truncated sequence consumes the bytes read so far and
    /// decodes to U+FFFD, so every call makes progress.
    pub fn skip_char(&mut self) -> Option<char> {
        let lead = self.skip()?;
        let len = match lead {
            0x00..=0x7f => return Some(char::from(lead)),
            0xc2..=0xdf => 2,
            0xe0..=0xef => 3,
            0xf0..=0xf4 => 4,
            _ => return Some(char::REPLACEMENT_CHARACTER),
        };
        let mut buf = [lead, 0, 0, 0];
        for slot in &mut buf[1..len] {
            match self.peek() {
                Some(b) if b & 0xc0 == 0x80 => {
                    self.skip();
                    *slot = b;
                }
                _ => return Some(char::REPLACEMENT_CHARACTER),
            }
        }
        let c = std::str::from_utf8(&buf[..len])
            .ok()
            .and_then(|s| s.chars().next());
        Some(c.unwrap_or(char::REPLACEMENT_CHARACTER))
    }

    /// Consumes the next byte if it equals `expected`.
    pub fn eat(&mut self, expected: u8) -> bool {
        if self.peek() == Some(expected) {
            self.skip();
            true
        } else {
            false
        }
    }

    /// Starts a new lexeme at the current position.
    pub fn begin(&mut self) {
        self.buffer.clear();
        self.cursor.span.collapse();
    }

    /// Span of the lexeme scanned since the last [`begin`](Self::begin).
    pub fn span(&self) -> Span {
        self.cursor.span
    }

    pub fn yield_token(&mut self, token: T) {
        self.tokens.push_back(token);
    }

    fn pop_token(&mut self) -> Option<T> {
        let t = self.tokens.pop_front()?;
        self.stats.tokens += 1;
        Some(t)
    }

    pub fn record_error(&mut self) {
        self.stats.errors += 1;
    }

    pub fn take_bytes(&mut self) -> Vec<u8> {
        mem::take(&mut self.buffer)
    }

    pub fn take_str(&mut self) -> Result<String, std::string::FromUtf8Error> {
        let bytes = self.take_bytes();
        let s = std::string::String::from_utf8(bytes)?;
        Ok(s.into())
    }

    /// Takes the lexeme buffer as text, replacing invalid UTF-8 with U+FFFD.
    pub fn take_str_lossy(&mut self) -> String {
        let bytes = self.take_bytes();
        String::from(&*std::string::String::from_utf8_lossy(&bytes))
    }
}
