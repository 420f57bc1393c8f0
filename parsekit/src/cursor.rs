//! Source positions, spans and the byte cursor that maintains them.
//!
//! Lines and columns count from zero. Columns count bytes, so a two-byte
//! UTF-8 character advances the column by two.

/// Where a byte sits in the source: line, then byte offset within the line.
#[derive(Debug, Clone, Default, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    pub line: usize,
    /// Bytes since the last `\n`.
    pub column: usize,
}

impl Position {
    #[inline]
    pub const fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

/// The bytes a token was scanned from, `start` inclusive and `end` exclusive.
///
/// Tokens and the errors that point at them carry one. The end-of-input
/// token has an empty span at the last position.
#[derive(Debug, Clone, Default, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

impl Span {
    #[inline]
    pub const fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// Empties the span at its end, ready for the next lexeme.
    pub fn collapse(&mut self) {
        self.start = self.end;
    }

    /// Smallest span covering both, e.g. a declaration from `var` to `;`.
    pub fn merge(&self, other: &Span) -> Span {
        Span {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// First and last line touched.
    #[inline]
    pub fn line_range(&self) -> (usize, usize) {
        (self.start.line, self.end.line)
    }

    /// `span L:C to L:C`, as printed by the CLI.
    #[inline]
    pub fn display(&self) -> String {
        format!(
            "span {}:{} to {}:{}",
            self.start.line, self.start.column, self.end.line, self.end.column
        )
    }
}

/// Tracks the current lexical position.
///
/// The lexer calls [`advance`](LexerCursor::advance) for every byte it
/// consumes and [`collapse`](Span::collapse)s the span when a new lexeme
/// starts, so `span` always covers the lexeme being scanned.
#[derive(Debug, Clone, Default)]
pub struct LexerCursor {
    /// Number of bytes consumed so far.
    pub pos: usize,
    pub span: Span,
}

impl LexerCursor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance by consuming a byte `b`.
    pub fn advance(&mut self, b: u8) {
        if b == b'\n' {
            self.span.end.line += 1;
            self.span.end.column = 0;
        } else {
            self.span.end.column += 1;
        }
        self.pos += 1;
    }
}

/// Build an `Option<Span>` inline from 0-based line/column coordinates.
///
/// # Examples
///
/// ```rust
/// # use parsekit::span;
/// let s = span!(0, 0, 1, 4);
/// assert_eq!(s.unwrap().end.column, 4);
/// ```
#[macro_export]
macro_rules! span {
    ($line_start:expr, $col_start:expr, $line_end:expr, $col_end:expr) => {
        Some($crate::Span {
            start: $crate::Position {
                line: $line_start,
                column: $col_start,
            },
            end: $crate::Position {
                line: $line_end,
                column: $col_end,
            },
        })
    };
}
