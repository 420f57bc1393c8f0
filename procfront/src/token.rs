//! # Tokens
//!
//! The closed set of token kinds of the procedural language, the grammar
//! nonterminals that share the symbol space with them, and the concrete
//! [`ProcToken`] handed from the lexer to the parser.
use num_enum::{IntoPrimitive, TryFromPrimitive};
use parsekit::{Span, SymbolID, Token};

/// Token kinds produced by the lexer.
///
/// Discriminants are the grammar symbol ids used as action table keys; they
/// are stable and dense, starting at 0. Use [`TokenKind::label`] for the
/// symbolic name used in table descriptions and diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, IntoPrimitive, TryFromPrimitive)]
#[repr(usize)]
pub enum TokenKind {
    // keywords
    Array = 0,
    Boolean = 1,
    Break = 2,
    Char = 3,
    Continue = 4,
    Do = 5,
    Else = 6,
    False = 7,
    Function = 8,
    If = 9,
    Integer = 10,
    Of = 11,
    Return = 12,
    String = 13,
    Struct = 14,
    True = 15,
    Type = 16,
    Var = 17,
    While = 18,

    // punctuation and operators
    Colon = 19,
    PlusPlus = 20,
    Plus = 21,
    SemiColon = 22,
    Comma = 23,
    LeftSquare = 24,
    RightSquare = 25,
    LeftBraces = 26,
    RightBraces = 27,
    LeftParenthesis = 28,
    RightParenthesis = 29,
    And = 30,
    Or = 31,
    Times = 32,
    Divide = 33,
    Dot = 34,
    NotEqual = 35,
    Not = 36,
    EqualEqual = 37,
    Equals = 38,
    MinusMinus = 39,
    Minus = 40,
    LessOrEqual = 41,
    LessThan = 42,
    GreaterOrEqual = 43,
    GreaterThan = 44,

    // tokens with a secondary handle
    Identifier = 45,
    Numeral = 46,
    StringLiteral = 47,
    CharLiteral = 48,

    EndOfFile = 49,
    Unknown = 50,
}

impl TokenKind {
    /// Number of token kinds; nonterminal symbol ids start here.
    pub const COUNT: usize = 51;

    pub fn label(self) -> &'static str {
        use TokenKind::*;
        match self {
            Array => "ARRAY",
            Boolean => "BOOLEAN",
            Break => "BREAK",
            Char => "CHAR",
            Continue => "CONTINUE",
            Do => "DO",
            Else => "ELSE",
            False => "FALSE",
            Function => "FUNCTION",
            If => "IF",
            Integer => "INTEGER",
            Of => "OF",
            Return => "RETURN",
            String => "STRING",
            Struct => "STRUCT",
            True => "TRUE",
            Type => "TYPE",
            Var => "VAR",
            While => "WHILE",
            Colon => "COLON",
            PlusPlus => "PLUS_PLUS",
            Plus => "PLUS",
            SemiColon => "SEMI_COLON",
            Comma => "COMMA",
            LeftSquare => "LEFT_SQUARE",
            RightSquare => "RIGHT_SQUARE",
            LeftBraces => "LEFT_BRACES",
            RightBraces => "RIGHT_BRACES",
            LeftParenthesis => "LEFT_PARENTHESIS",
            RightParenthesis => "RIGHT_PARENTHESIS",
            And => "AND",
            Or => "OR",
            Times => "TIMES",
            Divide => "DIVIDE",
            Dot => "DOT",
            NotEqual => "NOT_EQUAL",
            Not => "NOT",
            EqualEqual => "EQUAL_EQUAL",
            Equals => "EQUALS",
            MinusMinus => "MINUS_MINUS",
            Minus => "MINUS",
            LessOrEqual => "LESS_OR_EQUAL",
            LessThan => "LESS_THAN",
            GreaterOrEqual => "GREATER_OR_EQUAL",
            GreaterThan => "GREATER_THAN",
            Identifier => "IDENTIFIER",
            Numeral => "NUMERAL",
            StringLiteral => "STRING_LITERAL",
            CharLiteral => "CHAR_LITERAL",
            EndOfFile => "END_OF_FILE",
            Unknown => "UNKNOWN",
        }
    }

    /// Looks a kind up by its [`label`](Self::label).
    pub fn from_label(label: &str) -> Option<Self> {
        (0..Self::COUNT)
            .filter_map(|id| Self::try_from(id).ok())
            .find(|kind| kind.label() == label)
    }

    /// Whether tokens of this kind carry a secondary handle.
    pub fn has_secondary(self) -> bool {
        matches!(
            self,
            TokenKind::Identifier
                | TokenKind::Numeral
                | TokenKind::StringLiteral
                | TokenKind::CharLiteral
        )
    }
}

/// The secondary payload of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenValue {
    /// No associated data (keywords, punctuation, end marker).
    None,
    /// Handle into the identifier table.
    Ident(usize),
    /// Handle into the constant table.
    Const(usize),
}

/// A lexical token of the procedural language.
///
/// # Example
/// ```rust
/// # use procfront::{ProcToken, TokenKind, TokenValue};
/// # use parsekit::{Token, span};
/// let tok = ProcToken {
///     kind: TokenKind::Numeral,
///     value: TokenValue::Const(0),
///     span: span!(0, 0, 0, 2),
/// };
/// assert_eq!(tok.token_id(), TokenKind::Numeral);
/// assert_eq!(tok.secondary(), Some(0));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcToken {
    pub kind: TokenKind,
    pub value: TokenValue,
    pub span: Option<Span>,
}

impl ProcToken {
    pub fn new(kind: TokenKind, value: TokenValue, span: Option<Span>) -> Self {
        Self { kind, value, span }
    }

    /// The handle attached to identifier and literal tokens.
    pub fn secondary(&self) -> Option<usize> {
        match self.value {
            TokenValue::None => None,
            TokenValue::Ident(h) | TokenValue::Const(h) => Some(h),
        }
    }

    /// Grammar symbol id of this token.
    pub fn symbol(&self) -> SymbolID {
        self.kind.into()
    }
}

impl Token for ProcToken {
    type TokenID = TokenKind;

    fn token_id(&self) -> Self::TokenID {
        self.kind
    }

    fn span(&self) -> Option<Span> {
        self.span
    }
}
