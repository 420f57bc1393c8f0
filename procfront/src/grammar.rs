//! # Declaration grammar
//!
//! Precomputed SLR tables for the declaration section of a program:
//!
//! ```text
//! 1  Program -> Decls
//! 2  Decls   -> Decls Decl
//! 3  Decls   -> Decl
//! 4  Decl    -> VAR IDENTIFIER COLON Type SEMI_COLON
//! 5  Type    -> INTEGER
//! 6  Type    -> CHAR
//! 7  Type    -> BOOLEAN
//! 8  Type    -> STRING
//! 9  Type    -> IDENTIFIER
//! ```
//!
//! Production 0 is the augmented `Start -> Program`; it is never reduced,
//! the parser accepts on entering state 1 instead.
//!
//! The tables are kept in the text format understood by
//! [`ParserData::parse_with`], with symbols written by name and resolved by
//! [`symbol_id`]. Other grammars over the same token set can be loaded the
//! same way at run time.

use crate::TokenKind;
use num_enum::{IntoPrimitive, TryFromPrimitive};
use parsekit::{ParserData, SymbolID, TableError};

/// Nonterminal symbols. Their ids follow the token kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, IntoPrimitive, TryFromPrimitive)]
#[repr(usize)]
pub enum Nonterminal {
    Start = 51,
    Program = 52,
    Decls = 53,
    Decl = 54,
    Type = 55,
}

impl Nonterminal {
    pub fn name(self) -> &'static str {
        match self {
            Nonterminal::Start => "Start",
            Nonterminal::Program => "Program",
            Nonterminal::Decls => "Decls",
            Nonterminal::Decl => "Decl",
            Nonterminal::Type => "Type",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        [
            Nonterminal::Start,
            Nonterminal::Program,
            Nonterminal::Decls,
            Nonterminal::Decl,
            Nonterminal::Type,
        ]
        .into_iter()
        .find(|n| n.name() == name)
    }
}

/// Production ids of the declaration grammar.
pub mod prod {
    use parsekit::ProdID;

    pub const PROGRAM: ProdID = 1;
    pub const DECLS_MORE: ProdID = 2;
    pub const DECLS_ONE: ProdID = 3;
    pub const DECL: ProdID = 4;
    pub const TYPE_INTEGER: ProdID = 5;
    pub const TYPE_CHAR: ProdID = 6;
    pub const TYPE_BOOLEAN: ProdID = 7;
    pub const TYPE_STRING: ProdID = 8;
    pub const TYPE_NAMED: ProdID = 9;
}

/// Resolves a token label (`SEMI_COLON`) or nonterminal name (`Decl`) to its
/// grammar symbol id.
pub fn symbol_id(name: &str) -> Option<SymbolID> {
    TokenKind::from_label(name)
        .map(SymbolID::from)
        .or_else(|| Nonterminal::from_name(name).map(SymbolID::from))
}

/// Human-readable name of a grammar symbol id.
pub fn symbol_name(symbol: SymbolID) -> Option<&'static str> {
    TokenKind::try_from(symbol)
        .map(TokenKind::label)
        .ok()
        .or_else(|| Nonterminal::try_from(symbol).map(Nonterminal::name).ok())
}

const DECLARATIONS: &str = "
start  0
accept 1
end    END_OF_FILE

rule 0 Start   1 start
rule 1 Program 1 program
rule 2 Decls   2 decls_more
rule 3 Decls   1 decls_one
rule 4 Decl    5 decl
rule 5 Type    1 type_integer
rule 6 Type    1 type_char
rule 7 Type    1 type_boolean
rule 8 Type    1 type_string
rule 9 Type    1 type_named

action 0  VAR          4
action 0  Program      1
action 0  Decls        2
action 0  Decl         3

action 2  END_OF_FILE  -1
action 2  VAR          4
action 2  Decl         5

action 3  END_OF_FILE  -3
action 3  VAR          -3

action 4  IDENTIFIER   6

action 5  END_OF_FILE  -2
action 5  VAR          -2

action 6  COLON        7

action 7  INTEGER      9
action 7  CHAR         10
action 7  BOOLEAN      11
action 7  STRING       12
action 7  IDENTIFIER   13
action 7  Type         8

action 8  SEMI_COLON   14

action 9  SEMI_COLON   -5
action 10 SEMI_COLON   -6
action 11 SEMI_COLON   -7
action 12 SEMI_COLON   -8
action 13 SEMI_COLON   -9

action 14 END_OF_FILE  -4
action 14 VAR          -4
";

/// Builds the declaration grammar tables.
pub fn declarations() -> Result<ParserData, TableError> {
    ParserData::parse_with(DECLARATIONS, symbol_id)
}

/// Loads tables from a text description over this language's symbols.
pub fn load_tables(src: &str) -> Result<ParserData, TableError> {
    ParserData::parse_with(src, symbol_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use parsekit::ParserAction;

    #[test]
    fn nonterminals_follow_token_kinds() {
        assert_eq!(usize::from(Nonterminal::Start), TokenKind::COUNT);
        assert_eq!(symbol_id("Decl"), Some(54));
        assert_eq!(symbol_id("SEMI_COLON"), Some(22));
        assert_eq!(symbol_id("Nope"), None);
        assert_eq!(symbol_name(55), Some("Type"));
        assert_eq!(symbol_name(49), Some("END_OF_FILE"));
        assert_eq!(symbol_name(99), None);
    }

    #[test]
    fn declaration_tables_load() {
        let data = declarations().unwrap();
        assert_eq!(data.start_state(), 0);
        assert_eq!(data.accept_state(), 1);
        assert_eq!(data.end_symbol(), usize::from(TokenKind::EndOfFile));
        assert_eq!(data.count_prods(), 10);
        assert_eq!(data.count_actions(), 27);

        let decl = data.prod(prod::DECL).unwrap();
        assert_eq!(decl.lhs, usize::from(Nonterminal::Decl));
        assert_eq!(decl.size, 5);
        assert_eq!(decl.label.as_deref(), Some("decl"));

        assert_eq!(
            data.action(7, TokenKind::Identifier.into()),
            Some(ParserAction::Shift(13))
        );
        assert_eq!(
            data.action(13, TokenKind::SemiColon.into()),
            Some(ParserAction::Reduce(prod::TYPE_NAMED))
        );
    }

    #[test]
    fn custom_tables_use_symbol_names() {
        let data = load_tables("accept 1\nend END_OF_FILE\naction 0 Decl 1").unwrap();
        assert_eq!(data.lookup(0, 54), Some(1));
        assert!(load_tables("accept 1\nend EOF").is_err());
    }
}
