//! Precomputed parser tables.
//!
//! A [`ParserData`] bundles everything the engine consumes at parse time:
//!
//! - the **action table**, keyed by `(state, symbol)` and holding a signed
//!   code: positive = shift (or goto) to that state, negative = reduce by
//!   production `-code`. Goto entries for nonterminals live in the same table.
//! - the **production table**: left-hand symbol and right-hand size per
//!   production id,
//! - the start state, the accepting state and the end-of-input symbol.
//!
//! Tables are built elsewhere (by a generator or by hand) and only consumed
//! here. They can be assembled in code or read from a line-oriented text
//! description:
//!
//! ```text
//! # comments run to end of line
//! start  0
//! accept 1
//! end    EOF
//! rule   1 Decl 3 decl          # rule <id> <lhs> <size> [label]
//! action 0 INT 2                # action <state> <symbol> <code>
//! action 0 Decl 1
//! action 4 EOF -1
//! ```
//!
//! Symbols are either numbers or names handed to a resolver.
//!
//! ```rust
//! # use parsekit::{ParserAction, ParserData};
//! let data: ParserData = "accept 1\nend 3\nrule 1 4 1\naction 0 0 2\naction 2 3 -1\naction 0 4 1"
//!     .parse()
//!     .unwrap();
//! assert_eq!(data.action(0, 0), Some(ParserAction::Shift(2)));
//! assert_eq!(data.action(2, 3), Some(ParserAction::Reduce(1)));
//! assert_eq!(data.prod(1).unwrap().size, 1);
//! ```

use crate::TableError;
use smartstring::alias::String;
use std::collections::HashMap;
use std::str::FromStr;

pub type StateID = usize;
pub type SymbolID = usize;
pub type ProdID = usize;

/// A decoded action table entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParserAction {
    Shift(StateID),
    Reduce(ProdID),
}

impl ParserAction {
    /// Decodes a signed table code. Zero encodes nothing and yields `None`.
    pub fn decode(code: i64) -> Option<Self> {
        match code {
            c if c > 0 => usize::try_from(c).ok().map(ParserAction::Shift),
            c if c < 0 => usize::try_from(c.unsigned_abs()).ok().map(ParserAction::Reduce),
            _ => None,
        }
    }

    /// Encodes the action as a signed table code.
    pub fn code(&self) -> i64 {
        match *self {
            ParserAction::Shift(state) => state as i64,
            ParserAction::Reduce(prod_id) => -(prod_id as i64),
        }
    }
}

/// One grammar production, as far as the engine is concerned.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Prod {
    /// Left-hand nonterminal, used as the goto key after a reduction.
    pub lhs: SymbolID,
    /// Number of right-hand symbols (states popped on reduction).
    pub size: usize,
    pub label: Option<String>,
}

#[derive(Clone, Debug)]
pub struct ParserData {
    actions: HashMap<(StateID, SymbolID), i64>,
    prods: Vec<Option<Prod>>,
    start_state: StateID,
    accept_state: StateID,
    end_symbol: SymbolID,
}

impl ParserData {
    pub fn new(start_state: StateID, accept_state: StateID, end_symbol: SymbolID) -> Self {
        Self {
            actions: HashMap::new(),
            prods: Vec::new(),
            start_state,
            accept_state,
            end_symbol,
        }
    }

    #[inline]
    pub fn start_state(&self) -> StateID {
        self.start_state
    }

    #[inline]
    pub fn accept_state(&self) -> StateID {
        self.accept_state
    }

    #[inline]
    pub fn end_symbol(&self) -> SymbolID {
        self.end_symbol
    }

    /// Raw signed code for `(state, symbol)`, if the table has an entry.
    #[inline]
    pub fn lookup(&self, state: StateID, symbol: SymbolID) -> Option<i64> {
        self.actions.get(&(state, symbol)).copied()
    }

    /// Decoded action for `(state, symbol)`.
    pub fn action(&self, state: StateID, symbol: SymbolID) -> Option<ParserAction> {
        self.lookup(state, symbol).and_then(ParserAction::decode)
    }

    pub fn prod(&self, prod_id: ProdID) -> Option<&Prod> {
        self.prods.get(prod_id).and_then(Option::as_ref)
    }

    pub fn count_actions(&self) -> usize {
        self.actions.len()
    }

    pub fn count_prods(&self) -> usize {
        self.prods.iter().flatten().count()
    }

    /// Adds an action entry. The table must stay conflict-free, so a second
    /// entry for the same `(state, symbol)` is rejected, as is code 0.
    pub fn insert_action(
        &mut self,
        state: StateID,
        symbol: SymbolID,
        code: i64,
    ) -> Result<(), TableError> {
        if code == 0 {
            return Err(TableError::InvalidCode { state, symbol });
        }
        if self.actions.insert((state, symbol), code).is_some() {
            return Err(TableError::Conflict { state, symbol });
        }
        Ok(())
    }

    pub fn insert_prod(&mut self, prod_id: ProdID, prod: Prod) -> Result<(), TableError> {
        if self.prods.len() <= prod_id {
            self.prods.resize(prod_id + 1, None);
        }
        let slot = &mut self.prods[prod_id];
        if slot.is_some() {
            return Err(TableError::DuplicateProd(prod_id));
        }
        *slot = Some(prod);
        Ok(())
    }

    /// Chainable form of [`insert_action`](Self::insert_action).
    pub fn with_action(
        mut self,
        state: StateID,
        symbol: SymbolID,
        code: i64,
    ) -> Result<Self, TableError> {
        self.insert_action(state, symbol, code)?;
        Ok(self)
    }

    /// Chainable form of [`insert_prod`](Self::insert_prod).
    pub fn with_prod(
        mut self,
        prod_id: ProdID,
        lhs: SymbolID,
        size: usize,
    ) -> Result<Self, TableError> {
        self.insert_prod(
            prod_id,
            Prod {
                lhs,
                size,
                label: None,
            },
        )?;
        Ok(self)
    }

    /// Reads a text table description, resolving non-numeric symbols with
    /// `resolve`.
    pub fn parse_with<F>(src: &str, resolve: F) -> Result<Self, TableError>
    where
        F: Fn(&str) -> Option<SymbolID>,
    {
        let mut start_state = None;
        let mut accept_state = None;
        let mut end_symbol = None;
        let mut prods = Vec::new();
        let mut actions = Vec::new();

        for (i, raw) in src.lines().enumerate() {
            let line = i + 1;
            let text = raw.split('#').next().unwrap_or_default();
            let fields: Vec<&str> = text.split_whitespace().collect();
            let Some((&directive, args)) = fields.split_first() else {
                continue;
            };
            let syntax = |message: &str| TableError::Syntax {
                line,
                message: message.into(),
            };
            let symbol = |s: &str| {
                s.parse::<SymbolID>()
                    .ok()
                    .or_else(|| resolve(s))
                    .ok_or_else(|| TableError::UnknownSymbol {
                        line,
                        name: s.into(),
                    })
            };
            let number = |s: &str| {
                s.parse::<usize>()
                    .map_err(|_| syntax(&format!("expected a number, found {s:?}")))
            };

            match (directive, args) {
                ("start", [state]) => start_state = Some(number(*state)?),
                ("accept", [state]) => accept_state = Some(number(*state)?),
                ("end", [sym]) => end_symbol = Some(symbol(*sym)?),
                ("rule", [id, lhs, size, rest @ ..]) if rest.len() <= 1 => {
                    let prod = Prod {
                        lhs: symbol(*lhs)?,
                        size: number(*size)?,
                        label: rest.first().map(|&s| s.into()),
                    };
                    prods.push((line, number(*id)?, prod));
                }
                ("action", [state, sym, code]) => {
                    let code = code
                        .parse::<i64>()
                        .map_err(|_| syntax(&format!("expected an action code, found {code:?}")))?;
                    actions.push((line, number(*state)?, symbol(*sym)?, code));
                }
                _ => return Err(syntax(&format!("unrecognized directive {:?}", text.trim()))),
            }
        }

        let accept_state = accept_state.ok_or(TableError::Missing("accept"))?;
        let end_symbol = end_symbol.ok_or(TableError::Missing("end"))?;
        let mut data = ParserData::new(start_state.unwrap_or(0), accept_state, end_symbol);
        for (line, prod_id, prod) in prods {
            data.insert_prod(prod_id, prod).map_err(|e| e.at(line))?;
        }
        for (line, state, symbol, code) in actions {
            data.insert_action(state, symbol, code)
                .map_err(|e| e.at(line))?;
        }
        log::debug!(
            "loaded parser tables: {} actions, {} productions",
            data.count_actions(),
            data.count_prods()
        );
        Ok(data)
    }
}

impl FromStr for ParserData {
    type Err = TableError;

    /// Parses a table description whose symbols are all numeric.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_with(s, |_| None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn action_codes_decode_by_sign() {
        assert_eq!(ParserAction::decode(7), Some(ParserAction::Shift(7)));
        assert_eq!(ParserAction::decode(-3), Some(ParserAction::Reduce(3)));
        assert_eq!(ParserAction::decode(0), None);
        assert_eq!(ParserAction::Reduce(3).code(), -3);
        assert_eq!(ParserAction::Shift(12).code(), 12);
    }

    #[test]
    fn builder_rejects_conflicts_and_zero_codes() {
        let data = ParserData::new(0, 1, 9).with_action(0, 2, 5).unwrap();
        assert!(matches!(
            data.clone().with_action(0, 2, -1),
            Err(TableError::Conflict {
                state: 0,
                symbol: 2
            })
        ));
        assert!(matches!(
            data.with_action(3, 3, 0),
            Err(TableError::InvalidCode {
                state: 3,
                symbol: 3
            })
        ));
    }

    #[test]
    fn prods_are_sparse_and_unique() {
        let data = ParserData::new(0, 1, 9).with_prod(3, 10, 2).unwrap();
        assert!(data.prod(0).is_none());
        assert!(data.prod(7).is_none());
        assert_eq!(data.prod(3).map(|p| (p.lhs, p.size)), Some((10, 2)));
        assert_eq!(data.count_prods(), 1);
        assert!(matches!(
            data.with_prod(3, 11, 1),
            Err(TableError::DuplicateProd(3))
        ));
    }

    #[test]
    fn parses_named_symbols_and_comments() {
        let src = "
            # declaration grammar
            start 0
            accept 1
            end EOF
            rule 1 Decl 3 decl
            action 0 INT 2     # shift
            action 2 ID 3
            action 3 SEMI 4
            action 4 EOF -1
            action 0 Decl 1
        ";
        let resolve = |name: &str| match name {
            "INT" => Some(0),
            "ID" => Some(1),
            "SEMI" => Some(2),
            "EOF" => Some(3),
            "Decl" => Some(4),
            _ => None,
        };
        let data = ParserData::parse_with(src, resolve).unwrap();
        assert_eq!(data.start_state(), 0);
        assert_eq!(data.accept_state(), 1);
        assert_eq!(data.end_symbol(), 3);
        assert_eq!(data.count_actions(), 5);
        assert_eq!(data.lookup(4, 3), Some(-1));
        assert_eq!(data.action(0, 4), Some(ParserAction::Shift(1)));
        let prod = data.prod(1).unwrap();
        assert_eq!((prod.lhs, prod.size), (4, 3));
        assert_eq!(prod.label.as_deref(), Some("decl"));
    }

    #[test]
    fn reports_line_of_bad_input() {
        let err = "accept 1\nend 0\naction 0 0 x".parse::<ParserData>().unwrap_err();
        assert!(matches!(err, TableError::Syntax { line: 3, .. }));

        let err = "accept 1\nend 0\naction 0 0 1\naction 0 0 2"
            .parse::<ParserData>()
            .unwrap_err();
        assert!(matches!(err, TableError::Line { line: 4, .. }));
        assert!(err.to_string().contains("line 4"));

        let err = "accept 1\nend Nope".parse::<ParserData>().unwrap_err();
        assert!(matches!(err, TableError::UnknownSymbol { line: 2, .. }));

        let err = "frobnicate 1".parse::<ParserData>().unwrap_err();
        assert!(matches!(err, TableError::Syntax { line: 1, .. }));
    }

    #[test]
    fn requires_accept_and_end() {
        assert!(matches!(
            "end 0".parse::<ParserData>(),
            Err(TableError::Missing("accept"))
        ));
        assert!(matches!(
            "accept 1".parse::<ParserData>(),
            Err(TableError::Missing("end"))
        ));
    }
}
