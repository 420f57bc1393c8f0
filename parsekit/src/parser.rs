use crate::{Lexer, ParserAction, ParserData, ParserError, ProdID, StateID, Token};
use smartstring::alias::String;

/// Callback invoked by the [`Parser`] as it recognizes input.
///
/// `reduce` fires after every reduction, once the goto state has been pushed,
/// with the production id and the current lookahead token. The lookahead is
/// the token that triggered the reduction, not part of the reduced
/// production. `shift` fires for every shifted terminal and defaults to a
/// no-op.
pub trait SemanticHook<T, C> {
    type Error;

    fn shift(&mut self, _context: &mut C, _token: &T) -> Result<(), Self::Error> {
        Ok(())
    }

    fn reduce(
        &mut self,
        context: &mut C,
        prod_id: ProdID,
        lookahead: &T,
    ) -> Result<(), Self::Error>;
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParserStats {
    /// Tokens pulled from the lexer.
    pub tokens: usize,
    pub shifts: usize,
    pub reductions: usize,
}

/// Table-driven shift-reduce parser.
///
/// The parser owns a lexer and a semantic hook and borrows its tables. Each
/// call to [`parse`](Parser::parse) starts from the start state with an empty
/// stack and pulls tokens from the lexer on demand.
pub struct Parser<'d, L, H>
where
    L: Lexer,
{
    pub lexer: L,
    pub hook: H,
    data: &'d ParserData,
    states: Vec<StateID>,
    stats: ParserStats,
}

type Error<L> = ParserError<<L as Lexer>::Error, <L as Lexer>::Token>;

impl<'d, L, H> Parser<'d, L, H>
where
    L: Lexer,
    H: SemanticHook<L::Token, L::Context>,
    H::Error: Into<L::Error>,
{
    pub fn new(lexer: L, hook: H, data: &'d ParserData) -> Self {
        Self {
            lexer,
            hook,
            data,
            states: Vec::new(),
            stats: ParserStats::default(),
        }
    }

    pub fn data(&self) -> &'d ParserData {
        self.data
    }

    /// The state stack as left by the last `parse` call, bottom first.
    pub fn states(&self) -> &[StateID] {
        &self.states
    }

    pub fn stats(&self) -> ParserStats {
        self.stats.clone()
    }

    pub fn into_parts(self) -> (L, H) {
        (self.lexer, self.hook)
    }

    /// Runs the parse loop to acceptance or to the first error.
    ///
    /// After every shift or goto the top of the stack is compared with the
    /// accepting state; the comparison happens only after an action has been
    /// taken, so the start state itself never accepts. Once the end-of-input
    /// token is the lookahead no further token is requested: shifting it
    /// leaves it in place as the lookahead.
    pub fn parse(&mut self, context: &mut L::Context) -> Result<(), Error<L>> {
        self.states.clear();
        let mut state = self.data.start_state();
        self.states.push(state);
        let mut token = self.next_token(context, state)?;

        loop {
            let symbol: usize = token.token_id().into();
            if log::log_enabled!(log::Level::Trace) {
                self.dump_state(&token);
            }

            let Some(code) = self.data.lookup(state, symbol) else {
                return Err(ParserError::UnexpectedToken { state, token });
            };

            match ParserAction::decode(code) {
                Some(ParserAction::Shift(new_state)) => {
                    log::trace!("Shift {}", new_state);
                    self.states.push(new_state);
                    self.stats.shifts += 1;
                    self.hook
                        .shift(context, &token)
                        .map_err(|e| ParserError::Action {
                            prod_id: None,
                            source: e.into(),
                        })?;
                    if symbol != self.data.end_symbol() {
                        token = self.next_token(context, new_state)?;
                    }
                }

                Some(ParserAction::Reduce(prod_id)) => {
                    let Some(prod) = self.data.prod(prod_id) else {
                        return Err(ParserError::MalformedTable {
                            state,
                            symbol,
                            detail: "reduction by unknown production",
                        });
                    };
                    log::trace!("Reduce {}", prod_id);
                    let (lhs, size) = (prod.lhs, prod.size);
                    if size >= self.states.len() {
                        return Err(ParserError::MalformedTable {
                            state,
                            symbol,
                            detail: "reduction deeper than the state stack",
                        });
                    }
                    self.states.truncate(self.states.len() - size);
                    let top = self.states[self.states.len() - 1];
                    let Some(ParserAction::Shift(goto)) = self.data.action(top, lhs) else {
                        return Err(ParserError::MalformedTable {
                            state: top,
                            symbol: lhs,
                            detail: "missing goto entry",
                        });
                    };
                    log::trace!("Goto {}", goto);
                    self.states.push(goto);
                    self.stats.reductions += 1;
                    self.hook
                        .reduce(context, prod_id, &token)
                        .map_err(|e| ParserError::Action {
                            prod_id: Some(prod_id),
                            source: e.into(),
                        })?;
                }

                None => {
                    return Err(ParserError::MalformedTable {
                        state,
                        symbol,
                        detail: "zero action code",
                    });
                }
            }

            state = self.states[self.states.len() - 1];
            if state == self.data.accept_state() {
                log::trace!("Accept");
                return Ok(());
            }
        }
    }

    fn next_token(
        &mut self,
        context: &mut L::Context,
        state: StateID,
    ) -> Result<L::Token, Error<L>> {
        match self.lexer.try_next(context).map_err(ParserError::Lexer)? {
            Some(t) => {
                self.stats.tokens += 1;
                Ok(t)
            }
            None => Err(ParserError::UnexpectedEndOfInput { state }),
        }
    }

    fn dump_state(&self, incoming: &L::Token) {
        let mut output = String::new();
        for state in &self.states {
            output.push_str(&format!("<{}>  ", state));
        }
        output.push_str(&format!("<-  {:?}", incoming));
        log::trace!("{}", output);
    }
}
