//! # Semantic hooks
//!
//! Stock [`SemanticHook`] implementations for the procedural language:
//!
//! - [`RuleLog`] records every reduction together with its lookahead token.
//!   It works with any tables and is handy for tracing and testing.
//! - [`DeclarationCollector`] understands the built-in declaration grammar
//!   (see [`grammar`](crate::grammar)). It collects `var name : type;`
//!   declarations and rejects a name declared twice.

use crate::grammar::prod;
use crate::{Pool, PoolError, ProcError, ProcToken, TokenKind, TokenValue};
use indexmap::IndexMap;
use parsekit::{ProdID, SemanticHook, Span};

/// Records `(production, lookahead)` for every reduction, in order.
#[derive(Debug, Default, Clone)]
pub struct RuleLog {
    entries: Vec<(ProdID, ProcToken)>,
}

impl RuleLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[(ProdID, ProcToken)] {
        &self.entries
    }

    /// The log with lookahead tokens reduced to their kinds.
    pub fn pairs(&self) -> Vec<(ProdID, TokenKind)> {
        self.entries.iter().map(|(p, t)| (*p, t.kind)).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<C> SemanticHook<ProcToken, C> for RuleLog {
    type Error = ProcError;

    fn reduce(
        &mut self,
        _context: &mut C,
        prod_id: ProdID,
        lookahead: &ProcToken,
    ) -> Result<(), ProcError> {
        log::debug!("reduce {} on {}", prod_id, lookahead.kind.label());
        self.entries.push((prod_id, lookahead.clone()));
        Ok(())
    }
}

/// The declared type of a variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclType {
    Integer,
    Char,
    Boolean,
    String,
    /// A user type name, by identifier handle.
    Named(usize),
}

impl DeclType {
    pub fn name<'p>(&self, pool: &'p Pool) -> Result<&'p str, PoolError> {
        match *self {
            DeclType::Integer => Ok("integer"),
            DeclType::Char => Ok("char"),
            DeclType::Boolean => Ok("boolean"),
            DeclType::String => Ok("string"),
            DeclType::Named(handle) => pool.identifier(handle),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    /// Identifier handle of the declared name.
    pub name: usize,
    pub ty: DeclType,
    pub span: Option<Span>,
}

/// Builds the declaration list of a program from shift and reduce
/// notifications.
///
/// Shifted terminals are buffered; when `Decl -> VAR IDENTIFIER COLON Type
/// SEMI_COLON` is reduced the last five of them are the declaration.
///
/// ```rust
/// # use procfront::{grammar, DeclarationCollector, Pool, ProcParser, KeywordTable};
/// let data = grammar::declarations().unwrap();
/// let mut pool = Pool::new();
/// let src = "var n : integer; var s : string;";
/// let hook = DeclarationCollector::new();
/// let mut parser = ProcParser::new(src.bytes().fuse(), KeywordTable::standard(), &data, hook);
/// parser.parse(&mut pool).unwrap();
/// let names: Vec<_> = parser
///     .hook()
///     .declarations()
///     .map(|d| pool.identifier(d.name).unwrap())
///     .collect();
/// assert_eq!(names, vec!["n", "s"]);
/// ```
#[derive(Debug, Default)]
pub struct DeclarationCollector {
    shifted: Vec<ProcToken>,
    declarations: IndexMap<usize, Declaration>,
}

impl DeclarationCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declarations in source order.
    pub fn declarations(&self) -> impl Iterator<Item = &Declaration> {
        self.declarations.values()
    }

    pub fn get(&self, name: usize) -> Option<&Declaration> {
        self.declarations.get(&name)
    }

    pub fn len(&self) -> usize {
        self.declarations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }

    fn decl_type(token: &ProcToken) -> Option<DeclType> {
        match (token.kind, token.value) {
            (TokenKind::Integer, _) => Some(DeclType::Integer),
            (TokenKind::Char, _) => Some(DeclType::Char),
            (TokenKind::Boolean, _) => Some(DeclType::Boolean),
            (TokenKind::String, _) => Some(DeclType::String),
            (TokenKind::Identifier, TokenValue::Ident(handle)) => Some(DeclType::Named(handle)),
            _ => None,
        }
    }
}

impl SemanticHook<ProcToken, Pool> for DeclarationCollector {
    type Error = ProcError;

    fn shift(&mut self, _pool: &mut Pool, token: &ProcToken) -> Result<(), ProcError> {
        self.shifted.push(token.clone());
        Ok(())
    }

    fn reduce(
        &mut self,
        pool: &mut Pool,
        prod_id: ProdID,
        _lookahead: &ProcToken,
    ) -> Result<(), ProcError> {
        if prod_id != prod::DECL {
            return Ok(());
        }
        let start = self.shifted.len().saturating_sub(5);
        let decl: Vec<ProcToken> = self.shifted.drain(start..).collect();
        let [var, name, _, ty, semi] = decl.as_slice() else {
            return Err(ProcError::MalformedDeclaration {
                detail: "fewer than five shifted tokens",
                span: decl.first().and_then(|t| t.span),
            });
        };
        let span = var.span.zip(semi.span).map(|(a, b)| a.merge(&b));
        let TokenValue::Ident(handle) = name.value else {
            return Err(ProcError::MalformedDeclaration {
                detail: "declared name is not an identifier",
                span,
            });
        };
        let Some(ty) = Self::decl_type(ty) else {
            return Err(ProcError::MalformedDeclaration {
                detail: "declared type is not a type name",
                span,
            });
        };

        if self.declarations.contains_key(&handle) {
            return Err(ProcError::Redeclared {
                name: pool.identifier(handle)?.into(),
                span,
            });
        }
        log::debug!("declare {} : {:?}", pool.identifier(handle)?, ty);
        self.declarations.insert(
            handle,
            Declaration {
                name: handle,
                ty,
                span,
            },
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tok(kind: TokenKind, value: TokenValue) -> ProcToken {
        ProcToken::new(kind, value, None)
    }

    fn feed(
        hook: &mut DeclarationCollector,
        pool: &mut Pool,
        name: &str,
        ty: ProcToken,
    ) -> Result<(), ProcError> {
        let handle = pool.intern_identifier(name);
        for t in [
            tok(TokenKind::Var, TokenValue::None),
            tok(TokenKind::Identifier, TokenValue::Ident(handle)),
            tok(TokenKind::Colon, TokenValue::None),
            ty,
            tok(TokenKind::SemiColon, TokenValue::None),
        ] {
            hook.shift(pool, &t)?;
        }
        let eof = tok(TokenKind::EndOfFile, TokenValue::None);
        hook.reduce(pool, prod::TYPE_INTEGER, &eof)?;
        hook.reduce(pool, prod::DECL, &eof)
    }

    #[test]
    fn rule_log_keeps_order_and_lookahead() {
        let mut log = RuleLog::new();
        let semi = tok(TokenKind::SemiColon, TokenValue::None);
        let eof = tok(TokenKind::EndOfFile, TokenValue::None);
        log.reduce(&mut (), 5, &semi).unwrap();
        log.reduce(&mut (), 4, &eof).unwrap();
        assert_eq!(log.len(), 2);
        assert_eq!(
            log.pairs(),
            vec![(5, TokenKind::SemiColon), (4, TokenKind::EndOfFile)]
        );
    }

    #[test]
    fn collects_declarations_in_order() {
        let mut pool = Pool::new();
        let mut hook = DeclarationCollector::new();
        feed(&mut hook, &mut pool, "a", tok(TokenKind::Integer, TokenValue::None)).unwrap();
        let point = pool.intern_identifier("point");
        let named = tok(TokenKind::Identifier, TokenValue::Ident(point));
        feed(&mut hook, &mut pool, "b", named).unwrap();

        let decls: Vec<_> = hook.declarations().cloned().collect();
        assert_eq!(decls.len(), 2);
        assert_eq!(decls[0].ty, DeclType::Integer);
        assert_eq!(decls[1].ty, DeclType::Named(point));
        assert_eq!(decls[1].ty.name(&pool).unwrap(), "point");
        assert_eq!(pool.identifier(decls[1].name).unwrap(), "b");
    }

    #[test]
    fn redeclaration_is_rejected() {
        let mut pool = Pool::new();
        let mut hook = DeclarationCollector::new();
        feed(&mut hook, &mut pool, "x", tok(TokenKind::Char, TokenValue::None)).unwrap();
        let boolean = tok(TokenKind::Boolean, TokenValue::None);
        let err = feed(&mut hook, &mut pool, "x", boolean).unwrap_err();
        assert!(matches!(err, ProcError::Redeclared { ref name, .. } if name.as_str() == "x"));
        assert_eq!(hook.len(), 1);
        assert_eq!(hook.get(0).map(|d| d.ty), Some(DeclType::Char));
    }

    #[test]
    fn short_declaration_is_an_error() {
        let mut pool = Pool::new();
        let mut hook = DeclarationCollector::new();
        let eof = tok(TokenKind::EndOfFile, TokenValue::None);
        hook.shift(&mut pool, &tok(TokenKind::Var, TokenValue::None)).unwrap();
        let err = hook.reduce(&mut pool, prod::DECL, &eof).unwrap_err();
        assert!(matches!(
            err,
            ProcError::MalformedDeclaration {
                detail: "fewer than five shifted tokens",
                ..
            }
        ));
        assert!(hook.is_empty());
    }

    #[test]
    fn non_type_in_type_position_is_an_error() {
        let mut pool = Pool::new();
        let mut hook = DeclarationCollector::new();
        let colon = tok(TokenKind::Colon, TokenValue::None);
        let err = feed(&mut hook, &mut pool, "x", colon).unwrap_err();
        assert!(matches!(
            err,
            ProcError::MalformedDeclaration {
                detail: "declared type is not a type name",
                ..
            }
        ));
        assert!(hook.is_empty());
    }
}
