//! # pool
//!
//! The Constant/Symbol Pool of one compilation unit.
//!
//! Two append-only stores hand out stable integer handles:
//!
//! - the **constant table** holds character, integer and string literals.
//!   Every literal occurrence gets its own slot, so two occurrences of `"x"`
//!   get two handles.
//! - the **identifier table** is an ordered set built on
//!   [`indexmap::IndexSet`]. Interning a name that was seen before returns
//!   its first handle.
//!
//! ## Example
//! ```rust
//! # use procfront::{Constant, Pool};
//! let mut pool = Pool::new();
//! let a = pool.intern_identifier("count");
//! assert_eq!(pool.intern_identifier("count"), a);
//!
//! let s1 = pool.intern_string("x");
//! let s2 = pool.intern_string("x");
//! assert_ne!(s1, s2);
//! assert_eq!(pool.constant(s2).unwrap(), &Constant::String("x".into()));
//! ```

use indexmap::IndexSet;
use smartstring::alias::String;
use std::fmt;
use thiserror::Error;

/// Errors that can occur when reading from a [`Pool`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PoolError {
    #[error("invalid pool handle {handle} (table length {len})")]
    InvalidHandle { handle: usize, len: usize },
}

/// A literal constant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Constant {
    Char(char),
    Integer(i64),
    String(String),
}

impl fmt::Display for Constant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Constant::Char(c) => write!(f, "{:?}", c),
            Constant::Integer(n) => write!(f, "{}", n),
            Constant::String(s) => write!(f, "{:?}", s.as_str()),
        }
    }
}

#[derive(Debug, Default, Clone)]
pub struct Pool {
    constants: Vec<Constant>,
    identifiers: IndexSet<String>,
}

impl Pool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn intern_char(&mut self, value: char) -> usize {
        self.push_constant(Constant::Char(value))
    }

    pub fn intern_integer(&mut self, value: i64) -> usize {
        self.push_constant(Constant::Integer(value))
    }

    pub fn intern_string(&mut self, value: impl Into<String>) -> usize {
        self.push_constant(Constant::String(value.into()))
    }

    fn push_constant(&mut self, constant: Constant) -> usize {
        self.constants.push(constant);
        self.constants.len() - 1
    }

    /// Inserts `name` if it is new and returns its handle.
    ///
    /// Names compare by exact string equality.
    pub fn intern_identifier(&mut self, name: impl AsRef<str>) -> usize {
        let name = name.as_ref();
        if let Some(handle) = self.identifiers.get_index_of(name) {
            return handle;
        }
        let (handle, _) = self.identifiers.insert_full(String::from(name));
        handle
    }

    pub fn constant(&self, handle: usize) -> Result<&Constant, PoolError> {
        self.constants.get(handle).ok_or(PoolError::InvalidHandle {
            handle,
            len: self.constants.len(),
        })
    }

    pub fn identifier(&self, handle: usize) -> Result<&str, PoolError> {
        self.identifiers
            .get_index(handle)
            .map(String::as_str)
            .ok_or(PoolError::InvalidHandle {
                handle,
                len: self.identifiers.len(),
            })
    }

    pub fn constants(&self) -> &[Constant] {
        &self.constants
    }

    pub fn identifiers(&self) -> impl Iterator<Item = &str> {
        self.identifiers.iter().map(String::as_str)
    }

    pub fn count_constants(&self) -> usize {
        self.constants.len()
    }

    pub fn count_identifiers(&self) -> usize {
        self.identifiers.len()
    }
}
