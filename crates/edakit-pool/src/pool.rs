use crate::Symbol;
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum PoolError {
    #[error("symbol {0} not found in pool")]
    SymbolNotFound(Uuid),
}

/// Read-only lookup surface of a symbol library.
///
/// Implementations hand out shared templates; callers that need to mutate a
/// symbol must clone it first.
pub trait Pool {
    fn get_symbol(&self, uuid: &Uuid) -> Result<Arc<Symbol>, PoolError>;
}

/// Pool backed by a plain in-process map.
///
/// The real application keeps its pool in an SQLite-indexed directory tree;
/// this implementation covers tests and tooling that already hold the
/// templates in memory.
#[derive(Debug, Default)]
pub struct InMemoryPool {
    symbols: HashMap<Uuid, Arc<Symbol>>,
}

impl InMemoryPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert (or replace) a template and return a mutable reference for
    /// chaining.
    pub fn add_symbol(&mut self, symbol: Symbol) -> &mut Self {
        self.symbols.insert(symbol.uuid, Arc::new(symbol));
        self
    }

    /// Builder-style symbol insertion that consumes `self`.
    pub fn with_symbol(mut self, symbol: Symbol) -> Self {
        self.symbols.insert(symbol.uuid, Arc::new(symbol));
        self
    }
}

impl Pool for InMemoryPool {
    fn get_symbol(&self, uuid: &Uuid) -> Result<Arc<Symbol>, PoolError> {
        self.symbols
            .get(uuid)
            .cloned()
            .ok_or(PoolError::SymbolNotFound(*uuid))
    }
}
