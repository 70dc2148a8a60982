//! Shared symbol pool for the edakit schematic model.
//!
//! The pool is an externally managed, read-only library of reusable design
//! primitives keyed by UUID.  Schematic-side entities never own pool storage:
//! they receive an [`std::sync::Arc`] share of a template and keep their own
//! deep copy for any instance-local edits.  The [`Pool`] trait is the only
//! lookup surface the schematic layer consumes.

mod pool;
mod symbol;

pub use pool::{InMemoryPool, Pool, PoolError};
pub use symbol::{Symbol, SymbolPin};
