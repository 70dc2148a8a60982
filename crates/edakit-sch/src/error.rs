use edakit_pool::PoolError;
use thiserror::Error;
use uuid::Uuid;

/// Errors raised while constructing or resolving schematic entities.
///
/// All construction-time variants abort construction of the single entity;
/// the document-loading layer decides whether to abort the whole load or skip
/// the entity.  Token substitution never goes through this type: unrecognized
/// display tokens are a normal state reported via a recognized flag.
#[derive(Error, Debug)]
pub enum SchematicError {
    /// A referenced symbol template is absent from the pool.
    #[error(transparent)]
    PoolLookup(#[from] PoolError),

    /// A component, gate or text UUID is absent from its resolved container.
    #[error("{kind} {uuid} not found")]
    NotFound { kind: &'static str, uuid: Uuid },

    /// An enum field in a document carries a string outside its lookup table.
    #[error("invalid value `{value}` for `{field}`")]
    InvalidEnumValue { field: &'static str, value: String },

    /// A reference was read before it was resolved against a container.
    #[error("{kind} reference {uuid} used before resolution")]
    UnresolvedReference { kind: &'static str, uuid: Uuid },

    /// A required document field is absent.
    #[error("missing required field `{0}`")]
    MissingField(&'static str),

    /// A document field is present but malformed.
    #[error("field `{field}` is malformed: {reason}")]
    InvalidField { field: &'static str, reason: String },
}
