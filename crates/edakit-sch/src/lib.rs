//! Schematic data model for edakit.
//!
//! The central structure is [`SchematicSymbol`]: a placed instance of a pool
//! symbol template, bound to a component and one of its gates by UUID
//! reference.  Documents are loaded in two phases because a schematic file
//! may be parsed before all cross-referenced containers exist: constructing
//! without a [`Block`] leaves the component and gate as unresolved
//! [`Reference`]s, and a later [`SchematicSymbol::resolve`] pass completes
//! them.
//!
//! Persistence is a hand-rolled codec over [`serde_json::Value`] sub-documents
//! nested inside the larger schematic file.  Unknown extra fields are
//! tolerated for forward compatibility; missing optional fields materialize
//! their documented defaults on the first round trip.

pub mod block;
mod error;
mod json;
pub mod placement;
pub mod reference;
pub mod schematic;
pub mod schematic_symbol;
pub mod text;

pub use block::{Block, Component, Gate, GateEntity};
pub use error::SchematicError;
pub use placement::Placement;
pub use reference::{RefTarget, Reference, UuidLookup};
pub use schematic::Schematic;
pub use schematic_symbol::{PinDisplayMode, SchematicSymbol};
pub use text::Text;
