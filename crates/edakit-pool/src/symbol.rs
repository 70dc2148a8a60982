use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

/// One pin of a symbol template.
///
/// `name` is the displayed pin name.  On a pool template it always equals the
/// primary name; an instance-local copy may rewrite it from `alt_names`
/// depending on the instance's pin display mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolPin {
    pub uuid: Uuid,
    pub name: String,
    /// Pad designator on the package (e.g. `"3"` or `"A1"`).
    pub pad: String,
    /// Alternate pin functions (e.g. `["MISO", "GPIO7"]`).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub alt_names: Vec<String>,
    #[serde(default = "default_true")]
    pub name_visible: bool,
    #[serde(default = "default_true")]
    pub pad_visible: bool,
    /// Whether the pin draws an input/output direction marker.
    #[serde(default)]
    pub direction_marker: bool,
}

fn default_true() -> bool {
    true
}

impl SymbolPin {
    pub fn new(uuid: Uuid, name: impl Into<String>, pad: impl Into<String>) -> Self {
        Self {
            uuid,
            name: name.into(),
            pad: pad.into(),
            alt_names: Vec::new(),
            name_visible: true,
            pad_visible: true,
            direction_marker: false,
        }
    }

    /// Builder-style alternate name insertion that consumes `self`.
    pub fn with_alt_name(mut self, name: impl Into<String>) -> Self {
        self.alt_names.push(name.into());
        self
    }
}

/// A symbol template as stored in the pool.
///
/// Templates are immutable once published to a pool.  A placed symbol clones
/// the template and mutates only its clone, so two instances of the same
/// template never observe each other's display overrides.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Symbol {
    pub uuid: Uuid,
    pub name: String,
    pub pins: BTreeMap<Uuid, SymbolPin>,
}

impl Symbol {
    pub fn new(uuid: Uuid, name: impl Into<String>) -> Self {
        Self {
            uuid,
            name: name.into(),
            pins: BTreeMap::new(),
        }
    }

    /// Add (or replace) a pin and return a mutable reference for chaining.
    pub fn add_pin(&mut self, pin: SymbolPin) -> &mut Self {
        self.pins.insert(pin.uuid, pin);
        self
    }

    /// Builder-style pin insertion that consumes `self`.
    pub fn with_pin(mut self, pin: SymbolPin) -> Self {
        self.pins.insert(pin.uuid, pin);
        self
    }
}
