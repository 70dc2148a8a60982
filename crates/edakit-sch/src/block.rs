//! Netlist-side collaborators of the schematic: blocks, components, gates.
//!
//! A [`Block`] owns the components placed symbols refer to; a [`Component`]
//! shares a [`GateEntity`] describing its functional sub-units.  Symbols hold
//! these by UUID [`Reference`](crate::Reference), never by ownership.

use crate::reference::{RefTarget, UuidLookup};
use std::collections::BTreeMap;
use std::sync::Arc;
use uuid::Uuid;

/// One functional sub-unit of a multi-gate component (e.g. one of four NAND
/// gates in a single package).  `suffix` is appended to the component refdes
/// on the canvas (`U1` + `B` ⇒ `U1B`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Gate {
    pub uuid: Uuid,
    pub name: String,
    pub suffix: String,
}

impl Gate {
    pub fn new(uuid: Uuid, name: impl Into<String>, suffix: impl Into<String>) -> Self {
        Self {
            uuid,
            name: name.into(),
            suffix: suffix.into(),
        }
    }
}

impl RefTarget for Gate {
    const KIND: &'static str = "gate";
}

/// The functional description a component instantiates: a named set of gates.
///
/// Entities come from the pool and are shared between all components of the
/// same part, hence the `Arc` on [`Component::entity`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GateEntity {
    pub uuid: Uuid,
    pub name: String,
    pub gates: BTreeMap<Uuid, Gate>,
}

impl GateEntity {
    pub fn new(uuid: Uuid, name: impl Into<String>) -> Self {
        Self {
            uuid,
            name: name.into(),
            gates: BTreeMap::new(),
        }
    }

    /// Builder-style gate insertion that consumes `self`.
    pub fn with_gate(mut self, gate: Gate) -> Self {
        self.gates.insert(gate.uuid, gate);
        self
    }
}

impl UuidLookup<Gate> for GateEntity {
    fn lookup(&self, uuid: &Uuid) -> Option<&Gate> {
        self.gates.get(uuid)
    }
}

/// A component of the block's netlist: refdes, value, free-form attributes,
/// optional group/tag classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Component {
    pub uuid: Uuid,
    pub refdes: String,
    pub value: String,
    pub entity: Arc<GateEntity>,
    pub group: Option<Uuid>,
    pub tag: Option<Uuid>,
    /// Free-form attribute text keyed by bare token name (`"MPN"` for `$MPN`).
    pub attributes: BTreeMap<String, String>,
}

impl Component {
    pub fn new(
        uuid: Uuid,
        refdes: impl Into<String>,
        value: impl Into<String>,
        entity: Arc<GateEntity>,
    ) -> Self {
        Self {
            uuid,
            refdes: refdes.into(),
            value: value.into(),
            entity,
            group: None,
            tag: None,
            attributes: BTreeMap::new(),
        }
    }

    /// Builder-style group/tag assignment that consumes `self`.
    pub fn with_group_tag(mut self, group: Uuid, tag: Uuid) -> Self {
        self.group = Some(group);
        self.tag = Some(tag);
        self
    }

    /// Builder-style attribute insertion that consumes `self`.
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// Substitute a display token against this component.
    ///
    /// `$VALUE` resolves to the component value; any other `$NAME` token is
    /// looked up in the attribute table.  The second element reports whether
    /// the token was recognized — unknown tokens come back as an empty string
    /// with the flag cleared, never as an error.
    pub fn replace_text(&self, token: &str) -> (String, bool) {
        if token == "$VALUE" {
            return (self.value.clone(), true);
        }
        if let Some(name) = token.strip_prefix('$') {
            if let Some(v) = self.attributes.get(name) {
                return (v.clone(), true);
            }
        }
        (String::new(), false)
    }
}

impl RefTarget for Component {
    const KIND: &'static str = "component";
}

/// The container symbols resolve their component references against.  Also
/// owns the group/tag name tables used for `$VALUE` annotation.
#[derive(Debug, Clone, Default)]
pub struct Block {
    pub uuid: Uuid,
    pub name: String,
    pub components: BTreeMap<Uuid, Component>,
    pub group_names: BTreeMap<Uuid, String>,
    pub tag_names: BTreeMap<Uuid, String>,
}

impl Block {
    pub fn new(uuid: Uuid, name: impl Into<String>) -> Self {
        Self {
            uuid,
            name: name.into(),
            components: BTreeMap::new(),
            group_names: BTreeMap::new(),
            tag_names: BTreeMap::new(),
        }
    }

    /// Add (or replace) a component and return a mutable reference for
    /// chaining.
    pub fn add_component(&mut self, component: Component) -> &mut Self {
        self.components.insert(component.uuid, component);
        self
    }

    /// Builder-style component insertion that consumes `self`.
    pub fn with_component(mut self, component: Component) -> Self {
        self.components.insert(component.uuid, component);
        self
    }

    pub fn set_group_name(&mut self, uuid: Uuid, name: impl Into<String>) -> &mut Self {
        self.group_names.insert(uuid, name.into());
        self
    }

    pub fn set_tag_name(&mut self, uuid: Uuid, name: impl Into<String>) -> &mut Self {
        self.tag_names.insert(uuid, name.into());
        self
    }

    /// Group name for annotation text; unknown UUIDs render as empty, not as
    /// an error.
    pub fn get_group_name(&self, uuid: &Uuid) -> &str {
        match self.group_names.get(uuid) {
            Some(name) => name,
            None => {
                log::warn!("group {uuid} has no name in block {}", self.uuid);
                ""
            }
        }
    }

    pub fn get_tag_name(&self, uuid: &Uuid) -> &str {
        match self.tag_names.get(uuid) {
            Some(name) => name,
            None => {
                log::warn!("tag {uuid} has no name in block {}", self.uuid);
                ""
            }
        }
    }
}

impl UuidLookup<Component> for Block {
    fn lookup(&self, uuid: &Uuid) -> Option<&Component> {
        self.components.get(uuid)
    }
}
