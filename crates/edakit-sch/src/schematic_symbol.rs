//! A placed instance of a pool symbol on a schematic sheet.

use crate::block::{Block, Component, Gate};
use crate::reference::Reference;
use crate::text::Text;
use crate::{json, Placement, Schematic, SchematicError};
use edakit_pool::{Pool, Symbol};
use serde_json::{json, Value};
use std::str::FromStr;
use std::sync::Arc;
use uuid::Uuid;

/// Which of a pin's names the canvas shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PinDisplayMode {
    #[default]
    SelectedOnly,
    Both,
    All,
}

impl PinDisplayMode {
    pub fn as_str(self) -> &'static str {
        match self {
            PinDisplayMode::SelectedOnly => "selected_only",
            PinDisplayMode::Both => "both",
            PinDisplayMode::All => "all",
        }
    }
}

impl FromStr for PinDisplayMode {
    type Err = SchematicError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "selected_only" => Ok(PinDisplayMode::SelectedOnly),
            "both" => Ok(PinDisplayMode::Both),
            "all" => Ok(PinDisplayMode::All),
            _ => Err(SchematicError::InvalidEnumValue {
                field: "pin_display_mode",
                value: s.to_string(),
            }),
        }
    }
}

impl std::fmt::Display for PinDisplayMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A placed symbol: binds a pool template, a component and one of its gates,
/// a placement, and display state.
///
/// `symbol` is a deep copy of the pool template taken at construction time;
/// all instance-local display overrides go through it and never touch
/// `pool_symbol`.  The identity UUID is owned by the enclosing container and
/// is not part of the serialized document body.
#[derive(Debug, Clone)]
pub struct SchematicSymbol {
    pub uuid: Uuid,
    /// Shared, read-only pool template.
    pub pool_symbol: Arc<Symbol>,
    /// Instance-local copy of the template, free to mutate.
    pub symbol: Symbol,
    pub component: Reference<Component>,
    pub gate: Reference<Gate>,
    pub placement: Placement,
    /// Whether the auto-generated texts have been detached into freestanding
    /// [`Text`] objects.
    pub smashed: bool,
    pub display_directions: bool,
    pub display_all_pads: bool,
    pub pin_display_mode: PinDisplayMode,
    /// References to the detached texts; only meaningful while `smashed`.
    pub texts: Vec<Reference<Text>>,
}

impl SchematicSymbol {
    /// Load from a persisted sub-document.
    ///
    /// With a [`Block`] the component and gate references are resolved
    /// immediately; without one they stay unresolved for a later
    /// [`resolve`](Self::resolve) pass.  Unknown extra fields in the document
    /// are ignored for forward compatibility.
    pub fn from_json(
        uuid: Uuid,
        j: &Value,
        pool: &dyn Pool,
        block: Option<&Block>,
    ) -> Result<Self, SchematicError> {
        let pool_symbol = pool.get_symbol(&json::req_uuid(j, "symbol")?)?;
        let symbol = (*pool_symbol).clone();
        let placement = Placement::from_json(json::req(j, "placement")?)?;

        let component_uuid = json::req_uuid(j, "component")?;
        let gate_uuid = json::req_uuid(j, "gate")?;
        let (component, gate) = match block {
            Some(block) => {
                let component = Reference::resolved(component_uuid, block)?;
                let entity = Arc::clone(&component.get(block)?.entity);
                let gate = Reference::resolved(gate_uuid, entity.as_ref())?;
                (component, gate)
            }
            None => (
                Reference::unresolved(component_uuid),
                Reference::unresolved(gate_uuid),
            ),
        };

        let pin_display_mode = match json::opt_str(j, "pin_display_mode")? {
            Some(s) => s.parse()?,
            None => PinDisplayMode::default(),
        };

        Ok(Self {
            uuid,
            pool_symbol,
            symbol,
            component,
            gate,
            placement,
            smashed: json::opt_bool(j, "smashed", false)?,
            display_directions: json::opt_bool(j, "display_directions", false)?,
            display_all_pads: json::opt_bool(j, "display_all_pads", true)?,
            pin_display_mode,
            texts: json::opt_uuid_array(j, "texts")?
                .into_iter()
                .map(Reference::unresolved)
                .collect(),
        })
    }

    /// A fresh instance for interactive placement; component and gate are
    /// bound later.
    pub fn new(uuid: Uuid, pool_symbol: Arc<Symbol>) -> Self {
        let symbol = (*pool_symbol).clone();
        Self {
            uuid,
            pool_symbol,
            symbol,
            component: Reference::unresolved(Uuid::nil()),
            gate: Reference::unresolved(Uuid::nil()),
            placement: Placement::default(),
            smashed: false,
            display_directions: false,
            display_all_pads: false,
            pin_display_mode: PinDisplayMode::default(),
            texts: Vec::new(),
        }
    }

    /// Exact structural inverse of [`from_json`](Self::from_json); every
    /// field is written unconditionally.
    pub fn serialize(&self) -> Value {
        json!({
            "component": self.component.uuid().to_string(),
            "gate": self.gate.uuid().to_string(),
            "symbol": self.pool_symbol.uuid.to_string(),
            "placement": self.placement.serialize(),
            "smashed": self.smashed,
            "pin_display_mode": self.pin_display_mode.as_str(),
            "display_directions": self.display_directions,
            "display_all_pads": self.display_all_pads,
            "texts": self.texts.iter().map(|t| t.uuid().to_string()).collect::<Vec<_>>(),
        })
    }

    /// Second phase of a two-phase load: resolve the component against
    /// `block` and the gate against that component's entity.
    pub fn resolve(&mut self, block: &Block) -> Result<(), SchematicError> {
        self.component.resolve(block)?;
        let entity = Arc::clone(&self.component.get(block)?.entity);
        self.gate.resolve(entity.as_ref())
    }

    /// The on-canvas designator: component refdes plus gate suffix.
    pub fn refdes(&self, block: &Block) -> Result<String, SchematicError> {
        let component = self.component.get(block)?;
        let gate = self.gate.get(component.entity.as_ref())?;
        Ok(format!("{}{}", component.refdes, gate.suffix))
    }

    /// Substitute a display token for this instance.
    ///
    /// `$REFDES`/`$RD` resolve here; everything else is delegated to the
    /// component.  When group tags are visible and the component belongs to a
    /// group, `$VALUE` gains `G:`/`T:` annotation lines.  The returned flag
    /// reports token recognition; only reading through an unresolved
    /// reference is an actual error.
    pub fn replace_text(
        &self,
        token: &str,
        schematic: &Schematic,
    ) -> Result<(String, bool), SchematicError> {
        let block = &schematic.block;
        let component = self.component.get(block)?;

        let is_value = token == "$VALUE";
        let (mut text, replaced) = match token {
            "$REFDES" | "$RD" => (self.refdes(block)?, true),
            _ => component.replace_text(token),
        };

        if is_value && schematic.group_tag_visible {
            if let Some(group) = component.group {
                text.push_str("\nG:");
                text.push_str(block.get_group_name(&group));
                text.push_str("\nT:");
                if let Some(tag) = component.tag {
                    text.push_str(block.get_tag_name(&tag));
                }
            }
        }
        Ok((text, replaced))
    }

    /// Rewrite the local copy's pin display state from the template according
    /// to `pin_display_mode` and the display flags.  The pool template is
    /// only read, never written.
    pub fn apply_pin_names(&mut self) {
        for (uuid, pin) in self.symbol.pins.iter_mut() {
            let Some(template) = self.pool_symbol.pins.get(uuid) else {
                continue;
            };
            pin.name = match self.pin_display_mode {
                PinDisplayMode::SelectedOnly => template.name.clone(),
                PinDisplayMode::Both => {
                    if template.alt_names.is_empty() {
                        template.name.clone()
                    } else {
                        format!("{} ({})", template.name, template.alt_names.join(", "))
                    }
                }
                PinDisplayMode::All => std::iter::once(template.name.as_str())
                    .chain(template.alt_names.iter().map(String::as_str))
                    .collect::<Vec<_>>()
                    .join("/"),
            };
            pin.direction_marker = self.display_directions;
            if self.display_all_pads {
                pin.pad_visible = true;
            }
        }
    }
}
