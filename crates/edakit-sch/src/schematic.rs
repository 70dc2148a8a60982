//! The schematic sheet: owns placed symbols and freestanding texts, shares a
//! block with the rest of the design.

use crate::reference::{Reference, UuidLookup};
use crate::schematic_symbol::SchematicSymbol;
use crate::text::Text;
use crate::{json, Block, SchematicError};
use edakit_pool::Pool;
use serde_json::{json, Map, Value};
use std::collections::BTreeMap;
use uuid::Uuid;

/// Tokens whose auto-generated texts are detached when a symbol is smashed.
const SMASH_TOKENS: [&str; 2] = ["$REFDES", "$VALUE"];

#[derive(Debug, Clone)]
pub struct Schematic {
    pub uuid: Uuid,
    pub name: String,
    pub block: Block,
    /// Whether `$VALUE` substitution renders `G:`/`T:` annotation lines.
    pub group_tag_visible: bool,
    pub symbols: BTreeMap<Uuid, SchematicSymbol>,
    pub texts: BTreeMap<Uuid, Text>,
}

impl Schematic {
    pub fn new(uuid: Uuid, name: impl Into<String>, block: Block) -> Self {
        Self {
            uuid,
            name: name.into(),
            block,
            group_tag_visible: false,
            symbols: BTreeMap::new(),
            texts: BTreeMap::new(),
        }
    }

    /// Load a sheet document.  Texts are loaded first so the symbols' smashed
    /// text references can be resolved against them; symbols resolve their
    /// component and gate against the supplied block immediately.
    pub fn from_json(
        uuid: Uuid,
        j: &Value,
        pool: &dyn Pool,
        block: Block,
    ) -> Result<Self, SchematicError> {
        let mut sch = Self::new(uuid, json::opt_str(j, "name")?.unwrap_or(""), block);
        sch.group_tag_visible = json::opt_bool(j, "group_tag_visible", false)?;

        for (key, doc) in doc_map(j, "texts")? {
            sch.texts.insert(key, Text::from_json(key, doc)?);
        }
        for (key, doc) in doc_map(j, "symbols")? {
            let mut symbol = SchematicSymbol::from_json(key, doc, pool, Some(&sch.block))?;
            for text_ref in &mut symbol.texts {
                text_ref.resolve(&sch.texts)?;
            }
            sch.symbols.insert(key, symbol);
        }
        Ok(sch)
    }

    pub fn serialize(&self) -> Value {
        json!({
            "name": self.name,
            "group_tag_visible": self.group_tag_visible,
            "symbols": self.symbols.iter()
                .map(|(k, v)| (k.to_string(), v.serialize()))
                .collect::<Map<String, Value>>(),
            "texts": self.texts.iter()
                .map(|(k, v)| (k.to_string(), v.serialize()))
                .collect::<Map<String, Value>>(),
        })
    }

    /// Insert (or replace) a placed symbol and return a mutable reference for
    /// chaining.
    pub fn add_symbol(&mut self, symbol: SchematicSymbol) -> &mut Self {
        self.symbols.insert(symbol.uuid, symbol);
        self
    }

    /// Remove a placed symbol; the referenced component, gate, pool symbol
    /// and texts are untouched.
    pub fn remove_symbol(&mut self, uuid: &Uuid) -> Option<SchematicSymbol> {
        self.symbols.remove(uuid)
    }

    /// Detach a symbol's auto-generated texts into freestanding [`Text`]
    /// objects the user can move independently.
    pub fn smash_symbol(&mut self, uuid: &Uuid) -> Result<(), SchematicError> {
        let symbol = self
            .symbols
            .get_mut(uuid)
            .ok_or(SchematicError::NotFound {
                kind: "schematic symbol",
                uuid: *uuid,
            })?;
        if symbol.smashed {
            return Ok(());
        }
        symbol.smashed = true;
        for token in SMASH_TOKENS {
            let mut text = Text::new(Uuid::new_v4(), token);
            text.placement = symbol.placement;
            let text_uuid = text.uuid;
            self.texts.insert(text_uuid, text);
            symbol.texts.push(Reference::resolved(text_uuid, &self.texts)?);
        }
        Ok(())
    }

    /// Inverse of [`smash_symbol`](Self::smash_symbol): delete the detached
    /// texts and fall back to auto-generated ones.
    pub fn unsmash_symbol(&mut self, uuid: &Uuid) -> Result<(), SchematicError> {
        let symbol = self
            .symbols
            .get_mut(uuid)
            .ok_or(SchematicError::NotFound {
                kind: "schematic symbol",
                uuid: *uuid,
            })?;
        if !symbol.smashed {
            return Ok(());
        }
        symbol.smashed = false;
        for text_ref in symbol.texts.drain(..) {
            self.texts.remove(&text_ref.uuid());
        }
        Ok(())
    }
}

impl UuidLookup<Text> for Schematic {
    fn lookup(&self, uuid: &Uuid) -> Option<&Text> {
        self.texts.get(uuid)
    }
}

/// Iterate an optional `{uuid: sub-document}` object field.
fn doc_map<'a>(
    j: &'a Value,
    field: &'static str,
) -> Result<Vec<(Uuid, &'a Value)>, SchematicError> {
    let Some(v) = j.get(field) else {
        return Ok(Vec::new());
    };
    let obj = v.as_object().ok_or_else(|| SchematicError::InvalidField {
        field,
        reason: "expected an object".to_string(),
    })?;
    obj.iter()
        .map(|(key, doc)| {
            let uuid = key.parse().map_err(|e| SchematicError::InvalidField {
                field,
                reason: format!("key is not a UUID: {e}"),
            })?;
            Ok((uuid, doc))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::{Component, Gate, GateEntity};
    use edakit_pool::{InMemoryPool, Symbol};
    use serde_json::json;
    use std::sync::Arc;

    fn setup() -> (InMemoryPool, Block, Uuid, Uuid, Uuid) {
        let symbol = Symbol::new(Uuid::new_v4(), "res");
        let symbol_uuid = symbol.uuid;
        let pool = InMemoryPool::new().with_symbol(symbol);

        let gate = Gate::new(Uuid::new_v4(), "main", "");
        let gate_uuid = gate.uuid;
        let entity = Arc::new(GateEntity::new(Uuid::new_v4(), "res").with_gate(gate));
        let component = Component::new(Uuid::new_v4(), "R1", "10k", entity);
        let component_uuid = component.uuid;
        let block = Block::new(Uuid::new_v4(), "top").with_component(component);

        (pool, block, symbol_uuid, component_uuid, gate_uuid)
    }

    #[test]
    fn sheet_document_roundtrip_resolves_smashed_texts() {
        let (pool, block, symbol_uuid, component_uuid, gate_uuid) = setup();
        let text_uuid = Uuid::new_v4();
        let sym_uuid = Uuid::new_v4();
        let doc = json!({
            "name": "sheet 1",
            "group_tag_visible": true,
            "texts": {
                text_uuid.to_string(): {
                    "text": "$REFDES",
                    "placement": {"shift": [5, 5]},
                },
            },
            "symbols": {
                sym_uuid.to_string(): {
                    "symbol": symbol_uuid.to_string(),
                    "component": component_uuid.to_string(),
                    "gate": gate_uuid.to_string(),
                    "placement": {"shift": [0, 0]},
                    "smashed": true,
                    "texts": [text_uuid.to_string()],
                },
            },
        });

        let sch = Schematic::from_json(Uuid::new_v4(), &doc, &pool, block).unwrap();
        assert!(sch.group_tag_visible);
        let sym = &sch.symbols[&sym_uuid];
        assert!(sym.smashed);
        assert_eq!(
            sym.texts[0].get(&sch).unwrap().text,
            "$REFDES"
        );

        let out = sch.serialize();
        assert_eq!(out["name"], "sheet 1");
        assert_eq!(out["symbols"][sym_uuid.to_string()]["texts"][0], text_uuid.to_string());
    }

    #[test]
    fn dangling_smashed_text_reference_is_fatal() {
        let (pool, block, symbol_uuid, component_uuid, gate_uuid) = setup();
        let doc = json!({
            "symbols": {
                Uuid::new_v4().to_string(): {
                    "symbol": symbol_uuid.to_string(),
                    "component": component_uuid.to_string(),
                    "gate": gate_uuid.to_string(),
                    "placement": {"shift": [0, 0]},
                    "texts": [Uuid::new_v4().to_string()],
                },
            },
        });
        assert!(matches!(
            Schematic::from_json(Uuid::new_v4(), &doc, &pool, block),
            Err(SchematicError::NotFound { kind: "text", .. })
        ));
    }

    #[test]
    fn smash_and_unsmash_manage_text_objects() {
        let (pool, block, symbol_uuid, component_uuid, gate_uuid) = setup();
        let sym_uuid = Uuid::new_v4();
        let doc = json!({
            "symbols": {
                sym_uuid.to_string(): {
                    "symbol": symbol_uuid.to_string(),
                    "component": component_uuid.to_string(),
                    "gate": gate_uuid.to_string(),
                    "placement": {"shift": [42, 0]},
                },
            },
        });
        let mut sch = Schematic::from_json(Uuid::new_v4(), &doc, &pool, block).unwrap();

        sch.smash_symbol(&sym_uuid).unwrap();
        assert!(sch.symbols[&sym_uuid].smashed);
        assert_eq!(sch.texts.len(), 2);
        assert_eq!(sch.symbols[&sym_uuid].texts.len(), 2);
        // Detached texts inherit the symbol placement.
        assert!(sch.texts.values().all(|t| t.placement.shift == (42, 0)));

        // Smashing again is a no-op.
        sch.smash_symbol(&sym_uuid).unwrap();
        assert_eq!(sch.texts.len(), 2);

        sch.unsmash_symbol(&sym_uuid).unwrap();
        assert!(!sch.symbols[&sym_uuid].smashed);
        assert!(sch.texts.is_empty());
        assert!(sch.symbols[&sym_uuid].texts.is_empty());
    }

    #[test]
    fn removing_a_symbol_leaves_collaborators_alone() {
        let (pool, block, symbol_uuid, component_uuid, gate_uuid) = setup();
        let sym_uuid = Uuid::new_v4();
        let doc = json!({
            "symbols": {
                sym_uuid.to_string(): {
                    "symbol": symbol_uuid.to_string(),
                    "component": component_uuid.to_string(),
                    "gate": gate_uuid.to_string(),
                    "placement": {"shift": [0, 0]},
                },
            },
        });
        let mut sch = Schematic::from_json(Uuid::new_v4(), &doc, &pool, block).unwrap();

        assert!(sch.remove_symbol(&sym_uuid).is_some());
        assert!(sch.symbols.is_empty());
        assert!(sch.block.components.contains_key(&component_uuid));
        assert!(pool.get_symbol(&symbol_uuid).is_ok());
    }
}
