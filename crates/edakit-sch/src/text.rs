use crate::reference::RefTarget;
use crate::{json, Placement, SchematicError};
use serde_json::{json, Value};
use uuid::Uuid;

/// Default text height in nanometres.
pub const DEFAULT_TEXT_SIZE: u64 = 1_500_000;

/// A freestanding, independently placeable text object.
///
/// Smashing a symbol detaches its auto-generated texts (refdes, value) into
/// objects of this type so the user can move and edit them; the symbol keeps
/// UUID references to them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Text {
    pub uuid: Uuid,
    pub text: String,
    pub placement: Placement,
    pub size: u64,
}

impl Text {
    pub fn new(uuid: Uuid, text: impl Into<String>) -> Self {
        Self {
            uuid,
            text: text.into(),
            placement: Placement::default(),
            size: DEFAULT_TEXT_SIZE,
        }
    }

    pub fn from_json(uuid: Uuid, j: &Value) -> Result<Self, SchematicError> {
        Ok(Self {
            uuid,
            text: json::req_str(j, "text")?.to_string(),
            placement: Placement::from_json(json::req(j, "placement")?)?,
            size: json::opt_u64(j, "size", DEFAULT_TEXT_SIZE)?,
        })
    }

    pub fn serialize(&self) -> Value {
        json!({
            "text": self.text,
            "placement": self.placement.serialize(),
            "size": self.size,
        })
    }
}

impl RefTarget for Text {
    const KIND: &'static str = "text";
}
