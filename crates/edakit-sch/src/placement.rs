use crate::SchematicError;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Angle units per full turn (1/65536 of a turn each).
pub const ANGLE_FULL_TURN: u32 = 65536;

/// 2D placement of an entity: integer-nanometre shift, angle, mirror flag.
///
/// The angle lives in 1/65536-turn units so wrapping arithmetic keeps it
/// normalized for free.  Serializes to the structured sub-document
/// `{"shift": [x, y], "angle": n, "mirror": b}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Placement {
    pub shift: (i64, i64),
    #[serde(default)]
    angle: u16,
    #[serde(default)]
    pub mirror: bool,
}

impl Placement {
    pub fn new(shift: (i64, i64)) -> Self {
        Self {
            shift,
            angle: 0,
            mirror: false,
        }
    }

    pub fn angle(&self) -> u16 {
        self.angle
    }

    /// Set the angle; values beyond a full turn wrap.
    pub fn set_angle(&mut self, angle: u32) {
        self.angle = (angle % ANGLE_FULL_TURN) as u16;
    }

    pub fn set_angle_deg(&mut self, deg: u32) {
        self.set_angle((deg % 360) * ANGLE_FULL_TURN / 360);
    }

    pub fn get_angle_deg(&self) -> u32 {
        self.angle as u32 * 360 / ANGLE_FULL_TURN
    }

    /// Rotate by `deg` degrees on top of the current angle.
    pub fn inc_angle_deg(&mut self, deg: u32) {
        self.set_angle(self.angle as u32 + (deg % 360) * ANGLE_FULL_TURN / 360);
    }

    pub fn from_json(j: &Value) -> Result<Self, SchematicError> {
        serde_json::from_value(j.clone()).map_err(|e| SchematicError::InvalidField {
            field: "placement",
            reason: e.to_string(),
        })
    }

    pub fn serialize(&self) -> Value {
        json!({
            "shift": [self.shift.0, self.shift.1],
            "angle": self.angle,
            "mirror": self.mirror,
        })
    }
}
