use serde::{Deserialize, Serialize};

use crate::geometry::{skew_half_offset, LocalFrame};

/// Placement shared by every element of one generation pass.
///
/// `rotation_angle` yaws the whole structure about Z; `skew_angle` shears
/// every footprint whose width runs along local Y.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GlobalFrame {
    pub position_x: f64,
    pub position_y: f64,
    pub position_z: f64,
    pub rotation_angle: f64,
    pub skew_angle: f64,
}

impl GlobalFrame {
    /// Plan frame at the structure origin, without shear.
    pub fn plan_frame(&self) -> LocalFrame {
        LocalFrame::new(self.position_x, self.position_y, self.rotation_angle)
    }

    /// `a = tan(skew) * length / 2` for an element of the given length.
    pub fn skew_offset(&self, length: f64) -> f64 {
        skew_half_offset(length, self.skew_angle)
    }
}
