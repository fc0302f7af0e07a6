use serde::{Deserialize, Serialize};

use super::heights::BufferHeights;
use super::reinforcement::ReinforcementParameters;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FoundationParameters {
    /// Lateral size (local Y).
    pub width: f64,
    /// Longitudinal size (local X).
    pub length: f64,
    pub height: f64,
    pub material: String,
    pub class: String,
    /// Bar layout laid into the pad once it is cut.
    pub reinforcement: Option<ReinforcementParameters>,
}

impl Default for FoundationParameters {
    fn default() -> Self {
        Self {
            width: 2000.0,
            length: 4000.0,
            height: 600.0,
            material: "C50/60".into(),
            class: "8".into(),
            reinforcement: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatParameters {
    /// Overhang beyond the foundation on every side.
    pub cantilever: f64,
    pub thickness: f64,
    pub material: String,
    pub class: String,
}

impl Default for MatParameters {
    fn default() -> Self {
        Self {
            cantilever: 300.0,
            thickness: 200.0,
            material: "C12/15".into(),
            class: "1".into(),
        }
    }
}

/// Pile grid below the foundation. Rows spread along local X, columns along local Y.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PileParameters {
    pub rows: u32,
    pub columns: u32,
    pub row_distance: f64,
    pub column_distance: f64,
    pub length: f64,
    pub diameter: f64,
    /// Part of the pile cast into the foundation.
    pub embedded_length: f64,
    pub material: String,
    pub class: String,
}

impl PileParameters {
    /// Grid extent along local X including one pile diameter.
    pub fn row_extent(&self) -> f64 {
        (self.rows as f64 - 1.0) * self.row_distance + self.diameter
    }

    /// Grid extent along local Y including one pile diameter.
    pub fn column_extent(&self) -> f64 {
        (self.columns as f64 - 1.0) * self.column_distance + self.diameter
    }
}

impl Default for PileParameters {
    fn default() -> Self {
        Self {
            rows: 3,
            columns: 3,
            row_distance: 2000.0,
            column_distance: 2000.0,
            length: 12000.0,
            diameter: 600.0,
            embedded_length: 2000.0,
            material: "C50/60".into(),
            class: "8".into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ElevationType {
    #[default]
    Lamelar,
    Circular,
}

/// Rectangular wall-like columns. `width` runs along the column array (local X).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LamelarElevationParameters {
    pub width: f64,
    pub thickness: f64,
    pub height: f64,
    pub number_of_columns: u32,
    pub distance_between_columns: f64,
    pub offset_x: f64,
    pub offset_y: f64,
    pub material: String,
    pub class: String,
}

impl Default for LamelarElevationParameters {
    fn default() -> Self {
        Self {
            width: 400.0,
            thickness: 300.0,
            height: 8000.0,
            number_of_columns: 1,
            distance_between_columns: 1000.0,
            offset_x: 0.0,
            offset_y: 0.0,
            material: "C50/60".into(),
            class: "8".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CircularElevationParameters {
    pub diameter: f64,
    pub height: f64,
    pub number_of_columns: u32,
    pub distance_between_columns: f64,
    pub offset_x: f64,
    pub offset_y: f64,
    pub material: String,
    pub class: String,
}

impl Default for CircularElevationParameters {
    fn default() -> Self {
        Self {
            diameter: 600.0,
            height: 8000.0,
            number_of_columns: 4,
            distance_between_columns: 1500.0,
            offset_x: 0.0,
            offset_y: 0.0,
            material: "C50/60".into(),
            class: "8".into(),
        }
    }
}

/// Which lateral side of the cap the L-notch is taken from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CutSide {
    /// +Y in the cap's local frame.
    #[default]
    Right,
    /// -Y in the cap's local frame.
    Left,
}

impl CutSide {
    pub fn sign(&self) -> f64 {
        match self {
            CutSide::Right => 1.0,
            CutSide::Left => -1.0,
        }
    }
}

/// Tapered cap beam on top of the columns.
///
/// The upper `depth` is rectangular; the lower `height_diff` narrows from
/// `top_length` to `bottom_length`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CapParameters {
    pub top_length: f64,
    pub bottom_length: f64,
    pub width: f64,
    pub depth: f64,
    pub height_diff: f64,
    /// Signed offset of the cap centre from the column centre along local X.
    pub p: f64,
    /// Notch size across the width; 0 disables the notch.
    pub cut_x: f64,
    /// Notch depth below the cap top; 0 disables the notch.
    pub cut_y: f64,
    pub cut_side: CutSide,
    pub material: String,
    pub class: String,
}

impl CapParameters {
    pub fn total_height(&self) -> f64 {
        self.depth + self.height_diff
    }

    pub fn max_length(&self) -> f64 {
        self.top_length.max(self.bottom_length)
    }

    pub fn has_notch(&self) -> bool {
        self.cut_x > 0.0 && self.cut_y > 0.0
    }
}

impl Default for CapParameters {
    fn default() -> Self {
        Self {
            top_length: 4000.0,
            bottom_length: 2000.0,
            width: 600.0,
            depth: 500.0,
            height_diff: 300.0,
            p: 0.0,
            cut_x: 0.0,
            cut_y: 0.0,
            cut_side: CutSide::Right,
            material: "C12/15".into(),
            class: "8".into(),
        }
    }
}

/// Bearing blocks on the cap top. `width` runs along the cap length, `breadth` across it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BufferParameters {
    pub number: u32,
    pub spacing: f64,
    pub left_offset: f64,
    pub right_offset: f64,
    pub width: f64,
    pub breadth: f64,
    pub heights: BufferHeights,
    pub material: String,
    pub class: String,
}

impl BufferParameters {
    /// Span needed with the configured spacing between buffers.
    pub fn required_span(&self) -> f64 {
        let n = self.number as f64;
        self.left_offset + n * self.width + (n - 1.0) * self.spacing + self.right_offset
    }

    /// Span needed with the buffers packed edge to edge.
    pub fn packed_span(&self) -> f64 {
        self.left_offset + self.number as f64 * self.width + self.right_offset
    }
}

impl Default for BufferParameters {
    fn default() -> Self {
        Self {
            number: 3,
            spacing: 500.0,
            left_offset: 200.0,
            right_offset: 200.0,
            width: 400.0,
            breadth: 300.0,
            heights: BufferHeights::default(),
            material: "C12/15".into(),
            class: "8".into(),
        }
    }
}
