//! Parameter records for one pier.
//!
//! Every record deserializes with `#[serde(default)]`, so a partial JSON
//! document only overrides the fields it names.

pub mod components;
pub mod global;
pub mod heights;
pub mod reinforcement;

pub use components::*;
pub use global::GlobalFrame;
pub use heights::{BufferHeights, DEFAULT_BUFFER_HEIGHT};
pub use reinforcement::*;

use serde::{Deserialize, Serialize};

/// Full parameter set for a generation pass.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StructureParameters {
    pub global: GlobalFrame,
    pub foundation: FoundationParameters,
    pub mat: MatParameters,
    pub piles: PileParameters,
    pub elevation_type: ElevationType,
    pub lamelar: LamelarElevationParameters,
    pub circular: CircularElevationParameters,
    pub cap: CapParameters,
    pub buffer: BufferParameters,
}

impl StructureParameters {
    /// Height of whichever column shape is active.
    pub fn elevation_height(&self) -> f64 {
        match self.elevation_type {
            ElevationType::Lamelar => self.lamelar.height,
            ElevationType::Circular => self.circular.height,
        }
    }
}
