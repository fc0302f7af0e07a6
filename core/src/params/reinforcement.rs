use serde::{Deserialize, Serialize};
use std::fmt;

/// Direction the bars of a layer run in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RebarDirection {
    /// Bars along the element length (local X).
    Length,
    /// Bars across the element width (local Y).
    Width,
}

impl fmt::Display for RebarDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RebarDirection::Length => write!(f, "Length"),
            RebarDirection::Width => write!(f, "Width"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RebarLayer {
    pub diameter: f64,
    pub direction: RebarDirection,
    pub spacing: f64,
}

impl RebarLayer {
    pub fn new(diameter: f64, direction: RebarDirection) -> Self {
        Self {
            diameter,
            direction,
            spacing: 200.0,
        }
    }
}

impl Default for RebarLayer {
    fn default() -> Self {
        Self::new(25.0, RebarDirection::Length)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SideReinforcement {
    pub diameter: f64,
    pub spacing: f64,
}

impl Default for SideReinforcement {
    fn default() -> Self {
        Self {
            diameter: 12.0,
            spacing: 200.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IntermediateReinforcement {
    pub diameter: f64,
    pub direction: RebarDirection,
    pub number_of_layers: u32,
    pub spacing: f64,
}

impl Default for IntermediateReinforcement {
    fn default() -> Self {
        Self {
            diameter: 16.0,
            direction: RebarDirection::Length,
            number_of_layers: 0,
            spacing: 200.0,
        }
    }
}

/// Bar layout of a pad footing.
///
/// T1/B1 are the outer top/bottom layers, T2/B2 sit just inside them.
/// Covers are measured from the concrete face to the bar surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReinforcementParameters {
    pub t1: RebarLayer,
    pub t2: RebarLayer,
    pub b1: RebarLayer,
    pub b2: RebarLayer,
    pub top_cover: f64,
    pub bottom_cover: f64,
    /// 0 disables hooks on the main layers.
    pub hook_length: f64,
    pub side: SideReinforcement,
    pub intermediate: Vec<IntermediateReinforcement>,
}

impl Default for ReinforcementParameters {
    fn default() -> Self {
        Self {
            t1: RebarLayer::new(25.0, RebarDirection::Length),
            t2: RebarLayer::new(25.0, RebarDirection::Width),
            b1: RebarLayer::new(25.0, RebarDirection::Length),
            b2: RebarLayer::new(25.0, RebarDirection::Width),
            top_cover: 50.0,
            bottom_cover: 50.0,
            hook_length: 0.0,
            side: SideReinforcement::default(),
            intermediate: Vec::new(),
        }
    }
}

impl ReinforcementParameters {
    /// Lateral cover; the bottom cover doubles as side cover.
    pub fn side_cover(&self) -> f64 {
        self.bottom_cover
    }

    pub fn b1_center_offset(&self) -> f64 {
        self.bottom_cover + self.b1.diameter / 2.0
    }

    pub fn b2_center_offset(&self) -> f64 {
        self.bottom_cover + self.b1.diameter + self.b2.diameter / 2.0
    }

    pub fn t1_center_offset(&self) -> f64 {
        self.top_cover + self.t1.diameter / 2.0
    }

    pub fn t2_center_offset(&self) -> f64 {
        self.top_cover + self.t1.diameter + self.t2.diameter / 2.0
    }

    /// Depth taken by cover and both bottom layers.
    pub fn bottom_depth(&self) -> f64 {
        self.bottom_cover + self.b1.diameter + self.b2.diameter
    }

    /// Depth taken by cover and both top layers.
    pub fn top_depth(&self) -> f64 {
        self.top_cover + self.t1.diameter + self.t2.diameter
    }

    /// Side bars that fit between the inner layers, keeping 50 mm clear at each end.
    pub fn side_bar_count(&self, height: f64) -> usize {
        let free_space = height - self.top_depth() - self.bottom_depth() - 100.0;
        if free_space <= 0.0 || self.side.spacing <= 0.0 {
            return 0;
        }
        let count = (free_space / self.side.spacing).floor() - 1.0;
        count.max(0.0) as usize
    }
}
