use crate::geometry::centered_offset;
use crate::kernel::{CrossSection, PlacementDescriptor, ProfileRotation};
use crate::params::{CircularElevationParameters, ElevationType, GlobalFrame, LamelarElevationParameters};

use super::{Component, ElementPlan, PlannedSolid};

/// Columns for whichever shape is selected.
pub fn plan_elevation(
    global: &GlobalFrame,
    elevation_type: ElevationType,
    lamelar: &LamelarElevationParameters,
    circular: &CircularElevationParameters,
) -> ElementPlan {
    match elevation_type {
        ElevationType::Lamelar => plan_lamelar_elevation(global, lamelar),
        ElevationType::Circular => plan_circular_elevation(global, circular),
    }
}

/// Rectangular columns, `width` along the array, `thickness` across it.
pub fn plan_lamelar_elevation(global: &GlobalFrame, lamelar: &LamelarElevationParameters) -> ElementPlan {
    let column_array = ColumnArray {
        count: lamelar.number_of_columns,
        spacing: lamelar.distance_between_columns,
        offset_x: lamelar.offset_x,
        offset_y: lamelar.offset_y,
        height: lamelar.height,
    };
    column_array.plan(
        global,
        CrossSection::Rectangle {
            length: lamelar.width,
            width: lamelar.thickness,
        },
        &lamelar.material,
        &lamelar.class,
    )
}

pub fn plan_circular_elevation(global: &GlobalFrame, circular: &CircularElevationParameters) -> ElementPlan {
    let column_array = ColumnArray {
        count: circular.number_of_columns,
        spacing: circular.distance_between_columns,
        offset_x: circular.offset_x,
        offset_y: circular.offset_y,
        height: circular.height,
    };
    column_array.plan(
        global,
        CrossSection::Circle {
            diameter: circular.diameter,
        },
        &circular.material,
        &circular.class,
    )
}

/// `count` columns centred on `offset_x` along local X, standing on `Z`.
struct ColumnArray {
    count: u32,
    spacing: f64,
    offset_x: f64,
    offset_y: f64,
    height: f64,
}

impl ColumnArray {
    fn plan(&self, global: &GlobalFrame, cross_section: CrossSection, material: &str, class: &str) -> ElementPlan {
        let frame = global.plan_frame();
        let base = global.position_z;
        let n = self.count as usize;

        let solids = (0..n)
            .map(|i| {
                let at = frame.offset_by(self.offset_x + centered_offset(i, n, self.spacing), self.offset_y);
                PlannedSolid::new(PlacementDescriptor {
                    name: format!("Elevation_{}", i),
                    start: at.origin(base),
                    end: at.origin(base + self.height),
                    cross_section,
                    rotation: ProfileRotation::Front,
                    // Points up, so the offset reads with the frame's sign.
                    rotation_offset: global.rotation_angle,
                    material: material.to_string(),
                    class: class.to_string(),
                })
            })
            .collect();

        ElementPlan::new(Component::Elevation, solids)
    }
}
