use crate::geometry::centered_offset;
use crate::kernel::{CrossSection, PlacementDescriptor, ProfileRotation};
use crate::params::{FoundationParameters, GlobalFrame, PileParameters};

use super::{Component, ElementPlan, PlannedSolid};

/// `rows × columns` cylinders under the foundation.
///
/// Rows spread along local X and columns along local Y. Each position is
/// sheared with the foundation's skew before rotation, so the grid follows
/// the skewed footprint it sits under.
pub fn plan_piles(global: &GlobalFrame, piles: &PileParameters, foundation: &FoundationParameters) -> ElementPlan {
    let frame = global
        .plan_frame()
        .with_skew(global.skew_angle, foundation.length);
    let underside = global.position_z - foundation.height;
    let top = underside + piles.embedded_length;
    let bottom = underside - piles.length;

    let rows = piles.rows as usize;
    let columns = piles.columns as usize;
    let mut solids = Vec::with_capacity(rows * columns);

    for i in 0..columns {
        let poz_y = centered_offset(i, columns, piles.column_distance);
        for j in 0..rows {
            let poz_x = centered_offset(j, rows, piles.row_distance);
            solids.push(PlannedSolid::new(PlacementDescriptor {
                name: format!("Pile_{}_{}", i, j),
                start: frame.to_world(poz_x, poz_y, top),
                end: frame.to_world(poz_x, poz_y, bottom),
                cross_section: CrossSection::Circle {
                    diameter: piles.diameter,
                },
                rotation: ProfileRotation::Front,
                rotation_offset: -global.rotation_angle,
                material: piles.material.clone(),
                class: piles.class.clone(),
            }));
        }
    }

    ElementPlan::new(Component::Piles, solids)
}
