use crate::cuts::skew_cut_pair;
use crate::kernel::{CrossSection, PlacementDescriptor, ProfileRotation};
use crate::params::{FoundationParameters, GlobalFrame, MatParameters};

use super::{Component, ElementPlan, PlannedSolid};

/// Blinding mat directly under the foundation, oversized by the cantilever
/// on every side. The skew widening is taken over the enlarged length.
pub fn plan_mat(global: &GlobalFrame, mat: &MatParameters, foundation: &FoundationParameters) -> ElementPlan {
    let length = foundation.length + 2.0 * mat.cantilever;
    let width = foundation.width + 2.0 * mat.cantilever;
    let a = global.skew_offset(length).abs();
    let frame = global.plan_frame();
    let top = global.position_z - foundation.height;

    let descriptor = PlacementDescriptor {
        name: "Mat".into(),
        start: frame.origin(top),
        end: frame.origin(top - mat.thickness),
        cross_section: CrossSection::Rectangle {
            length,
            width: width + 2.0 * a,
        },
        rotation: ProfileRotation::Front,
        rotation_offset: -global.rotation_angle,
        material: mat.material.clone(),
        class: mat.class.clone(),
    };

    let solid = PlannedSolid::new(descriptor).with_cuts(skew_cut_pair(&frame, width / 2.0, top, global.skew_angle));
    ElementPlan::new(Component::Mat, vec![solid])
}
