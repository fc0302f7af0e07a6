use crate::cuts::skew_cut_pair;
use crate::kernel::{CrossSection, PlacementDescriptor, ProfileRotation};
use crate::params::{FoundationParameters, GlobalFrame};

use super::{Component, ElementPlan, PlannedSolid, RebarRequest};

/// Foundation pad: `(width + 2a) × length`, from `Z` down by `height`,
/// trimmed back to the skewed footprint by two skew cuts.
pub fn plan_foundation(global: &GlobalFrame, foundation: &FoundationParameters) -> ElementPlan {
    let a = global.skew_offset(foundation.length).abs();
    let frame = global.plan_frame();
    let top = global.position_z;

    let descriptor = PlacementDescriptor {
        name: "Foundation".into(),
        start: frame.origin(top),
        end: frame.origin(top - foundation.height),
        cross_section: CrossSection::Rectangle {
            length: foundation.length,
            width: foundation.width + 2.0 * a,
        },
        rotation: ProfileRotation::Front,
        rotation_offset: -global.rotation_angle,
        material: foundation.material.clone(),
        class: foundation.class.clone(),
    };

    let mut solid = PlannedSolid::new(descriptor).with_cuts(skew_cut_pair(
        &frame,
        foundation.width / 2.0,
        top,
        global.skew_angle,
    ));
    solid.rebar = foundation.reinforcement.clone().map(|params| RebarRequest {
        params,
        lateral_trim: a,
        prefix: "Foundation".into(),
    });

    ElementPlan::new(Component::Foundation, vec![solid])
}
