use crate::cuts::{notch_tool, skew_cut_pair, taper_cut_pair, NotchSpec};
use crate::kernel::{CrossSection, PlacementDescriptor, ProfileRotation};
use crate::params::{CapParameters, GlobalFrame};

use super::{Component, ElementPlan, PlannedSolid};

/// Cap beam on top of the columns.
///
/// The prism is `max(top, bottom)` long and skew-widened over that length,
/// centred `p` along local X. Cuts follow in order: the skew pair, the taper
/// pair over the lower `height_diff` (referenced `depth` below the top), and
/// the optional notch as a subtracted helper.
pub fn plan_cap(global: &GlobalFrame, cap: &CapParameters, elevation_height: f64) -> ElementPlan {
    let length = cap.max_length();
    let a = global.skew_offset(length).abs();
    let center = global.plan_frame().offset_by(cap.p, 0.0);
    let bottom = global.position_z + elevation_height;
    let top = bottom + cap.total_height();

    let descriptor = PlacementDescriptor {
        name: "Cap".into(),
        start: center.origin(top),
        end: center.origin(bottom),
        cross_section: CrossSection::Rectangle {
            length,
            width: cap.width + 2.0 * a,
        },
        rotation: ProfileRotation::Front,
        rotation_offset: -global.rotation_angle,
        material: cap.material.clone(),
        class: cap.class.clone(),
    };

    let mut solid = PlannedSolid::new(descriptor)
        .with_cuts(skew_cut_pair(&center, cap.width / 2.0, top, global.skew_angle))
        .with_cuts(taper_cut_pair(
            &center,
            top - cap.depth,
            cap.top_length / 2.0,
            cap.bottom_length / 2.0,
            cap.height_diff,
        ));

    if cap.has_notch() {
        let notch = NotchSpec {
            cut_x: cap.cut_x,
            cut_y: cap.cut_y,
            side: cap.cut_side,
            host_width: cap.width,
            host_length: length,
            top_z: top,
        };
        solid.notch = Some(notch_tool(&center, &notch, &cap.material, &cap.class));
    }

    ElementPlan::new(Component::Cap, vec![solid])
}
