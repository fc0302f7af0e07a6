use crate::kernel::{CrossSection, PlacementDescriptor, ProfileRotation};
use crate::params::{BufferParameters, CapParameters, GlobalFrame};

use super::{Component, ElementPlan, PlannedSolid};

/// Local X of each buffer centre, measured from the cap centre.
///
/// Buffers start at the left offset and repeat at `width + spacing`. The last
/// one is pulled back flush with the right offset if the uniform step would
/// push it past; the gaps before it are left alone.
pub fn buffer_positions(buffer: &BufferParameters, cap: &CapParameters) -> Vec<f64> {
    let n = buffer.number as usize;
    let half_top = cap.top_length / 2.0;
    let half_width = buffer.width / 2.0;
    let right_limit = half_top - buffer.right_offset;

    (0..n)
        .map(|i| {
            let x = -half_top + buffer.left_offset + half_width + i as f64 * (buffer.width + buffer.spacing);
            if i + 1 == n && x + half_width > right_limit {
                right_limit - half_width
            } else {
                x
            }
        })
        .collect()
}

/// Bearing blocks standing on the cap top along its centreline.
pub fn plan_buffers(
    global: &GlobalFrame,
    buffer: &BufferParameters,
    cap: &CapParameters,
    elevation_height: f64,
) -> ElementPlan {
    let center = global.plan_frame().offset_by(cap.p, 0.0);
    let cap_top = global.position_z + elevation_height + cap.total_height();
    let positions = buffer_positions(buffer, cap);
    let heights = buffer.heights.resolve(positions.len());

    let solids = positions
        .iter()
        .zip(heights)
        .enumerate()
        .map(|(i, (&x, height))| {
            let at = center.offset_by(x, 0.0);
            PlannedSolid::new(PlacementDescriptor {
                name: format!("Buffer_{}", i),
                start: at.origin(cap_top + height),
                end: at.origin(cap_top),
                cross_section: CrossSection::Rectangle {
                    length: buffer.width,
                    width: buffer.breadth,
                },
                rotation: ProfileRotation::Front,
                rotation_offset: -global.rotation_angle,
                material: buffer.material.clone(),
                class: buffer.class.clone(),
            })
        })
        .collect();

    ElementPlan::new(Component::Buffer, solids)
}
