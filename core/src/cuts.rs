//! Half-space cuts that turn rectangular prisms into skewed or tapered solids.
//!
//! Every builder works from a [`LocalFrame`] centred on the solid in plan, so
//! the same formulas serve any rotation. Cuts come in opposing pairs; both
//! normals point away from the solid.

use crate::geometry::{LocalFrame, Point3, Vector3, EPSILON};
use crate::kernel::{CrossSection, CutSpec, PlacementDescriptor, ProfileRotation};
use crate::params::CutSide;

/// Offset along the width direction used to span taper planes.
pub const TAPER_CONSTRUCTION_OFFSET: f64 = 500.0;

/// Extra length given to the notch subtractor so it clears both cap ends.
pub const NOTCH_MARGIN: f64 = 200.0;

/// Negative side first, positive side second.
pub type CutPair = [CutSpec; 2];

/// Plan-view skew pair at `±half_width` from the centre.
///
/// The cut lines run at `skew + yaw` from world X, so a prism widened by
/// `2a` is trimmed back to a parallelogram of the nominal width.
pub fn skew_cut_pair(center: &LocalFrame, half_width: f64, z: f64, skew_deg: f64) -> CutPair {
    let angle = (skew_deg + center.yaw_deg).to_radians();
    let along = Vector3::new(angle.cos(), angle.sin(), 0.0);
    let up = Vector3::z();

    let negative = center.offset_by(0.0, -half_width).origin(z);
    let positive = center.offset_by(0.0, half_width).origin(z);

    [
        CutSpec::new(negative, along, up),
        CutSpec::new(positive, -along, up),
    ]
}

/// Longitudinal taper pair for a solid narrowing downwards.
///
/// For each side, A sits at `±top_half` on `reference_z`, B at
/// `±bottom_half` and `height` below A, and C at A plus the construction
/// offset across the width. The plane through A spans AB and AC; AC is
/// flipped when needed so the normal points away from the centre.
///
/// With `height` at zero, B drops straight below A and the pair becomes two
/// vertical planes at `±top_half`.
pub fn taper_cut_pair(
    center: &LocalFrame,
    reference_z: f64,
    top_half: f64,
    bottom_half: f64,
    height: f64,
) -> CutPair {
    let build = |side: f64| -> CutSpec {
        let a = center.offset_by(side * top_half, 0.0).origin(reference_z);
        let b = if height.abs() < EPSILON {
            a - Vector3::z()
        } else {
            center.offset_by(side * bottom_half, 0.0).origin(reference_z - height)
        };
        let c = a + center.direction_to_world(&Vector3::new(0.0, TAPER_CONSTRUCTION_OFFSET, 0.0));

        let ab = b - a;
        let mut ac = c - a;
        let radial = Vector3::new(a.x - center.origin_x, a.y - center.origin_y, 0.0);
        if ab.cross(&ac).dot(&radial) < 0.0 {
            ac = -ac;
        }
        CutSpec::new(a, ab, ac)
    };

    [build(-1.0), build(1.0)]
}

/// Geometry of a lateral notch subtractor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NotchSpec {
    /// Size across the width (local Y).
    pub cut_x: f64,
    /// Depth below the top.
    pub cut_y: f64,
    pub side: CutSide,
    /// Nominal width of the host.
    pub host_width: f64,
    /// Longest length of the host along local X.
    pub host_length: f64,
    pub top_z: f64,
}

/// Helper solid to subtract for an L-shaped notch along one lateral edge.
///
/// The caller owns the returned solid once created and must delete it after
/// the subtraction, whether or not the subtraction succeeds.
pub fn notch_tool(center: &LocalFrame, notch: &NotchSpec, material: &str, class: &str) -> PlacementDescriptor {
    let lateral = notch.side.sign() * (notch.host_width / 2.0 - notch.cut_x / 2.0);
    let plan = center.offset_by(0.0, lateral);

    PlacementDescriptor {
        name: "Cap notch".into(),
        start: plan.origin(notch.top_z),
        end: plan.origin(notch.top_z - notch.cut_y),
        cross_section: CrossSection::Rectangle {
            length: notch.host_length + NOTCH_MARGIN,
            width: notch.cut_x,
        },
        rotation: ProfileRotation::Front,
        rotation_offset: -center.yaw_deg,
        material: material.into(),
        class: class.into(),
    }
}

/// Signed distance of `p` from the plane of `cut`, positive on the removed side.
pub fn removed_side_distance(cut: &CutSpec, p: &Point3) -> f64 {
    cut.plane().signed_distance(p)
}
