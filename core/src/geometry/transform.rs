//! Plan-view transforms shared by every element generator.
//!
//! World placement of a local point always happens in this order:
//! local layout → skew shear → rotation about Z → translation.
//! Swapping shear and rotation changes which axis the skew acts on.

use super::{Point3, Vector3, EPSILON};

// =============================================================================
// Scalar helpers
// =============================================================================

/// Rotate a plan point about the origin by `angle_deg` (counter-clockwise).
pub fn rotate(x: f64, y: f64, angle_deg: f64) -> (f64, f64) {
    let (sin, cos) = angle_deg.to_radians().sin_cos();
    (x * cos - y * sin, x * sin + y * cos)
}

/// Half of the extra width a skewed element of longitudinal extent `length`
/// needs: `a = tan(skew) * length / 2`.
pub fn skew_half_offset(length: f64, skew_deg: f64) -> f64 {
    skew_deg.to_radians().tan() * length / 2.0
}

/// Lateral shear at `longitudinal` along an element of `total_length`.
///
/// A linear ramp from `-a` at `-total_length/2` to `+a` at `+total_length/2`,
/// i.e. `2a * longitudinal / total_length`.
pub fn skew_lateral_offset(longitudinal: f64, total_length: f64, skew_deg: f64) -> f64 {
    if total_length.abs() < EPSILON {
        return 0.0;
    }
    let a = skew_half_offset(total_length, skew_deg);
    2.0 * a * longitudinal / total_length
}

/// Offset of element `index` in a centred array of `count` elements.
pub fn centered_offset(index: usize, count: usize, spacing: f64) -> f64 {
    spacing * index as f64 - (count as f64 - 1.0) * spacing / 2.0
}

pub fn centered_positions(count: usize, spacing: f64) -> Vec<f64> {
    (0..count).map(|i| centered_offset(i, count, spacing)).collect()
}

/// Unit vector of the local X axis after a yaw of `angle_deg`.
pub fn yaw_axis_x(angle_deg: f64) -> Vector3 {
    let (x, y) = rotate(1.0, 0.0, angle_deg);
    Vector3::new(x, y, 0.0)
}

/// Unit vector of the local Y axis after a yaw of `angle_deg`.
pub fn yaw_axis_y(angle_deg: f64) -> Vector3 {
    let (x, y) = rotate(0.0, 1.0, angle_deg);
    Vector3::new(x, y, 0.0)
}

// =============================================================================
// Local plan frame
// =============================================================================

/// A plan-view frame: origin, yaw and an optional skew shear.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocalFrame {
    pub origin_x: f64,
    pub origin_y: f64,
    pub yaw_deg: f64,
    pub skew_deg: f64,
    /// Longitudinal extent the shear ramps over. `None` disables the shear.
    pub skew_length: Option<f64>,
}

impl LocalFrame {
    pub fn new(origin_x: f64, origin_y: f64, yaw_deg: f64) -> Self {
        Self {
            origin_x,
            origin_y,
            yaw_deg,
            skew_deg: 0.0,
            skew_length: None,
        }
    }

    pub fn with_skew(mut self, skew_deg: f64, length: f64) -> Self {
        self.skew_deg = skew_deg;
        self.skew_length = Some(length);
        self
    }

    /// Frame moved by a local offset (rotated into world before translating).
    pub fn offset_by(&self, local_x: f64, local_y: f64) -> Self {
        let (dx, dy) = rotate(local_x, local_y, self.yaw_deg);
        Self {
            origin_x: self.origin_x + dx,
            origin_y: self.origin_y + dy,
            ..*self
        }
    }

    /// Lateral shear applied to a point at `local_x`.
    pub fn shear(&self, local_x: f64) -> f64 {
        match self.skew_length {
            Some(length) => skew_lateral_offset(local_x, length, self.skew_deg),
            None => 0.0,
        }
    }

    /// Map a local plan point to world, keeping `z` as given.
    pub fn to_world(&self, local_x: f64, local_y: f64, z: f64) -> Point3 {
        let sheared_y = local_y + self.shear(local_x);
        let (rx, ry) = rotate(local_x, sheared_y, self.yaw_deg);
        Point3::new(self.origin_x + rx, self.origin_y + ry, z)
    }

    /// Rotate a local direction into world. Directions are not sheared.
    pub fn direction_to_world(&self, local: &Vector3) -> Vector3 {
        let (x, y) = rotate(local.x, local.y, self.yaw_deg);
        Vector3::new(x, y, local.z)
    }

    pub fn origin(&self, z: f64) -> Point3 {
        Point3::new(self.origin_x, self.origin_y, z)
    }
}
