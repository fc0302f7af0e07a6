//! Kernel-agnostic descriptions exchanged with a modeling backend.
//!
//! Everything here is plain data in world coordinates (millimetres); a
//! backend decides how to materialise it.

use serde::{Deserialize, Serialize};

use crate::geometry::{yaw_axis_x, yaw_axis_y, Aabb, Plane, Point3, Vector3, EPSILON};

/// Profile of a linear solid, measured in the solid's local frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum CrossSection {
    /// `length` along local X, `width` along local Y.
    Rectangle { length: f64, width: f64 },
    Circle { diameter: f64 },
}

impl CrossSection {
    /// Extents along local X and Y.
    pub fn extents(&self) -> (f64, f64) {
        match *self {
            CrossSection::Rectangle { length, width } => (length, width),
            CrossSection::Circle { diameter } => (diameter, diameter),
        }
    }
}

/// How the profile is turned about the member axis before the offset applies.
/// Every member of a pier faces front.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ProfileRotation {
    #[default]
    Front,
}

/// One linear solid between two points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacementDescriptor {
    pub name: String,
    pub start: Point3,
    pub end: Point3,
    pub cross_section: CrossSection,
    pub rotation: ProfileRotation,
    /// Degrees about the start→end axis.
    pub rotation_offset: f64,
    pub material: String,
    pub class: String,
}

impl PlacementDescriptor {
    pub fn axis(&self) -> Vector3 {
        self.end - self.start
    }

    pub fn length(&self) -> f64 {
        self.axis().norm()
    }

    pub fn points_down(&self) -> bool {
        self.axis().z < 0.0
    }

    /// World yaw of the profile's local X.
    ///
    /// A rotation offset turns the profile about the member axis, so looking
    /// down on a member that points down it reads with the opposite sign.
    pub fn plan_yaw(&self) -> f64 {
        if self.points_down() {
            -self.rotation_offset
        } else {
            self.rotation_offset
        }
    }

    /// World directions of the profile's local X and Y (vertical members).
    pub fn local_axes(&self) -> (Vector3, Vector3) {
        let yaw = self.plan_yaw();
        (yaw_axis_x(yaw), yaw_axis_y(yaw))
    }

    /// Centred local box: X/Y from the profile, Z along the member.
    /// `None` when any extent is not strictly positive.
    pub fn local_bounds(&self) -> Option<Aabb> {
        let (lx, ly) = self.cross_section.extents();
        let lz = self.length();
        if lx <= EPSILON || ly <= EPSILON || lz <= EPSILON {
            return None;
        }
        Some(Aabb::centered(lx, ly, lz))
    }

    /// Lower of the two end elevations.
    pub fn bottom_z(&self) -> f64 {
        self.start.z.min(self.end.z)
    }

    pub fn top_z(&self) -> f64 {
        self.start.z.max(self.end.z)
    }
}

/// Half-space removal. Material on the side `axis_u × axis_v` points to is removed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CutSpec {
    pub origin: Point3,
    pub axis_u: Vector3,
    pub axis_v: Vector3,
}

impl CutSpec {
    pub fn new(origin: Point3, axis_u: Vector3, axis_v: Vector3) -> Self {
        Self {
            origin,
            axis_u,
            axis_v,
        }
    }

    /// Unnormalised `axis_u × axis_v`.
    pub fn normal(&self) -> Vector3 {
        self.axis_u.cross(&self.axis_v)
    }

    pub fn plane(&self) -> Plane {
        Plane::from_axes(self.origin, &self.axis_u, &self.axis_v)
    }
}

/// A bounding face for a bar set. Bars are offset from the face by `offset`
/// along its normal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LegFace {
    pub layer_order: u32,
    pub contour: [Point3; 4],
    pub offset: f64,
}

impl LegFace {
    /// Normal of the contour by Newell's method (right-hand winding).
    pub fn normal(&self) -> Vector3 {
        let mut n = Vector3::zeros();
        for i in 0..4 {
            let a = &self.contour[i];
            let b = &self.contour[(i + 1) % 4];
            n.x += (a.y - b.y) * (a.z + b.z);
            n.y += (a.z - b.z) * (a.x + b.x);
            n.z += (a.x - b.x) * (a.y + b.y);
        }
        let len = n.norm();
        if len < EPSILON {
            n
        } else {
            n / len
        }
    }
}

/// Bars are distributed along this segment at `spacing`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Guideline {
    pub start: Point3,
    pub end: Point3,
    pub spacing: f64,
}

impl Guideline {
    pub fn length(&self) -> f64 {
        (self.end - self.start).norm()
    }

    pub fn direction(&self) -> Vector3 {
        (self.end - self.start).normalize()
    }
}

/// A set of bars in the host solid's local frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RebarSet {
    pub name: String,
    pub diameter: f64,
    pub bending_radius: f64,
    pub legs: Vec<LegFace>,
    pub guideline: Guideline,
}

impl RebarSet {
    pub fn new(name: impl Into<String>, diameter: f64, legs: Vec<LegFace>, guideline: Guideline) -> Self {
        Self {
            name: name.into(),
            diameter,
            bending_radius: 4.0 * diameter,
            legs,
            guideline,
        }
    }
}

/// Output triangle mesh from tessellation.
#[derive(Debug, Clone, Default, Serialize)]
pub struct TriangleMesh {
    pub positions: Vec<[f64; 3]>,
    pub triangles: Vec<[u32; 3]>,
    /// Per-triangle index of the face it came from.
    pub face_ids: Vec<u32>,
}

impl TriangleMesh {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_vertex(&mut self, pos: [f64; 3]) -> u32 {
        let idx = self.positions.len() as u32;
        self.positions.push(pos);
        idx
    }

    pub fn add_triangle_with_face(&mut self, i0: u32, i1: u32, i2: u32, face_id: u32) {
        self.triangles.push([i0, i1, i2]);
        self.face_ids.push(face_id);
    }

    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }
}
