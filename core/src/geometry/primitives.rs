use super::{ApproxEq, Point3, Vector3, EPSILON};
use serde::{Deserialize, Serialize};

/// An oriented plane. The normal is stored normalized.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Plane {
    pub origin: Point3,
    pub normal: Vector3,
}

impl Plane {
    pub fn new(origin: Point3, normal: Vector3) -> Self {
        Self {
            origin,
            normal: normal.normalize(),
        }
    }

    /// Plane through `origin` spanned by two in-plane axes; normal is `u × v`.
    pub fn from_axes(origin: Point3, u: &Vector3, v: &Vector3) -> Self {
        Self::new(origin, u.cross(v))
    }

    /// Positive on the side the normal points to.
    pub fn signed_distance(&self, p: &Point3) -> f64 {
        self.normal.dot(&(p - self.origin))
    }

    pub fn project_point(&self, p: &Point3) -> Point3 {
        p - self.normal * self.signed_distance(p)
    }

    pub fn is_parallel_to(&self, other: &Plane) -> bool {
        self.normal.cross(&other.normal).norm() < EPSILON
    }
}

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Point3,
    pub max: Point3,
}

impl Aabb {
    pub fn new(min: Point3, max: Point3) -> Self {
        Self { min, max }
    }

    /// Box of the given full extents centred on the origin.
    pub fn centered(size_x: f64, size_y: f64, size_z: f64) -> Self {
        Self {
            min: Point3::new(-size_x / 2.0, -size_y / 2.0, -size_z / 2.0),
            max: Point3::new(size_x / 2.0, size_y / 2.0, size_z / 2.0),
        }
    }

    pub fn empty() -> Self {
        Self {
            min: Point3::new(f64::INFINITY, f64::INFINITY, f64::INFINITY),
            max: Point3::new(f64::NEG_INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY),
        }
    }

    pub fn extend(&mut self, p: &Point3) {
        self.min.x = self.min.x.min(p.x);
        self.min.y = self.min.y.min(p.y);
        self.min.z = self.min.z.min(p.z);

        self.max.x = self.max.x.max(p.x);
        self.max.y = self.max.y.max(p.y);
        self.max.z = self.max.z.max(p.z);
    }

    pub fn size(&self) -> Vector3 {
        self.max - self.min
    }

    /// True when any extent is non-positive (or NaN); such a box cannot host geometry.
    pub fn is_degenerate(&self) -> bool {
        let s = self.size();
        !(s.x > EPSILON && s.y > EPSILON && s.z > EPSILON)
    }

    /// Shrink both lateral (Y) sides by `amount`.
    pub fn shrink_y(&self, amount: f64) -> Aabb {
        let mut res = *self;
        res.min.y += amount;
        res.max.y -= amount;
        res
    }

    pub fn contains(&self, p: &Point3) -> bool {
        p.x >= self.min.x && p.x <= self.max.x &&
        p.y >= self.min.y && p.y <= self.max.y &&
        p.z >= self.min.z && p.z <= self.max.z
    }
}

impl ApproxEq for Aabb {
    fn approx_eq(&self, other: &Self) -> bool {
        self.min.approx_eq(&other.min) && self.max.approx_eq(&other.max)
    }
}
