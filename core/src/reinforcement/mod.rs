//! Bar layout for a host solid, computed from its local bounding box.
//!
//! The box is in the host's own frame: X along the length, Y across the
//! width, Z up. Leg faces are wound so their normal points into the concrete;
//! bars sit `offset` away from a face along that normal.

use tracing::debug;

use crate::geometry::{Aabb, Point3, Vector3};
use crate::kernel::{Guideline, LegFace, RebarSet};
use crate::params::{RebarDirection, RebarLayer, ReinforcementParameters};


/// Clear distance kept between the side bars and the inner main layers.
pub const SIDE_BAR_INSET: f64 = 50.0;

/// Corners `o, o+e1, o+e1+e2, o+e2`; the face normal is `e1 × e2`.
fn quad(origin: Point3, e1: Vector3, e2: Vector3) -> [Point3; 4] {
    [origin, origin + e1, origin + e1 + e2, origin + e2]
}

/// Plan rectangle of `bounds` shrunk by `inset` on every side.
#[derive(Debug, Clone, Copy)]
struct Rect {
    min_x: f64,
    max_x: f64,
    min_y: f64,
    max_y: f64,
}

impl Rect {
    fn inset(bounds: &Aabb, inset: f64) -> Option<Rect> {
        let rect = Rect {
            min_x: bounds.min.x + inset,
            max_x: bounds.max.x - inset,
            min_y: bounds.min.y + inset,
            max_y: bounds.max.y - inset,
        };
        if rect.max_x > rect.min_x && rect.max_y > rect.min_y {
            Some(rect)
        } else {
            None
        }
    }

    fn size_x(&self) -> f64 {
        self.max_x - self.min_x
    }

    fn size_y(&self) -> f64 {
        self.max_y - self.min_y
    }

    fn corner(&self, z: f64) -> Point3 {
        Point3::new(self.min_x, self.min_y, z)
    }

    /// Guideline across the bars: Length bars are spread over Y, Width bars over X.
    fn guideline(&self, direction: RebarDirection, z: f64, spacing: f64) -> Guideline {
        let start = self.corner(z);
        let end = match direction {
            RebarDirection::Length => Point3::new(self.min_x, self.max_y, z),
            RebarDirection::Width => Point3::new(self.max_x, self.min_y, z),
        };
        Guideline {
            start,
            end,
            spacing,
        }
    }
}

/// Which face of the host a main layer hangs from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Face {
    Top,
    Bottom,
}

/// Full bar layout: B1, B2, T1, T2, side stirrups, then intermediate layers.
///
/// A missing or degenerate box yields no sets.
pub fn layout_reinforcement(
    bounds: Option<&Aabb>,
    params: &ReinforcementParameters,
    prefix: &str,
) -> Vec<RebarSet> {
    let bounds = match bounds {
        Some(b) if !b.is_degenerate() => b,
        _ => {
            debug!(prefix, "No usable bounding box; reinforcement skipped");
            return Vec::new();
        }
    };

    let side_cover = params.side_cover();
    let hook = params.hook_length;

    let mains = [
        (&params.b1, params.b1_center_offset(), Face::Bottom, "B1", side_cover),
        (&params.b2, params.b2_center_offset(), Face::Bottom, "B2", side_cover + params.b1.diameter),
        (&params.t1, params.t1_center_offset(), Face::Top, "T1", side_cover),
        (&params.t2, params.t2_center_offset(), Face::Top, "T2", side_cover + params.t1.diameter),
    ];

    let mut sets: Vec<RebarSet> = mains
        .into_iter()
        .filter_map(|(layer, offset, face, name, inset)| {
            main_layer(bounds, layer, offset, face, &format!("{} {}", prefix, name), hook, inset)
        })
        .collect();

    sets.extend(side_reinforcement(bounds, params, prefix));
    sets.extend(intermediate_layers(bounds, params, prefix));
    sets
}

fn main_layer(
    bounds: &Aabb,
    layer: &RebarLayer,
    center_offset: f64,
    face: Face,
    name: &str,
    hook_length: f64,
    inset: f64,
) -> Option<RebarSet> {
    let rect = Rect::inset(bounds, inset)?;
    let z = match face {
        Face::Top => bounds.max.z,
        Face::Bottom => bounds.min.z,
    };

    let main_contour = match face {
        Face::Top => quad(
            rect.corner(z),
            Vector3::new(0.0, rect.size_y(), 0.0),
            Vector3::new(rect.size_x(), 0.0, 0.0),
        ),
        Face::Bottom => quad(
            rect.corner(z),
            Vector3::new(rect.size_x(), 0.0, 0.0),
            Vector3::new(0.0, rect.size_y(), 0.0),
        ),
    };

    let mut legs = Vec::with_capacity(3);
    let mut order = 1;
    let has_hooks = hook_length > 0.0;

    if has_hooks {
        legs.push(hook_face(order, &rect, bounds, face, layer.direction, hook_length, true));
        order += 1;
    }
    legs.push(LegFace {
        layer_order: order,
        contour: main_contour,
        offset: center_offset,
    });
    order += 1;
    if has_hooks {
        legs.push(hook_face(order, &rect, bounds, face, layer.direction, hook_length, false));
    }

    Some(RebarSet::new(
        name,
        layer.diameter,
        legs,
        rect.guideline(layer.direction, z, layer.spacing),
    ))
}

/// End face a hook bends along, `hook_length` tall from the layer's face.
///
/// Length bars end at the X ends of the rectangle, Width bars at the Y ends.
/// The side cover is already in the inset, so the offset is zero.
fn hook_face(
    order: u32,
    rect: &Rect,
    bounds: &Aabb,
    face: Face,
    direction: RebarDirection,
    hook_length: f64,
    at_start: bool,
) -> LegFace {
    let z_low = match face {
        Face::Top => bounds.max.z - hook_length,
        Face::Bottom => bounds.min.z,
    };
    let rise = Vector3::new(0.0, 0.0, hook_length);
    let across_x = Vector3::new(rect.size_x(), 0.0, 0.0);
    let across_y = Vector3::new(0.0, rect.size_y(), 0.0);

    let contour = match (direction, at_start) {
        // x = min, normal +X
        (RebarDirection::Length, true) => quad(rect.corner(z_low), across_y, rise),
        // x = max, normal -X
        (RebarDirection::Length, false) => {
            quad(Point3::new(rect.max_x, rect.min_y, z_low), rise, across_y)
        }
        // y = min, normal +Y
        (RebarDirection::Width, true) => quad(rect.corner(z_low), rise, across_x),
        // y = max, normal -Y
        (RebarDirection::Width, false) => {
            quad(Point3::new(rect.min_x, rect.max_y, z_low), across_x, rise)
        }
    };

    LegFace {
        layer_order: order,
        contour,
        offset: 0.0,
    }
}

/// Closed stirrups around the perimeter between the inner main layers.
fn side_reinforcement(bounds: &Aabb, params: &ReinforcementParameters, prefix: &str) -> Option<RebarSet> {
    let size = bounds.size();
    let count = params.side_bar_count(size.z);
    if count == 0 {
        return None;
    }

    let guide_start = bounds.min.z + params.bottom_depth() + SIDE_BAR_INSET;
    let guide_end = bounds.max.z - params.top_depth() - SIDE_BAR_INSET;
    if guide_start >= guide_end {
        return None;
    }

    let (min, max) = (bounds.min, bounds.max);
    let dx = Vector3::new(size.x, 0.0, 0.0);
    let dy = Vector3::new(0.0, size.y, 0.0);
    let dz = Vector3::new(0.0, 0.0, size.z);
    let cover = params.side_cover();

    let contours = [
        quad(min, dy, dz),                               // x = min, +X
        quad(Point3::new(min.x, max.y, min.z), dx, dz),  // y = max, -Y
        quad(Point3::new(max.x, min.y, min.z), dz, dy),  // x = max, -X
        quad(min, dz, dx),                               // y = min, +Y
    ];
    let legs = contours
        .into_iter()
        .zip(1..)
        .map(|(contour, layer_order)| LegFace {
            layer_order,
            contour,
            offset: cover,
        })
        .collect();

    debug!(prefix, count, "Side reinforcement");
    Some(RebarSet::new(
        format!("{} Side Reinforcement", prefix),
        params.side.diameter,
        legs,
        Guideline {
            start: Point3::new(min.x, min.y, guide_start),
            end: Point3::new(min.x, min.y, guide_end),
            spacing: params.side.spacing,
        },
    ))
}

/// Extra horizontal meshes between the bottom and top groups.
///
/// Width-direction layers come first (nearest the bottom), then Length.
fn intermediate_layers(bounds: &Aabb, params: &ReinforcementParameters, prefix: &str) -> Vec<RebarSet> {
    let bottom_level = bounds.min.z + params.bottom_depth();
    let top_level = bounds.max.z - params.top_depth();
    let free_space = top_level - bottom_level;
    if free_space <= 0.0 {
        return Vec::new();
    }

    let mut ordered: Vec<(f64, RebarDirection, f64)> = Vec::new();
    for dir in [RebarDirection::Width, RebarDirection::Length] {
        for il in params.intermediate.iter().filter(|il| il.direction == dir) {
            for _ in 0..il.number_of_layers {
                ordered.push((il.diameter, il.direction, il.spacing));
            }
        }
    }
    if ordered.is_empty() {
        return Vec::new();
    }

    let inset = params.side_cover() + params.b1.diameter.max(params.t1.diameter);
    let rect = match Rect::inset(bounds, inset) {
        Some(r) => r,
        None => return Vec::new(),
    };
    let layer_spacing = free_space / (ordered.len() as f64 + 1.0);

    ordered
        .iter()
        .enumerate()
        .map(|(k, &(diameter, direction, spacing))| {
            let z = bottom_level + layer_spacing * (k as f64 + 1.0);
            let face = LegFace {
                layer_order: 1,
                contour: quad(
                    rect.corner(z),
                    Vector3::new(rect.size_x(), 0.0, 0.0),
                    Vector3::new(0.0, rect.size_y(), 0.0),
                ),
                offset: 0.0,
            };
            RebarSet::new(
                format!("{} Int {}-{}", prefix, direction, k + 1),
                diameter,
                vec![face],
                rect.guideline(direction, z, spacing),
            )
        })
        .collect()
}
