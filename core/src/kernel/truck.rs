//! Truck-based implementation of the modeling backend.
//!
//! Linear solids are built by sweeping, cuts become subtraction of a large
//! oriented block lying on the positive side of the cut plane. Vertical cuts
//! on a straight prism clip its plan outline instead, since skew cut planes
//! pass exactly through the corners of the widened prism and the boolean
//! kernel does not accept a plane through a vertex.

use super::types::*;
use super::{KernelOpError, KernelResult, ModelingBackend};
use crate::geometry::{Aabb, Plane, Point3 as GeoPoint3, Vector3 as GeoVector3, EPSILON};
use crate::ids::{IdGenerator, SolidId};
use tracing::{debug, info};

// Use truck's pre-exported types which come from cgmath64
use truck_meshalgo::tessellation::MeshableShape;
use truck_modeling::{builder, Point3, Rad, Solid, Vector3, Vertex, Wire};

/// Extra reach of a cut block beyond the solid it cuts.
const CUT_BLOCK_MARGIN: f64 = 1000.0;

/// Tolerance units a cut block is pushed off a vertex lying on its plane.
const CUT_NUDGE_STEPS: f64 = 10.0;

/// Plan outline of a straight vertical prism, counter-clockwise seen from above.
#[derive(Debug, Clone)]
struct Footprint {
    /// Corners at the base elevation.
    outline: Vec<GeoPoint3>,
    height: f64,
}

impl Footprint {
    /// Part of the outline on the non-positive side of a vertical `plane`.
    /// Corners within `tol` of the plane are kept as they are.
    fn clip(&self, plane: &Plane, tol: f64) -> Option<Footprint> {
        let n = self.outline.len();
        let mut kept: Vec<GeoPoint3> = Vec::with_capacity(n + 2);
        for i in 0..n {
            let a = self.outline[i];
            let b = self.outline[(i + 1) % n];
            let da = plane.signed_distance(&a);
            let db = plane.signed_distance(&b);
            if da <= tol {
                kept.push(a);
            }
            if (da < -tol && db > tol) || (da > tol && db < -tol) {
                let t = da / (da - db);
                kept.push(a + (b - a) * t);
            }
        }

        kept.dedup_by(|b, a| (*b - *a).norm() <= tol);
        if kept.len() > 1 && (kept[0] - kept[kept.len() - 1]).norm() <= tol {
            kept.pop();
        }
        (kept.len() >= 3).then(|| Footprint {
            outline: kept,
            height: self.height,
        })
    }

    fn extrude(&self) -> KernelResult<Solid> {
        if self.outline.len() < 3 {
            return Err(KernelOpError::InvalidGeometry(
                "Outline requires at least 3 corners".into(),
            ));
        }

        let mut vertices: Vec<Vertex> = self.outline.iter().map(|p| builder::vertex(to_point(p))).collect();
        // Close the loop
        vertices.push(vertices[0].clone());
        let wire: Wire = vertices
            .windows(2)
            .map(|pair| builder::line(&pair[0], &pair[1]))
            .collect();

        let face = builder::try_attach_plane(&[wire])
            .map_err(|e| KernelOpError::OperationFailed(format!("Failed to create face: {:?}", e)))?;
        Ok(builder::tsweep(&face, Vector3::new(0.0, 0.0, self.height)))
    }
}

struct Body {
    id: SolidId,
    descriptor: PlacementDescriptor,
    solid: Solid,
    /// Present while the solid is still a straight vertical prism.
    footprint: Option<Footprint>,
}

/// Truck-based modeling backend.
pub struct TruckBackend {
    /// Tolerance for boolean operations.
    pub tolerance: f64,
    /// Chord tolerance for preview meshes.
    pub mesh_tolerance: f64,
    ids: IdGenerator,
    bodies: Vec<Body>,
    rebar: Vec<(SolidId, RebarSet)>,
    committed: bool,
}

impl TruckBackend {
    pub fn new() -> Self {
        Self {
            tolerance: 0.01, // 0.01mm precision
            mesh_tolerance: 1.0,
            ids: IdGenerator::new("truck"),
            bodies: Vec::new(),
            rebar: Vec::new(),
            committed: false,
        }
    }

    pub fn solid(&self, id: SolidId) -> Option<&Solid> {
        self.bodies.iter().find(|b| b.id == id).map(|b| &b.solid)
    }

    pub fn solid_count(&self) -> usize {
        self.bodies.len()
    }

    pub fn rebar_sets(&self) -> impl Iterator<Item = &(SolidId, RebarSet)> {
        self.rebar.iter()
    }

    pub fn is_committed(&self) -> bool {
        self.committed
    }

    fn index_of(&self, id: SolidId) -> KernelResult<usize> {
        self.bodies
            .iter()
            .position(|b| b.id == id)
            .ok_or(KernelOpError::UnknownSolid(id))
    }

    fn build(&self, descriptor: &PlacementDescriptor) -> KernelResult<(Solid, Option<Footprint>)> {
        let axis = descriptor.axis();
        if axis.x.abs() > EPSILON || axis.y.abs() > EPSILON {
            return Err(KernelOpError::NotImplemented(format!(
                "non-vertical member '{}'",
                descriptor.name
            )));
        }
        if descriptor.local_bounds().is_none() {
            return Err(KernelOpError::InvalidGeometry(format!(
                "'{}' has a non-positive dimension",
                descriptor.name
            )));
        }

        let height = descriptor.length();
        let base = GeoPoint3::new(descriptor.start.x, descriptor.start.y, descriptor.bottom_z());
        let rise = Vector3::new(0.0, 0.0, height);

        match descriptor.cross_section {
            CrossSection::Rectangle { length, width } => {
                let (x_dir, y_dir) = descriptor.local_axes();
                let corner = base - x_dir * (length / 2.0) - y_dir * (width / 2.0);
                let footprint = Footprint {
                    outline: vec![
                        corner,
                        corner + x_dir * length,
                        corner + x_dir * length + y_dir * width,
                        corner + y_dir * width,
                    ],
                    height,
                };
                Ok((footprint.extrude()?, Some(footprint)))
            }
            CrossSection::Circle { diameter } => {
                let center = to_point(&base);
                let v = builder::vertex(Point3::new(center.x + diameter / 2.0, center.y, center.z));
                // Truck requires angle > 2π for closed shapes
                let circle: Wire = builder::rsweep(&v, center, Vector3::new(0.0, 0.0, 1.0), Rad(7.0));
                let disk = builder::try_attach_plane(&[circle]).map_err(|e| {
                    KernelOpError::OperationFailed(format!("Failed to create disk: {:?}", e))
                })?;
                Ok((builder::tsweep(&disk, rise), None))
            }
        }
    }

    /// Block covering everything within `reach` of the origin on the positive side of `cut`,
    /// with its inner face moved `shift` along the normal.
    fn cut_block(cut: &CutSpec, reach: f64, shift: f64) -> KernelResult<Solid> {
        let normal = cut.normal();
        if normal.norm() < EPSILON {
            return Err(KernelOpError::InvalidGeometry("cut axes are parallel".into()));
        }
        let n = normal.normalize();
        let u = cut.axis_u.normalize();
        let w = n.cross(&u);

        let corner = cut.origin + n * shift - u * reach - w * reach;
        let v = builder::vertex(to_point(&corner));
        let edge = builder::tsweep(&v, to_vector(&(u * 2.0 * reach)));
        let face = builder::tsweep(&edge, to_vector(&(w * 2.0 * reach)));
        Ok(builder::tsweep(&face, to_vector(&(n * reach))))
    }

    fn subtract(&self, target: &Solid, tool: &Solid) -> KernelResult<Solid> {
        // Subtraction is: A - B = A AND (NOT B)
        let mut complement = tool.clone();
        complement.not();
        truck_shapeops::and(target, &complement, self.tolerance)
            .ok_or_else(|| KernelOpError::OperationFailed("Boolean subtraction failed".into()))
    }

    /// Export every live solid to one STEP document.
    pub fn export_step(&self) -> KernelResult<String> {
        use truck_stepio::out::{CompleteStepDisplay, StepHeaderDescriptor, StepModels};

        if self.bodies.is_empty() {
            return Err(KernelOpError::InvalidGeometry("nothing to export".into()));
        }

        let compressed: Vec<_> = self.bodies.iter().map(|b| b.solid.compress()).collect();
        let models: StepModels<_, _, _> = compressed.iter().collect();

        let header = StepHeaderDescriptor {
            file_name: "pier.step".to_string(),
            time_stamp: "2024-01-01T00:00:00".to_string(),
            authors: vec!["pier-core".to_string()],
            organization: vec![],
            organization_system: "truck".to_string(),
            authorization: "".to_string(),
        };

        let display = CompleteStepDisplay::new(models, header);
        Ok(display.to_string())
    }

    /// Triangulate every live solid into one mesh. Face ids run across solids.
    pub fn tessellate(&self) -> KernelResult<TriangleMesh> {
        let mut mesh = TriangleMesh::new();
        let mut vertex_offset: u32 = 0;
        let mut face_id: u32 = 0;

        for body in &self.bodies {
            let meshed = body.solid.triangulation(self.mesh_tolerance);
            for shell in meshed.boundaries() {
                for face in shell.face_iter() {
                    if let Some(polygon_mesh) = face.surface() {
                        let positions = polygon_mesh.positions();
                        for pos in positions.iter() {
                            mesh.add_vertex([pos.x, pos.y, pos.z]);
                        }
                        for tri in polygon_mesh.tri_faces() {
                            mesh.add_triangle_with_face(
                                vertex_offset + tri[0].pos as u32,
                                vertex_offset + tri[1].pos as u32,
                                vertex_offset + tri[2].pos as u32,
                                face_id,
                            );
                        }
                        vertex_offset += positions.len() as u32;
                    }
                    face_id += 1;
                }
            }
        }

        if mesh.is_empty() && !self.bodies.is_empty() {
            return Err(KernelOpError::OperationFailed("Tessellation produced no triangles".into()));
        }
        Ok(mesh)
    }
}

impl Default for TruckBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl ModelingBackend for TruckBackend {
    fn create_linear_solid(&mut self, descriptor: &PlacementDescriptor) -> KernelResult<SolidId> {
        let (solid, footprint) = self.build(descriptor)?;
        let id = self.ids.next_id();
        debug!(%id, name = %descriptor.name, "Built solid");
        self.bodies.push(Body {
            id,
            descriptor: descriptor.clone(),
            solid,
            footprint,
        });
        Ok(id)
    }

    fn apply_cut(&mut self, solid: SolidId, cut: &CutSpec) -> KernelResult<()> {
        let idx = self.index_of(solid)?;
        let plane = cut.plane();
        let tol = self.tolerance;
        let body = &self.bodies[idx];

        let distances: Vec<f64> = body
            .solid
            .boundaries()
            .iter()
            .flat_map(|shell| shell.vertex_iter())
            .map(|v| {
                let p = v.point();
                plane.signed_distance(&GeoPoint3::new(p.x, p.y, p.z))
            })
            .collect();

        if distances.iter().all(|d| *d <= tol) {
            debug!(%solid, "Cut plane leaves the solid untouched");
            return Ok(());
        }
        if distances.iter().all(|d| *d >= -tol) {
            return Err(KernelOpError::InvalidGeometry(format!(
                "cut would remove all of '{}'",
                body.descriptor.name
            )));
        }

        if plane.normal.z.abs() < EPSILON {
            if let Some(footprint) = &body.footprint {
                let clipped = footprint.clip(&plane, tol).ok_or_else(|| {
                    KernelOpError::InvalidGeometry(format!("cut leaves no outline of '{}'", body.descriptor.name))
                })?;
                let solid = clipped.extrude()?;
                let body = &mut self.bodies[idx];
                body.solid = solid;
                body.footprint = Some(clipped);
                return Ok(());
            }
        }

        // Keep the block face off any vertex lying on the plane.
        let shift = if distances.iter().any(|d| d.abs() <= tol) {
            debug!(%solid, "Cut plane touches a vertex; block nudged");
            CUT_NUDGE_STEPS * tol
        } else {
            0.0
        };
        let (lx, ly) = body.descriptor.cross_section.extents();
        let reach = lx + ly + body.descriptor.length() + CUT_BLOCK_MARGIN;
        let block = Self::cut_block(cut, reach, shift)?;
        let result = self.subtract(&body.solid, &block)?;
        let body = &mut self.bodies[idx];
        body.solid = result;
        body.footprint = None;
        Ok(())
    }

    fn boolean_subtract(&mut self, target: SolidId, tool: SolidId) -> KernelResult<()> {
        let target_idx = self.index_of(target)?;
        let tool_idx = self.index_of(tool)?;
        let result = self.subtract(&self.bodies[target_idx].solid, &self.bodies[tool_idx].solid)?;
        let body = &mut self.bodies[target_idx];
        body.solid = result;
        body.footprint = None;
        Ok(())
    }

    fn delete_solid(&mut self, solid: SolidId) -> KernelResult<()> {
        let idx = self.index_of(solid)?;
        self.bodies.remove(idx);
        Ok(())
    }

    fn local_bounds(&self, solid: SolidId) -> Option<Aabb> {
        self.bodies
            .iter()
            .find(|b| b.id == solid)
            .and_then(|b| b.descriptor.local_bounds())
    }

    fn lay_rebar_set(&mut self, host: SolidId, set: &RebarSet) -> KernelResult<()> {
        self.index_of(host)?;
        self.rebar.push((host, set.clone()));
        Ok(())
    }

    fn commit(&mut self) -> KernelResult<()> {
        self.committed = true;
        info!(
            solids = self.bodies.len(),
            rebar_sets = self.rebar.len(),
            "Truck model committed"
        );
        Ok(())
    }
}

fn to_point(p: &GeoPoint3) -> Point3 {
    Point3::new(p.x, p.y, p.z)
}

fn to_vector(v: &GeoVector3) -> Vector3 {
    Vector3::new(v.x, v.y, v.z)
}
