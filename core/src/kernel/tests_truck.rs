use super::*;
use crate::generators::{generate_structure, plan_foundation};
use crate::geometry::{Point3, Vector3};
use crate::ids::IdGenerator;
use crate::params::StructureParameters;

fn block(name: &str) -> PlacementDescriptor {
    PlacementDescriptor {
        name: name.into(),
        start: Point3::new(0.0, 0.0, 1000.0),
        end: Point3::new(0.0, 0.0, 0.0),
        cross_section: CrossSection::Rectangle {
            length: 1000.0,
            width: 1000.0,
        },
        rotation: ProfileRotation::Front,
        rotation_offset: 0.0,
        material: "C50/60".into(),
        class: "8".into(),
    }
}

fn skewed(skew: f64) -> StructureParameters {
    let mut params = StructureParameters::default();
    params.piles.row_distance = 1500.0;
    params.piles.column_distance = 600.0;
    params.piles.embedded_length = 500.0;
    params.global.skew_angle = skew;
    params
}

fn corners(backend: &TruckBackend, id: crate::ids::SolidId) -> Vec<Point3> {
    backend
        .solid(id)
        .map(|s| {
            s.boundaries()
                .iter()
                .flat_map(|shell| shell.vertex_iter())
                .map(|v| {
                    let p = v.point();
                    Point3::new(p.x, p.y, p.z)
                })
                .collect()
        })
        .unwrap_or_default()
}

fn face_count(backend: &TruckBackend, id: crate::ids::SolidId) -> usize {
    backend
        .solid(id)
        .map(|s| s.boundaries().iter().map(|shell| shell.face_iter().count()).sum::<usize>())
        .unwrap_or(0)
}

#[test]
fn test_prism_has_six_faces() {
    let mut backend = TruckBackend::new();
    let id = backend.create_linear_solid(&block("pad")).unwrap();
    assert_eq!(face_count(&backend, id), 6);
    assert_eq!(backend.solid_count(), 1);
}

#[test]
fn test_cylinder_solid() {
    let mut backend = TruckBackend::new();
    let mut pile = block("pile");
    pile.cross_section = CrossSection::Circle { diameter: 600.0 };
    let id = backend.create_linear_solid(&pile).unwrap();
    assert!(backend.solid(id).is_some());
}

#[test]
fn test_degenerate_profile_rejected() {
    let mut backend = TruckBackend::new();
    let mut flat = block("flat");
    flat.cross_section = CrossSection::Rectangle {
        length: 1000.0,
        width: 0.0,
    };
    assert!(matches!(
        backend.create_linear_solid(&flat),
        Err(KernelOpError::InvalidGeometry(_))
    ));
}

#[test]
fn test_cut_outside_solid_is_noop() {
    let mut backend = TruckBackend::new();
    let id = backend.create_linear_solid(&block("pad")).unwrap();

    // Plane at y = -500 with normal -Y: nothing lies beyond it.
    let cut = CutSpec::new(Point3::new(0.0, -500.0, 0.0), Vector3::x(), Vector3::z());
    backend.apply_cut(id, &cut).unwrap();
    assert_eq!(face_count(&backend, id), 6);
}

#[test]
fn test_cut_removing_everything_is_rejected() {
    let mut backend = TruckBackend::new();
    let id = backend.create_linear_solid(&block("pad")).unwrap();

    // Normal -Y through y = +600: the whole block is on the positive side.
    let cut = CutSpec::new(Point3::new(0.0, 600.0, 0.0), Vector3::x(), Vector3::z());
    assert!(matches!(
        backend.apply_cut(id, &cut),
        Err(KernelOpError::InvalidGeometry(_))
    ));
}

#[test]
fn test_subtract_through_hole() {
    let mut backend = TruckBackend::new();
    let target = backend.create_linear_solid(&block("pad")).unwrap();

    let mut hole = block("hole");
    hole.start = Point3::new(100.0, 50.0, 1200.0);
    hole.end = Point3::new(100.0, 50.0, -200.0);
    hole.cross_section = CrossSection::Circle { diameter: 300.0 };
    let tool = backend.create_linear_solid(&hole).unwrap();

    backend.boolean_subtract(target, tool).unwrap();
    backend.delete_solid(tool).unwrap();
    assert_eq!(backend.solid_count(), 1);
    assert!(face_count(&backend, target) > 6);
}

#[test]
fn test_unknown_solid() {
    let mut backend = TruckBackend::new();
    let ghost = IdGenerator::new("elsewhere").next_id();
    let cut = CutSpec::new(Point3::origin(), Vector3::x(), Vector3::z());
    assert_eq!(backend.apply_cut(ghost, &cut), Err(KernelOpError::UnknownSolid(ghost)));
    assert!(backend.local_bounds(ghost).is_none());
}

#[test]
fn test_step_export() {
    let mut backend = TruckBackend::new();
    assert!(backend.export_step().is_err());

    backend.create_linear_solid(&block("pad")).unwrap();
    backend.commit().unwrap();
    let step = backend.export_step().unwrap();
    assert!(step.contains("ISO-10303-21"));
    assert!(backend.is_committed());
}

#[test]
fn test_tessellate_box() {
    let mut backend = TruckBackend::new();
    backend.create_linear_solid(&block("pad")).unwrap();
    let mesh = backend.tessellate().unwrap();
    assert!(!mesh.is_empty());
    assert_eq!(mesh.triangles.len(), mesh.face_ids.len());
}

#[test]
fn test_skew_cuts_through_corners() {
    for skew in [20.0, -10.0] {
        let params = skewed(skew);
        let plan = plan_foundation(&params.global, &params.foundation);
        let planned = &plan.solids[0];

        let mut backend = TruckBackend::new();
        let id = backend.create_linear_solid(&planned.descriptor).unwrap();
        for cut in &planned.cuts {
            backend.apply_cut(id, cut).unwrap();
        }

        // Each plane runs through two corners of the widened prism; a parallelogram prism is left.
        assert_eq!(face_count(&backend, id), 6);
        let points = corners(&backend, id);
        for cut in &planned.cuts {
            let plane = cut.plane();
            assert!(points.iter().all(|p| plane.signed_distance(p) <= backend.tolerance));
        }
        // The lateral faces sit on the cut planes, so the outline keeps the nominal width.
        let max_y = points.iter().map(|p| p.y).fold(f64::MIN, f64::max);
        let a = params.global.skew_offset(params.foundation.length).abs();
        assert!((max_y - (1000.0 + a)).abs() < 1e-6);
    }
}

#[test]
fn test_vertical_cut_clips_outline() {
    let mut backend = TruckBackend::new();
    let id = backend.create_linear_solid(&block("pad")).unwrap();

    // Diagonal through two opposite corners, removing the +x +y half.
    let cut = CutSpec::new(Point3::origin(), Vector3::new(-1.0, 1.0, 0.0), Vector3::z());
    backend.apply_cut(id, &cut).unwrap();
    assert_eq!(face_count(&backend, id), 5);
    assert!(corners(&backend, id).iter().all(|p| p.x + p.y <= 1e-6));
}

#[test]
fn test_skewed_pass_materialises() {
    for (skew, rotation) in [(20.0, 0.0), (-10.0, 0.0), (5.0, 30.0)] {
        let mut params = skewed(skew);
        params.global.rotation_angle = rotation;

        let mut backend = TruckBackend::new();
        let report = generate_structure(&mut backend, &params).unwrap();
        assert_eq!(report.total_solids(), 16);
        assert_eq!(backend.solid_count(), 16);
        assert!(backend.is_committed());
    }

    let mut backend = TruckBackend::new();
    generate_structure(&mut backend, &skewed(15.0)).unwrap();
    assert!(backend.export_step().unwrap().contains("ISO-10303-21"));
    assert!(!backend.tessellate().unwrap().is_empty());
}
