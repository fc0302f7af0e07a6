use super::*;
use crate::geometry::{ApproxEq, Point3};
use crate::kernel::CrossSection;
use crate::params::{
    BufferHeights, BufferParameters, CapParameters, CircularElevationParameters, CutSide, ElevationType,
    FoundationParameters, GlobalFrame, LamelarElevationParameters, MatParameters, PileParameters,
};

fn rotated(angle: f64) -> GlobalFrame {
    GlobalFrame {
        rotation_angle: angle,
        ..Default::default()
    }
}

fn skewed(angle: f64) -> GlobalFrame {
    GlobalFrame {
        skew_angle: angle,
        ..Default::default()
    }
}

#[test]
fn test_foundation_default() {
    let plan = plan_foundation(&GlobalFrame::default(), &FoundationParameters::default());
    assert_eq!(plan.component, Component::Foundation);
    assert_eq!(plan.solids.len(), 1);

    let solid = &plan.solids[0];
    let d = &solid.descriptor;
    assert!(d.start.approx_eq(&Point3::new(0.0, 0.0, 0.0)));
    assert!(d.end.approx_eq(&Point3::new(0.0, 0.0, -600.0)));
    assert_eq!(
        d.cross_section,
        CrossSection::Rectangle {
            length: 4000.0,
            width: 2000.0
        }
    );
    assert_eq!(d.material, "C50/60");
    assert_eq!(solid.cuts.len(), 2);
    assert!(solid.rebar.is_none());
}

#[test]
fn test_foundation_skew_widening() {
    let global = skewed(30.0);
    let plan = plan_foundation(&global, &FoundationParameters::default());
    let a = 30f64.to_radians().tan() * 2000.0;

    match plan.solids[0].descriptor.cross_section {
        CrossSection::Rectangle { length, width } => {
            assert_eq!(length, 4000.0);
            assert!(width.approx_eq(&(2000.0 + 2.0 * a)));
        }
        other => panic!("unexpected section {:?}", other),
    }

    // Cut origins stay at the nominal half width.
    let [neg, pos] = [plan.solids[0].cuts[0], plan.solids[0].cuts[1]];
    assert!(neg.origin.y.approx_eq(&-1000.0));
    assert!(pos.origin.y.approx_eq(&1000.0));
}

#[test]
fn test_foundation_requests_reinforcement() {
    let global = skewed(20.0);
    let foundation = FoundationParameters {
        reinforcement: Some(ReinforcementParameters::default()),
        ..Default::default()
    };
    let plan = plan_foundation(&global, &foundation);
    let request = plan.solids[0].rebar.as_ref().unwrap();

    assert_eq!(request.prefix, "Foundation");
    assert!(request.lateral_trim.approx_eq(&global.skew_offset(4000.0)));
}

#[test]
fn test_mat_under_foundation() {
    let foundation = FoundationParameters::default();
    let plan = plan_mat(&GlobalFrame::default(), &MatParameters::default(), &foundation);
    let solid = &plan.solids[0];

    assert!(solid.descriptor.start.z.approx_eq(&-600.0));
    assert!(solid.descriptor.end.z.approx_eq(&-800.0));
    assert_eq!(
        solid.descriptor.cross_section,
        CrossSection::Rectangle {
            length: 4600.0,
            width: 2600.0
        }
    );
    assert!(solid.cuts[0].origin.y.approx_eq(&-1300.0));
    assert!(solid.cuts[1].origin.y.approx_eq(&1300.0));
    assert_eq!(solid.descriptor.class, "1");
}

#[test]
fn test_pile_grid() {
    let plan = plan_piles(&GlobalFrame::default(), &PileParameters::default(), &FoundationParameters::default());
    assert_eq!(plan.solids.len(), 9);

    let names: Vec<&str> = plan.descriptors().map(|d| d.name.as_str()).take(3).collect();
    assert_eq!(names, vec!["Pile_0_0", "Pile_0_1", "Pile_0_2"]);

    let first = &plan.solids[0].descriptor;
    assert!(first.start.approx_eq(&Point3::new(-2000.0, -2000.0, 1400.0)));
    assert!(first.end.z.approx_eq(&-12600.0));
    assert_eq!(first.cross_section, CrossSection::Circle { diameter: 600.0 });

    let (sx, sy) = plan
        .descriptors()
        .fold((0.0, 0.0), |(x, y), d| (x + d.start.x, y + d.start.y));
    assert!(sx.approx_eq(&0.0) && sy.approx_eq(&0.0));
}

#[test]
fn test_piles_follow_skew() {
    let global = skewed(45.0);
    let plan = plan_piles(&global, &PileParameters::default(), &FoundationParameters::default());

    // Row at x = +2000 shifts by tan(45) * 2000 across the width.
    let pile = plan.descriptors().find(|d| d.name == "Pile_1_2").unwrap();
    assert!(pile.start.approx_eq(&Point3::new(2000.0, 2000.0, 1400.0)));
    let pile = plan.descriptors().find(|d| d.name == "Pile_1_0").unwrap();
    assert!(pile.start.approx_eq(&Point3::new(-2000.0, -2000.0, 1400.0)));
}

#[test]
fn test_empty_pile_grid() {
    let piles = PileParameters {
        rows: 0,
        ..Default::default()
    };
    assert!(plan_piles(&GlobalFrame::default(), &piles, &FoundationParameters::default()).is_empty());
}

#[test]
fn test_lamelar_default() {
    let plan = plan_lamelar_elevation(&GlobalFrame::default(), &LamelarElevationParameters::default());
    assert_eq!(plan.solids.len(), 1);
    let d = &plan.solids[0].descriptor;
    assert_eq!(d.name, "Elevation_0");
    assert!(d.start.approx_eq(&Point3::origin()));
    assert!(d.end.approx_eq(&Point3::new(0.0, 0.0, 8000.0)));
    assert_eq!(
        d.cross_section,
        CrossSection::Rectangle {
            length: 400.0,
            width: 300.0
        }
    );
}

#[test]
fn test_circular_array_rotates_with_frame() {
    let plan = plan_circular_elevation(&rotated(90.0), &CircularElevationParameters::default());
    let ys: Vec<f64> = plan.descriptors().map(|d| d.start.y).collect();
    let expected = [-2250.0, -750.0, 750.0, 2250.0];
    for (y, e) in ys.iter().zip(expected) {
        assert!(y.approx_eq(&e));
    }
    assert!(plan.descriptors().all(|d| d.start.x.abs() < 1e-6));
}

#[test]
fn test_elevation_selects_shape() {
    let params = StructureParameters::default();
    let plan = plan_elevation(&params.global, ElevationType::Circular, &params.lamelar, &params.circular);
    assert_eq!(plan.solids.len(), 4);
    let plan = plan_elevation(&params.global, ElevationType::Lamelar, &params.lamelar, &params.circular);
    assert_eq!(plan.solids.len(), 1);
}

#[test]
fn test_cap_placement_and_cut_order() {
    let cap = CapParameters {
        p: 500.0,
        ..Default::default()
    };
    let plan = plan_cap(&rotated(90.0), &cap, 8000.0);
    let solid = &plan.solids[0];

    assert!(solid.descriptor.start.approx_eq(&Point3::new(0.0, 500.0, 8800.0)));
    assert!(solid.descriptor.end.approx_eq(&Point3::new(0.0, 500.0, 8000.0)));
    assert_eq!(solid.cuts.len(), 4);
    assert!(solid.notch.is_none());

    // Skew pair first (vertical), then the taper pair referenced at top - depth.
    assert!(solid.cuts[0].axis_v.approx_eq(&crate::geometry::Vector3::z()));
    assert!(solid.cuts[2].origin.z.approx_eq(&8300.0));
    assert!(solid.cuts[3].origin.z.approx_eq(&8300.0));
}

#[test]
fn test_cap_notch_helper() {
    let cap = CapParameters {
        cut_x: 150.0,
        cut_y: 250.0,
        cut_side: CutSide::Left,
        ..Default::default()
    };
    let plan = plan_cap(&GlobalFrame::default(), &cap, 8000.0);
    let tool = plan.solids[0].notch.as_ref().unwrap();

    assert_eq!(tool.name, "Cap notch");
    assert!(tool.start.approx_eq(&Point3::new(0.0, -225.0, 8800.0)));
    assert!(tool.end.approx_eq(&Point3::new(0.0, -225.0, 8550.0)));
}

#[test]
fn test_buffer_positions_default() {
    let positions = buffer_positions(&BufferParameters::default(), &CapParameters::default());
    assert_eq!(positions, vec![-1600.0, -700.0, 200.0]);
}

#[test]
fn test_last_buffer_clamped_to_right_offset() {
    let buffer = BufferParameters {
        spacing: 1500.0,
        ..Default::default()
    };
    let positions = buffer_positions(&buffer, &CapParameters::default());
    // Uniform step would give 2200; the right edge must stay at 2000 - 200.
    assert_eq!(positions, vec![-1600.0, 300.0, 1600.0]);
}

#[test]
fn test_buffer_heights_fill_forward() {
    let buffer = BufferParameters {
        heights: BufferHeights::parse("60, oops"),
        ..Default::default()
    };
    let plan = plan_buffers(&GlobalFrame::default(), &buffer, &CapParameters::default(), 8000.0);
    assert_eq!(plan.solids.len(), 3);

    for d in plan.descriptors() {
        assert!(d.end.z.approx_eq(&8800.0));
        assert!(d.start.z.approx_eq(&8860.0));
        assert!(d.points_down());
    }
    assert_eq!(plan.solids[2].descriptor.name, "Buffer_2");
}

#[test]
fn test_zero_buffers() {
    let buffer = BufferParameters {
        number: 0,
        ..Default::default()
    };
    assert!(plan_buffers(&GlobalFrame::default(), &buffer, &CapParameters::default(), 8000.0).is_empty());
}

#[test]
fn test_every_profile_follows_frame_rotation() {
    let mut params = StructureParameters::default();
    params.global.rotation_angle = 37.0;
    params.cap.cut_x = 100.0;
    params.cap.cut_y = 100.0;

    for elevation_type in [ElevationType::Lamelar, ElevationType::Circular] {
        params.elevation_type = elevation_type;
        for plan in plan_structure(&params) {
            for solid in &plan.solids {
                assert!(solid.descriptor.plan_yaw().approx_eq(&37.0), "{}", solid.descriptor.name);
                if let Some(tool) = &solid.notch {
                    assert!(tool.plan_yaw().approx_eq(&37.0));
                }
            }
        }
    }
}

#[test]
fn test_plan_order() {
    let order: Vec<Component> = plan_structure(&StructureParameters::default())
        .iter()
        .map(|p| p.component)
        .collect();
    assert_eq!(
        order,
        vec![
            Component::Foundation,
            Component::Mat,
            Component::Piles,
            Component::Elevation,
            Component::Cap,
            Component::Buffer
        ]
    );
}
