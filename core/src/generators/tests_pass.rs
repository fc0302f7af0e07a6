use super::*;
use crate::geometry::ApproxEq;
use crate::kernel::{BackendCall, RecordingBackend};

fn consistent() -> StructureParameters {
    let mut params = StructureParameters::default();
    params.piles.row_distance = 1500.0;
    params.piles.column_distance = 600.0;
    params.piles.embedded_length = 500.0;
    params
}

fn notched() -> StructureParameters {
    let mut params = consistent();
    params.cap.cut_x = 150.0;
    params.cap.cut_y = 250.0;
    params
}

#[test]
fn test_default_pass_commits_once() {
    let mut backend = RecordingBackend::new();
    let report = generate_structure(&mut backend, &StructureParameters::default()).unwrap();

    // 1 foundation + 1 mat + 9 piles + 1 column + 1 cap + 3 buffers
    assert_eq!(report.total_solids(), 16);
    assert_eq!(backend.count(Operation::CreateLinearSolid), 16);
    assert_eq!(backend.count(Operation::ApplyCut), 8);
    assert_eq!(backend.count(Operation::Commit), 1);
    assert_eq!(backend.calls().last(), Some(&BackendCall::Commit));
    assert_eq!(report.solids_of(Component::Piles).len(), 9);
}

#[test]
fn test_solids_created_in_dependency_order() {
    let mut backend = RecordingBackend::new();
    generate_structure(&mut backend, &StructureParameters::default()).unwrap();

    let names: Vec<String> = backend.created().iter().map(|(_, d)| d.name.clone()).collect();
    assert_eq!(names[0], "Foundation");
    assert_eq!(names[1], "Mat");
    assert!(names[2].starts_with("Pile_"));
    assert_eq!(names[11], "Elevation_0");
    assert_eq!(names[12], "Cap");
    assert_eq!(names[13], "Buffer_0");
}

#[test]
fn test_cuts_follow_their_solid() {
    let mut backend = RecordingBackend::new();
    generate_structure(&mut backend, &StructureParameters::default()).unwrap();

    let (cap, _) = backend.find("Cap").unwrap();
    assert_eq!(backend.cuts_on(cap).len(), 4);

    // Every cut comes right after the solid it belongs to, or another of its cuts.
    let mut current = None;
    for call in backend.calls() {
        match call {
            BackendCall::CreateLinearSolid { id, .. } => current = Some(*id),
            BackendCall::ApplyCut { solid, .. } => assert_eq!(Some(*solid), current),
            _ => {}
        }
    }
}

#[test]
fn test_notch_helper_is_deleted() {
    let mut backend = RecordingBackend::new();
    generate_structure(&mut backend, &notched()).unwrap();

    let (tool, _) = backend.find("Cap notch").unwrap();
    let (cap, _) = backend.find("Cap").unwrap();
    assert!(backend
        .calls()
        .contains(&BackendCall::BooleanSubtract { target: cap, tool }));
    assert!(!backend.is_live(tool));
    assert!(backend.is_live(cap));
    assert_eq!(backend.live_count(), 16);
}

#[test]
fn test_rejected_subtraction_cleans_up_and_aborts() {
    let mut backend = RecordingBackend::new().reject(Operation::BooleanSubtract);
    let err = generate_structure(&mut backend, &notched()).unwrap_err();

    assert_eq!(err.component, Component::Cap);
    assert_eq!(err.operation, Operation::BooleanSubtract);
    let (tool, _) = backend.find("Cap notch").unwrap();
    assert!(!backend.is_live(tool));
    assert_eq!(backend.count(Operation::DeleteSolid), 1);
    assert_eq!(backend.count(Operation::Commit), 0);
    assert!(backend.find("Buffer_0").is_none());
}

#[test]
fn test_rejected_insert_names_component() {
    let mut backend = RecordingBackend::new().reject(Operation::CreateLinearSolid);
    let err = generate_structure(&mut backend, &StructureParameters::default()).unwrap_err();

    assert_eq!(err.component, Component::Foundation);
    assert_eq!(err.operation, Operation::CreateLinearSolid);
    assert!(err.to_string().starts_with("foundation: create linear solid failed"));
    assert!(backend.calls().is_empty());
}

#[test]
fn test_rejected_commit() {
    let mut backend = RecordingBackend::new().reject(Operation::Commit);
    let err = generate_structure(&mut backend, &StructureParameters::default()).unwrap_err();
    assert_eq!(err.component, Component::Structure);
    assert_eq!(err.operation, Operation::Commit);
}

#[test]
fn test_foundation_reinforcement_is_laid() {
    let mut params = consistent();
    params.global.skew_angle = 15.0;
    params.foundation.reinforcement = Some(ReinforcementParameters::default());

    let mut backend = RecordingBackend::new();
    let report = generate_structure(&mut backend, &params).unwrap();
    assert_eq!(report.elements[0].rebar_sets, 4);

    let (foundation, _) = backend.find("Foundation").unwrap();
    let hosts: Vec<SolidId> = backend
        .calls()
        .iter()
        .filter_map(|c| match c {
            BackendCall::LayRebarSet { host, .. } => Some(*host),
            _ => None,
        })
        .collect();
    assert_eq!(hosts, vec![foundation; 4]);

    // The skew widening is trimmed off before layout.
    let b1 = backend.rebar_sets()[0];
    assert_eq!(b1.name, "Foundation B1");
    assert!(b1.legs[0].contour[0].y.approx_eq(&(-1000.0 + 50.0)));
}

#[test]
fn test_rebar_laid_after_cuts() {
    let mut params = consistent();
    params.foundation.reinforcement = Some(ReinforcementParameters::default());

    let mut backend = RecordingBackend::new();
    generate_structure(&mut backend, &params).unwrap();

    let ops: Vec<Operation> = backend.calls().iter().take(7).map(|c| c.operation()).collect();
    assert_eq!(
        ops,
        vec![
            Operation::CreateLinearSolid,
            Operation::ApplyCut,
            Operation::ApplyCut,
            Operation::LayRebarSet,
            Operation::LayRebarSet,
            Operation::LayRebarSet,
            Operation::LayRebarSet,
        ]
    );
}

#[test]
fn test_invalid_parameters_refused() {
    let mut backend = RecordingBackend::new();
    let err = validate_and_generate(&mut backend, &StructureParameters::default()).unwrap_err();

    match err {
        PassError::Invalid(result) => {
            assert!(result.errors().iter().any(|e| e.contains("row extent (4600 mm)")));
        }
        other => panic!("expected validation failure, got {:?}", other),
    }
    assert!(backend.calls().is_empty());
}

#[test]
fn test_consistent_parameters_generate() {
    let mut backend = RecordingBackend::new();
    let report = validate_and_generate(&mut backend, &consistent()).unwrap();
    assert_eq!(report.total_solids(), 16);
    assert_eq!(backend.count(Operation::Commit), 1);
}

#[test]
fn test_same_seed_same_calls() {
    let params = notched();
    let mut first = RecordingBackend::with_seed("pier");
    let mut second = RecordingBackend::with_seed("pier");
    generate_structure(&mut first, &params).unwrap();
    generate_structure(&mut second, &params).unwrap();
    assert_eq!(first.into_calls(), second.into_calls());
}
