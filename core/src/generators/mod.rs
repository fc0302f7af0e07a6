//! Structural element generators and the generation pass.
//!
//! Planning is pure: each `plan_*` function maps the global frame and its own
//! parameters to an [`ElementPlan`]. [`emit_plan`] turns a plan into backend
//! calls, and [`generate_structure`] runs every element in dependency order
//! before a single commit.

mod buffer;
mod cap;
mod elevation;
mod foundation;
mod mat;
mod piles;

#[cfg(test)]
mod tests_elements;
#[cfg(test)]
mod tests_pass;

pub use buffer::{buffer_positions, plan_buffers};
pub use cap::plan_cap;
pub use elevation::{plan_circular_elevation, plan_elevation, plan_lamelar_elevation};
pub use foundation::plan_foundation;
pub use mat::plan_mat;
pub use piles::plan_piles;

use std::fmt;

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::ids::SolidId;
use crate::kernel::{CutSpec, KernelOpError, ModelingBackend, Operation, PlacementDescriptor};
use crate::params::{ReinforcementParameters, StructureParameters};
use crate::reinforcement::layout_reinforcement;
use crate::validation::{validate_all, ValidationResult};

/// Structural components, in generation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Component {
    Foundation,
    Mat,
    Piles,
    Elevation,
    Cap,
    Buffer,
    /// The pass as a whole; only the final commit fails here.
    Structure,
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Component::Foundation => "foundation",
            Component::Mat => "mat",
            Component::Piles => "piles",
            Component::Elevation => "elevation",
            Component::Cap => "cap",
            Component::Buffer => "buffer",
            Component::Structure => "structure",
        };
        write!(f, "{}", name)
    }
}

/// Bars to lay into a solid once its cuts are applied.
#[derive(Debug, Clone, PartialEq)]
pub struct RebarRequest {
    pub params: ReinforcementParameters,
    /// Removed from each lateral side of the host's local box before layout,
    /// so the skew widening does not leak into the bar faces.
    pub lateral_trim: f64,
    pub prefix: String,
}

/// One solid and everything applied to it after insertion.
#[derive(Debug, Clone, PartialEq)]
pub struct PlannedSolid {
    pub descriptor: PlacementDescriptor,
    /// Applied in order.
    pub cuts: Vec<CutSpec>,
    /// Helper solid subtracted after the cuts, then deleted.
    pub notch: Option<PlacementDescriptor>,
    pub rebar: Option<RebarRequest>,
}

impl PlannedSolid {
    pub fn new(descriptor: PlacementDescriptor) -> Self {
        Self {
            descriptor,
            cuts: Vec::new(),
            notch: None,
            rebar: None,
        }
    }

    pub fn with_cuts(mut self, cuts: impl IntoIterator<Item = CutSpec>) -> Self {
        self.cuts.extend(cuts);
        self
    }
}

/// Everything one generator produces.
#[derive(Debug, Clone, PartialEq)]
pub struct ElementPlan {
    pub component: Component,
    pub solids: Vec<PlannedSolid>,
}

impl ElementPlan {
    pub fn new(component: Component, solids: Vec<PlannedSolid>) -> Self {
        Self { component, solids }
    }

    pub fn is_empty(&self) -> bool {
        self.solids.is_empty()
    }

    pub fn descriptors(&self) -> impl Iterator<Item = &PlacementDescriptor> {
        self.solids.iter().map(|s| &s.descriptor)
    }
}

/// A backend call that failed, with the component being built.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{component}: {operation} failed: {source}")]
pub struct GenerationError {
    pub component: Component,
    pub operation: Operation,
    #[source]
    pub source: KernelOpError,
}

impl GenerationError {
    fn at(component: Component, operation: Operation) -> impl FnOnce(KernelOpError) -> GenerationError {
        move |source| GenerationError {
            component,
            operation,
            source,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum PassError {
    #[error("invalid parameters:\n{}", .0.summary())]
    Invalid(ValidationResult),

    #[error(transparent)]
    Generation(#[from] GenerationError),
}

/// What one element left in the model.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmittedElement {
    pub component: Component,
    pub solids: Vec<SolidId>,
    pub rebar_sets: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GenerationReport {
    pub elements: Vec<EmittedElement>,
}

impl GenerationReport {
    pub fn total_solids(&self) -> usize {
        self.elements.iter().map(|e| e.solids.len()).sum()
    }

    pub fn solids_of(&self, component: Component) -> &[SolidId] {
        self.elements
            .iter()
            .find(|e| e.component == component)
            .map(|e| e.solids.as_slice())
            .unwrap_or(&[])
    }
}

/// Plans for every element, in generation order.
pub fn plan_structure(params: &StructureParameters) -> Vec<ElementPlan> {
    let global = &params.global;
    let elevation_height = params.elevation_height();

    vec![
        plan_foundation(global, &params.foundation),
        plan_mat(global, &params.mat, &params.foundation),
        plan_piles(global, &params.piles, &params.foundation),
        plan_elevation(global, params.elevation_type, &params.lamelar, &params.circular),
        plan_cap(global, &params.cap, elevation_height),
        plan_buffers(global, &params.buffer, &params.cap, elevation_height),
    ]
}

/// Submit one plan. Stops at the first rejected call.
pub fn emit_plan<B: ModelingBackend + ?Sized>(
    backend: &mut B,
    plan: &ElementPlan,
) -> Result<EmittedElement, GenerationError> {
    let component = plan.component;
    let mut emitted = EmittedElement {
        component,
        solids: Vec::with_capacity(plan.solids.len()),
        rebar_sets: 0,
    };

    for planned in &plan.solids {
        let id = backend
            .create_linear_solid(&planned.descriptor)
            .map_err(GenerationError::at(component, Operation::CreateLinearSolid))?;
        emitted.solids.push(id);

        for cut in &planned.cuts {
            backend
                .apply_cut(id, cut)
                .map_err(GenerationError::at(component, Operation::ApplyCut))?;
        }

        if let Some(tool) = &planned.notch {
            subtract_helper(backend, component, id, tool)?;
        }

        if let Some(request) = &planned.rebar {
            let bounds = backend
                .local_bounds(id)
                .map(|b| b.shrink_y(request.lateral_trim));
            let sets = layout_reinforcement(bounds.as_ref(), &request.params, &request.prefix);
            for set in &sets {
                backend
                    .lay_rebar_set(id, set)
                    .map_err(GenerationError::at(component, Operation::LayRebarSet))?;
            }
            emitted.rebar_sets += sets.len();
        }
    }

    debug!(
        %component,
        solids = emitted.solids.len(),
        rebar_sets = emitted.rebar_sets,
        "Element emitted"
    );
    Ok(emitted)
}

/// Create `tool`, subtract it from `target`, and delete it either way.
fn subtract_helper<B: ModelingBackend + ?Sized>(
    backend: &mut B,
    component: Component,
    target: SolidId,
    tool: &PlacementDescriptor,
) -> Result<(), GenerationError> {
    let tool_id = backend
        .create_linear_solid(tool)
        .map_err(GenerationError::at(component, Operation::CreateLinearSolid))?;

    let subtracted = backend.boolean_subtract(target, tool_id);
    let deleted = backend.delete_solid(tool_id);

    if let Err(source) = subtracted {
        warn!(%component, tool = %tool.name, error = %source, "Subtraction rejected; helper removed");
        return Err(GenerationError::at(component, Operation::BooleanSubtract)(source));
    }
    deleted.map_err(GenerationError::at(component, Operation::DeleteSolid))
}

/// Run a full pass: Foundation, Mat, Piles, Elevation, Cap, Buffer, then commit.
///
/// Nothing is rolled back on failure; validate first.
pub fn generate_structure<B: ModelingBackend + ?Sized>(
    backend: &mut B,
    params: &StructureParameters,
) -> Result<GenerationReport, GenerationError> {
    info!(
        elevation = ?params.elevation_type,
        rotation = params.global.rotation_angle,
        skew = params.global.skew_angle,
        "Generation pass started"
    );

    let mut report = GenerationReport::default();
    for plan in plan_structure(params) {
        if plan.is_empty() {
            debug!(component = %plan.component, "Nothing to emit");
            continue;
        }
        report.elements.push(emit_plan(backend, &plan)?);
    }

    backend
        .commit()
        .map_err(GenerationError::at(Component::Structure, Operation::Commit))?;
    info!(solids = report.total_solids(), "Generation pass committed");
    Ok(report)
}

/// Validate, and generate only when the parameter set is consistent.
pub fn validate_and_generate<B: ModelingBackend + ?Sized>(
    backend: &mut B,
    params: &StructureParameters,
) -> Result<GenerationReport, PassError> {
    let validation = validate_structure(params);
    if !validation.is_valid() {
        warn!(violations = validation.errors().len(), "Generation refused");
        return Err(PassError::Invalid(validation));
    }
    Ok(generate_structure(backend, params)?)
}

/// [`validate_all`] over a full parameter set.
pub fn validate_structure(params: &StructureParameters) -> ValidationResult {
    validate_all(
        params.elevation_type,
        &params.lamelar,
        &params.circular,
        &params.cap,
        &params.piles,
        &params.foundation,
        &params.buffer,
    )
}
