//! Generation runs behind the HTTP and websocket endpoints.

use pier_core::generators::{generate_structure, validate_and_generate, GenerationError, GenerationReport, PassError};
use pier_core::kernel::{BackendCall, KernelOpError, RecordingBackend, TriangleMesh, TruckBackend};
use pier_core::{validate_structure, StructureParameters, ValidationResult};
use serde::Serialize;
use thiserror::Error;
use tracing::info;

/// Seed for recorded runs, so identical requests get identical solid ids.
const DRY_RUN_SEED: &str = "pier-backend";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationPayload {
    pub is_valid: bool,
    pub errors: Vec<String>,
    pub summary: String,
}

impl From<&ValidationResult> for ValidationPayload {
    fn from(result: &ValidationResult) -> Self {
        Self {
            is_valid: result.is_valid(),
            errors: result.errors().to_vec(),
            summary: result.summary(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct GenerationPayload {
    pub report: GenerationReport,
    pub calls: Vec<BackendCall>,
}

#[derive(Debug, Error)]
pub enum ModelError {
    #[error(transparent)]
    Pass(#[from] PassError),

    #[error(transparent)]
    Generation(#[from] GenerationError),

    #[error(transparent)]
    Kernel(#[from] KernelOpError),
}

pub fn validate(params: &StructureParameters) -> ValidationPayload {
    ValidationPayload::from(&validate_structure(params))
}

/// Validated pass against the recording backend; returns the call log.
pub fn dry_run(params: &StructureParameters) -> Result<GenerationPayload, PassError> {
    let mut backend = RecordingBackend::with_seed(DRY_RUN_SEED);
    let report = validate_and_generate(&mut backend, params)?;
    info!(calls = backend.calls().len(), "Dry run recorded");
    Ok(GenerationPayload {
        report,
        calls: backend.into_calls(),
    })
}

/// Validated pass on the B-rep kernel, exported as STEP text.
pub fn step_document(params: &StructureParameters) -> Result<String, ModelError> {
    let mut backend = TruckBackend::new();
    validate_and_generate(&mut backend, params)?;
    Ok(backend.export_step()?)
}

/// Preview mesh. Inconsistent parameters are still drawn; the caller reports
/// the violations next to it.
pub fn preview_mesh(params: &StructureParameters) -> Result<TriangleMesh, ModelError> {
    let mut backend = TruckBackend::new();
    generate_structure(&mut backend, params)?;
    Ok(backend.tessellate()?)
}
