pub mod cuts;
pub mod generators;
pub mod geometry;
pub mod ids;
pub mod kernel;
pub mod params;
pub mod reinforcement;
pub mod validation;

pub use generators::{
    generate_structure, validate_and_generate, validate_structure, Component, GenerationError,
    GenerationReport, PassError,
};
pub use kernel::{ModelingBackend, RecordingBackend, TruckBackend};
pub use params::StructureParameters;
pub use validation::{validate_all, ValidationResult};

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
