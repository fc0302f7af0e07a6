//! Modeling backend abstraction.
//!
//! Generators only talk to the [`ModelingBackend`] trait, so the placement
//! math runs unchanged against the truck B-rep kernel or against the
//! recording double used by tests and the service's dry runs.

pub mod recording;
pub mod types;
mod truck;

#[cfg(test)]
mod tests_truck;

pub use recording::{BackendCall, RecordingBackend};
pub use truck::TruckBackend;
pub use types::*;

use crate::geometry::Aabb;
use crate::ids::SolidId;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Errors that can occur during backend operations.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum KernelOpError {
    #[error("Invalid geometry: {0}")]
    InvalidGeometry(String),

    #[error("Operation failed: {0}")]
    OperationFailed(String),

    #[error("Unknown solid: {0}")]
    UnknownSolid(SolidId),

    #[error("Not implemented: {0}")]
    NotImplemented(String),
}

/// Result type for backend operations.
pub type KernelResult<T> = Result<T, KernelOpError>;

/// The kinds of call a backend accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operation {
    CreateLinearSolid,
    ApplyCut,
    BooleanSubtract,
    DeleteSolid,
    LayRebarSet,
    Commit,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Operation::CreateLinearSolid => "create linear solid",
            Operation::ApplyCut => "apply cut",
            Operation::BooleanSubtract => "boolean subtract",
            Operation::DeleteSolid => "delete solid",
            Operation::LayRebarSet => "lay rebar set",
            Operation::Commit => "commit",
        };
        write!(f, "{}", name)
    }
}

/// A solid-modeling engine that materialises placement instructions.
///
/// The generators never inspect returned geometry; they only need to know
/// whether each call succeeded.
pub trait ModelingBackend {
    /// Insert a linear solid and return its handle.
    fn create_linear_solid(&mut self, descriptor: &PlacementDescriptor) -> KernelResult<SolidId>;

    /// Remove the material of `solid` on the positive side of `cut`.
    fn apply_cut(&mut self, solid: SolidId, cut: &CutSpec) -> KernelResult<()>;

    /// Subtract `tool` from `target`. The tool itself is left in place.
    fn boolean_subtract(&mut self, target: SolidId, tool: SolidId) -> KernelResult<()>;

    fn delete_solid(&mut self, solid: SolidId) -> KernelResult<()>;

    /// Bounding box of a solid in its own local frame (Z along the member, up).
    fn local_bounds(&self, solid: SolidId) -> Option<Aabb>;

    /// Lay a bar set inside `host`. Leg faces and guideline are in the host's local frame.
    fn lay_rebar_set(&mut self, host: SolidId, set: &RebarSet) -> KernelResult<()>;

    /// Finish the pass.
    fn commit(&mut self) -> KernelResult<()>;
}
