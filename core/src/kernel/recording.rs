//! A backend that materialises nothing and records every accepted call.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::types::{CutSpec, PlacementDescriptor, RebarSet};
use super::{KernelOpError, KernelResult, ModelingBackend, Operation};
use crate::geometry::Aabb;
use crate::ids::{IdGenerator, SolidId};

/// One accepted backend call, in submission order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum BackendCall {
    CreateLinearSolid {
        id: SolidId,
        descriptor: PlacementDescriptor,
    },
    ApplyCut {
        solid: SolidId,
        cut: CutSpec,
    },
    BooleanSubtract {
        target: SolidId,
        tool: SolidId,
    },
    DeleteSolid {
        solid: SolidId,
    },
    LayRebarSet {
        host: SolidId,
        set: RebarSet,
    },
    Commit,
}

impl BackendCall {
    pub fn operation(&self) -> Operation {
        match self {
            BackendCall::CreateLinearSolid { .. } => Operation::CreateLinearSolid,
            BackendCall::ApplyCut { .. } => Operation::ApplyCut,
            BackendCall::BooleanSubtract { .. } => Operation::BooleanSubtract,
            BackendCall::DeleteSolid { .. } => Operation::DeleteSolid,
            BackendCall::LayRebarSet { .. } => Operation::LayRebarSet,
            BackendCall::Commit => Operation::Commit,
        }
    }
}

/// Test double for [`ModelingBackend`].
///
/// Solids are tracked by descriptor so `local_bounds` works. Any operation
/// can be set to be rejected; rejected calls are not recorded.
#[derive(Debug, Clone)]
pub struct RecordingBackend {
    ids: IdGenerator,
    calls: Vec<BackendCall>,
    live: HashMap<SolidId, PlacementDescriptor>,
    rejected: HashSet<Operation>,
}

impl RecordingBackend {
    pub fn new() -> Self {
        Self::with_seed("recording")
    }

    /// Backends with the same seed hand out the same ids for the same calls.
    pub fn with_seed(seed: &str) -> Self {
        Self {
            ids: IdGenerator::new(seed),
            calls: Vec::new(),
            live: HashMap::new(),
            rejected: HashSet::new(),
        }
    }

    pub fn reject(mut self, op: Operation) -> Self {
        self.rejected.insert(op);
        self
    }

    pub fn calls(&self) -> &[BackendCall] {
        &self.calls
    }

    pub fn into_calls(self) -> Vec<BackendCall> {
        self.calls
    }

    pub fn count(&self, op: Operation) -> usize {
        self.calls.iter().filter(|c| c.operation() == op).count()
    }

    /// Descriptors of every created solid, including ones later deleted.
    pub fn created(&self) -> Vec<(SolidId, &PlacementDescriptor)> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                BackendCall::CreateLinearSolid { id, descriptor } => Some((*id, descriptor)),
                _ => None,
            })
            .collect()
    }

    /// Descriptor of a solid by name, if one was created.
    pub fn find(&self, name: &str) -> Option<(SolidId, &PlacementDescriptor)> {
        self.created().into_iter().find(|(_, d)| d.name == name)
    }

    pub fn cuts_on(&self, solid: SolidId) -> Vec<&CutSpec> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                BackendCall::ApplyCut { solid: s, cut } if *s == solid => Some(cut),
                _ => None,
            })
            .collect()
    }

    pub fn rebar_sets(&self) -> Vec<&RebarSet> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                BackendCall::LayRebarSet { set, .. } => Some(set),
                _ => None,
            })
            .collect()
    }

    pub fn is_live(&self, solid: SolidId) -> bool {
        self.live.contains_key(&solid)
    }

    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    fn check(&self, op: Operation) -> KernelResult<()> {
        if self.rejected.contains(&op) {
            debug!(%op, "Recording backend rejecting call");
            return Err(KernelOpError::OperationFailed(format!("{} rejected", op)));
        }
        Ok(())
    }

    fn require(&self, solid: SolidId) -> KernelResult<()> {
        if self.live.contains_key(&solid) {
            Ok(())
        } else {
            Err(KernelOpError::UnknownSolid(solid))
        }
    }
}

impl Default for RecordingBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl ModelingBackend for RecordingBackend {
    fn create_linear_solid(&mut self, descriptor: &PlacementDescriptor) -> KernelResult<SolidId> {
        self.check(Operation::CreateLinearSolid)?;
        let id = self.ids.next_id();
        self.live.insert(id, descriptor.clone());
        self.calls.push(BackendCall::CreateLinearSolid {
            id,
            descriptor: descriptor.clone(),
        });
        Ok(id)
    }

    fn apply_cut(&mut self, solid: SolidId, cut: &CutSpec) -> KernelResult<()> {
        self.check(Operation::ApplyCut)?;
        self.require(solid)?;
        self.calls.push(BackendCall::ApplyCut { solid, cut: *cut });
        Ok(())
    }

    fn boolean_subtract(&mut self, target: SolidId, tool: SolidId) -> KernelResult<()> {
        self.check(Operation::BooleanSubtract)?;
        self.require(target)?;
        self.require(tool)?;
        self.calls.push(BackendCall::BooleanSubtract { target, tool });
        Ok(())
    }

    fn delete_solid(&mut self, solid: SolidId) -> KernelResult<()> {
        self.check(Operation::DeleteSolid)?;
        if self.live.remove(&solid).is_none() {
            return Err(KernelOpError::UnknownSolid(solid));
        }
        self.calls.push(BackendCall::DeleteSolid { solid });
        Ok(())
    }

    fn local_bounds(&self, solid: SolidId) -> Option<Aabb> {
        self.live.get(&solid).and_then(|d| d.local_bounds())
    }

    fn lay_rebar_set(&mut self, host: SolidId, set: &RebarSet) -> KernelResult<()> {
        self.check(Operation::LayRebarSet)?;
        self.require(host)?;
        self.calls.push(BackendCall::LayRebarSet {
            host,
            set: set.clone(),
        });
        Ok(())
    }

    fn commit(&mut self) -> KernelResult<()> {
        self.check(Operation::Commit)?;
        self.calls.push(BackendCall::Commit);
        Ok(())
    }
}
