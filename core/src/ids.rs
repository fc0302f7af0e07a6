use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use uuid::Uuid;

/// Handle to a solid owned by a modeling backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SolidId(pub Uuid);

impl SolidId {
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl fmt::Display for SolidId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A deterministic generator producing a sequence of `SolidId`s
/// from a seed namespace and a counter.
///
/// Two backends seeded alike hand out the same ids for the same call order,
/// so recorded passes can be compared directly.
#[derive(Debug, Clone)]
pub struct IdGenerator {
    namespace: Uuid,
    counter: Arc<AtomicUsize>,
}

impl IdGenerator {
    pub fn new(seed: &str) -> Self {
        let namespace = Uuid::new_v5(&Uuid::NAMESPACE_OID, seed.as_bytes());
        Self {
            namespace,
            counter: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn next_id(&self) -> SolidId {
        let count = self.counter.fetch_add(1, Ordering::SeqCst);
        SolidId::from_uuid(Uuid::new_v5(&self.namespace, &count.to_be_bytes()))
    }
}
