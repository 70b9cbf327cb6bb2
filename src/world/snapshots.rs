use std::{collections::HashMap, sync::Arc};

use glam::Vec3;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use crate::{
    core::{mesh::CableMesh, settings::RenderSettings, types::Aabb},
    utils::allocator::CableId,
};

/// Owned copy of a cable's render-facing state at the end of a tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CableSnapshot {
    pub positions: Vec<Vec3>,
    pub render: RenderSettings,
    pub bounds: Aabb,
}

impl CableSnapshot {
    pub fn build_mesh(&self) -> CableMesh {
        CableMesh::from_points(&self.positions, &self.render)
    }
}

/// Latest snapshot per cable, shared between the simulation and any number
/// of readers. Cloning the buffer clones the handle, not the data.
#[derive(Debug, Clone, Default)]
pub struct SnapshotBuffer {
    inner: Arc<RwLock<HashMap<CableId, Arc<CableSnapshot>>>>,
}

impl SnapshotBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces every entry at once so readers never observe a half-updated frame.
    pub fn publish_all(&self, snapshots: impl IntoIterator<Item = (CableId, CableSnapshot)>) {
        let frame: HashMap<_, _> = snapshots
            .into_iter()
            .map(|(id, snapshot)| (id, Arc::new(snapshot)))
            .collect();
        *self.inner.write() = frame;
    }

    pub fn get(&self, id: CableId) -> Option<Arc<CableSnapshot>> {
        self.inner.read().get(&id).cloned()
    }

    pub fn remove(&self, id: CableId) {
        self.inner.write().remove(&id);
    }

    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }
}
