use std::collections::HashMap;

use crate::core::types::Transform;

/// Resolves the world transform of a named attachment point (a socket on
/// some other object). Injected into the simulation instead of looked up
/// through a global registry.
pub trait AttachmentResolver: Send + Sync {
    fn resolve(&self, name: &str) -> Option<Transform>;
}

/// Resolver that knows no attachments.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoAttachments;

impl AttachmentResolver for NoAttachments {
    fn resolve(&self, _name: &str) -> Option<Transform> {
        None
    }
}

/// Named world transforms updated by the host each frame.
#[derive(Debug, Default, Clone)]
pub struct AttachmentRegistry {
    points: HashMap<String, Transform>,
}

impl AttachmentRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or moves an attachment point.
    pub fn set(&mut self, name: impl Into<String>, transform: Transform) {
        self.points.insert(name.into(), transform);
    }

    pub fn remove(&mut self, name: &str) -> Option<Transform> {
        self.points.remove(name)
    }

    pub fn get(&self, name: &str) -> Option<&Transform> {
        self.points.get(name)
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

impl AttachmentResolver for AttachmentRegistry {
    fn resolve(&self, name: &str) -> Option<Transform> {
        self.points.get(name).copied()
    }
}
