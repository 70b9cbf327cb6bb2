//! Multi-cable container orchestrating ticks, collision, attachments and snapshots.

pub mod attachments;
pub mod snapshots;

use glam::Vec3;
#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::{
    cable::{CableComponent, SimulationContext},
    collision::shapes::StaticCollisionWorld,
    config::DEFAULT_GRAVITY,
    core::{settings::CableSettings, types::Transform},
    error::{CableError, Result},
    utils::{
        allocator::{Arena, CableId},
        logging::TraceSpan,
    },
};

use attachments::AttachmentRegistry;
use snapshots::SnapshotBuffer;

/// Owns a set of cables and the services they are simulated against.
pub struct CableSystem {
    cables: Arena<CableComponent>,
    pub collision: StaticCollisionWorld,
    pub attachments: AttachmentRegistry,
    pub gravity: Vec3,
    snapshots: SnapshotBuffer,
    parallel_enabled: bool,
}

impl Default for CableSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl CableSystem {
    pub fn new() -> Self {
        Self {
            cables: Arena::new(),
            collision: StaticCollisionWorld::new(),
            attachments: AttachmentRegistry::new(),
            gravity: Vec3::from_array(DEFAULT_GRAVITY),
            snapshots: SnapshotBuffer::new(),
            parallel_enabled: false,
        }
    }

    /// Requests parallel ticking. Without the `parallel` feature cables are
    /// always ticked sequentially.
    pub fn set_parallel_enabled(&mut self, enabled: bool) {
        self.parallel_enabled = enabled;
    }

    pub fn parallel_enabled(&self) -> bool {
        self.parallel_enabled && cfg!(feature = "parallel")
    }

    /// Adds a cable and lays it out between its resolved endpoints.
    pub fn add_cable(&mut self, mut cable: CableComponent) -> CableId {
        cable.reset_particles(&self.attachments);
        self.cables.insert(cable)
    }

    /// Builds and adds a cable from settings, attached to `end_attachment`
    /// when given.
    pub fn spawn_cable(
        &mut self,
        settings: CableSettings,
        transform: Transform,
        end_attachment: Option<&str>,
    ) -> Result<CableId> {
        let mut cable = CableComponent::new(settings, transform)?;
        cable.set_end_attachment(end_attachment.map(str::to_owned));
        Ok(self.add_cable(cable))
    }

    pub fn remove_cable(&mut self, id: CableId) -> Result<CableComponent> {
        let cable = self.cables.remove(id).ok_or(CableError::UnknownCable(id))?;
        self.snapshots.remove(id);
        Ok(cable)
    }

    pub fn cable(&self, id: CableId) -> Option<&CableComponent> {
        self.cables.get(id)
    }

    pub fn cable_mut(&mut self, id: CableId) -> Option<&mut CableComponent> {
        self.cables.get_mut(id)
    }

    pub fn try_cable_mut(&mut self, id: CableId) -> Result<&mut CableComponent> {
        self.cables.get_mut(id).ok_or(CableError::UnknownCable(id))
    }

    pub fn cable_ids(&self) -> Vec<CableId> {
        self.cables.ids().collect()
    }

    pub fn len(&self) -> usize {
        self.cables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cables.is_empty()
    }

    /// Handle readers use to fetch the latest published snapshots.
    pub fn snapshots(&self) -> SnapshotBuffer {
        self.snapshots.clone()
    }

    /// Ticks every cable by `dt`, then publishes a fresh snapshot of each.
    /// Returns the total number of substeps run.
    pub fn tick(&mut self, dt: f32) -> u64 {
        let parallel = self.parallel_enabled();
        let ctx = SimulationContext::new(self.gravity, &self.collision, &self.attachments);

        let mut span = TraceSpan::new(if parallel {
            "cables::tick_parallel"
        } else {
            "cables::tick_sequential"
        });
        let substeps = if parallel {
            Self::tick_parallel(&mut self.cables, dt, &ctx)
        } else {
            self.cables
                .iter_mut()
                .map(|cable| cable.tick(dt, &ctx) as u64)
                .sum()
        };
        span.set_substeps(substeps);
        drop(span);

        self.publish_snapshots();
        substeps
    }

    #[cfg(feature = "parallel")]
    fn tick_parallel(cables: &mut Arena<CableComponent>, dt: f32, ctx: &SimulationContext<'_>) -> u64 {
        cables
            .slots_mut()
            .par_iter_mut()
            .filter_map(Option::as_mut)
            .map(|cable| cable.tick(dt, ctx) as u64)
            .sum()
    }

    #[cfg(not(feature = "parallel"))]
    fn tick_parallel(cables: &mut Arena<CableComponent>, dt: f32, ctx: &SimulationContext<'_>) -> u64 {
        cables.iter_mut().map(|cable| cable.tick(dt, ctx) as u64).sum()
    }

    pub fn publish_snapshots(&self) {
        self.snapshots
            .publish_all(self.cables.iter().map(|(id, cable)| (id, cable.snapshot())));
    }

    /// Logs and clears every cable's accumulated timings.
    pub fn report_profiles(&mut self) {
        for cable in self.cables.iter_mut() {
            cable.profiler().report();
            cable.profiler_mut().reset();
        }
    }
}
