//! The cable component: particle chain, settings, and per-frame tick.

use glam::Vec3;
use log::{debug, trace};

use crate::{
    collision::{queries::SweepQuery, response::collide_particles, NoCollision},
    config::DEFAULT_GRAVITY,
    core::{
        mesh::CableMesh,
        particle::{particles_along_line, CableParticle},
        settings::CableSettings,
        types::{Aabb, Transform},
    },
    dynamics::{ConstraintSolver, SubstepScheduler, VerletIntegrator},
    error::Result,
    utils::{
        logging::{warn_if_substep_backlog, TraceSpan},
        profiling::{self, CableProfiler},
    },
    world::{
        attachments::{AttachmentResolver, NoAttachments},
        snapshots::CableSnapshot,
    },
};

/// Whether ticks advance the simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimulationState {
    Simulating,
    Idle,
}

/// External services a tick needs, borrowed for the duration of the call.
#[derive(Clone, Copy)]
pub struct SimulationContext<'a> {
    /// World gravity before the cable's own `gravity_scale`.
    pub gravity: Vec3,
    pub sweep: &'a dyn SweepQuery,
    pub attachments: &'a dyn AttachmentResolver,
}

impl<'a> SimulationContext<'a> {
    pub fn new(
        gravity: Vec3,
        sweep: &'a dyn SweepQuery,
        attachments: &'a dyn AttachmentResolver,
    ) -> Self {
        Self {
            gravity,
            sweep,
            attachments,
        }
    }
}

impl Default for SimulationContext<'static> {
    /// Default gravity, nothing to collide with, no attachments.
    fn default() -> Self {
        Self {
            gravity: Vec3::from_array(DEFAULT_GRAVITY),
            sweep: &NoCollision,
            attachments: &NoAttachments,
        }
    }
}

/// A simulated cable hanging between its owner and an end point.
#[derive(Debug, Clone)]
pub struct CableComponent {
    settings: CableSettings,
    transform: Transform,
    end_attachment: Option<String>,
    particles: Vec<CableParticle>,
    solver: ConstraintSolver,
    integrator: VerletIntegrator,
    scheduler: SubstepScheduler,
    state: SimulationState,
    profiler: CableProfiler,
}

impl CableComponent {
    /// Validates `settings` and lays the particles out on the straight line
    /// between the owner and the unattached end location.
    pub fn new(settings: CableSettings, transform: Transform) -> Result<Self> {
        settings.validate()?;
        let mut cable = Self {
            solver: Self::build_solver(&settings),
            integrator: VerletIntegrator::new(settings.damping),
            scheduler: SubstepScheduler::new(settings.substep_time),
            settings,
            transform,
            end_attachment: None,
            particles: Vec::new(),
            state: SimulationState::Simulating,
            profiler: CableProfiler::default(),
        };
        cable.reset_particles(&NoAttachments);
        Ok(cable)
    }

    /// Attaches the cable end to a named attachment point and lays the
    /// particles out again between the owner and the resolved end.
    pub fn with_end_attachment(
        mut self,
        name: impl Into<String>,
        attachments: &dyn AttachmentResolver,
    ) -> Self {
        self.end_attachment = Some(name.into());
        self.reset_particles(attachments);
        self
    }

    fn build_solver(settings: &CableSettings) -> ConstraintSolver {
        let span = settings
            .enable_stiffness
            .then_some(settings.stiffness_span);
        ConstraintSolver::for_chain(
            settings.num_segments,
            settings.segment_length(),
            span,
            settings.solver_iterations,
        )
    }

    pub fn settings(&self) -> &CableSettings {
        &self.settings
    }

    /// Applies new settings. Changing the segment count rebuilds the particle
    /// array along the cable's current start and end; other changes keep the
    /// particles in place.
    pub fn set_settings(&mut self, settings: CableSettings) -> Result<()> {
        settings.validate()?;
        let rebuild = settings.num_segments != self.settings.num_segments;

        self.solver = Self::build_solver(&settings);
        self.integrator = VerletIntegrator::new(settings.damping);
        self.scheduler.set_substep_time(settings.substep_time);
        self.settings = settings;

        if rebuild {
            let start = self.particles.first().map(|p| p.position);
            let end = self.particles.last().map(|p| p.position);
            match (start, end) {
                (Some(start), Some(end)) => self.rebuild_particles(start, end),
                _ => self.reset_particles(&NoAttachments),
            }
        }
        Ok(())
    }

    pub fn set_segment_count(&mut self, num_segments: usize) -> Result<()> {
        let mut settings = self.settings.clone();
        settings.num_segments = num_segments;
        self.set_settings(settings)
    }

    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    /// Moves the owner; the start point follows on the next substep.
    pub fn set_transform(&mut self, transform: Transform) {
        self.transform = transform;
    }

    pub fn end_attachment(&self) -> Option<&str> {
        self.end_attachment.as_deref()
    }

    /// Switches the end attachment in place. A pinned end jumps to the new
    /// point on the next substep; call [`Self::reset_particles`] to lay the
    /// whole cable out again instead.
    pub fn set_end_attachment(&mut self, name: Option<String>) {
        self.end_attachment = name;
    }

    pub fn state(&self) -> SimulationState {
        self.state
    }

    pub fn is_simulating(&self) -> bool {
        self.state == SimulationState::Simulating
    }

    pub fn set_simulating(&mut self, simulating: bool) {
        self.state = if simulating {
            SimulationState::Simulating
        } else {
            SimulationState::Idle
        };
    }

    /// World-space start and end points. The end is `end_location` mapped
    /// through the end attachment, or through the owner when the attachment
    /// is unset or cannot be resolved.
    pub fn endpoint_positions(&self, attachments: &dyn AttachmentResolver) -> (Vec3, Vec3) {
        let start = self.transform.position;
        let end_frame = self
            .end_attachment
            .as_deref()
            .and_then(|name| attachments.resolve(name))
            .unwrap_or(self.transform);
        (start, end_frame.transform_point(self.settings.end_location))
    }

    /// Discards all motion and lays the particles on the straight line
    /// between the current endpoints.
    pub fn reset_particles(&mut self, attachments: &dyn AttachmentResolver) {
        let (start, end) = self.endpoint_positions(attachments);
        self.rebuild_particles(start, end);
        self.scheduler.reset();
    }

    fn rebuild_particles(&mut self, start: Vec3, end: Vec3) {
        self.particles = particles_along_line(start, end, self.settings.num_segments);
        self.pin_endpoints(start, end);
        debug!(
            "rebuilt cable with {} particles ({} segments)",
            self.particles.len(),
            self.settings.num_segments
        );
    }

    fn pin_endpoints(&mut self, start: Vec3, end: Vec3) {
        let attach_start = self.settings.attach_start;
        let attach_end = self.settings.attach_end;

        if let Some(first) = self.particles.first_mut() {
            first.is_free = !attach_start;
            if attach_start {
                first.snap_to(start);
            }
        }
        if let Some(last) = self.particles.last_mut() {
            last.is_free = !attach_end;
            if attach_end {
                last.snap_to(end);
            }
        }
    }

    /// Combined acceleration acting on free particles.
    pub fn acceleration(&self, gravity: Vec3) -> Vec3 {
        gravity * self.settings.gravity_scale + self.settings.cable_force
    }

    /// Advances the cable by a frame of `dt` seconds, running as many fixed
    /// substeps as are due. Returns the number of substeps run.
    pub fn tick(&mut self, dt: f32, ctx: &SimulationContext<'_>) -> u32 {
        if !self.is_simulating() {
            return 0;
        }

        let substeps = self.scheduler.accumulate(dt);
        if substeps == 0 {
            return 0;
        }

        let mut tick_time = std::time::Duration::ZERO;
        {
            let _tick_timer = profiling::ScopedTimer::new(&mut tick_time);
            let _span = TraceSpan::with_substeps("cable::tick", substeps);
            let endpoints = self.endpoint_positions(ctx.attachments);
            let acceleration = self.acceleration(ctx.gravity);
            for _ in 0..substeps {
                self.perform_substep(endpoints, acceleration, ctx.sweep);
            }
        }
        self.profiler.total_tick_time += tick_time;

        trace!(
            "cable tick dt={:.4} ran {} substeps, remainder {:.4}",
            dt,
            substeps,
            self.scheduler.time_remainder()
        );
        warn_if_substep_backlog(substeps, dt);
        substeps
    }

    /// Runs exactly one substep regardless of the accumulated time.
    pub fn substep(&mut self, ctx: &SimulationContext<'_>) {
        let endpoints = self.endpoint_positions(ctx.attachments);
        let acceleration = self.acceleration(ctx.gravity);
        self.perform_substep(endpoints, acceleration, ctx.sweep);
    }

    fn perform_substep(&mut self, (start, end): (Vec3, Vec3), acceleration: Vec3, sweep: &dyn SweepQuery) {
        let dt = self.scheduler.substep_time();
        self.pin_endpoints(start, end);

        {
            let _timer = profiling::ScopedTimer::new(&mut self.profiler.integrate_time);
            self.integrator.step(&mut self.particles, acceleration, dt);
        }
        {
            let _timer = profiling::ScopedTimer::new(&mut self.profiler.solve_time);
            self.solver.solve(&mut self.particles);
        }
        if self.settings.enable_collision {
            let _timer = profiling::ScopedTimer::new(&mut self.profiler.collision_time);
            let hits = collide_particles(
                &mut self.particles,
                sweep,
                self.settings.render.width * 0.5,
                self.settings.collision_mask,
                self.settings.collision_friction,
            );
            self.profiler.collision_hits += hits as u64;
        }
        self.profiler.substep_count += 1;
    }

    pub fn particles(&self) -> &[CableParticle] {
        &self.particles
    }

    /// Direct access for teleporting or nudging particles. The slice keeps the
    /// particle count fixed.
    pub fn particles_mut(&mut self) -> &mut [CableParticle] {
        &mut self.particles
    }

    pub fn particle_count(&self) -> usize {
        self.particles.len()
    }

    /// Copy of the current particle positions, start to end.
    pub fn particle_positions(&self) -> Vec<Vec3> {
        self.particles.iter().map(|p| p.position).collect()
    }

    pub fn time_remainder(&self) -> f32 {
        self.scheduler.time_remainder()
    }

    /// Particle bounds grown by the cable radius.
    pub fn bounds(&self) -> Aabb {
        Aabb::from_points(self.particles.iter().map(|p| p.position))
            .expanded(self.settings.render.width * 0.5)
    }

    /// Sum of the current segment lengths.
    pub fn current_length(&self) -> f32 {
        self.particles
            .windows(2)
            .map(|pair| pair[0].position.distance(pair[1].position))
            .sum()
    }

    pub fn max_segment_error(&self) -> f32 {
        self.solver.max_segment_error(&self.particles)
    }

    pub fn total_segment_error(&self) -> f32 {
        self.solver.total_segment_error(&self.particles)
    }

    pub fn snapshot(&self) -> CableSnapshot {
        CableSnapshot {
            positions: self.particle_positions(),
            render: self.settings.render,
            bounds: self.bounds(),
        }
    }

    pub fn build_mesh(&self) -> CableMesh {
        CableMesh::from_points(&self.particle_positions(), &self.settings.render)
    }

    pub fn profiler(&self) -> &CableProfiler {
        &self.profiler
    }

    pub fn profiler_mut(&mut self) -> &mut CableProfiler {
        &mut self.profiler
    }
}
