use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::{
    config::*,
    error::{CableError, Result},
};

/// Geometry parameters consumed by the tube mesh generator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    pub width: f32,
    pub num_sides: u32,
    /// How many times the material repeats along the cable.
    pub tile_material: f32,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            width: DEFAULT_CABLE_WIDTH,
            num_sides: DEFAULT_NUM_SIDES,
            tile_material: DEFAULT_TILE_MATERIAL,
        }
    }
}

/// Validated cable configuration.
///
/// Construct through [`CableSettings::builder`], or deserialize and then call
/// [`CableSettings::validate`] before handing the settings to a cable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CableSettings {
    pub length: f32,
    pub num_segments: usize,
    pub substep_time: f32,
    pub solver_iterations: u32,
    pub enable_stiffness: bool,
    /// Index distance linked by bending constraints when stiffness is on.
    pub stiffness_span: usize,
    pub enable_collision: bool,
    pub collision_friction: f32,
    /// Layers of the collision world the cable sweeps against.
    pub collision_mask: u32,
    /// Extra acceleration applied to every free particle.
    pub cable_force: Vec3,
    pub gravity_scale: f32,
    pub damping: f32,
    pub attach_start: bool,
    pub attach_end: bool,
    /// End point, relative to the end attachment (or the owner when unattached).
    pub end_location: Vec3,
    pub render: RenderSettings,
}

impl Default for CableSettings {
    fn default() -> Self {
        Self {
            length: DEFAULT_CABLE_LENGTH,
            num_segments: DEFAULT_NUM_SEGMENTS,
            substep_time: DEFAULT_SUBSTEP_TIME,
            solver_iterations: DEFAULT_SOLVER_ITERATIONS,
            enable_stiffness: false,
            stiffness_span: DEFAULT_STIFFNESS_SPAN,
            enable_collision: false,
            collision_friction: DEFAULT_COLLISION_FRICTION,
            collision_mask: u32::MAX,
            cable_force: Vec3::ZERO,
            gravity_scale: 1.0,
            damping: DEFAULT_DAMPING,
            attach_start: true,
            attach_end: true,
            end_location: Vec3::from_array(DEFAULT_END_LOCATION),
            render: RenderSettings::default(),
        }
    }
}

impl CableSettings {
    pub fn builder() -> CableSettingsBuilder {
        CableSettingsBuilder::new()
    }

    /// Rest length of one segment.
    pub fn segment_length(&self) -> f32 {
        self.length / self.num_segments.max(1) as f32
    }

    pub fn particle_count(&self) -> usize {
        self.num_segments + 1
    }

    /// Checks every field against its documented range.
    pub fn validate(&self) -> Result<()> {
        if !self.length.is_finite() {
            return Err(CableError::NonFinite("length"));
        }
        if self.length < 0.0 {
            return Err(CableError::InvalidLength(self.length));
        }
        if !(MIN_NUM_SEGMENTS..=MAX_NUM_SEGMENTS).contains(&self.num_segments) {
            return Err(CableError::InvalidSegmentCount {
                value: self.num_segments,
                min: MIN_NUM_SEGMENTS,
                max: MAX_NUM_SEGMENTS,
            });
        }
        // NaN fails the range check as well.
        if !(MIN_SUBSTEP_TIME..=MAX_SUBSTEP_TIME).contains(&self.substep_time) {
            return Err(CableError::InvalidSubstepTime {
                value: self.substep_time,
                min: MIN_SUBSTEP_TIME,
                max: MAX_SUBSTEP_TIME,
            });
        }
        if !(MIN_SOLVER_ITERATIONS..=MAX_SOLVER_ITERATIONS).contains(&self.solver_iterations) {
            return Err(CableError::InvalidSolverIterations {
                value: self.solver_iterations,
                min: MIN_SOLVER_ITERATIONS,
                max: MAX_SOLVER_ITERATIONS,
            });
        }
        if self.stiffness_span < 2 {
            return Err(CableError::InvalidStiffnessSpan(self.stiffness_span));
        }
        if !(0.0..=1.0).contains(&self.collision_friction) {
            return Err(CableError::InvalidFriction(self.collision_friction));
        }
        if !(0.0..=1.0).contains(&self.damping) {
            return Err(CableError::InvalidDamping(self.damping));
        }
        if !self.cable_force.is_finite() {
            return Err(CableError::NonFinite("cable_force"));
        }
        if !self.gravity_scale.is_finite() {
            return Err(CableError::NonFinite("gravity_scale"));
        }
        if !self.end_location.is_finite() {
            return Err(CableError::NonFinite("end_location"));
        }
        self.validate_render()
    }

    fn validate_render(&self) -> Result<()> {
        let render = &self.render;
        if !(MIN_CABLE_WIDTH..=MAX_CABLE_WIDTH).contains(&render.width) {
            return Err(CableError::InvalidWidth {
                value: render.width,
                min: MIN_CABLE_WIDTH,
                max: MAX_CABLE_WIDTH,
            });
        }
        if !(MIN_NUM_SIDES..=MAX_NUM_SIDES).contains(&render.num_sides) {
            return Err(CableError::InvalidSideCount {
                value: render.num_sides,
                min: MIN_NUM_SIDES,
                max: MAX_NUM_SIDES,
            });
        }
        if !render.tile_material.is_finite() {
            return Err(CableError::NonFinite("tile_material"));
        }
        if render.tile_material < 0.0 {
            return Err(CableError::InvalidTiling(render.tile_material));
        }
        Ok(())
    }
}

pub struct CableSettingsBuilder {
    settings: CableSettings,
}

impl Default for CableSettingsBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl CableSettingsBuilder {
    pub fn new() -> Self {
        Self {
            settings: CableSettings::default(),
        }
    }

    pub fn length(mut self, length: f32) -> Self {
        self.settings.length = length;
        self
    }

    pub fn segments(mut self, num_segments: usize) -> Self {
        self.settings.num_segments = num_segments;
        self
    }

    pub fn substep_time(mut self, seconds: f32) -> Self {
        self.settings.substep_time = seconds;
        self
    }

    pub fn solver_iterations(mut self, iterations: u32) -> Self {
        self.settings.solver_iterations = iterations;
        self
    }

    pub fn stiffness(mut self, enabled: bool) -> Self {
        self.settings.enable_stiffness = enabled;
        self
    }

    pub fn stiffness_span(mut self, span: usize) -> Self {
        self.settings.stiffness_span = span;
        self
    }

    pub fn collision(mut self, enabled: bool, friction: f32) -> Self {
        self.settings.enable_collision = enabled;
        self.settings.collision_friction = friction;
        self
    }

    pub fn collision_mask(mut self, mask: u32) -> Self {
        self.settings.collision_mask = mask;
        self
    }

    pub fn cable_force(mut self, force: Vec3) -> Self {
        self.settings.cable_force = force;
        self
    }

    pub fn gravity_scale(mut self, scale: f32) -> Self {
        self.settings.gravity_scale = scale;
        self
    }

    pub fn damping(mut self, damping: f32) -> Self {
        self.settings.damping = damping;
        self
    }

    pub fn attach_start(mut self, attach: bool) -> Self {
        self.settings.attach_start = attach;
        self
    }

    pub fn attach_end(mut self, attach: bool) -> Self {
        self.settings.attach_end = attach;
        self
    }

    pub fn end_location(mut self, location: Vec3) -> Self {
        self.settings.end_location = location;
        self
    }

    pub fn width(mut self, width: f32) -> Self {
        self.settings.render.width = width;
        self
    }

    pub fn sides(mut self, num_sides: u32) -> Self {
        self.settings.render.num_sides = num_sides;
        self
    }

    pub fn tile_material(mut self, tiling: f32) -> Self {
        self.settings.render.tile_material = tiling;
        self
    }

    pub fn build(self) -> Result<CableSettings> {
        self.settings.validate()?;
        Ok(self.settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(CableSettings::default().validate().is_ok());
        let settings = CableSettings::builder().build().unwrap();
        assert_eq!(settings.particle_count(), DEFAULT_NUM_SEGMENTS + 1);
        assert_eq!(settings.segment_length(), 10.0);
    }

    #[test]
    fn nan_substep_is_rejected() {
        let err = CableSettings::builder()
            .substep_time(f32::NAN)
            .build()
            .unwrap_err();
        assert!(matches!(err, CableError::InvalidSubstepTime { .. }));
    }

    #[test]
    fn non_finite_force_is_rejected() {
        let err = CableSettings::builder()
            .cable_force(Vec3::new(0.0, f32::INFINITY, 0.0))
            .build()
            .unwrap_err();
        assert_eq!(err, CableError::NonFinite("cable_force"));
    }
}
