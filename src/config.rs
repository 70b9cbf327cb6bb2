//! Global configuration constants and valid ranges for cable settings.

/// Default gravity vector applied to cables (Y-up).
pub const DEFAULT_GRAVITY: [f32; 3] = [0.0, -9.81, 0.0];

/// Rest length of the whole cable.
pub const DEFAULT_CABLE_LENGTH: f32 = 100.0;

/// Number of segments; the cable holds one more particle than this.
pub const DEFAULT_NUM_SEGMENTS: usize = 10;
pub const MIN_NUM_SEGMENTS: usize = 1;
pub const MAX_NUM_SEGMENTS: usize = 1000;

/// Fixed duration of one simulation substep (in seconds).
pub const DEFAULT_SUBSTEP_TIME: f32 = 0.02;
pub const MIN_SUBSTEP_TIME: f32 = 0.005;
pub const MAX_SUBSTEP_TIME: f32 = 0.1;

/// Constraint relaxation passes performed per substep.
pub const DEFAULT_SOLVER_ITERATIONS: u32 = 1;
pub const MIN_SOLVER_ITERATIONS: u32 = 1;
pub const MAX_SOLVER_ITERATIONS: u32 = 16;

/// Index distance of bending constraints when stiffness is enabled.
pub const DEFAULT_STIFFNESS_SPAN: usize = 2;

/// Tangential friction applied on collision, in [0, 1].
pub const DEFAULT_COLLISION_FRICTION: f32 = 0.2;

/// Velocity retention per substep. 1.0 disables damping.
pub const DEFAULT_DAMPING: f32 = 1.0;

/// Offset of the cable end relative to its end attachment.
pub const DEFAULT_END_LOCATION: [f32; 3] = [100.0, 0.0, 0.0];

/// Render settings.
pub const DEFAULT_CABLE_WIDTH: f32 = 10.0;
pub const MIN_CABLE_WIDTH: f32 = 0.01;
pub const MAX_CABLE_WIDTH: f32 = 100_000.0;
pub const DEFAULT_NUM_SIDES: u32 = 4;
pub const MIN_NUM_SIDES: u32 = 1;
pub const MAX_NUM_SIDES: u32 = 16;
pub const DEFAULT_TILE_MATERIAL: f32 = 1.0;

/// A single tick running more substeps than this is logged as a warning.
pub const SUBSTEP_WARN_THRESHOLD: u32 = 64;

/// Overlaps shallower than this count as touching, not start-penetrating.
pub const CONTACT_SKIN: f32 = 1.0e-3;

/// Distances below this are treated as degenerate.
pub const KINDA_SMALL_NUMBER: f32 = 1.0e-4;
