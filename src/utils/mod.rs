//! Utility helpers including math extensions, the cable arena, logging, and profiling.

pub mod allocator;
pub mod logging;
pub mod math;
pub mod profiling;

pub use allocator::{Arena, CableId, GenerationalId};
pub use math::*;
pub use profiling::CableProfiler;
