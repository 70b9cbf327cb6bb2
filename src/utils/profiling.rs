use std::time::{Duration, Instant};

/// Per-cable timing data accumulated across substeps.
#[derive(Debug, Default, Clone, Copy)]
pub struct CableProfiler {
    pub integrate_time: Duration,
    pub solve_time: Duration,
    pub collision_time: Duration,
    pub total_tick_time: Duration,

    pub substep_count: u64,
    pub collision_hits: u64,
}

impl CableProfiler {
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn report(&self) {
        let total_us = self.total_tick_time.as_micros() as f32;
        if total_us < 1.0 {
            return;
        }

        log::debug!(
            "cable profile: {} substeps, {} collision hits, {:.3} ms total \
             (integrate {:.1}%, solve {:.1}%, collide {:.1}%)",
            self.substep_count,
            self.collision_hits,
            self.total_tick_time.as_secs_f32() * 1000.0,
            (self.integrate_time.as_micros() as f32 / total_us) * 100.0,
            (self.solve_time.as_micros() as f32 / total_us) * 100.0,
            (self.collision_time.as_micros() as f32 / total_us) * 100.0,
        );
    }
}

pub struct ScopedTimer<'a> {
    start: Instant,
    output: &'a mut Duration,
}

impl<'a> ScopedTimer<'a> {
    pub fn new(output: &'a mut Duration) -> Self {
        Self {
            start: Instant::now(),
            output,
        }
    }
}

impl<'a> Drop for ScopedTimer<'a> {
    fn drop(&mut self) {
        *self.output += self.start.elapsed();
    }
}
