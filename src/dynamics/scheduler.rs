/// Fixed-timestep accumulator that turns variable frame times into whole
/// substeps, carrying the leftover into the next frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SubstepScheduler {
    substep_time: f32,
    time_remainder: f32,
}

impl SubstepScheduler {
    pub fn new(substep_time: f32) -> Self {
        Self {
            substep_time,
            time_remainder: 0.0,
        }
    }

    pub fn substep_time(&self) -> f32 {
        self.substep_time
    }

    /// Changes the substep length, keeping the accumulated remainder.
    pub fn set_substep_time(&mut self, substep_time: f32) {
        self.substep_time = substep_time;
    }

    pub fn time_remainder(&self) -> f32 {
        self.time_remainder
    }

    pub fn reset(&mut self) {
        self.time_remainder = 0.0;
    }

    /// Adds `dt` and returns how many substeps are now due, i.e.
    /// `floor((remainder + dt) / substep_time)` saturated to `u32::MAX`. The
    /// remainder keeps whatever is left below one substep. Negative or
    /// non-finite frame times are ignored.
    pub fn accumulate(&mut self, dt: f32) -> u32 {
        if !dt.is_finite() || dt <= 0.0 || self.substep_time <= 0.0 {
            return 0;
        }

        // f64 keeps the division exact enough for frames far longer than a
        // step-by-step f32 subtraction can make progress on.
        let total = self.time_remainder as f64 + dt as f64;
        let substep = self.substep_time as f64;
        let due = (total / substep).floor();

        let remainder = total.rem_euclid(substep) as f32;
        // Rounding to f32 may land exactly on the substep length.
        self.time_remainder = if remainder < self.substep_time {
            remainder
        } else {
            0.0
        };

        if due >= u32::MAX as f64 {
            u32::MAX
        } else {
            due as u32
        }
    }
}
