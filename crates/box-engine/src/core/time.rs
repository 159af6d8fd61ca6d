/// Fixed timestep accumulator.
/// Physics constants are per frame, so the browser's variable frame time is
/// converted into a whole number of fixed frames.
pub struct FixedTimestep {
    dt: f32,
    accumulator: f32,
}

/// Upper bound on frames run for one browser tick.
pub const MAX_FRAMES_PER_TICK: u32 = 10;

impl FixedTimestep {
    pub fn new(dt: f32) -> Self {
        Self {
            dt,
            accumulator: 0.0,
        }
    }

    /// Add frame time to the accumulator. Returns the number of fixed frames to run.
    pub fn accumulate(&mut self, frame_dt: f32) -> u32 {
        self.accumulator += frame_dt.max(0.0);
        // Cap to prevent spiral of death after a long pause (e.g. hidden tab)
        self.accumulator = self.accumulator.min(self.dt * MAX_FRAMES_PER_TICK as f32);
        let steps = (self.accumulator / self.dt) as u32;
        self.accumulator -= steps as f32 * self.dt;
        steps
    }

    /// The fixed delta time.
    pub fn dt(&self) -> f32 {
        self.dt
    }
}
