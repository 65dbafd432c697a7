//! Fixed-step clock: turns variable frame times into whole sim ticks

use crate::consts::{MAX_FRAME_TIME, MAX_SUBSTEPS, SIM_DT};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedStep {
    pub accumulator: f32,
    /// Seconds per tick
    pub dt: f32,
    pub max_substeps: u32,
}

impl Default for FixedStep {
    fn default() -> Self {
        Self::new(SIM_DT)
    }
}

impl FixedStep {
    pub fn new(dt: f32) -> Self {
        Self {
            accumulator: 0.0,
            dt: dt.max(f32::EPSILON),
            max_substeps: MAX_SUBSTEPS,
        }
    }

    /// Feed one frame's elapsed time and return how many ticks to run.
    ///
    /// Long frames are clamped so a stall can't trigger a spiral of
    /// catch-up ticks; time beyond the substep cap stays banked.
    pub fn advance(&mut self, frame_dt: f32) -> u32 {
        self.accumulator += frame_dt.clamp(0.0, MAX_FRAME_TIME);

        let mut substeps = 0;
        while self.accumulator >= self.dt && substeps < self.max_substeps {
            self.accumulator -= self.dt;
            substeps += 1;
        }
        substeps
    }

    /// Drop banked time (after pause or restart)
    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_frames() {
        let mut clock = FixedStep::new(0.25);
        assert_eq!(clock.advance(0.0), 0);
        let mut clock = FixedStep::new(1.0 / 64.0);
        assert_eq!(clock.advance(1.0 / 64.0), 1);
        assert_eq!(clock.advance(1.0 / 128.0), 0);
        assert_eq!(clock.advance(1.0 / 128.0), 1);
    }

    #[test]
    fn test_frame_time_clamped() {
        let mut clock = FixedStep::new(1.0 / 64.0);
        // 5 seconds of stall counts as 0.1 s: 6 ticks, remainder banked
        assert_eq!(clock.advance(5.0), 6);
        assert!(clock.accumulator < clock.dt);
    }

    #[test]
    fn test_substep_cap() {
        let mut clock = FixedStep::new(0.01);
        assert_eq!(clock.advance(0.1), MAX_SUBSTEPS);
        assert!(clock.accumulator > 0.0);
        clock.reset();
        assert_eq!(clock.accumulator, 0.0);
    }

    #[test]
    fn test_negative_frame_ignored() {
        let mut clock = FixedStep::default();
        assert_eq!(clock.advance(-1.0), 0);
        assert_eq!(clock.accumulator, 0.0);
    }
}
