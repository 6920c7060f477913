//! Wall-clock to fixed-tick conversion
//!
//! Frame drivers report real elapsed seconds; the stepper turns them into
//! whole reference-frame steps so behaviour does not depend on display rate.

use super::snapshot::WorldSnapshot;
use super::state::World;
use super::tick::{InputSnapshot, step};
use crate::consts::{MAX_SUBSTEPS, SIM_DT};

#[derive(Debug, Clone)]
pub struct FixedStepper {
    accumulator: f32,
    frame_seconds: f32,
    max_substeps: u32,
}

impl Default for FixedStepper {
    fn default() -> Self {
        Self::new(SIM_DT, MAX_SUBSTEPS)
    }
}

impl FixedStepper {
    pub fn new(frame_seconds: f32, max_substeps: u32) -> Self {
        Self {
            accumulator: 0.0,
            frame_seconds,
            max_substeps: max_substeps.max(1),
        }
    }

    /// Seconds banked but not yet simulated
    pub fn pending(&self) -> f32 {
        self.accumulator
    }

    /// Bank `elapsed_secs` and run as many whole steps as fit, up to the
    /// substep cap. Time beyond the cap is dropped. Returns the snapshot of
    /// the last step run, if any.
    pub fn advance(
        &mut self,
        world: &mut World,
        input: &InputSnapshot,
        elapsed_secs: f32,
    ) -> Option<WorldSnapshot> {
        if elapsed_secs.is_finite() && elapsed_secs > 0.0 {
            self.accumulator += elapsed_secs;
        }

        let mut last = None;
        let mut substeps = 0;
        while self.accumulator >= self.frame_seconds && substeps < self.max_substeps {
            last = Some(step(world, input, 1.0));
            self.accumulator -= self.frame_seconds;
            substeps += 1;
        }

        if substeps == self.max_substeps && self.accumulator >= self.frame_seconds {
            log::warn!(
                "Simulation behind by {:.3}s, dropping surplus",
                self.accumulator
            );
            self.accumulator = 0.0;
        }
        last
    }
}
