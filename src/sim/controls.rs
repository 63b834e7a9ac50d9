use crate::consts::{MAX_TIME_STEP, MIN_TIME_STEP};

/// Operator-facing switches: whether the simulation runs, and an optional fixed time step.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SimControls {
    pub simulate: bool,
    /// Used instead of the elapsed frame time when set
    pub time_step: Option<f32>,
}

impl Default for SimControls {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl SimControls {
    pub const DEFAULT: Self = Self {
        simulate: true,
        time_step: None,
    };

    pub const fn toggle(&mut self) {
        self.simulate = !self.simulate;
    }

    pub(crate) fn clamp_fix(&mut self) {
        self.time_step = self
            .time_step
            .map(|dt| dt.clamp(MIN_TIME_STEP, MAX_TIME_STEP));
    }

    /// Time step to simulate for a frame that took `elapsed` seconds, None while stopped
    #[must_use]
    pub fn step_for(&self, elapsed: f32) -> Option<f32> {
        if !self.simulate {
            return None;
        }

        let dt = self.time_step.unwrap_or(elapsed);
        Some(if dt.is_finite() {
            dt.clamp(MIN_TIME_STEP, MAX_TIME_STEP)
        } else {
            MIN_TIME_STEP
        })
    }
}
