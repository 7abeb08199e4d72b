/// Fixed-step tick accumulator
///
/// Converts arbitrary frame durations into whole-millisecond simulation
/// ticks. Gameplay components are updated once per tick with the fixed
/// step, so behavior does not depend on the rendering frame rate.
use std::time::Duration;

/// Simulation step in milliseconds (~60 updates per second)
pub const FIXED_STEP_MS: u32 = 16;

/// Maximum number of steps per frame to prevent spiral of death
const MAX_STEPS_PER_FRAME: u32 = 5;

/// Tick accumulator state
#[derive(Debug)]
pub struct FixedStep {
    step: Duration,
    /// Accumulated time not yet consumed by a step
    accumulator: Duration,
    paused: bool,
    /// Total steps executed
    step_count: u64,
    /// Total simulated time
    simulated: Duration,
}

impl Default for FixedStep {
    fn default() -> Self {
        Self::new(FIXED_STEP_MS)
    }
}

impl FixedStep {
    pub fn new(step_ms: u32) -> Self {
        Self {
            step: Duration::from_millis(u64::from(step_ms.max(1))),
            accumulator: Duration::ZERO,
            paused: false,
            step_count: 0,
            simulated: Duration::ZERO,
        }
    }

    /// Feed one frame's wall time, returns the number of fixed steps to run
    pub fn advance(&mut self, frame_time: Duration) -> u32 {
        // If paused, don't accumulate time for updates
        if self.paused {
            return 0;
        }

        self.accumulator += frame_time;

        let mut steps = 0;
        while self.accumulator >= self.step && steps < MAX_STEPS_PER_FRAME {
            self.accumulator -= self.step;
            steps += 1;
        }

        // Drop the backlog instead of catching up over several frames
        if steps == MAX_STEPS_PER_FRAME {
            self.accumulator = Duration::ZERO;
        }

        self.step_count += u64::from(steps);
        self.simulated += self.step * steps;
        steps
    }

    /// Length of one step in milliseconds
    pub fn step_ms(&self) -> u32 {
        self.step.as_millis() as u32
    }

    pub fn step_count(&self) -> u64 {
        self.step_count
    }

    pub fn simulated(&self) -> Duration {
        self.simulated
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn pause(&mut self) {
        if !self.paused {
            self.paused = true;
            log::info!("Simulation paused");
        }
    }

    pub fn resume(&mut self) {
        if self.paused {
            self.paused = false;
            // Reset accumulator to prevent update burst
            self.accumulator = Duration::ZERO;
            log::info!("Simulation resumed");
        }
    }

    pub fn toggle_pause(&mut self) {
        if self.paused {
            self.resume();
        } else {
            self.pause();
        }
    }
}
