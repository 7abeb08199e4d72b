// Camera look offset driven by sustained ducking or looking up
//
// Holding duck pushes the camera down (positive offset), holding look-up
// pulls it up (negative offset). Releasing relaxes the offset back to zero
// at twice the speed.

use crate::core::math::{clamp, relax_toward_zero};

use super::state::CharacterState;

/// Tuning for the look integrator
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LookSettings {
    /// Sustained input time before the camera starts to move
    pub start_delay_ms: u32,
    pub max_offset_px: f64,
    pub speed_px_per_s: f64,
}

impl LookSettings {
    fn speed_px_per_ms(&self) -> f64 {
        self.speed_px_per_s / 1000.0
    }
}

/// Result of one integration step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookPhase {
    LookingDown,
    /// Character should show the "lookup" clip
    LookingUp,
    Relaxing,
}

/// Vertical camera offset and the input timers feeding it
#[derive(Debug, Clone, Default)]
pub struct LookOffset {
    offset_px: f64,
    ducking_ms: u32,
    looking_up_ms: u32,
}

impl LookOffset {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current camera offset in pixels, positive is down
    pub fn offset(&self) -> f64 {
        self.offset_px
    }

    pub fn ducking_ms(&self) -> u32 {
        self.ducking_ms
    }

    pub fn looking_up_ms(&self) -> u32 {
        self.looking_up_ms
    }

    /// Duck input held for another `ms`
    pub fn add_ducking_time(&mut self, ms: u32) {
        self.ducking_ms = self.ducking_ms.saturating_add(ms);
    }

    /// Look-up input held for another `ms`
    pub fn add_looking_up_time(&mut self, ms: u32) {
        self.looking_up_ms = self.looking_up_ms.saturating_add(ms);
    }

    /// Duck input released
    pub fn release_duck(&mut self) {
        self.ducking_ms = 0;
    }

    /// Look-up input released
    pub fn release_look_up(&mut self) {
        self.looking_up_ms = 0;
    }

    pub fn reset_timers(&mut self) {
        self.ducking_ms = 0;
        self.looking_up_ms = 0;
    }

    /// Advance the offset by `elapsed_ms` given the character state
    pub fn integrate(
        &mut self,
        elapsed_ms: u32,
        state: CharacterState,
        settings: &LookSettings,
    ) -> LookPhase {
        let max = settings.max_offset_px.abs();
        let step = settings.speed_px_per_ms() * f64::from(elapsed_ms);

        if self.ducking_ms > settings.start_delay_ms {
            self.offset_px = clamp(self.offset_px + step, -max, max);
            LookPhase::LookingDown
        } else if self.looking_up_ms > settings.start_delay_ms {
            self.offset_px = clamp(self.offset_px - step, -max, max);
            LookPhase::LookingUp
        } else {
            // Timers below the delay only count while the matching posture is held
            if state != CharacterState::Ducking {
                self.ducking_ms = 0;
            }
            if state != CharacterState::Standing {
                self.looking_up_ms = 0;
            }
            self.offset_px = relax_toward_zero(self.offset_px, step * 2.0);
            LookPhase::Relaxing
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const SETTINGS: LookSettings = LookSettings {
        start_delay_ms: 500,
        max_offset_px: 100.0,
        speed_px_per_s: 50.0,
    };

    #[test]
    fn test_ducking_pushes_offset_down() {
        let mut look = LookOffset::new();
        look.add_ducking_time(600);

        let phase = look.integrate(100, CharacterState::Ducking, &SETTINGS);

        assert_eq!(phase, LookPhase::LookingDown);
        assert_relative_eq!(look.offset(), 5.0);
    }

    #[test]
    fn test_release_relaxes_at_double_speed_and_snaps() {
        let mut look = LookOffset::new();
        look.add_ducking_time(600);
        look.integrate(100, CharacterState::Ducking, &SETTINGS);
        look.release_duck();

        let phase = look.integrate(25, CharacterState::Standing, &SETTINGS);
        assert_eq!(phase, LookPhase::Relaxing);
        assert_relative_eq!(look.offset(), 2.5);
        assert_eq!(look.ducking_ms(), 0);

        look.integrate(25, CharacterState::Standing, &SETTINGS);
        assert_eq!(look.offset(), 0.0);
    }

    #[test]
    fn test_offset_capped_at_max() {
        let mut look = LookOffset::new();
        look.add_looking_up_time(1000);

        for _ in 0..100 {
            assert_eq!(
                look.integrate(100, CharacterState::Standing, &SETTINGS),
                LookPhase::LookingUp
            );
        }
        assert_eq!(look.offset(), -100.0);
    }

    #[test]
    fn test_below_delay_does_not_move() {
        let mut look = LookOffset::new();
        look.add_ducking_time(500);
        look.integrate(100, CharacterState::Ducking, &SETTINGS);
        assert_eq!(look.offset(), 0.0);
    }

    #[test]
    fn test_look_up_timer_cleared_when_not_standing() {
        let mut look = LookOffset::new();
        look.add_looking_up_time(300);
        let phase = look.integrate(16, CharacterState::Walking, &SETTINGS);
        assert_eq!(phase, LookPhase::Relaxing);
        assert_eq!(look.looking_up_ms(), 0);
    }

    #[test]
    fn test_duck_attack_keeps_pushing_down() {
        let mut look = LookOffset::new();
        look.add_ducking_time(600);
        look.integrate(100, CharacterState::Ducking, &SETTINGS);

        let phase = look.integrate(100, CharacterState::DuckShooting, &SETTINGS);

        assert_eq!(phase, LookPhase::LookingDown);
        assert_eq!(look.ducking_ms(), 600);
        assert_relative_eq!(look.offset(), 10.0);
    }

    #[test]
    fn test_released_look_up_relaxes() {
        let mut look = LookOffset::new();
        look.add_looking_up_time(600);
        look.integrate(100, CharacterState::Standing, &SETTINGS);
        look.release_look_up();

        let phase = look.integrate(50, CharacterState::Standing, &SETTINGS);
        assert_eq!(phase, LookPhase::Relaxing);
        assert_eq!(look.offset(), 0.0);
    }
}
