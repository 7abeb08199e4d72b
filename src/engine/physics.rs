// Kinematic character body
//
// Holds the movement flags reported by the platformer physics step and the
// gravity scale the character controller adjusts.

use log::debug;

/// Default gravity multiplier for the player body
pub const DEFAULT_GRAVITY_SCALE: f32 = 1.0;

/// Vertical movement phase reported by the physics step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MovementPhase {
    #[default]
    OnGround,
    Jumping,
    Falling,
    /// Neither grounded nor moving vertically (e.g. hanging on a rope)
    Suspended,
}

/// Physics body of a platformer character
#[derive(Debug, Clone)]
pub struct KinematicBody {
    phase: MovementPhase,
    gravity_scale: f32,
    default_gravity_scale: f32,
    attached_to_rope: bool,
}

impl Default for KinematicBody {
    fn default() -> Self {
        Self::new(DEFAULT_GRAVITY_SCALE)
    }
}

impl KinematicBody {
    pub fn new(default_gravity_scale: f32) -> Self {
        Self {
            phase: MovementPhase::OnGround,
            gravity_scale: default_gravity_scale,
            default_gravity_scale,
            attached_to_rope: false,
        }
    }

    /// Set the movement phase (driven by the physics step)
    pub fn set_phase(&mut self, phase: MovementPhase) {
        self.phase = phase;
    }

    pub fn phase(&self) -> MovementPhase {
        self.phase
    }

    pub fn is_falling(&self) -> bool {
        self.phase == MovementPhase::Falling
    }

    pub fn is_jumping(&self) -> bool {
        self.phase == MovementPhase::Jumping
    }

    pub fn is_on_ground(&self) -> bool {
        self.phase == MovementPhase::OnGround
    }

    pub fn gravity_scale(&self) -> f32 {
        self.gravity_scale
    }

    pub fn default_gravity_scale(&self) -> f32 {
        self.default_gravity_scale
    }

    pub fn set_gravity_scale(&mut self, scale: f32) {
        self.gravity_scale = scale;
    }

    /// Go back to the gravity scale the body was created with
    pub fn restore_gravity_scale(&mut self) {
        self.gravity_scale = self.default_gravity_scale;
    }

    pub fn is_attached_to_rope(&self) -> bool {
        self.attached_to_rope
    }

    pub fn attach_to_rope(&mut self) {
        debug!("Body attached to rope");
        self.attached_to_rope = true;
        self.phase = MovementPhase::Suspended;
    }

    pub fn detach_from_rope(&mut self) {
        debug!("Body detached from rope");
        self.attached_to_rope = false;
        self.phase = MovementPhase::Jumping;
    }
}
