// Input actions

use log::{debug, trace};
use rand::Rng;

use super::CharacterController;
use crate::game::characters::clips::{self, Stance, MELEE_ROLL_RANGE};
use crate::game::characters::providers::Collaborators;
use crate::game::characters::state::{CharacterState, Direction};
use crate::game::components::PowerupType;
use crate::game::events::GameEvent;

impl CharacterController {
    pub fn on_run(&mut self, parts: &mut Collaborators<'_>) {
        if self.frozen || self.state == CharacterState::Shooting {
            return;
        }
        self.enter(parts, clips::WALK, CharacterState::Walking);
    }

    pub fn on_stop_moving(&mut self, parts: &mut Collaborators<'_>) {
        if matches!(self.state, CharacterState::Shooting | CharacterState::Idle)
            || self.state.is_ducking()
        {
            return;
        }
        self.enter(parts, clips::STAND, CharacterState::Standing);
    }

    pub fn on_start_jumping(&mut self, parts: &mut Collaborators<'_>) {
        if self.frozen || self.state.is_jump_attack() {
            return;
        }
        self.enter(parts, clips::JUMP, CharacterState::Jumping);
    }

    pub fn on_land_on_ground(&mut self, parts: &mut Collaborators<'_>) {
        self.enter(parts, clips::STAND, CharacterState::Standing);
    }

    pub fn on_start_falling(&mut self, parts: &mut Collaborators<'_>) {
        // A jump attack finishes in the air, its last frame restores the state
        if self.state.is_jump_attack() {
            return;
        }
        self.enter(parts, clips::FALL, CharacterState::Falling);
    }

    pub fn on_direction_change(&mut self, direction: Direction, parts: &mut Collaborators<'_>) {
        if self.frozen {
            return;
        }
        parts.render.set_mirrored(direction == Direction::Left);
        self.direction = direction;
    }

    pub fn on_duck(&mut self, parts: &mut Collaborators<'_>) {
        if self.state.is_ducking() {
            return;
        }
        self.enter(parts, clips::DUCK, CharacterState::Ducking);
    }

    /// Duck released: the camera starts relaxing on the next tick
    pub fn on_stand(&mut self, parts: &mut Collaborators<'_>) {
        self.look.release_duck();
        self.state = CharacterState::Standing;
        self.apply_physics_state(parts);
    }

    pub fn on_climb(&mut self, parts: &mut Collaborators<'_>) {
        parts.animation.resume();
        self.enter(parts, clips::CLIMB, CharacterState::Climbing);
    }

    /// Hanging still on a ladder keeps the climb clip, paused
    pub fn on_stop_climbing(&mut self, parts: &mut Collaborators<'_>) {
        parts.animation.pause();
    }

    pub fn on_attack(&mut self, parts: &mut Collaborators<'_>) {
        if self.frozen || !self.state.can_attack() {
            trace!("Character {} cannot attack in {:?}", self.actor, self.state);
            return;
        }

        let stance = self.stance();
        let sword = PowerupType::SWORDS
            .iter()
            .any(|&sword| parts.powerups.has_powerup(sword));
        let roll = if stance == Stance::Standing && !sword {
            self.rng.gen_range(0..MELEE_ROLL_RANGE)
        } else {
            0
        };

        let clip = clips::melee_clip(stance, sword, roll);
        let state = match stance {
            Stance::Airborne => CharacterState::JumpAttacking,
            Stance::Ducking => CharacterState::DuckAttacking,
            Stance::Standing => CharacterState::Attacking,
        };
        self.enter(parts, clip, state);

        let sounds = &self.config.sounds;
        let sword_sound = if parts.powerups.has_powerup(PowerupType::FireSword) {
            Some(sounds.fire_sword)
        } else if parts.powerups.has_powerup(PowerupType::FrostSword) {
            Some(sounds.frost_sword)
        } else if parts.powerups.has_powerup(PowerupType::LightningSword) {
            Some(sounds.lightning_sword)
        } else {
            None
        };
        if let Some(sound) = sword_sound {
            self.bus.trigger(GameEvent::play_sound(sound));
        }
    }

    /// Start a ranged attack. `out_of_ammo` is the caller's view of the
    /// ammunition; an empty weapon plays a dry-fire clip.
    pub fn on_fire(&mut self, out_of_ammo: bool, parts: &mut Collaborators<'_>) {
        if self.frozen || !self.state.can_attack() {
            trace!("Character {} cannot attack in {:?}", self.actor, self.state);
            return;
        }

        let stance = self.stance();
        let ammo = parts.ammo.active_ammo_type();
        let loaded = !out_of_ammo && parts.ammo.can_fire();

        let clip = clips::ranged_clip(stance, ammo, loaded);
        let state = match stance {
            Stance::Airborne => CharacterState::JumpShooting,
            Stance::Ducking => CharacterState::DuckShooting,
            Stance::Standing => CharacterState::Shooting,
        };
        debug!("Character {} fires {:?} (loaded: {})", self.actor, ammo, loaded);
        self.enter(parts, clip, state);
    }

    pub fn on_attach_to_rope(&mut self, parts: &mut Collaborators<'_>) {
        parts.animation.set_clip(clips::SWING);
        parts.physics.set_gravity_scale(0.0);
        self.state = CharacterState::HoldingRope;
        parts.physics.on_attached_to_rope();
    }

    pub fn on_detach_from_rope(&mut self, parts: &mut Collaborators<'_>) {
        self.state = CharacterState::Jumping;
        parts.physics.on_detached_from_rope();
        parts.physics.restore_gravity_scale();
        self.apply_physics_state(parts);
    }

    pub(super) fn stance(&self) -> Stance {
        if self.state.is_airborne() {
            Stance::Airborne
        } else if self.state.is_ducking() {
            Stance::Ducking
        } else {
            Stance::Standing
        }
    }
}
