// Collaborator interfaces of the character controller
//
// The controller owns none of its collaborators. The owning entity lends
// them for the duration of one call through `Collaborators`.

use glam::Vec2;

use super::config::Session;
use crate::engine::animation::AnimationPlayer;
use crate::engine::observer::ObserverId;
use crate::engine::physics::KinematicBody;
use crate::engine::render::SpriteState;
use crate::game::components::{
    AmmoPouch, AmmoType, FollowableMarker, Health, PowerupInventory, PowerupType,
};

/// Clip playback
pub trait AnimationProvider {
    fn set_clip(&mut self, name: &str);
    fn pause(&mut self);
    fn resume(&mut self);
    fn current_clip_name(&self) -> &str;
    fn current_clip_paused(&self) -> bool;
    fn add_observer(&mut self) -> ObserverId;
    fn remove_observer(&mut self, id: ObserverId);
}

/// Platformer physics flags and gravity control
pub trait PhysicsProvider {
    fn is_falling(&self) -> bool;
    fn is_jumping(&self) -> bool;
    fn is_on_ground(&self) -> bool;
    fn gravity_scale(&self) -> f32;
    fn set_gravity_scale(&mut self, scale: f32);
    fn restore_gravity_scale(&mut self);
    fn on_attached_to_rope(&mut self);
    fn on_detached_from_rope(&mut self);
}

pub trait RenderProvider {
    fn set_mirrored(&mut self, mirrored: bool);
    fn is_mirrored(&self) -> bool;
    fn set_visible(&mut self, visible: bool);
}

pub trait AmmoProvider {
    fn active_ammo_type(&self) -> AmmoType;
    fn can_fire(&self) -> bool;
    fn on_fired(&mut self);
}

pub trait PowerupProvider {
    fn has_powerup(&self, powerup: PowerupType) -> bool;
}

pub trait HealthProvider {
    fn set_invulnerable(&mut self, invulnerable: bool);
    fn is_invulnerable(&self) -> bool;
    fn current_health(&self) -> i32;
    fn add_observer(&mut self) -> ObserverId;
    fn remove_observer(&mut self, id: ObserverId);
}

/// Optional cue shown above the character while it idles
pub trait ExclamationCue {
    fn activate(&mut self, duration_ms: u32);
}

/// Sibling components lent to the controller for one call
pub struct Collaborators<'a> {
    pub animation: &'a mut dyn AnimationProvider,
    pub physics: &'a mut dyn PhysicsProvider,
    pub render: &'a mut dyn RenderProvider,
    pub ammo: &'a mut dyn AmmoProvider,
    pub powerups: &'a dyn PowerupProvider,
    pub health: &'a mut dyn HealthProvider,
    pub exclamation: Option<&'a mut dyn ExclamationCue>,
    /// Character position snapshot
    pub position: Vec2,
    pub session: Session,
}

impl AnimationProvider for AnimationPlayer {
    fn set_clip(&mut self, name: &str) {
        self.play(name);
    }

    fn pause(&mut self) {
        AnimationPlayer::pause(self);
    }

    fn resume(&mut self) {
        AnimationPlayer::resume(self);
    }

    fn current_clip_name(&self) -> &str {
        self.current_animation()
    }

    fn current_clip_paused(&self) -> bool {
        self.is_paused()
    }

    fn add_observer(&mut self) -> ObserverId {
        AnimationPlayer::add_observer(self)
    }

    fn remove_observer(&mut self, id: ObserverId) {
        AnimationPlayer::remove_observer(self, id);
    }
}

impl PhysicsProvider for KinematicBody {
    fn is_falling(&self) -> bool {
        KinematicBody::is_falling(self)
    }

    fn is_jumping(&self) -> bool {
        KinematicBody::is_jumping(self)
    }

    fn is_on_ground(&self) -> bool {
        KinematicBody::is_on_ground(self)
    }

    fn gravity_scale(&self) -> f32 {
        KinematicBody::gravity_scale(self)
    }

    fn set_gravity_scale(&mut self, scale: f32) {
        KinematicBody::set_gravity_scale(self, scale);
    }

    fn restore_gravity_scale(&mut self) {
        KinematicBody::restore_gravity_scale(self);
    }

    fn on_attached_to_rope(&mut self) {
        self.attach_to_rope();
    }

    fn on_detached_from_rope(&mut self) {
        self.detach_from_rope();
    }
}

impl RenderProvider for SpriteState {
    fn set_mirrored(&mut self, mirrored: bool) {
        SpriteState::set_mirrored(self, mirrored);
    }

    fn is_mirrored(&self) -> bool {
        self.mirrored
    }

    fn set_visible(&mut self, visible: bool) {
        SpriteState::set_visible(self, visible);
    }
}

impl AmmoProvider for AmmoPouch {
    fn active_ammo_type(&self) -> AmmoType {
        AmmoPouch::active_ammo_type(self)
    }

    fn can_fire(&self) -> bool {
        AmmoPouch::can_fire(self)
    }

    fn on_fired(&mut self) {
        AmmoPouch::on_fired(self);
    }
}

impl PowerupProvider for PowerupInventory {
    fn has_powerup(&self, powerup: PowerupType) -> bool {
        PowerupInventory::has_powerup(self, powerup)
    }
}

impl HealthProvider for Health {
    fn set_invulnerable(&mut self, invulnerable: bool) {
        Health::set_invulnerable(self, invulnerable);
    }

    fn is_invulnerable(&self) -> bool {
        Health::is_invulnerable(self)
    }

    fn current_health(&self) -> i32 {
        self.current()
    }

    fn add_observer(&mut self) -> ObserverId {
        Health::add_observer(self)
    }

    fn remove_observer(&mut self, id: ObserverId) {
        Health::remove_observer(self, id);
    }
}

impl ExclamationCue for FollowableMarker {
    fn activate(&mut self, duration_ms: u32) {
        FollowableMarker::activate(self, duration_ms);
    }
}
