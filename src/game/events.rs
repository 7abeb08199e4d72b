// Gameplay events published on the shared bus.
//
// The character controller publishes spawn, sound and lifecycle events and
// listens for boss-fight notifications. Sound playback, actor spawning and
// the boss encounter itself live outside the controller.

use glam::Vec2;

use super::characters::state::Direction;
use super::components::ammo::AmmoType;
use super::components::health::DamageType;
use crate::engine::events::{BusEvent, EventBus};

/// Identifier of an actor in the world
pub type ActorId = u32;

/// Bus carrying gameplay events
pub type GameEventBus = EventBus<GameEvent>;

/// What a spawned projectile is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProjectileKind {
    /// Regular ranged weapon shot
    Ammo(AmmoType),
    FireSword,
    FrostSword,
    LightningSword,
}

/// One-off visual effects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EffectKind {
    /// Spark shown where the character was hit
    BlueHitPoint,
    /// Splash when the character sinks into tar or water
    TarSplash,
}

/// Events exchanged between the character and the rest of the game
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    /// A controllable actor wants the camera and input attached to it
    AttachActor { actor: ActorId },
    /// The death animation finished
    CharacterDied { actor: ActorId, position: Vec2 },
    HealthBelowZero { actor: ActorId },
    BossFightStarted,
    BossFightEnded { won: bool },
    RequestPlaySound { sound: String },
    SpawnProjectile {
        kind: ProjectileKind,
        direction: Direction,
        position: Vec2,
    },
    /// Short-lived melee hit-box
    SpawnAreaDamage {
        position: Vec2,
        size: Vec2,
        damage: i32,
        damage_type: DamageType,
        direction: Direction,
    },
    SpawnEffect { effect: EffectKind, position: Vec2 },
}

/// Subscription filter for [`GameEvent`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    AttachActor,
    CharacterDied,
    HealthBelowZero,
    BossFightStarted,
    BossFightEnded,
    RequestPlaySound,
    SpawnProjectile,
    SpawnAreaDamage,
    SpawnEffect,
}

impl BusEvent for GameEvent {
    type Kind = EventKind;

    fn kind(&self) -> EventKind {
        match self {
            Self::AttachActor { .. } => EventKind::AttachActor,
            Self::CharacterDied { .. } => EventKind::CharacterDied,
            Self::HealthBelowZero { .. } => EventKind::HealthBelowZero,
            Self::BossFightStarted => EventKind::BossFightStarted,
            Self::BossFightEnded { .. } => EventKind::BossFightEnded,
            Self::RequestPlaySound { .. } => EventKind::RequestPlaySound,
            Self::SpawnProjectile { .. } => EventKind::SpawnProjectile,
            Self::SpawnAreaDamage { .. } => EventKind::SpawnAreaDamage,
            Self::SpawnEffect { .. } => EventKind::SpawnEffect,
        }
    }
}

impl GameEvent {
    pub fn play_sound(sound: impl Into<String>) -> Self {
        Self::RequestPlaySound {
            sound: sound.into(),
        }
    }
}
