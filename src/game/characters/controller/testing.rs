// Test rig: a controller bound to the reference components

use glam::Vec2;
use rand::rngs::StdRng;
use rand::SeedableRng;

use super::CharacterController;
use crate::engine::animation::AnimationPlayer;
use crate::engine::events::ListenerId;
use crate::engine::physics::{KinematicBody, DEFAULT_GRAVITY_SCALE};
use crate::engine::render::SpriteState;
use crate::game::characters::config::{ControllerConfig, Session, BASE_CONFIG};
use crate::game::characters::providers::Collaborators;
use crate::game::components::{AmmoPouch, FollowableMarker, Health, PowerupInventory};
use crate::game::events::{ActorId, GameEvent, GameEventBus};

pub(crate) struct Rig {
    pub animation: AnimationPlayer,
    pub physics: KinematicBody,
    pub render: SpriteState,
    pub ammo: AmmoPouch,
    pub powerups: PowerupInventory,
    pub health: Health,
    pub marker: FollowableMarker,
    pub position: Vec2,
    pub session: Session,
    pub bus: GameEventBus,
    pub listener: ListenerId,
    pub controller: CharacterController,
}

impl Rig {
    pub const ACTOR: ActorId = 1;

    pub fn new() -> Self {
        Self::with_config(BASE_CONFIG, 7)
    }

    pub fn with_config(config: ControllerConfig, seed: u64) -> Self {
        let bus = GameEventBus::new();
        let listener = bus.subscribe_all();
        let controller = CharacterController::new(
            Self::ACTOR,
            config,
            bus.clone(),
            Box::new(StdRng::seed_from_u64(seed)),
        );

        let mut rig = Self {
            animation: AnimationPlayer::with_character_clips(),
            physics: KinematicBody::new(DEFAULT_GRAVITY_SCALE),
            render: SpriteState::default(),
            ammo: AmmoPouch::default(),
            powerups: PowerupInventory::new(),
            health: Health::new(100),
            marker: FollowableMarker::new(),
            position: Vec2::new(100.0, 200.0),
            session: Session::default(),
            bus,
            listener,
            controller,
        };
        rig.act(|c, p| c.bind(p));
        rig
    }

    pub fn split(&mut self) -> (&mut CharacterController, Collaborators<'_>) {
        let parts = Collaborators {
            animation: &mut self.animation,
            physics: &mut self.physics,
            render: &mut self.render,
            ammo: &mut self.ammo,
            powerups: &self.powerups,
            health: &mut self.health,
            exclamation: Some(&mut self.marker),
            position: self.position,
            session: self.session,
        };
        (&mut self.controller, parts)
    }

    pub fn act<R>(
        &mut self,
        f: impl FnOnce(&mut CharacterController, &mut Collaborators<'_>) -> R,
    ) -> R {
        let (controller, mut parts) = self.split();
        f(controller, &mut parts)
    }

    pub fn tick(&mut self, elapsed_ms: u32) {
        self.act(|c, p| c.update(elapsed_ms, p));
    }

    /// Advance the animation in small steps, handing each step's events to
    /// the controller so clip switches take effect right away
    pub fn animate(&mut self, elapsed_ms: u32) {
        const STEP_MS: u32 = 10;
        let Some(observer) = self.controller.animation_observer() else {
            return;
        };

        let mut remaining = elapsed_ms;
        while remaining > 0 {
            let step = remaining.min(STEP_MS);
            remaining -= step;
            self.animation.update(step);
            for event in self.animation.take_events(observer) {
                self.act(|c, p| c.on_animation_event(&event, p));
            }
        }
    }

    /// Publish queued events and collect everything seen so far
    pub fn events(&mut self) -> Vec<GameEvent> {
        self.bus.dispatch_queued();
        self.bus.drain(self.listener)
    }
}
