// Character entity: owns the sibling components and the controller

use glam::Vec2;
use log::info;
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

use super::action::CharacterAction;
use super::config::{ControllerConfig, Session};
use super::controller::CharacterController;
use super::error::{ComponentKind, ControllerError};
use super::providers::{Collaborators, ExclamationCue};
use super::state::CharacterState;
use crate::engine::animation::AnimationPlayer;
use crate::engine::physics::KinematicBody;
use crate::engine::render::SpriteState;
use crate::game::components::{
    AmmoPouch, DamageType, FollowableMarker, Health, HealthEvent, PowerupInventory,
};
use crate::game::events::{ActorId, GameEventBus};

/// A player character with every component the controller talks to
pub struct Character {
    pub animation: AnimationPlayer,
    pub physics: KinematicBody,
    pub render: SpriteState,
    pub ammo: AmmoPouch,
    pub powerups: PowerupInventory,
    pub health: Health,
    /// Exclamation mark shown while idling
    pub marker: Option<FollowableMarker>,
    pub position: Vec2,
    pub session: Session,
    controller: CharacterController,
}

impl Character {
    pub fn builder(actor: ActorId, bus: GameEventBus) -> CharacterBuilder {
        CharacterBuilder::new(actor, bus)
    }

    pub fn id(&self) -> ActorId {
        self.controller.actor()
    }

    pub fn controller(&self) -> &CharacterController {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut CharacterController {
        &mut self.controller
    }

    pub fn state(&self) -> CharacterState {
        self.controller.state()
    }

    pub fn is_alive(&self) -> bool {
        self.health.current() > 0
    }

    /// Lend the components to the controller for one call
    fn split(&mut self) -> (&mut CharacterController, Collaborators<'_>) {
        let parts = Collaborators {
            animation: &mut self.animation,
            physics: &mut self.physics,
            render: &mut self.render,
            ammo: &mut self.ammo,
            powerups: &self.powerups,
            health: &mut self.health,
            exclamation: self
                .marker
                .as_mut()
                .map(|marker| marker as &mut dyn ExclamationCue),
            position: self.position,
            session: self.session,
        };
        (&mut self.controller, parts)
    }

    /// Route one input action to the controller
    pub fn dispatch(&mut self, action: CharacterAction) {
        let (controller, mut parts) = self.split();
        let parts = &mut parts;
        match action {
            CharacterAction::Run => controller.on_run(parts),
            CharacterAction::StopMoving => controller.on_stop_moving(parts),
            CharacterAction::StartJump => controller.on_start_jumping(parts),
            CharacterAction::LandOnGround => controller.on_land_on_ground(parts),
            CharacterAction::StartFalling => controller.on_start_falling(parts),
            CharacterAction::ChangeDirection(direction) => {
                controller.on_direction_change(direction, parts)
            }
            CharacterAction::Duck => controller.on_duck(parts),
            CharacterAction::Stand => controller.on_stand(parts),
            CharacterAction::Climb => controller.on_climb(parts),
            CharacterAction::StopClimbing => controller.on_stop_climbing(parts),
            CharacterAction::Attack => controller.on_attack(parts),
            CharacterAction::Fire { out_of_ammo } => controller.on_fire(out_of_ammo, parts),
            CharacterAction::AttachToRope => controller.on_attach_to_rope(parts),
            CharacterAction::DetachFromRope => controller.on_detach_from_rope(parts),
            CharacterAction::DuckHeld(ms) => controller.add_ducking_time(ms),
            CharacterAction::LookUpHeld(ms) => controller.add_looking_up_time(ms),
            CharacterAction::LookUpReleased => controller.release_look_up(),
        }
    }

    /// Apply damage and let the controller react before returning.
    /// Returns the health actually removed.
    pub fn apply_damage(
        &mut self,
        amount: i32,
        damage_type: DamageType,
        impact_point: Vec2,
    ) -> Result<i32, ControllerError> {
        let removed = self.health.apply_damage(amount, damage_type, impact_point);
        self.deliver_health_events()?;
        Ok(removed)
    }

    fn deliver_health_events(&mut self) -> Result<(), ControllerError> {
        let Some(observer) = self.controller.health_observer() else {
            return Ok(());
        };

        for event in self.health.take_events(observer) {
            let (controller, mut parts) = self.split();
            match event {
                HealthEvent::Changed {
                    old,
                    new,
                    damage_type,
                    impact_point,
                } => controller.on_health_changed(old, new, damage_type, impact_point, &mut parts),
                HealthEvent::BelowZero { damage_type } => {
                    controller.on_health_below_zero(damage_type, &mut parts)?
                }
            }
        }
        Ok(())
    }

    /// Advance the character by `elapsed_ms`
    pub fn update(&mut self, elapsed_ms: u32) {
        self.powerups.update(elapsed_ms);
        if let Some(marker) = self.marker.as_mut() {
            marker.update(elapsed_ms);
        }

        self.animation.update(elapsed_ms);
        if let Some(observer) = self.controller.animation_observer() {
            for event in self.animation.take_events(observer) {
                // Left over from a clip the controller already switched away from
                if event.clip_name != self.animation.current_animation() {
                    continue;
                }
                let (controller, mut parts) = self.split();
                controller.on_animation_event(&event, &mut parts);
            }
        }

        let (controller, mut parts) = self.split();
        controller.update(elapsed_ms, &mut parts);
    }
}

impl Drop for Character {
    fn drop(&mut self) {
        self.controller.unbind(&mut self.animation, &mut self.health);
    }
}

/// Assembles a [`Character`]. Every component except the exclamation
/// marker is required.
pub struct CharacterBuilder {
    actor: ActorId,
    bus: GameEventBus,
    config: ControllerConfig,
    session: Session,
    rng: Option<Box<dyn RngCore>>,
    animation: Option<AnimationPlayer>,
    physics: Option<KinematicBody>,
    render: Option<SpriteState>,
    ammo: Option<AmmoPouch>,
    powerups: Option<PowerupInventory>,
    health: Option<Health>,
    marker: Option<FollowableMarker>,
    position: Option<Vec2>,
}

impl CharacterBuilder {
    pub fn new(actor: ActorId, bus: GameEventBus) -> Self {
        Self {
            actor,
            bus,
            config: ControllerConfig::default(),
            session: Session::default(),
            rng: None,
            animation: None,
            physics: None,
            render: None,
            ammo: None,
            powerups: None,
            health: None,
            marker: None,
            position: None,
        }
    }

    /// Every component in its standard setup
    pub fn with_standard_components(actor: ActorId, bus: GameEventBus) -> Self {
        Self::new(actor, bus)
            .animation(AnimationPlayer::with_character_clips())
            .physics(KinematicBody::default())
            .render(SpriteState::default())
            .ammo(AmmoPouch::default())
            .powerups(PowerupInventory::new())
            .health(Health::new(100))
            .marker(FollowableMarker::new())
            .position(Vec2::ZERO)
    }

    pub fn config(mut self, config: ControllerConfig) -> Self {
        self.config = config;
        self
    }

    pub fn session(mut self, session: Session) -> Self {
        self.session = session;
        self
    }

    /// Random source for clip and sound picks, seeded from entropy if unset
    pub fn rng(mut self, rng: impl RngCore + 'static) -> Self {
        self.rng = Some(Box::new(rng));
        self
    }

    pub fn animation(mut self, animation: AnimationPlayer) -> Self {
        self.animation = Some(animation);
        self
    }

    pub fn physics(mut self, physics: KinematicBody) -> Self {
        self.physics = Some(physics);
        self
    }

    pub fn render(mut self, render: SpriteState) -> Self {
        self.render = Some(render);
        self
    }

    pub fn ammo(mut self, ammo: AmmoPouch) -> Self {
        self.ammo = Some(ammo);
        self
    }

    pub fn powerups(mut self, powerups: PowerupInventory) -> Self {
        self.powerups = Some(powerups);
        self
    }

    pub fn health(mut self, health: Health) -> Self {
        self.health = Some(health);
        self
    }

    pub fn marker(mut self, marker: FollowableMarker) -> Self {
        self.marker = Some(marker);
        self
    }

    pub fn position(mut self, position: Vec2) -> Self {
        self.position = Some(position);
        self
    }

    /// Build and bind the character
    pub fn build(self) -> Result<Character, ControllerError> {
        let missing = ControllerError::MissingComponent;
        let animation = self.animation.ok_or(missing(ComponentKind::Animation))?;
        let render = self.render.ok_or(missing(ComponentKind::Render))?;
        let position = self.position.ok_or(missing(ComponentKind::Position))?;
        let physics = self.physics.ok_or(missing(ComponentKind::Physics))?;
        let ammo = self.ammo.ok_or(missing(ComponentKind::Ammo))?;
        let powerups = self.powerups.ok_or(missing(ComponentKind::Powerup))?;
        let health = self.health.ok_or(missing(ComponentKind::Health))?;

        let rng = self
            .rng
            .unwrap_or_else(|| Box::new(StdRng::from_entropy()));
        let controller = CharacterController::new(self.actor, self.config, self.bus, rng);

        let mut character = Character {
            animation,
            physics,
            render,
            ammo,
            powerups,
            health,
            marker: self.marker,
            position,
            session: self.session,
            controller,
        };

        let (controller, mut parts) = character.split();
        controller.bind(&mut parts);
        info!("Character {} spawned at {:?}", character.id(), character.position);

        Ok(character)
    }
}
