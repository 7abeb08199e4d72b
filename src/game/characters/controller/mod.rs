// Player character state controller
//
// Turns input actions, animation notifications and health notifications
// into one consistent character state, animation clip, physics setup and a
// stream of gameplay events.

mod actions;
mod reactions;
#[cfg(test)]
pub(crate) mod testing;

use log::{debug, info, warn};
use rand::RngCore;

use super::clips;
use super::config::ControllerConfig;
use super::idle_quotes::IdleQuoteSequencer;
use super::look_offset::{LookOffset, LookPhase, LookSettings};
use super::providers::{AnimationProvider, Collaborators, HealthProvider};
use super::state::{CharacterState, Direction};
use crate::engine::events::ListenerId;
use crate::engine::observer::ObserverId;
use crate::game::components::PowerupType;
use crate::game::events::{ActorId, EventKind, GameEvent, GameEventBus};

/// Invulnerability countdown started when the character takes damage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DamageWindow {
    pub remaining_ms: u32,
    pub duration_ms: u32,
}

impl DamageWindow {
    pub fn start(&mut self, duration_ms: u32) {
        self.duration_ms = duration_ms;
        self.remaining_ms = duration_ms;
    }

    pub fn is_active(&self) -> bool {
        self.remaining_ms > 0
    }

    /// Count down, returns true on the tick the window runs out
    pub fn tick(&mut self, elapsed_ms: u32) -> bool {
        if self.remaining_ms == 0 {
            return false;
        }
        self.remaining_ms = self.remaining_ms.saturating_sub(elapsed_ms);
        self.remaining_ms == 0
    }
}

/// Behavior controller of the player character
pub struct CharacterController {
    actor: ActorId,
    config: ControllerConfig,

    state: CharacterState,
    /// State at the end of the previous tick
    previous_state: CharacterState,
    direction: Direction,
    frozen: bool,
    active: bool,

    /// Time spent standing still since the last idle quote
    idle_ms: u32,
    idle_quotes: IdleQuoteSequencer,
    damage_window: DamageWindow,
    take_damage_duration_ms: u32,
    in_boss_fight: bool,
    look: LookOffset,

    rng: Box<dyn RngCore>,
    bus: GameEventBus,
    bus_listener: ListenerId,
    animation_observer: Option<ObserverId>,
    health_observer: Option<ObserverId>,
}

impl CharacterController {
    /// Create a controller for `actor`. It listens for boss-fight events
    /// right away; observers are registered by `bind`.
    pub fn new(
        actor: ActorId,
        config: ControllerConfig,
        bus: GameEventBus,
        mut rng: Box<dyn RngCore>,
    ) -> Self {
        let idle_quotes = IdleQuoteSequencer::new(config.sounds.idle_quotes.len(), &mut rng);
        let bus_listener =
            bus.subscribe(&[EventKind::BossFightStarted, EventKind::BossFightEnded]);

        Self {
            actor,
            config,
            state: CharacterState::None,
            previous_state: CharacterState::None,
            direction: Direction::Right,
            frozen: false,
            active: config.is_active,
            idle_ms: 0,
            idle_quotes,
            damage_window: DamageWindow::default(),
            take_damage_duration_ms: config.take_damage_duration_ms,
            in_boss_fight: false,
            look: LookOffset::new(),
            rng,
            bus,
            bus_listener,
            animation_observer: None,
            health_observer: None,
        }
    }

    /// Wire the controller to its sibling components
    pub fn bind(&mut self, parts: &mut Collaborators<'_>) {
        if self.is_bound() {
            self.unbind(&mut *parts.animation, &mut *parts.health);
        }

        self.animation_observer = Some(parts.animation.add_observer());
        self.health_observer = Some(parts.health.add_observer());

        if self.active {
            self.bus.trigger(GameEvent::AttachActor { actor: self.actor });
        }

        self.apply_physics_state(parts);
        info!(
            "Character {} bound in state {:?} (observers {:?})",
            self.actor,
            self.state,
            [self.animation_observer, self.health_observer].map(|id| id.map(ObserverId::raw))
        );
    }

    /// Leave the animation and health observer lists
    pub fn unbind(
        &mut self,
        animation: &mut dyn AnimationProvider,
        health: &mut dyn HealthProvider,
    ) {
        if let Some(id) = self.animation_observer.take() {
            animation.remove_observer(id);
        }
        if let Some(id) = self.health_observer.take() {
            health.remove_observer(id);
        }
        debug!("Character {} unbound", self.actor);
    }

    pub fn is_bound(&self) -> bool {
        self.animation_observer.is_some() || self.health_observer.is_some()
    }

    pub fn animation_observer(&self) -> Option<ObserverId> {
        self.animation_observer
    }

    pub fn health_observer(&self) -> Option<ObserverId> {
        self.health_observer
    }

    pub fn actor(&self) -> ActorId {
        self.actor
    }

    pub fn state(&self) -> CharacterState {
        self.state
    }

    pub fn previous_state(&self) -> CharacterState {
        self.previous_state
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    /// Freeze input handling (cutscenes, level end)
    pub fn set_frozen(&mut self, frozen: bool) {
        self.frozen = frozen;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    pub fn is_in_boss_fight(&self) -> bool {
        self.in_boss_fight
    }

    pub fn damage_window(&self) -> DamageWindow {
        self.damage_window
    }

    /// Vertical camera offset in pixels, positive is down
    pub fn camera_offset(&self) -> f64 {
        self.look.offset()
    }

    pub fn is_ducking(&self) -> bool {
        self.state.is_ducking()
    }

    pub fn is_attacking_or_shooting(&self) -> bool {
        self.state.is_attacking_or_shooting()
    }

    /// Horizontal movement is allowed
    pub fn can_move(&self) -> bool {
        self.state.can_move() && !self.frozen
    }

    /// Climbing is read from the clip: a paused climb clip means hanging still
    pub fn is_climbing(&self, animation: &dyn AnimationProvider) -> bool {
        animation.current_clip_name().contains(clips::CLIMB) && !animation.current_clip_paused()
    }

    /// Duck input held for another `ms`
    pub fn add_ducking_time(&mut self, ms: u32) {
        self.look.add_ducking_time(ms);
    }

    /// Look-up input held for another `ms`
    pub fn add_looking_up_time(&mut self, ms: u32) {
        self.look.add_looking_up_time(ms);
    }

    pub fn release_look_up(&mut self) {
        self.look.release_look_up();
    }

    /// Per-tick update
    pub fn update(&mut self, elapsed_ms: u32, parts: &mut Collaborators<'_>) {
        self.handle_bus_events();

        // Idle quotes
        if matches!(self.state, CharacterState::Standing | CharacterState::Idle) {
            self.idle_ms = self.idle_ms.saturating_add(elapsed_ms);
            if self.idle_ms > self.config.idle_quote_interval_ms {
                self.play_idle_quote(parts);
            }
        } else {
            self.idle_ms = 0;
        }

        // Invulnerability left over from taking damage
        if self.damage_window.tick(elapsed_ms)
            && !parts.powerups.has_powerup(PowerupType::Invulnerability)
        {
            parts.health.set_invulnerable(false);
        }

        let settings = LookSettings {
            start_delay_ms: self.config.look_start_delay_ms,
            max_offset_px: self.config.max_look_offset_px,
            speed_px_per_s: self.config.look_speed_px_per_s,
        };
        if self.look.integrate(elapsed_ms, self.state, &settings) == LookPhase::LookingUp {
            parts.animation.set_clip(clips::LOOKUP);
        }

        if self.frozen {
            parts.animation.set_clip(clips::STAND);
            self.idle_ms = 0;
            self.look.reset_timers();
        }

        if self.state == CharacterState::HoldingRope {
            self.idle_ms = 0;
            self.look.reset_timers();
        }

        self.previous_state = self.state;
    }

    fn handle_bus_events(&mut self) {
        for event in self.bus.drain(self.bus_listener) {
            match event {
                GameEvent::BossFightStarted => {
                    self.take_damage_duration_ms = self.config.take_damage_duration_ms;
                    self.in_boss_fight = true;
                    info!("Character {} entered a boss fight", self.actor);
                }
                GameEvent::BossFightEnded { won } => {
                    self.take_damage_duration_ms = self.config.take_damage_duration_ms;
                    self.in_boss_fight = false;
                    info!("Character {} left the boss fight (won: {})", self.actor, won);
                }
                _ => {}
            }
        }
    }

    fn play_idle_quote(&mut self, parts: &mut Collaborators<'_>) {
        if let Some(idx) = self.idle_quotes.draw() {
            if let Some(sound) = self.config.sounds.idle_quotes.get(idx) {
                self.bus.trigger(GameEvent::play_sound(*sound));
            }
        }

        if let Some(cue) = parts.exclamation.as_deref_mut() {
            cue.activate(self.config.exclamation_duration_ms);
        }

        self.enter(parts, clips::IDLE, CharacterState::Idle);
        self.idle_ms = 0;
    }

    /// Switch clip and state together
    fn enter(&mut self, parts: &mut Collaborators<'_>, clip: &str, state: CharacterState) {
        parts.animation.set_clip(clip);
        if self.state != state {
            debug!("Character {}: {:?} -> {:?} ({})", self.actor, self.state, state, clip);
        }
        self.state = state;
    }

    /// Derive state and clip from the physics flags. Used when a scripted
    /// clip (attack, flinch, death) hands control back to movement.
    pub fn apply_physics_state(&mut self, parts: &mut Collaborators<'_>) {
        if parts.physics.is_falling() {
            self.enter(parts, clips::FALL, CharacterState::Falling);
        } else if parts.physics.is_jumping() {
            self.enter(parts, clips::JUMP, CharacterState::Jumping);
        } else if self.state.is_ducking() {
            self.enter(parts, clips::DUCK, CharacterState::Ducking);
        } else if parts.physics.is_on_ground() {
            self.enter(parts, clips::STAND, CharacterState::Standing);
        } else if self.state == CharacterState::HoldingRope {
            parts.animation.set_clip(clips::SWING);
            parts.physics.set_gravity_scale(0.0);
            return;
        } else {
            warn!(
                "Character {}: unknown physics state in {:?}, assuming falling",
                self.actor, self.state
            );
            self.enter(parts, clips::FALL, CharacterState::Standing);
        }

        parts.physics.restore_gravity_scale();
    }
}

impl Drop for CharacterController {
    fn drop(&mut self) {
        self.bus.unsubscribe(self.bus_listener);
        if self.is_bound() {
            warn!("Character {} controller dropped while still observing", self.actor);
        }
    }
}
