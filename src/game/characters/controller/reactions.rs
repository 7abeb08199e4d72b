// Animation, damage and death reactors

use glam::Vec2;
use log::{debug, error, info};
use rand::Rng;

use super::CharacterController;
use crate::engine::animation::AnimationEvent;
use crate::game::characters::clips;
use crate::game::characters::config::{DeathTileCase, DeathTileRule};
use crate::game::characters::error::ControllerError;
use crate::game::characters::providers::Collaborators;
use crate::game::characters::state::CharacterState;
use crate::game::components::{DamageType, PowerupType};
use crate::game::events::{EffectKind, GameEvent, ProjectileKind};

/// Muzzle position relative to the character, facing right
const PROJECTILE_OFFSET: Vec2 = Vec2::new(50.0, -20.0);
/// Extra drop of the muzzle while ducking
const DUCK_PROJECTILE_DROP: f32 = 40.0;

const MELEE_OFFSET: Vec2 = Vec2::new(60.0, 20.0);
const JUMP_MELEE_SHIFT: Vec2 = Vec2::new(5.0, -10.0);
const MELEE_HITBOX_SIZE: Vec2 = Vec2::new(50.0, 25.0);
const MELEE_DAMAGE: i32 = 10;

/// Knockback on damage, facing right
const KNOCKBACK: Vec2 = Vec2::new(-10.0, 0.0);

impl CharacterController {
    /// Dispatch one animation notification
    pub fn on_animation_event(&mut self, event: &AnimationEvent, parts: &mut Collaborators<'_>) {
        if event.is_loop_boundary {
            self.on_animation_looped(&event.clip_name, parts);
        } else {
            self.on_animation_frame_changed(event, parts);
        }
    }

    pub fn on_animation_frame_changed(
        &mut self,
        event: &AnimationEvent,
        parts: &mut Collaborators<'_>,
    ) {
        let name = event.clip_name.as_str();

        if clips::is_ranged_clip(name) {
            if event.has_action_marker && parts.ammo.can_fire() {
                self.spawn_projectile(parts);
                if self.state.is_ducking() {
                    self.apply_physics_state(parts);
                }
                if !parts.session.cheats.infinite_ammo {
                    parts.ammo.on_fired();
                }
            }
            if event.is_last_frame {
                self.apply_physics_state(parts);
            }
        } else if clips::is_melee_clip(name) {
            let swipe_hit = name == clips::SWIPE && event.frame_index == clips::SWIPE_HIT_FRAME;
            if event.has_action_marker || swipe_hit {
                self.spawn_melee_hit(name, parts);
            }
            if event.is_last_frame {
                self.apply_physics_state(parts);
            }
        }
    }

    pub fn on_animation_looped(&mut self, clip_name: &str, parts: &mut Collaborators<'_>) {
        if clips::is_death_clip(clip_name) {
            info!("Character {} died at {:?}", self.actor, parts.position);
            self.bus.trigger(GameEvent::CharacterDied {
                actor: self.actor,
                position: parts.position,
            });
            self.apply_physics_state(parts);
            parts.physics.restore_gravity_scale();
            parts.render.set_visible(true);
        } else if clips::is_damage_clip(clip_name) {
            self.apply_physics_state(parts);
        }
    }

    fn spawn_projectile(&mut self, parts: &mut Collaborators<'_>) {
        let mut offset = PROJECTILE_OFFSET;
        if self.state.is_ducking() {
            offset.y += DUCK_PROJECTILE_DROP;
        }
        offset.x = self.direction.mirror_x(offset.x);

        let ammo = parts.ammo.active_ammo_type();
        self.bus.trigger(GameEvent::SpawnProjectile {
            kind: ProjectileKind::Ammo(ammo),
            direction: self.direction,
            position: parts.position + offset,
        });
    }

    fn spawn_melee_hit(&mut self, clip_name: &str, parts: &mut Collaborators<'_>) {
        let mut offset = MELEE_OFFSET;
        if clip_name == clips::JUMP_SWIPE {
            offset += JUMP_MELEE_SHIFT;
        }
        offset.x = self.direction.mirror_x(offset.x);
        let position = parts.position + offset;

        let sword = [
            (PowerupType::FireSword, ProjectileKind::FireSword),
            (PowerupType::FrostSword, ProjectileKind::FrostSword),
            (PowerupType::LightningSword, ProjectileKind::LightningSword),
        ]
        .into_iter()
        .find(|(powerup, _)| parts.powerups.has_powerup(*powerup));

        let event = match sword {
            Some((_, kind)) => GameEvent::SpawnProjectile {
                kind,
                direction: self.direction,
                position,
            },
            None => GameEvent::SpawnAreaDamage {
                position,
                size: MELEE_HITBOX_SIZE,
                damage: MELEE_DAMAGE,
                damage_type: DamageType::MeleeAttack,
                direction: self.direction,
            },
        };
        self.bus.trigger(event);
    }

    /// Health dropped but the character survives
    pub fn on_health_changed(
        &mut self,
        old: i32,
        new: i32,
        damage_type: DamageType,
        impact_point: Vec2,
        parts: &mut Collaborators<'_>,
    ) {
        // A boss fight may have started or ended since the last tick
        self.handle_bus_events();
        if new <= 0 || old <= new {
            return;
        }

        let on_rope = self.state == CharacterState::HoldingRope;
        if !on_rope {
            let clip = clips::DAMAGE_CLIPS[self.rng.gen_range(0..clips::DAMAGE_CLIPS.len())];
            parts.animation.set_clip(clip);
        }

        let sounds = self.config.sounds;
        if !sounds.take_damage.is_empty() {
            let sound = sounds.take_damage[self.rng.gen_range(0..sounds.take_damage.len())];
            self.bus.trigger(GameEvent::play_sound(sound));
        }

        // Computed for parity with the hit reaction, position is left alone
        let mut knockback = KNOCKBACK;
        if parts.render.is_mirrored() {
            knockback.x = -knockback.x;
        }
        debug!(
            "Character {} hit by {:?} for {}, knockback {:?} not applied",
            self.actor,
            damage_type,
            old - new,
            knockback
        );

        parts.health.set_invulnerable(true);
        self.damage_window.start(self.take_damage_duration_ms);
        parts.physics.set_gravity_scale(0.0);
        if !on_rope {
            self.state = CharacterState::TakingDamage;
        }

        self.bus.trigger(GameEvent::SpawnEffect {
            effect: EffectKind::BlueHitPoint,
            position: impact_point,
        });
        if !sounds.hit.is_empty() {
            let sound = sounds.hit[self.rng.gen_range(0..sounds.hit.len())];
            self.bus.trigger(GameEvent::play_sound(sound));
        }
    }

    /// Health reached zero. Death tiles in levels without a known case
    /// fail before anything changes.
    pub fn on_health_below_zero(
        &mut self,
        damage_type: DamageType,
        parts: &mut Collaborators<'_>,
    ) -> Result<(), ControllerError> {
        self.handle_bus_events();
        if self.state != CharacterState::Dying {
            let entering = parts.animation.current_clip_name() != clips::SPIKE_DEATH;
            let death_tile = if entering && damage_type == DamageType::DeathTile {
                Some(self.death_tile_case(parts.session.level)?)
            } else {
                None
            };

            self.bus.queue(GameEvent::HealthBelowZero { actor: self.actor });

            if entering {
                parts.animation.set_clip(clips::SPIKE_DEATH);
                parts.physics.set_gravity_scale(0.0);
                self.state = CharacterState::Dying;

                let sound = match death_tile {
                    Some(case) => {
                        if case.hide_character {
                            parts.render.set_visible(false);
                        }
                        if let Some(effect) = case.effect {
                            self.bus.trigger(GameEvent::SpawnEffect {
                                effect: effect.effect,
                                position: parts.position + Vec2::new(0.0, effect.offset_y),
                            });
                        }
                        self.config.sounds.death_tile_sound(parts.session.level)
                    }
                    None => self.config.sounds.spike_death.to_string(),
                };
                self.bus.trigger(GameEvent::play_sound(sound));
                info!("Character {} is dying ({:?})", self.actor, damage_type);
            }
        }

        if self.in_boss_fight {
            self.bus.queue(GameEvent::BossFightEnded { won: false });
        }

        Ok(())
    }

    fn death_tile_case(&self, level: u32) -> Result<DeathTileCase, ControllerError> {
        match self.config.death_table.rule(level) {
            Some(DeathTileRule::Supported(case)) => Ok(case),
            Some(DeathTileRule::Unsupported) => {
                error!("Death tiles in level {} are not handled", level);
                Err(ControllerError::UnsupportedLevel(level))
            }
            None => {
                error!("No death tile entry for level {}", level);
                Err(ControllerError::UnknownLevel(level))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::testing::Rig;
    use super::*;
    use crate::engine::events::BusEvent;
    use crate::game::characters::config::{Session, BASE_CONFIG};
    use crate::game::characters::state::Direction;
    use crate::game::components::AmmoType;
    use crate::game::events::EventKind;

    fn count(events: &[GameEvent], event: &GameEvent) -> usize {
        events.iter().filter(|e| *e == event).count()
    }

    fn spawned(events: &[GameEvent]) -> Vec<GameEvent> {
        events
            .iter()
            .filter(|e| {
                matches!(
                    e.kind(),
                    EventKind::SpawnProjectile | EventKind::SpawnAreaDamage
                )
            })
            .cloned()
            .collect()
    }

    #[test]
    fn test_pistol_shot_spawns_on_marker_and_consumes_ammo() {
        let mut rig = Rig::new();
        let before = rig.ammo.count(AmmoType::Pistol);
        rig.act(|c, p| c.on_fire(false, p));

        rig.animate(80);
        let events = rig.events();
        assert_eq!(
            spawned(&events),
            vec![GameEvent::SpawnProjectile {
                kind: ProjectileKind::Ammo(AmmoType::Pistol),
                direction: Direction::Right,
                position: rig.position + Vec2::new(50.0, -20.0),
            }]
        );
        assert_eq!(rig.ammo.count(AmmoType::Pistol), before - 1);
        assert_eq!(rig.controller.state(), CharacterState::Shooting);

        // Last frame hands control back
        rig.animate(160);
        assert_eq!(rig.controller.state(), CharacterState::Standing);
        assert_eq!(rig.animation.current_animation(), "stand");
    }

    #[test]
    fn test_infinite_ammo_keeps_count() {
        let mut rig = Rig::new();
        rig.session.cheats.infinite_ammo = true;
        let before = rig.ammo.count(AmmoType::Pistol);
        rig.act(|c, p| c.on_fire(false, p));
        rig.animate(80);
        assert_eq!(rig.ammo.count(AmmoType::Pistol), before);
    }

    #[test]
    fn test_ducking_shot_is_lower_mirrored_and_recovers_at_once() {
        let mut rig = Rig::new();
        rig.act(|c, p| c.on_direction_change(Direction::Left, p));
        rig.act(|c, p| c.on_duck(p));
        rig.act(|c, p| c.on_fire(false, p));
        assert_eq!(rig.controller.state(), CharacterState::DuckShooting);

        let event = AnimationEvent::frame("duckpistol", 1, true, false);
        rig.act(|c, p| c.on_animation_frame_changed(&event, p));

        assert_eq!(
            spawned(&rig.events()),
            vec![GameEvent::SpawnProjectile {
                kind: ProjectileKind::Ammo(AmmoType::Pistol),
                direction: Direction::Left,
                position: rig.position + Vec2::new(-50.0, 20.0),
            }]
        );
        assert_eq!(rig.controller.state(), CharacterState::Ducking);
        assert_eq!(rig.animation.current_animation(), "duck");
    }

    #[test]
    fn test_empty_clip_never_spawns() {
        let mut rig = Rig::new();
        rig.act(|c, p| c.on_fire(true, p));
        assert_eq!(rig.animation.current_animation(), "emptypistol");
        rig.animate(500);
        assert!(spawned(&rig.events()).is_empty());
    }

    #[test]
    fn test_kick_spawns_area_damage() {
        let mut rig = Rig::new();
        let event = AnimationEvent::frame("kick", 2, true, false);
        rig.act(|c, p| c.on_animation_frame_changed(&event, p));

        assert_eq!(
            spawned(&rig.events()),
            vec![GameEvent::SpawnAreaDamage {
                position: rig.position + Vec2::new(60.0, 20.0),
                size: Vec2::new(50.0, 25.0),
                damage: 10,
                damage_type: DamageType::MeleeAttack,
                direction: Direction::Right,
            }]
        );
    }

    #[test]
    fn test_swipe_hits_on_frame_three_without_marker() {
        let mut rig = Rig::new();
        for frame in 1..6 {
            let event = AnimationEvent::frame("swipe", frame, false, frame == 5);
            rig.act(|c, p| c.on_animation_frame_changed(&event, p));
        }
        assert_eq!(spawned(&rig.events()).len(), 1);
    }

    #[test]
    fn test_jump_swipe_offset() {
        let mut rig = Rig::new();
        rig.act(|c, p| c.on_direction_change(Direction::Left, p));
        let event = AnimationEvent::frame("jumpswipe", 2, true, false);
        rig.act(|c, p| c.on_animation_frame_changed(&event, p));

        match spawned(&rig.events()).as_slice() {
            [GameEvent::SpawnAreaDamage { position, .. }] => {
                assert_eq!(*position, rig.position + Vec2::new(-65.0, 10.0));
            }
            other => panic!("unexpected spawns {:?}", other),
        }
    }

    #[test]
    fn test_frost_sword_spawns_projectile() {
        let mut rig = Rig::new();
        rig.powerups.grant(PowerupType::FrostSword, 10_000);
        let event = AnimationEvent::frame("swipe", 3, false, false);
        rig.act(|c, p| c.on_animation_frame_changed(&event, p));

        assert!(matches!(
            spawned(&rig.events()).as_slice(),
            [GameEvent::SpawnProjectile {
                kind: ProjectileKind::FrostSword,
                ..
            }]
        ));
    }

    #[test]
    fn test_melee_last_frame_restores_state() {
        let mut rig = Rig::new();
        rig.act(|c, p| c.on_attack(p));
        assert_eq!(rig.controller.state(), CharacterState::Attacking);
        rig.animate(1000);
        assert_eq!(rig.controller.state(), CharacterState::Standing);
        assert_eq!(spawned(&rig.events()).len(), 1);
    }

    #[test]
    fn test_health_changed_enters_taking_damage() {
        let mut rig = Rig::new();
        rig.act(|c, p| c.on_health_changed(10, 6, DamageType::Projectile, Vec2::new(3.0, 4.0), p));

        assert_eq!(rig.controller.state(), CharacterState::TakingDamage);
        assert!(rig.health.is_invulnerable());
        let window = rig.controller.damage_window();
        assert_eq!(window.remaining_ms, window.duration_ms);
        assert_eq!(window.duration_ms, BASE_CONFIG.take_damage_duration_ms);
        assert_eq!(rig.physics.gravity_scale(), 0.0);
        assert!(clips::DAMAGE_CLIPS.contains(&rig.animation.current_animation()));

        let events = rig.events();
        assert!(events.contains(&GameEvent::SpawnEffect {
            effect: EffectKind::BlueHitPoint,
            position: Vec2::new(3.0, 4.0),
        }));
        let sounds = events
            .iter()
            .filter(|e| e.kind() == EventKind::RequestPlaySound)
            .count();
        assert_eq!(sounds, 2);
    }

    #[test]
    fn test_health_changed_ignores_heal_and_lethal() {
        let mut rig = Rig::new();
        rig.act(|c, p| c.on_health_changed(6, 10, DamageType::Projectile, Vec2::ZERO, p));
        rig.act(|c, p| c.on_health_changed(6, 0, DamageType::Projectile, Vec2::ZERO, p));
        assert_eq!(rig.controller.state(), CharacterState::Standing);
        assert!(!rig.health.is_invulnerable());
        assert!(rig.events().is_empty());
    }

    #[test]
    fn test_damage_on_rope_keeps_swinging() {
        let mut rig = Rig::new();
        rig.act(|c, p| c.on_attach_to_rope(p));
        rig.act(|c, p| c.on_health_changed(10, 6, DamageType::EnemyAura, Vec2::ZERO, p));
        assert_eq!(rig.controller.state(), CharacterState::HoldingRope);
        assert_eq!(rig.animation.current_animation(), "swing");
        assert!(rig.health.is_invulnerable());
    }

    #[test]
    fn test_flinch_loop_returns_to_movement() {
        let mut rig = Rig::new();
        rig.act(|c, p| c.on_health_changed(10, 6, DamageType::Projectile, Vec2::ZERO, p));
        rig.animate(300);
        assert_eq!(rig.controller.state(), CharacterState::Standing);
        assert_eq!(rig.physics.gravity_scale(), 1.0);
    }

    #[test]
    fn test_below_zero_enters_dying_once() {
        let mut rig = Rig::new();
        rig.bus.trigger(GameEvent::BossFightStarted);
        rig.tick(16);
        rig.events();

        rig.act(|c, p| c.on_health_below_zero(DamageType::Projectile, p))
            .unwrap();
        assert_eq!(rig.controller.state(), CharacterState::Dying);
        assert_eq!(rig.animation.current_animation(), "spikedeath");
        assert_eq!(rig.physics.gravity_scale(), 0.0);

        // Repeated before the queued loss is dispatched
        rig.act(|c, p| c.on_health_below_zero(DamageType::Projectile, p))
            .unwrap();
        assert_eq!(rig.controller.state(), CharacterState::Dying);
        assert_eq!(rig.animation.current_animation(), "spikedeath");
        assert_eq!(rig.physics.gravity_scale(), 0.0);

        let events = rig.events();
        let lost = GameEvent::BossFightEnded { won: false };
        assert_eq!(count(&events, &GameEvent::HealthBelowZero { actor: Rig::ACTOR }), 1);
        assert_eq!(
            count(&events, &GameEvent::play_sound("/CLAW/SOUNDS/DEATHSPIKES.WAV")),
            1
        );
        assert_eq!(count(&events, &lost), 2);

        // The dispatched loss ended the fight
        rig.act(|c, p| c.on_health_below_zero(DamageType::Projectile, p))
            .unwrap();
        assert!(rig.events().is_empty());
    }

    #[test]
    fn test_death_right_after_boss_fight_start_ends_fight() {
        let mut rig = Rig::new();
        rig.bus.trigger(GameEvent::BossFightStarted);
        rig.events();

        rig.act(|c, p| c.on_health_below_zero(DamageType::Projectile, p))
            .unwrap();

        assert!(rig
            .events()
            .contains(&GameEvent::BossFightEnded { won: false }));
    }

    #[test]
    fn test_hit_right_after_boss_fight_start_sees_the_fight() {
        let mut rig = Rig::new();
        rig.bus.trigger(GameEvent::BossFightStarted);
        rig.act(|c, p| c.on_health_changed(10, 6, DamageType::Projectile, Vec2::ZERO, p));
        assert!(rig.controller.is_in_boss_fight());
    }

    #[test]
    fn test_death_tile_in_tar_level_hides_character() {
        let mut rig = Rig::new();
        rig.session = Session {
            level: 2,
            ..Session::default()
        };
        rig.act(|c, p| c.on_health_below_zero(DamageType::DeathTile, p))
            .unwrap();

        assert!(!rig.render.visible);
        let events = rig.events();
        assert!(events.contains(&GameEvent::SpawnEffect {
            effect: EffectKind::TarSplash,
            position: rig.position + Vec2::new(0.0, -42.0),
        }));
        assert!(events.contains(&GameEvent::play_sound("/LEVEL2/SOUNDS/DEATHTILE.WAV")));
    }

    #[test]
    fn test_death_tile_in_spikes_level_stays_visible() {
        let mut rig = Rig::new();
        rig.session.level = 1;
        rig.act(|c, p| c.on_health_below_zero(DamageType::DeathTile, p))
            .unwrap();

        assert_eq!(rig.controller.state(), CharacterState::Dying);
        assert!(rig.render.visible);
        let events = rig.events();
        assert!(!events.iter().any(|e| e.kind() == EventKind::SpawnEffect));
        assert!(events.contains(&GameEvent::play_sound("/LEVEL1/SOUNDS/DEATHTILE.WAV")));
    }

    #[test]
    fn test_death_tile_unsupported_level_fails_untouched() {
        let mut rig = Rig::new();
        rig.session.level = 6;
        let result = rig.act(|c, p| c.on_health_below_zero(DamageType::DeathTile, p));
        assert_eq!(result, Err(ControllerError::UnsupportedLevel(6)));
        assert_eq!(rig.controller.state(), CharacterState::Standing);
        assert!(rig.events().is_empty());

        rig.session.level = 42;
        let result = rig.act(|c, p| c.on_health_below_zero(DamageType::DeathTile, p));
        assert_eq!(result, Err(ControllerError::UnknownLevel(42)));
    }

    #[test]
    fn test_death_loop_reports_death_and_restores() {
        let mut rig = Rig::new();
        rig.session.level = 4;
        rig.act(|c, p| c.on_health_below_zero(DamageType::DeathTile, p))
            .unwrap();
        rig.events();

        rig.animate(1000);

        let events = rig.events();
        assert!(events.contains(&GameEvent::CharacterDied {
            actor: Rig::ACTOR,
            position: rig.position,
        }));
        assert!(rig.render.visible);
        assert_eq!(rig.physics.gravity_scale(), 1.0);
        assert_eq!(rig.controller.state(), CharacterState::Standing);
    }
}
