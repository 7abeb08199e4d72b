// Character health with change notifications

use glam::Vec2;

use crate::engine::observer::{ObserverId, ObserverList};

/// What dealt the damage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DamageType {
    #[default]
    MeleeAttack,
    Projectile,
    Explosion,
    /// Spikes, tar, water and other instant-death tiles
    DeathTile,
    EnemyAura,
}

/// Notification sent to health observers
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HealthEvent {
    Changed {
        old: i32,
        new: i32,
        damage_type: DamageType,
        impact_point: Vec2,
    },
    BelowZero { damage_type: DamageType },
}

/// Hit points of one actor
#[derive(Debug)]
pub struct Health {
    current: i32,
    max: i32,
    invulnerable: bool,
    observers: ObserverList<HealthEvent>,
}

impl Health {
    pub fn new(max: i32) -> Self {
        Self {
            current: max,
            max,
            invulnerable: false,
            observers: ObserverList::new(),
        }
    }

    pub fn current(&self) -> i32 {
        self.current
    }

    pub fn max(&self) -> i32 {
        self.max
    }

    pub fn is_invulnerable(&self) -> bool {
        self.invulnerable
    }

    pub fn set_invulnerable(&mut self, invulnerable: bool) {
        self.invulnerable = invulnerable;
    }

    pub fn add_observer(&mut self) -> ObserverId {
        self.observers.add()
    }

    pub fn remove_observer(&mut self, id: ObserverId) -> bool {
        self.observers.remove(id)
    }

    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    pub fn take_events(&mut self, id: ObserverId) -> Vec<HealthEvent> {
        self.observers.take(id)
    }

    /// Apply damage. Invulnerability blocks everything except death tiles.
    /// Returns the health actually removed.
    pub fn apply_damage(
        &mut self,
        amount: i32,
        damage_type: DamageType,
        impact_point: Vec2,
    ) -> i32 {
        if amount <= 0 || self.current <= 0 {
            return 0;
        }
        if self.invulnerable && damage_type != DamageType::DeathTile {
            return 0;
        }

        let amount = if damage_type == DamageType::DeathTile {
            self.current
        } else {
            amount
        };
        self.set_current(self.current - amount, damage_type, impact_point);
        amount
    }

    /// Heal up to the maximum
    pub fn heal(&mut self, amount: i32) {
        let healed = (self.current + amount.max(0)).min(self.max);
        self.set_current(healed, DamageType::default(), Vec2::ZERO);
    }

    fn set_current(&mut self, value: i32, damage_type: DamageType, impact_point: Vec2) {
        let old = self.current;
        self.current = value.clamp(0, self.max);
        if old == self.current {
            return;
        }

        self.observers.notify(HealthEvent::Changed {
            old,
            new: self.current,
            damage_type,
            impact_point,
        });
        if self.current <= 0 {
            self.observers.notify(HealthEvent::BelowZero { damage_type });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_damage_notifies_change() {
        let mut health = Health::new(10);
        let observer = health.add_observer();

        assert_eq!(health.apply_damage(4, DamageType::Projectile, Vec2::new(1.0, 2.0)), 4);

        assert_eq!(health.current(), 6);
        assert_eq!(
            health.take_events(observer),
            vec![HealthEvent::Changed {
                old: 10,
                new: 6,
                damage_type: DamageType::Projectile,
                impact_point: Vec2::new(1.0, 2.0),
            }]
        );
    }

    #[test]
    fn test_lethal_damage_notifies_below_zero() {
        let mut health = Health::new(5);
        let observer = health.add_observer();

        health.apply_damage(9, DamageType::MeleeAttack, Vec2::ZERO);

        let events = health.take_events(observer);
        assert_eq!(events.len(), 2);
        assert_eq!(
            events[1],
            HealthEvent::BelowZero {
                damage_type: DamageType::MeleeAttack
            }
        );
        assert_eq!(health.current(), 0);
    }

    #[test]
    fn test_invulnerable_ignores_damage_but_not_death_tiles() {
        let mut health = Health::new(10);
        health.set_invulnerable(true);
        assert_eq!(health.apply_damage(3, DamageType::EnemyAura, Vec2::ZERO), 0);
        assert_eq!(health.current(), 10);

        assert_eq!(health.apply_damage(1, DamageType::DeathTile, Vec2::ZERO), 10);
        assert_eq!(health.current(), 0);
    }

    #[test]
    fn test_heal_caps_at_max() {
        let mut health = Health::new(10);
        health.apply_damage(5, DamageType::MeleeAttack, Vec2::ZERO);
        health.heal(50);
        assert_eq!(health.current(), 10);
    }
}
