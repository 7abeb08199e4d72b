// Timed powerups

use std::collections::HashMap;

/// Powerups that change how the character fights or takes damage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PowerupType {
    /// Immune to damage while active
    Invulnerability,
    Invisibility,
    Catnip,
    FireSword,
    FrostSword,
    LightningSword,
}

impl PowerupType {
    /// Elemental swords replace the melee hit-box with a projectile
    pub const SWORDS: [PowerupType; 3] = [
        PowerupType::FireSword,
        PowerupType::FrostSword,
        PowerupType::LightningSword,
    ];

    pub fn is_sword(&self) -> bool {
        Self::SWORDS.contains(self)
    }
}

/// Active powerups and their remaining time
#[derive(Debug, Clone, Default)]
pub struct PowerupInventory {
    active: HashMap<PowerupType, u32>,
}

impl PowerupInventory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Activate a powerup, replacing the remaining time if it is already active
    pub fn grant(&mut self, powerup: PowerupType, duration_ms: u32) {
        self.active.insert(powerup, duration_ms);
    }

    pub fn remove(&mut self, powerup: PowerupType) {
        self.active.remove(&powerup);
    }

    pub fn has_powerup(&self, powerup: PowerupType) -> bool {
        self.active.contains_key(&powerup)
    }

    pub fn remaining_ms(&self, powerup: PowerupType) -> Option<u32> {
        self.active.get(&powerup).copied()
    }

    /// Count down every powerup, dropping expired ones
    pub fn update(&mut self, elapsed_ms: u32) {
        self.active.retain(|_, remaining| {
            *remaining = remaining.saturating_sub(elapsed_ms);
            *remaining > 0
        });
    }
}
