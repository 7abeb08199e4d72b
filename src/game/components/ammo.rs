// Ranged weapon ammunition

use std::collections::HashMap;

/// Ranged weapon the character has selected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AmmoType {
    #[default]
    Pistol,
    Magic,
    Dynamite,
}

impl AmmoType {
    pub const ALL: [AmmoType; 3] = [AmmoType::Pistol, AmmoType::Magic, AmmoType::Dynamite];

    /// Cycle to the next weapon
    pub fn next(self) -> Self {
        match self {
            Self::Pistol => Self::Magic,
            Self::Magic => Self::Dynamite,
            Self::Dynamite => Self::Pistol,
        }
    }
}

/// Ammunition counts per weapon plus the active selection
#[derive(Debug, Clone)]
pub struct AmmoPouch {
    counts: HashMap<AmmoType, u32>,
    active: AmmoType,
}

impl Default for AmmoPouch {
    fn default() -> Self {
        Self::new(10, 5, 3)
    }
}

impl AmmoPouch {
    pub fn new(pistol: u32, magic: u32, dynamite: u32) -> Self {
        let counts = HashMap::from([
            (AmmoType::Pistol, pistol),
            (AmmoType::Magic, magic),
            (AmmoType::Dynamite, dynamite),
        ]);
        Self {
            counts,
            active: AmmoType::Pistol,
        }
    }

    pub fn active_ammo_type(&self) -> AmmoType {
        self.active
    }

    pub fn set_active_ammo_type(&mut self, ammo: AmmoType) {
        self.active = ammo;
    }

    pub fn count(&self, ammo: AmmoType) -> u32 {
        self.counts.get(&ammo).copied().unwrap_or(0)
    }

    pub fn add(&mut self, ammo: AmmoType, amount: u32) {
        *self.counts.entry(ammo).or_insert(0) += amount;
    }

    /// Active weapon has at least one shot left
    pub fn can_fire(&self) -> bool {
        self.count(self.active) > 0
    }

    /// Spend one shot of the active weapon
    pub fn on_fired(&mut self) {
        if let Some(count) = self.counts.get_mut(&self.active) {
            *count = count.saturating_sub(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fire_consumes_active_only() {
        let mut pouch = AmmoPouch::new(2, 1, 0);
        pouch.on_fired();
        assert_eq!(pouch.count(AmmoType::Pistol), 1);
        assert_eq!(pouch.count(AmmoType::Magic), 1);
    }

    #[test]
    fn test_cannot_fire_empty_weapon() {
        let mut pouch = AmmoPouch::new(0, 1, 0);
        assert!(!pouch.can_fire());
        pouch.set_active_ammo_type(AmmoType::Magic);
        assert!(pouch.can_fire());
        pouch.on_fired();
        pouch.on_fired();
        assert_eq!(pouch.count(AmmoType::Magic), 0);
    }

    #[test]
    fn test_cycle_weapons() {
        assert_eq!(AmmoType::Pistol.next(), AmmoType::Magic);
        assert_eq!(AmmoType::Dynamite.next(), AmmoType::Pistol);
    }
}
