// Character controller configuration
//
// Numbers, sound pools and the per-level death table are plain data so the
// controller stays free of level-specific branches.

use crate::game::events::EffectKind;

/// Construction-time tuning of the character controller
#[derive(Debug, Clone, Copy)]
pub struct ControllerConfig {
    /// Attach camera/input to this character when it is bound
    pub is_active: bool,
    /// Invulnerability window after taking damage
    pub take_damage_duration_ms: u32,
    /// Time standing still before an idle quote plays
    pub idle_quote_interval_ms: u32,
    /// How long the idle exclamation mark stays visible
    pub exclamation_duration_ms: u32,
    /// Sustained duck/look-up time before the camera starts to move
    pub look_start_delay_ms: u32,
    /// Largest camera offset in either direction
    pub max_look_offset_px: f64,
    /// Camera offset speed while looking; relaxing uses twice this
    pub look_speed_px_per_s: f64,
    pub sounds: SoundTable,
    pub death_table: LevelDeathTable,
}

/// The controller configuration used by the player character
pub const BASE_CONFIG: ControllerConfig = ControllerConfig {
    is_active: false,
    take_damage_duration_ms: 500,
    idle_quote_interval_ms: 10_000,
    exclamation_duration_ms: 2000,
    look_start_delay_ms: 750,
    max_look_offset_px: 120.0,
    look_speed_px_per_s: 250.0,
    sounds: CLAW_SOUNDS,
    death_table: LevelDeathTable::STANDARD,
};

impl Default for ControllerConfig {
    fn default() -> Self {
        BASE_CONFIG
    }
}

impl ControllerConfig {
    /// Same configuration with the character attached on bind
    pub fn active(mut self) -> Self {
        self.is_active = true;
        self
    }
}

/// Sound resources the controller requests
#[derive(Debug, Clone, Copy)]
pub struct SoundTable {
    /// Rotated without repeats while the character idles
    pub idle_quotes: &'static [&'static str],
    /// One is picked at random when damaged
    pub take_damage: &'static [&'static str],
    /// Generic impact sounds
    pub hit: &'static [&'static str],
    pub fire_sword: &'static str,
    pub frost_sword: &'static str,
    pub lightning_sword: &'static str,
    pub spike_death: &'static str,
    /// Death tile sound, `{level}` is replaced with the level number
    pub death_tile_pattern: &'static str,
}

impl SoundTable {
    pub fn death_tile_sound(&self, level: u32) -> String {
        self.death_tile_pattern.replace("{level}", &level.to_string())
    }
}

pub const CLAW_SOUNDS: SoundTable = SoundTable {
    // The second quote is left out on purpose
    idle_quotes: &[
        "/CLAW/SOUNDS/IDLE1.WAV",
        "/CLAW/SOUNDS/IDLE3.WAV",
        "/CLAW/SOUNDS/IDLE4.WAV",
        "/CLAW/SOUNDS/IDLE5.WAV",
        "/CLAW/SOUNDS/IDLE6.WAV",
        "/CLAW/SOUNDS/IDLE7.WAV",
        "/CLAW/SOUNDS/IDLE8.WAV",
        "/CLAW/SOUNDS/IDLE9.WAV",
        "/CLAW/SOUNDS/IDLE10.WAV",
        "/CLAW/SOUNDS/IDLE11.WAV",
        "/CLAW/SOUNDS/IDLE12.WAV",
    ],
    take_damage: &[
        "/CLAW/SOUNDS/TAKEDAMAGE1.WAV",
        "/CLAW/SOUNDS/TAKEDAMAGE2.WAV",
        "/CLAW/SOUNDS/TAKEDAMAGE3.WAV",
        "/CLAW/SOUNDS/TAKEDAMAGE4.WAV",
    ],
    hit: &[
        "/GAME/SOUNDS/HIT1.WAV",
        "/GAME/SOUNDS/HIT2.WAV",
        "/GAME/SOUNDS/HIT3.WAV",
        "/GAME/SOUNDS/HIT4.WAV",
    ],
    fire_sword: "/GAME/SOUNDS/FIRESWORD.WAV",
    frost_sword: "/GAME/SOUNDS/ICESWORD.WAV",
    lightning_sword: "/GAME/SOUNDS/LIGHTNINGSWORD.WAV",
    spike_death: "/CLAW/SOUNDS/DEATHSPIKES.WAV",
    death_tile_pattern: "/LEVEL{level}/SOUNDS/DEATHTILE.WAV",
};

/// Visual effect spawned when the character dies on a death tile
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeathTileEffect {
    pub effect: EffectKind,
    /// Vertical offset from the character position
    pub offset_y: f32,
}

/// What happens when the character touches a death tile in a level
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeathTileCase {
    /// Character sinks out of view (tar, water)
    pub hide_character: bool,
    pub effect: Option<DeathTileEffect>,
}

impl DeathTileCase {
    /// Spikes: nothing beyond the death animation
    pub const SPIKES: DeathTileCase = DeathTileCase {
        hide_character: false,
        effect: None,
    };

    pub const fn liquid(offset_y: f32) -> Self {
        Self {
            hide_character: true,
            effect: Some(DeathTileEffect {
                effect: EffectKind::TarSplash,
                offset_y,
            }),
        }
    }
}

/// Per-level death tile entry
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DeathTileRule {
    Supported(DeathTileCase),
    /// Known level whose death tiles are not handled yet
    Unsupported,
}

/// Level number -> death tile rule
#[derive(Debug, Clone, Copy)]
pub struct LevelDeathTable {
    pub entries: &'static [(u32, DeathTileRule)],
}

impl LevelDeathTable {
    pub const STANDARD: LevelDeathTable = LevelDeathTable {
        entries: &[
            (1, DeathTileRule::Supported(DeathTileCase::SPIKES)),
            (2, DeathTileRule::Supported(DeathTileCase::liquid(-42.0))),
            (3, DeathTileRule::Supported(DeathTileCase::SPIKES)),
            (4, DeathTileRule::Supported(DeathTileCase::liquid(-30.0))),
            (5, DeathTileRule::Unsupported),
            (6, DeathTileRule::Unsupported),
            (7, DeathTileRule::Unsupported),
            (8, DeathTileRule::Unsupported),
            (9, DeathTileRule::Supported(DeathTileCase::SPIKES)),
            (10, DeathTileRule::Supported(DeathTileCase::SPIKES)),
            (11, DeathTileRule::Unsupported),
            (12, DeathTileRule::Unsupported),
            (13, DeathTileRule::Unsupported),
            (14, DeathTileRule::Unsupported),
        ],
    };

    /// Look up the rule for a level, None for levels the table does not know
    pub fn rule(&self, level: u32) -> Option<DeathTileRule> {
        self.entries
            .iter()
            .find(|(number, _)| *number == level)
            .map(|(_, rule)| *rule)
    }
}

/// Cheat switches that affect the controller
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Cheats {
    /// Shots do not consume ammunition
    pub infinite_ammo: bool,
}

/// Game-wide context the controller reads while reacting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Session {
    /// Number of the level being played
    pub level: u32,
    pub cheats: Cheats,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            level: 1,
            cheats: Cheats::default(),
        }
    }
}
