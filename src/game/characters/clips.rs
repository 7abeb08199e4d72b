// Animation clip names and clip selection tables
//
// Clip choice for attacks depends on (stance x weapon x loaded). The tables
// below hold that data; the controller only decides the inputs.

use crate::game::components::ammo::AmmoType;

pub const STAND: &str = "stand";
pub const IDLE: &str = "idle";
pub const WALK: &str = "walk";
pub const JUMP: &str = "jump";
pub const FALL: &str = "fall";
pub const DUCK: &str = "duck";
pub const LOOKUP: &str = "lookup";
pub const CLIMB: &str = "climb";
pub const SWING: &str = "swing";
pub const SWIPE: &str = "swipe";
pub const KICK: &str = "kick";
pub const UPPERCUT: &str = "uppercut";
pub const JUMP_SWIPE: &str = "jumpswipe";
pub const DUCK_SWIPE: &str = "duckswipe";
pub const SPIKE_DEATH: &str = "spikedeath";

/// Damage flinch clips, one is picked at random
pub const DAMAGE_CLIPS: [&str; 2] = ["damage1", "damage2"];

/// Clips that spawn a melee hit on their action frame
pub const MELEE_CLIPS: [&str; 5] = [SWIPE, KICK, UPPERCUT, JUMP_SWIPE, DUCK_SWIPE];

/// Frame of "swipe" that lands the hit. The clip carries no action marker.
pub const SWIPE_HIT_FRAME: usize = 3;

/// Exclusive upper bound of the melee variant roll
pub const MELEE_ROLL_RANGE: u32 = 5;

/// Body posture an attack starts from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stance {
    Standing,
    Ducking,
    Airborne,
}

/// Clip for a ranged attack. `loaded` is false when the weapon is empty,
/// which plays a dry-fire clip with no shot.
pub fn ranged_clip(stance: Stance, ammo: AmmoType, loaded: bool) -> &'static str {
    use AmmoType::*;
    use Stance::*;

    match (stance, ammo, loaded) {
        (Standing, Pistol, true) => "pistol",
        (Standing, Pistol, false) => "emptypistol",
        (Standing, Magic, true) => "magic",
        (Standing, Magic, false) => "emptymagic",
        (Standing, Dynamite, true) => "postdynamite",
        (Standing, Dynamite, false) => "emptydynamite",

        (Ducking, Pistol, true) => "duckpistol",
        (Ducking, Pistol, false) => "duckemptypistol",
        (Ducking, Magic, true) => "duckmagic",
        (Ducking, Magic, false) => "duckemptymagic",
        (Ducking, Dynamite, true) => "duckpostdynamite",
        (Ducking, Dynamite, false) => "duckemptydynamite",

        (Airborne, Pistol, true) => "jumppistol",
        (Airborne, Pistol, false) => "emptyjumppistol",
        (Airborne, Magic, true) => "jumpmagic",
        (Airborne, Magic, false) => "emptyjumpmagic",
        (Airborne, Dynamite, true) => "jumpdynamite",
        (Airborne, Dynamite, false) => "emptyjumpdynamite",
    }
}

/// Clip for a melee attack. Standing attacks without an elemental sword
/// roll in `0..MELEE_ROLL_RANGE`: 0 kicks, 1 uppercuts, anything else swipes.
pub fn melee_clip(stance: Stance, elemental_sword: bool, roll: u32) -> &'static str {
    match stance {
        Stance::Airborne => JUMP_SWIPE,
        Stance::Ducking => DUCK_SWIPE,
        Stance::Standing if elemental_sword => SWIPE,
        Stance::Standing => match roll {
            0 => KICK,
            1 => UPPERCUT,
            _ => SWIPE,
        },
    }
}

/// Ranged weapon clips (including the empty variants)
pub fn is_ranged_clip(name: &str) -> bool {
    ["pistol", "magic", "dynamite"]
        .iter()
        .any(|weapon| name.contains(weapon))
}

pub fn is_melee_clip(name: &str) -> bool {
    MELEE_CLIPS.contains(&name)
}

pub fn is_damage_clip(name: &str) -> bool {
    DAMAGE_CLIPS.contains(&name)
}

pub fn is_death_clip(name: &str) -> bool {
    name.contains("death")
}
