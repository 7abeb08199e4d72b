// Errors raised by the character controller.

use thiserror::Error;

/// Sibling components the controller cannot work without
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComponentKind {
    Animation,
    Render,
    Position,
    Physics,
    Ammo,
    Powerup,
    Health,
}

impl std::fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Animation => "animation",
            Self::Render => "render",
            Self::Position => "position",
            Self::Physics => "physics",
            Self::Ammo => "ammo",
            Self::Powerup => "powerup",
            Self::Health => "health",
        };
        f.write_str(name)
    }
}

/// Precondition violations. None of these are recoverable during play.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ControllerError {
    /// A required sibling component was not supplied before binding
    #[error("Character is missing its {0} component")]
    MissingComponent(ComponentKind),

    /// The level is known but its death tiles are not handled
    #[error("Death tiles in level {0} are unsupported")]
    UnsupportedLevel(u32),

    #[error("Unknown level {0}")]
    UnknownLevel(u32),
}
