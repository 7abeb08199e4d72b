// Character state and facing direction

/// Logical state of the player character. Exactly one is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CharacterState {
    /// Not yet bound to its components
    #[default]
    None,
    /// Standing still on ground
    Standing,
    /// Standing still long enough to play an idle quote
    Idle,
    /// Moving horizontally on ground
    Walking,
    /// In the air, moving upward
    Jumping,
    /// In the air, moving downward
    Falling,
    /// Crouching on ground
    Ducking,
    Climbing,
    /// Swinging on a rope
    HoldingRope,
    Attacking,
    DuckAttacking,
    JumpAttacking,
    Shooting,
    DuckShooting,
    JumpShooting,
    /// Damage flinch
    TakingDamage,
    Dying,
}

impl CharacterState {
    /// Ducking or one of the attacks performed while ducking
    pub fn is_ducking(&self) -> bool {
        matches!(self, Self::Ducking | Self::DuckAttacking | Self::DuckShooting)
    }

    /// In the air by jump or fall
    pub fn is_airborne(&self) -> bool {
        matches!(self, Self::Jumping | Self::Falling)
    }

    /// Any melee or ranged attack variant
    pub fn is_attacking_or_shooting(&self) -> bool {
        matches!(
            self,
            Self::Attacking
                | Self::DuckAttacking
                | Self::JumpAttacking
                | Self::Shooting
                | Self::DuckShooting
                | Self::JumpShooting
        )
    }

    /// Attack clips started in the air finish before fall/jump take over
    pub fn is_jump_attack(&self) -> bool {
        matches!(self, Self::JumpAttacking | Self::JumpShooting)
    }

    /// Check if an attack or shot may start from this state
    pub fn can_attack(&self) -> bool {
        !self.is_attacking_or_shooting()
            && !matches!(
                self,
                Self::Climbing | Self::Dying | Self::TakingDamage | Self::HoldingRope
            )
    }

    /// Check if horizontal movement is allowed
    pub fn can_move(&self) -> bool {
        !matches!(
            self,
            Self::Shooting
                | Self::Attacking
                | Self::Dying
                | Self::DuckAttacking
                | Self::DuckShooting
                | Self::TakingDamage
        )
    }
}

/// Horizontal facing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Direction {
    Left,
    #[default]
    Right,
}

impl Direction {
    /// Sign applied to horizontal offsets (Right = 1, Left = -1)
    pub fn sign(&self) -> f32 {
        match self {
            Self::Left => -1.0,
            Self::Right => 1.0,
        }
    }

    /// Mirror a horizontal offset authored for a right-facing character
    pub fn mirror_x(&self, x: f32) -> f32 {
        x * self.sign()
    }
}
