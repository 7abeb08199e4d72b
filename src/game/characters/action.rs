// Input actions delivered to a character

use super::state::Direction;

/// One gameplay input, already resolved from raw device input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharacterAction {
    Run,
    StopMoving,
    StartJump,
    LandOnGround,
    StartFalling,
    ChangeDirection(Direction),
    Duck,
    Stand,
    Climb,
    StopClimbing,
    Attack,
    /// `out_of_ammo` is the input layer's view of the active weapon
    Fire { out_of_ammo: bool },
    AttachToRope,
    DetachFromRope,
    /// Duck input held for this many milliseconds
    DuckHeld(u32),
    /// Look-up input held for this many milliseconds
    LookUpHeld(u32),
    LookUpReleased,
}
