// Behavior controller for a 2D platformer player character.
//
// `game::characters` holds the controller and the character entity,
// `engine` the reference animation, physics and event plumbing it runs on.

pub mod core;
pub mod engine;
pub mod game;
