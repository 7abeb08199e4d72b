// Player character
//
// - Character entity owning its components
// - Behavior controller driven by input, animation and health events
// - Clip tables, idle quotes and camera look offset

pub mod action;
pub mod character;
pub mod clips;
pub mod config;
pub mod controller;
pub mod error;
pub mod idle_quotes;
pub mod look_offset;
pub mod providers;
pub mod state;

// Re-export commonly used types
pub use action::CharacterAction;
pub use character::{Character, CharacterBuilder};
pub use config::{ControllerConfig, Session, BASE_CONFIG};
pub use controller::{CharacterController, DamageWindow};
pub use error::{ComponentKind, ControllerError};
pub use providers::Collaborators;
pub use state::{CharacterState, Direction};
