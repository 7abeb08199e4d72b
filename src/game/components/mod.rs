// Sibling components owned by the character entity
//
// These are the standard implementations of the collaborators the character
// controller queries: ammunition, powerups, health and the idle marker.

pub mod ammo;
pub mod followable;
pub mod health;
pub mod powerups;

pub use ammo::{AmmoPouch, AmmoType};
pub use followable::FollowableMarker;
pub use health::{DamageType, Health, HealthEvent};
pub use powerups::{PowerupInventory, PowerupType};
