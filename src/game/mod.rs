// Gameplay: characters, their components and the event vocabulary

pub mod characters;
pub mod components;
pub mod events;
