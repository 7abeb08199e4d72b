// Engine modules: animation, physics body, render flags, events, timing

pub mod animation;
pub mod events;
pub mod game_loop;
pub mod observer;
pub mod physics;
pub mod render;
