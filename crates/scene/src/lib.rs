pub mod animation;
pub mod components;
pub mod config;
pub mod entity;
pub mod events;
pub mod fallback;
pub mod overlay;
pub mod picking;
pub mod prefabs;
pub mod selection;
pub mod travel;
pub mod world;

pub use world::*;
