// src/spawner/mod.rs

pub mod area;
pub mod components;
pub mod core;
pub mod instantiate;
pub mod placement;
pub mod plugin;
pub mod registry;
pub mod systems;
pub mod tracker;

pub use plugin::SpawnerPlugin;
