// src/ship/mod.rs

// these sub-modules stay private
mod components;
mod plugin;
mod systems;

// re-export what the rest of the game touches:
pub use components::{Consumed, FuelTank, Ship, Velocity};
pub use plugin::{FuelEmptied, FuelHit, ShipPlugin};
