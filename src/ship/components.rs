// src/ship/components.rs
//! Ship state: drift movement parameters and the fuel tank.

use bevy::prelude::*;

/// Player vehicle tuning. Thrust and turning are intents; actual motion is
/// velocity-integrated with coast friction, asteroids style.
#[derive(Component, Clone, Debug)]
pub struct Ship {
    /// Thrust, in units/s^2.
    pub acceleration: f32,
    pub max_speed: f32,
    /// Coast damping rate, per second. The ship drifts to rest in roughly
    /// `1/friction` seconds with the stick released.
    pub friction: f32,
    /// Turn rate toward the velocity heading, radians/s.
    pub rotation_speed: f32,
    /// A dry tank never thrusts; this picks what happens to the leftover
    /// drift: halt on the spot (true) or coast out on friction (false).
    pub stop_on_empty: bool,
}

impl Default for Ship {
    fn default() -> Self {
        Self {
            acceleration: 8.0,
            max_speed: 12.0,
            friction: 4.0,
            rotation_speed: 200f32.to_radians(),
            stop_on_empty: true,
        }
    }
}

#[derive(Component, Default, Clone, Copy, Debug, Deref, DerefMut)]
pub struct Velocity(pub Vec2);

/// What a single [`FuelTank::consume`] call actually did.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Consumed {
    /// Fuel removed, clamped to what was in the tank.
    pub drained: f32,
    /// True exactly once per dry-out: the call that took the tank to zero.
    pub emptied: bool,
}

impl Consumed {
    pub const NONE: Self = Self { drained: 0.0, emptied: false };
}

/// Fuel store with an empty latch.
///
/// The latch makes "ran dry" a one-shot edge rather than a level: once the
/// tank hits zero, further consumption is a no-op until a refuel re-arms it.
#[derive(Component, Clone, Debug)]
pub struct FuelTank {
    pub fuel: f32,
    pub max_fuel: f32,
    /// Passive burn while the run is on, units/s.
    pub drain_per_second: f32,
    out_of_fuel: bool,
}

impl Default for FuelTank {
    fn default() -> Self {
        Self::new(100.0, 1.5)
    }
}

impl FuelTank {
    pub fn new(max_fuel: f32, drain_per_second: f32) -> Self {
        Self {
            fuel: max_fuel,
            max_fuel,
            drain_per_second,
            out_of_fuel: false,
        }
    }

    /// Remove up to `amount` fuel. On the call that reaches zero the result
    /// reports `emptied`; after that the tank is latched and consumes nothing.
    pub fn consume(&mut self, amount: f32) -> Consumed {
        if self.out_of_fuel || amount <= 0.0 {
            return Consumed::NONE;
        }
        let drained = amount.min(self.fuel);
        self.fuel -= drained;
        let emptied = self.fuel <= 0.0;
        if emptied {
            self.fuel = 0.0;
            self.out_of_fuel = true;
        }
        Consumed { drained, emptied }
    }

    /// Add fuel, clamped to capacity. Returns how much fit; any positive
    /// amount re-arms the empty latch.
    pub fn refuel(&mut self, amount: f32) -> f32 {
        if amount <= 0.0 {
            return 0.0;
        }
        let added = amount.min(self.max_fuel - self.fuel);
        if added <= 0.0 {
            return 0.0;
        }
        self.fuel += added;
        self.out_of_fuel = false;
        added
    }

    /// Fill level in `0.0..=1.0`.
    pub fn fraction(&self) -> f32 {
        if self.max_fuel <= 0.0 {
            return 0.0;
        }
        (self.fuel / self.max_fuel).clamp(0.0, 1.0)
    }

    pub fn is_empty(&self) -> bool {
        self.out_of_fuel
    }
}
