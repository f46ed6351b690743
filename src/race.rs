// src/race.rs
//! Race countdown. When it hits zero the run is over: the clock drains the
//! ship's tank dry, which ends the run through the usual out-of-fuel path.

use bevy::prelude::*;

use crate::ship::{FuelEmptied, FuelTank, Ship};

/// Fired once when the countdown reaches zero.
#[derive(Event, Clone, Copy)]
pub struct TimeExpired;

/// Session countdown with a finished latch, so expiry is a one-shot edge.
#[derive(Resource, Clone, Debug)]
pub struct RaceClock {
    pub duration: f32,
    remaining: f32,
    running: bool,
    finished: bool,
}

impl Default for RaceClock {
    fn default() -> Self {
        Self::new(60.0)
    }
}

impl RaceClock {
    /// Below this fraction of the duration the HUD shows the clock in red.
    pub const LOW_THRESHOLD: f32 = 0.15;

    pub fn new(duration: f32) -> Self {
        let duration = duration.max(0.0);
        Self { duration, remaining: duration, running: false, finished: false }
    }

    /// Resume the countdown from wherever it stands. Use [`RaceClock::reset`]
    /// first for a fresh run.
    pub fn start(&mut self) {
        self.running = true;
        self.finished = false;
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    pub fn reset(&mut self) {
        self.remaining = self.duration;
        self.running = false;
        self.finished = false;
    }

    /// Grant (or dock) seconds; the clock never goes below zero.
    pub fn add_time(&mut self, seconds: f32) {
        self.remaining = (self.remaining + seconds).max(0.0);
    }

    pub fn time_left(&self) -> f32 {
        self.remaining.max(0.0)
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn fraction(&self) -> f32 {
        if self.duration <= 0.0 {
            return 0.0;
        }
        self.time_left() / self.duration
    }

    pub fn is_low(&self) -> bool {
        self.fraction() <= Self::LOW_THRESHOLD
    }

    /// Advance the countdown. Returns true exactly once, on the tick that
    /// reaches zero; a stopped or finished clock never ticks.
    pub fn tick(&mut self, dt: f32) -> bool {
        if !self.running || self.finished {
            return false;
        }
        self.remaining -= dt;
        if self.remaining <= 0.0 {
            self.remaining = 0.0;
            self.finished = true;
            self.running = false;
            return true;
        }
        false
    }

    /// Clock text, `mm:ss`, with partial seconds rounded up so the display
    /// only shows 00:00 when time is actually gone.
    pub fn label(&self) -> String {
        let seconds = self.time_left().ceil() as i64;
        format!("{:02}:{:02}", seconds / 60, seconds % 60)
    }
}

pub fn start_race(mut clock: ResMut<RaceClock>) {
    clock.reset();
    clock.start();
    info!("race: {} on the clock", clock.label());
}

pub fn halt_race(mut clock: ResMut<RaceClock>) {
    clock.stop();
}

/// Count the race down; on expiry, empty the tank. The drain goes through
/// the tank so the empty edge fires through the normal fuel path, but a
/// timeout is not a "hit".
pub fn tick_race_clock(
    time: Res<Time>,
    mut clock: ResMut<RaceClock>,
    mut ships: Query<&mut FuelTank, With<Ship>>,
    mut expired: EventWriter<TimeExpired>,
    mut emptied: EventWriter<FuelEmptied>,
) {
    if !clock.tick(time.delta_secs()) {
        return;
    }

    info!("race: time expired");
    expired.write(TimeExpired);
    for mut tank in &mut ships {
        let rest = tank.max_fuel + 1.0;
        if tank.consume(rest).emptied {
            emptied.write(FuelEmptied);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_expiry_fires_exactly_once() {
        let mut clock = RaceClock::new(1.0);
        clock.start();

        assert!(!clock.tick(0.6));
        assert!(clock.tick(0.6));
        assert!(!clock.tick(0.6));
        assert_eq!(clock.time_left(), 0.0);
    }

    #[test]
    fn test_stopped_clock_does_not_tick() {
        let mut clock = RaceClock::new(10.0);
        assert!(!clock.tick(5.0));
        assert_eq!(clock.time_left(), 10.0);

        clock.start();
        clock.tick(4.0);
        clock.stop();
        assert!(!clock.tick(100.0));
        assert_eq!(clock.time_left(), 6.0);
    }

    #[test]
    fn test_reset_rearms_a_finished_clock() {
        let mut clock = RaceClock::new(1.0);
        clock.start();
        assert!(clock.tick(2.0));

        clock.reset();
        clock.start();
        assert_eq!(clock.time_left(), 1.0);
        assert!(clock.tick(2.0));
    }

    #[test]
    fn test_label_rounds_partial_seconds_up() {
        let mut clock = RaceClock::new(125.0);
        assert_eq!(clock.label(), "02:05");

        clock.start();
        clock.tick(65.99);
        // 59.01s left shows as a full minute.
        assert_eq!(clock.label(), "01:00");

        clock.tick(100.0);
        assert_eq!(clock.label(), "00:00");
    }

    #[test]
    fn test_add_time_floors_at_zero() {
        let mut clock = RaceClock::new(60.0);
        clock.start();
        clock.tick(10.0);

        clock.add_time(5.0);
        assert_eq!(clock.time_left(), 55.0);

        clock.add_time(-200.0);
        assert_eq!(clock.time_left(), 0.0);
    }

    #[test]
    fn test_low_warning_threshold_is_inclusive() {
        let mut clock = RaceClock::new(60.0);
        clock.start();
        assert!(!clock.is_low());

        clock.tick(51.0); // 9s left = exactly 15%
        assert!(clock.is_low());
    }

    #[test]
    fn test_expiry_drains_the_tank_through_the_fuel_path() {
        let mut app = App::new();
        app.add_event::<TimeExpired>()
            .add_event::<FuelEmptied>()
            .insert_resource(Time::<()>::default())
            .add_systems(Update, tick_race_clock);
        let mut clock = RaceClock::new(0.5);
        clock.start();
        app.insert_resource(clock);
        let ship = app
            .world_mut()
            .spawn((Ship::default(), FuelTank::new(100.0, 1.5)))
            .id();

        app.world_mut()
            .resource_mut::<Time>()
            .advance_by(Duration::from_secs(1));
        app.update();

        let tank = app.world().get::<FuelTank>(ship).unwrap();
        assert!(tank.is_empty());
        assert_eq!(tank.fuel, 0.0);
        assert_eq!(app.world().resource::<Events<TimeExpired>>().len(), 1);
        assert_eq!(app.world().resource::<Events<FuelEmptied>>().len(), 1);

        // The latch holds on later frames.
        app.world_mut()
            .resource_mut::<Time>()
            .advance_by(Duration::from_secs(1));
        app.update();
        assert_eq!(app.world().resource::<Events<TimeExpired>>().len(), 1);
    }
}
