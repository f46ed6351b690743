// src/hazard.rs
//! Mines: contact hazards that knock fuel out of the tank.

use bevy::prelude::*;

use crate::collision::{circles_overlap, CircleCollider};
use crate::ship::{FuelEmptied, FuelHit, FuelTank, Ship};

/// A contact hazard. Spawner-created.
#[derive(Component, Clone, Copy, Debug)]
pub struct Mine {
    pub fuel_loss: f32,
    /// Minimum seconds between hits from this mine; only matters for mines
    /// that survive a hit.
    pub hit_cooldown: f32,
    pub destroy_on_hit: bool,
    /// Elapsed-time stamp of the last hit, `None` until the first one.
    pub last_hit: Option<f32>,
}

/// Fired for every registered mine hit, even one against a dry tank.
#[derive(Event, Clone, Copy)]
pub struct MineStruck {
    pub mine: Entity,
    pub fuel_lost: f32,
}

/// Contact check between the ship and every live mine. A hit stamps the
/// mine's cooldown and drains the tank; the drain is what fires the fuel
/// events, so a latched-empty tank takes a hit without any fuel fallout.
pub fn strike_ship(
    mut commands: Commands,
    time: Res<Time>,
    mut ship: Query<(&Transform, &CircleCollider, &mut FuelTank), With<Ship>>,
    mut mines: Query<(Entity, &Transform, &CircleCollider, &mut Mine)>,
    mut struck: EventWriter<MineStruck>,
    mut hits: EventWriter<FuelHit>,
    mut emptied: EventWriter<FuelEmptied>,
) {
    let Ok((ship_tf, ship_col, mut tank)) = ship.single_mut() else {
        return;
    };
    let ship_pos = ship_tf.translation.truncate();
    let now = time.elapsed_secs();

    for (entity, mine_tf, mine_col, mut mine) in &mut mines {
        let mine_pos = mine_tf.translation.truncate();
        if !circles_overlap(ship_pos, ship_col.radius, mine_pos, mine_col.radius) {
            continue;
        }
        if let Some(last) = mine.last_hit {
            if now - last < mine.hit_cooldown {
                continue;
            }
        }
        mine.last_hit = Some(now);

        let result = tank.consume(mine.fuel_loss);
        if result.drained > 0.0 {
            hits.write(FuelHit { amount: result.drained });
        }
        if result.emptied {
            info!("hazard: mine strike emptied the tank");
            emptied.write(FuelEmptied);
        }
        struck.write(MineStruck { mine: entity, fuel_lost: result.drained });
        debug!("hazard: mine {entity:?} hit the ship for {:.1} fuel", result.drained);

        if mine.destroy_on_hit {
            commands.entity(entity).despawn();
        }
    }
}
