//! Path following: every ship steps one point along its path per tick.
//!
//! Travel time is a function of tick rate and path length, not of `dt`.

use hecs::World;
use tracing::{debug, warn};

use galaxy_core::components::Ship;

pub fn run(world: &mut World) {
    for (_entity, ship) in world.query_mut::<&mut Ship>() {
        if ship.path.is_empty() {
            warn!(ship = ship.id.0, "skipping ship without a path");
            continue;
        }
        if ship.has_arrived() {
            debug!(ship = ship.id.0, dest = ship.dest.0, "ship parked, waiting on destination");
            continue;
        }
        ship.advance();
    }
}
