//! Energy growth for every planet.

use hecs::World;
use tracing::warn;

use galaxy_core::components::Planet;

/// Grow each planet by one tick of `dt` seconds.
pub fn run(world: &mut World, dt: f32, energy_cap: Option<f32>) {
    for (_entity, planet) in world.query_mut::<&mut Planet>() {
        if !planet.energy.is_finite() {
            warn!(
                planet = planet.id.0,
                energy = planet.energy,
                "skipping growth of planet with invalid energy"
            );
            continue;
        }
        planet.grow(dt, energy_cap);
    }
}
