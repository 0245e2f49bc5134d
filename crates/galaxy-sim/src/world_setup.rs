//! Entity spawn factories for setting up the simulation world.
//!
//! Places planets at startup and builds ships (with their Bezier paths)
//! when a planet launches.

use hecs::{Entity, World};
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use galaxy_core::components::{Planet, PlanetId, Ship, ShipId};
use galaxy_core::constants::{MAX_PLACEMENT_ATTEMPTS, PLANET_SIZES};
use galaxy_core::errors::SetupError;
use galaxy_core::party::{PartyId, PartyRegistry};
use galaxy_core::types::Vector;

use crate::config::SimConfig;

/// Where a planet starts and who owns it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanetLayout {
    pub party: PartyId,
    pub position: Vector,
    pub size: f32,
    pub energy: f32,
    pub growth_rate: f32,
}

/// Randomly place `config.planet_count` non-overlapping planets.
///
/// The first planet goes to the player, the second to the computer,
/// the rest stay neutral.
pub fn random_layout(
    config: &SimConfig,
    parties: &PartyRegistry,
    rng: &mut ChaCha8Rng,
) -> Result<Vec<PlanetLayout>, SetupError> {
    let mut layout: Vec<PlanetLayout> = Vec::with_capacity(config.planet_count);

    for index in 0..config.planet_count {
        let size = sample_planet_size(rng);
        let position = find_free_spot(config, &layout, size, rng).ok_or(
            SetupError::PlacementExhausted {
                index,
                attempts: MAX_PLACEMENT_ATTEMPTS,
            },
        )?;

        let party = match index {
            0 => parties.player(),
            1 => parties.computer(),
            _ => parties.neutral(),
        };

        layout.push(PlanetLayout {
            party,
            position,
            size,
            energy: config.initial_energy,
            growth_rate: config.growth_rate,
        });
    }

    Ok(layout)
}

/// Draw a planet radius from the discrete size distribution.
fn sample_planet_size(rng: &mut ChaCha8Rng) -> f32 {
    let roll: f32 = rng.gen();
    PLANET_SIZES
        .iter()
        .find(|(threshold, _)| roll < *threshold)
        .map(|(_, size)| *size)
        .unwrap_or(PLANET_SIZES[PLANET_SIZES.len() - 1].1)
}

/// Sample positions until one clears every placed planet.
fn find_free_spot(
    config: &SimConfig,
    placed: &[PlanetLayout],
    size: f32,
    rng: &mut ChaCha8Rng,
) -> Option<Vector> {
    let field = &config.field;
    for _ in 0..MAX_PLACEMENT_ATTEMPTS {
        let x = field.border + rng.gen::<f32>() * (field.width - 2.0 * field.border);
        let y = field.border + rng.gen::<f32>() * (field.height - 2.0 * field.border);
        let candidate = Vector::new(x, y);

        let clear = placed.iter().all(|other| {
            candidate.distance_to(&other.position) >= other.size + size + config.separation_margin
        });
        if clear {
            return Some(candidate);
        }
    }
    None
}

/// Check a caller-supplied layout against the party table and config.
pub fn validate_layout(
    config: &SimConfig,
    parties: &PartyRegistry,
    layout: &[PlanetLayout],
) -> Result<(), SetupError> {
    for (index, planet) in layout.iter().enumerate() {
        let invalid = |reason| SetupError::InvalidLayout { index, reason };

        if parties.get(planet.party).is_none() {
            return Err(invalid("party is not registered"));
        }
        if !planet.position.is_finite() {
            return Err(invalid("position must be finite"));
        }
        if !(planet.size.is_finite() && planet.size > 0.0) {
            return Err(invalid("size must be positive"));
        }
        if !(planet.energy.is_finite() && planet.energy >= 0.0) {
            return Err(invalid("energy must be non-negative"));
        }
        if config.energy_cap.is_some_and(|cap| planet.energy > cap) {
            return Err(invalid("energy exceeds energy_cap"));
        }
        if !(planet.growth_rate.is_finite() && planet.growth_rate >= 0.0) {
            return Err(invalid("growth_rate must be non-negative"));
        }
    }
    Ok(())
}

/// Spawn planets in layout order. Returns their entities indexed by `PlanetId`.
pub fn spawn_planets(world: &mut World, layout: &[PlanetLayout]) -> Vec<Entity> {
    layout
        .iter()
        .enumerate()
        .map(|(index, planet)| {
            world.spawn((Planet {
                id: PlanetId(index as u32),
                party: planet.party,
                position: planet.position,
                size: planet.size,
                energy: planet.energy,
                growth_rate: planet.growth_rate,
            },))
        })
        .collect()
}

/// Build a ship from `source` to `dest` on a fresh random path.
pub fn build_ship(
    config: &SimConfig,
    rng: &mut ChaCha8Rng,
    id: ShipId,
    source: &Planet,
    dest: &Planet,
) -> Ship {
    let sp1 = sample_in_box(rng, source.position, dest.position);
    let sp2 = sample_in_box(rng, source.position, dest.position);
    let samples = rng.gen_range(config.path_samples_min..config.path_samples_max);
    let path = Vector::bezier(source.position, sp1, sp2, dest.position, samples);

    Ship {
        id,
        party: source.party,
        source: source.id,
        dest: dest.id,
        control_points: [sp1, sp2],
        path,
        path_index: 0,
        speed: config.ship_speed,
    }
}

/// Uniform point in the axis-aligned box spanned by `a` and `b`.
fn sample_in_box(rng: &mut ChaCha8Rng, a: Vector, b: Vector) -> Vector {
    Vector::new(sample_between(rng, a.x, b.x), sample_between(rng, a.y, b.y))
}

fn sample_between(rng: &mut ChaCha8Rng, a: f32, b: f32) -> f32 {
    let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
    if hi > lo {
        rng.gen_range(lo..hi)
    } else {
        lo
    }
}
