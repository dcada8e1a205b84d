//! Simulation facade: the public entry points driven by a control surface
//! and a scheduler.

use std::f64::consts::TAU;
use std::fmt;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::core::config::SimulationConfig;
use crate::core::error::Result;
use crate::core::types::{Tick, Vec2};
use crate::simulation::placement::{layout_positions, random_point, LayoutMode, LayoutParams};
use crate::simulation::store::{Atom, Neutron, ParticleStore};
use crate::simulation::tick::{run_reaction_tick, TickReport};

/// Counts shown next to the simulation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metrics {
    pub neutrons: usize,
    pub collisions: u64,
}

impl fmt::Display for Metrics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Neutrons: {}  Collisions: {}", self.neutrons, self.collisions)
    }
}

/// Outcome of the most recent layout request
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlacementSummary {
    pub mode: LayoutMode,
    pub params: LayoutParams,
    pub requested: usize,
    pub placed: usize,
}

/// A chain reaction simulation with its own deterministic random source
pub struct Simulation {
    config: SimulationConfig,
    store: ParticleStore,
    rng: ChaCha8Rng,
    seed: u64,
    tick: Tick,
    placement: Option<PlacementSummary>,
}

impl Simulation {
    /// Create an empty simulation. A `None` seed draws a fresh one.
    pub fn new(config: SimulationConfig, seed: Option<u64>) -> Result<Self> {
        config.validate()?;
        let seed = seed.unwrap_or_else(rand::random);
        Ok(Self {
            store: ParticleStore::new(config.contact_radius),
            config,
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
            tick: 0,
            placement: None,
        })
    }

    /// Default configuration with a fixed seed
    pub fn with_seed(seed: u64) -> Self {
        let config = SimulationConfig::default();
        Self {
            store: ParticleStore::new(config.contact_radius),
            config,
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
            tick: 0,
            placement: None,
        }
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Ticks run since the last reset
    pub fn tick_count(&self) -> Tick {
        self.tick
    }

    pub fn atoms(&self) -> &[Atom] {
        self.store.atoms()
    }

    pub fn neutrons(&self) -> &[Neutron] {
        self.store.neutrons()
    }

    pub fn reacted_count(&self) -> usize {
        self.store.reacted_count()
    }

    pub fn placement(&self) -> Option<&PlacementSummary> {
        self.placement.as_ref()
    }

    /// Clear everything and lay out `count` fresh atoms
    ///
    /// Grid layouts may place fewer atoms than requested; the returned slice
    /// is the authoritative result.
    pub fn reset_and_place(
        &mut self,
        count: usize,
        mode: LayoutMode,
        params: LayoutParams,
    ) -> &[Atom] {
        self.store.clear();
        self.tick = 0;

        let params = params.normalized(&self.config);
        let positions = layout_positions(mode, count, &params, &self.config, &mut self.rng);
        self.store.populate(&positions);

        let placed = positions.len();
        if placed < count {
            tracing::info!(
                "Placed {} of {} requested atoms ({} layout ran out of room)",
                placed,
                count,
                mode
            );
        } else {
            tracing::info!("Placed {} atoms in {} layout", placed, mode);
        }
        self.placement = Some(PlacementSummary {
            mode,
            params,
            requested: count,
            placed,
        });

        self.store.atoms()
    }

    /// Release one neutron at a random interior point with a random heading
    pub fn inject_neutron(&mut self) -> Neutron {
        let position = random_point(&self.config.interior(), &mut self.rng);
        let heading = self.rng.gen_range(0.0..TAU);
        self.inject_neutron_at(position, heading)
    }

    /// Release one neutron at an explicit position and heading
    pub fn inject_neutron_at(&mut self, position: Vec2, heading: f64) -> Neutron {
        let neutron = self.store.make_neutron(position, heading);
        self.store.push_neutron(neutron.clone());
        tracing::debug!(
            "Injected neutron {} at ({:.1}, {:.1}) heading {:.3}",
            neutron.id.0,
            position.x,
            position.y,
            heading
        );
        neutron
    }

    /// Advance exactly one step
    pub fn tick(&mut self) -> TickReport {
        self.tick += 1;
        run_reaction_tick(&mut self.store, &self.config, &mut self.rng, self.tick)
    }

    pub fn metrics(&self) -> Metrics {
        Metrics {
            neutrons: self.store.neutrons().len(),
            collisions: self.store.collision_count(),
        }
    }
}
