//! Reaction engine: one discrete simulation step
//!
//! Each neutron moves using only its own previous position and heading.
//! Neutrons that leave the area are culled; a neutron that strikes an
//! unreacted atom is consumed and replaced by offspring at the atom's centre.
//! Offspring join the population for the *next* tick, so they are never
//! collision-checked in the tick that created them.

use std::f64::consts::TAU;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::core::config::SimulationConfig;
use crate::core::types::{AtomId, NeutronId, Tick, Vec2};
use crate::simulation::collision::first_collision;
use crate::simulation::store::{Neutron, ParticleStore};

/// Everything a renderer needs to update its shapes after one tick
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TickReport {
    /// Tick number this report describes (1-based)
    pub tick: Tick,
    /// Surviving neutrons and their new positions
    pub moved: Vec<(NeutronId, Vec2)>,
    /// Neutrons that left the area or were absorbed
    pub removed: Vec<NeutronId>,
    /// Offspring created this tick, at their spawn position
    pub spawned: Vec<Neutron>,
    /// Atoms that reacted this tick, in the order they were struck
    pub reacted: Vec<AtomId>,
}

impl TickReport {
    /// True when the tick changed nothing visible
    pub fn is_empty(&self) -> bool {
        self.moved.is_empty()
            && self.removed.is_empty()
            && self.spawned.is_empty()
            && self.reacted.is_empty()
    }
}

/// Advance every live neutron by one step and resolve collisions
///
/// The next population keeps processing order: survivors stay in place and a
/// consumed neutron is replaced, in its slot, by its offspring.
pub fn run_reaction_tick<R: Rng + ?Sized>(
    store: &mut ParticleStore,
    config: &SimulationConfig,
    rng: &mut R,
    tick: Tick,
) -> TickReport {
    let bounds = config.bounds();
    let current = std::mem::take(&mut store.neutrons);
    let mut next = Vec::with_capacity(current.len());
    let mut report = TickReport {
        tick,
        ..Default::default()
    };

    for mut neutron in current {
        let position = neutron.next_position(config.neutron_speed);

        if !bounds.contains(position) {
            report.removed.push(neutron.id);
            continue;
        }
        neutron.position = position;

        let Some(atom_id) =
            first_collision(&store.atoms, &store.index, position, config.contact_radius)
        else {
            report.moved.push((neutron.id, position));
            next.push(neutron);
            continue;
        };

        store.react_atom(atom_id);
        report.removed.push(neutron.id);
        report.reacted.push(atom_id);

        let origin = store.atoms[atom_id.index()].position();
        tracing::trace!(
            "Neutron {} struck atom {} at ({:.1}, {:.1})",
            neutron.id.0,
            atom_id.0,
            origin.x,
            origin.y
        );

        for _ in 0..config.offspring_per_fission {
            let heading = rng.gen_range(0.0..TAU);
            let child = store.make_neutron(origin, heading);
            report.spawned.push(child.clone());
            next.push(child);
        }
    }

    store.neutrons = next;

    tracing::debug!(
        tick,
        moved = report.moved.len(),
        removed = report.removed.len(),
        spawned = report.spawned.len(),
        reacted = report.reacted.len(),
        live = store.neutrons.len(),
        "Tick complete"
    );

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use std::f64::consts::PI;

    fn setup(atoms: &[Vec2]) -> (ParticleStore, SimulationConfig, ChaCha8Rng) {
        let config = SimulationConfig::default();
        let mut store = ParticleStore::new(config.contact_radius);
        store.populate(atoms);
        (store, config, ChaCha8Rng::seed_from_u64(42))
    }

    #[test]
    fn test_free_neutron_moves_by_speed() {
        let (mut store, config, mut rng) = setup(&[]);
        let n = store.make_neutron(Vec2::new(100.0, 100.0), 0.0);
        store.push_neutron(n.clone());

        let report = run_reaction_tick(&mut store, &config, &mut rng, 1);
        assert_eq!(report.moved, vec![(n.id, Vec2::new(103.0, 100.0))]);
        assert_eq!(store.neutrons()[0].position, Vec2::new(103.0, 100.0));
        assert_eq!(store.neutrons()[0].heading(), 0.0);
    }

    #[test]
    fn test_exit_culls_without_offspring() {
        let (mut store, config, mut rng) = setup(&[]);
        let n = store.make_neutron(Vec2::new(1.0, 300.0), PI);
        store.push_neutron(n.clone());

        let report = run_reaction_tick(&mut store, &config, &mut rng, 1);
        assert_eq!(report.removed, vec![n.id]);
        assert!(report.spawned.is_empty());
        assert!(store.neutrons().is_empty());
    }

    #[test]
    fn test_position_on_boundary_survives() {
        let (mut store, config, mut rng) = setup(&[]);
        let n = store.make_neutron(Vec2::new(797.0, 300.0), 0.0);
        store.push_neutron(n);
        run_reaction_tick(&mut store, &config, &mut rng, 1);
        assert_eq!(store.neutrons().len(), 1);
        run_reaction_tick(&mut store, &config, &mut rng, 2);
        assert!(store.neutrons().is_empty());
    }

    #[test]
    fn test_strike_spawns_offspring_at_atom() {
        let atom_pos = Vec2::new(200.0, 200.0);
        let (mut store, config, mut rng) = setup(&[atom_pos]);
        let n = store.make_neutron(Vec2::new(190.0, 200.0), 0.0);
        store.push_neutron(n.clone());

        let report = run_reaction_tick(&mut store, &config, &mut rng, 1);
        assert_eq!(report.reacted, vec![AtomId(0)]);
        assert_eq!(report.removed, vec![n.id]);
        assert_eq!(report.spawned.len(), 3);
        assert!(report.spawned.iter().all(|c| c.position == atom_pos));
        assert!(report
            .spawned
            .iter()
            .all(|c| (0.0..TAU).contains(&c.heading())));
        assert_eq!(store.neutrons().len(), 3);
        assert_eq!(store.collision_count(), 1);
        assert!(store.atoms()[0].reacted());
    }

    #[test]
    fn test_offspring_not_checked_in_spawn_tick() {
        // Two atoms on top of each other: the offspring of the first strike
        // sit on the second atom but must not trigger it until they move.
        let (mut store, config, mut rng) = setup(&[Vec2::new(200.0, 200.0), Vec2::new(201.0, 200.0)]);
        let n = store.make_neutron(Vec2::new(195.0, 200.0), 0.0);
        store.push_neutron(n);

        let report = run_reaction_tick(&mut store, &config, &mut rng, 1);
        assert_eq!(report.reacted, vec![AtomId(0)]);
        assert!(!store.atoms()[1].reacted());

        let report = run_reaction_tick(&mut store, &config, &mut rng, 2);
        assert_eq!(report.reacted, vec![AtomId(1)]);
        assert_eq!(store.collision_count(), 2);
    }

    #[test]
    fn test_one_atom_absorbs_only_first_neutron() {
        let (mut store, config, mut rng) = setup(&[Vec2::new(200.0, 200.0)]);
        let a = store.make_neutron(Vec2::new(195.0, 200.0), 0.0);
        let b = store.make_neutron(Vec2::new(205.0, 200.0), PI);
        store.push_neutron(a.clone());
        store.push_neutron(b.clone());

        let report = run_reaction_tick(&mut store, &config, &mut rng, 1);
        assert_eq!(report.reacted, vec![AtomId(0)]);
        assert_eq!(report.removed, vec![a.id]);
        assert!(report.moved.iter().any(|(id, _)| *id == b.id));
        assert_eq!(store.neutrons().len(), 4);
    }

    #[test]
    fn test_same_seed_same_outcome() {
        let atoms: Vec<Vec2> = (0..10).map(|i| Vec2::new(100.0 + 10.0 * i as f64, 300.0)).collect();
        let run = || {
            let (mut store, config, mut rng) = setup(&atoms);
            let n = store.make_neutron(Vec2::new(92.0, 300.0), 0.0);
            store.push_neutron(n);
            let mut reports = Vec::new();
            for t in 1..=60 {
                reports.push(run_reaction_tick(&mut store, &config, &mut rng, t));
            }
            reports
        };
        assert_eq!(run(), run());
    }
}
