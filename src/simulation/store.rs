//! Particle store: the live atoms, neutrons and reaction counter

use serde::{Deserialize, Serialize};

use crate::core::types::{AtomId, NeutronId, Vec2};
use crate::spatial::AtomIndex;

/// A stationary fissile atom
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Atom {
    pub id: AtomId,
    position: Vec2,
    reacted: bool,
}

impl Atom {
    pub fn new(id: AtomId, position: Vec2) -> Self {
        Self {
            id,
            position,
            reacted: false,
        }
    }

    #[inline]
    pub fn position(&self) -> Vec2 {
        self.position
    }

    #[inline]
    pub fn reacted(&self) -> bool {
        self.reacted
    }

    /// Mark the atom reacted. Returns false if it had already reacted.
    pub fn react(&mut self) -> bool {
        if self.reacted {
            return false;
        }
        self.reacted = true;
        true
    }
}

/// A neutron travelling in a straight line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Neutron {
    pub id: NeutronId,
    pub position: Vec2,
    heading: f64,
}

impl Neutron {
    pub fn new(id: NeutronId, position: Vec2, heading: f64) -> Self {
        Self {
            id,
            position,
            heading,
        }
    }

    /// Heading angle in radians, fixed at creation
    #[inline]
    pub fn heading(&self) -> f64 {
        self.heading
    }

    /// Position after one step of `speed` along the heading
    #[inline]
    pub fn next_position(&self, speed: f64) -> Vec2 {
        self.position + Vec2::from_angle(self.heading) * speed
    }
}

/// Owns every live particle plus the collision counter
#[derive(Debug, Clone)]
pub struct ParticleStore {
    pub(crate) atoms: Vec<Atom>,
    pub(crate) neutrons: Vec<Neutron>,
    pub(crate) index: AtomIndex,
    collision_count: u64,
    next_neutron_id: u64,
}

impl ParticleStore {
    pub fn new(cell_size: f64) -> Self {
        Self {
            atoms: Vec::new(),
            neutrons: Vec::new(),
            index: AtomIndex::new(cell_size),
            collision_count: 0,
            next_neutron_id: 1,
        }
    }

    /// Drop every particle and zero the counters
    pub fn clear(&mut self) {
        self.atoms.clear();
        self.neutrons.clear();
        self.index.clear();
        self.collision_count = 0;
        self.next_neutron_id = 1;
    }

    /// Replace the atom set; ids follow the order of `positions`
    pub fn populate(&mut self, positions: &[Vec2]) {
        self.atoms = positions
            .iter()
            .enumerate()
            .map(|(i, &p)| Atom::new(AtomId(i as u32), p))
            .collect();
        self.index
            .rebuild(self.atoms.iter().map(|a| (a.id, a.position())));
    }

    pub fn atoms(&self) -> &[Atom] {
        &self.atoms
    }

    pub fn neutrons(&self) -> &[Neutron] {
        &self.neutrons
    }

    pub fn atom(&self, id: AtomId) -> Option<&Atom> {
        self.atoms.get(id.index())
    }

    pub fn collision_count(&self) -> u64 {
        self.collision_count
    }

    pub fn reacted_count(&self) -> usize {
        self.atoms.iter().filter(|a| a.reacted()).count()
    }

    /// Create a neutron with a fresh id. It is not added to the live set.
    pub fn make_neutron(&mut self, position: Vec2, heading: f64) -> Neutron {
        let id = NeutronId(self.next_neutron_id);
        self.next_neutron_id += 1;
        Neutron::new(id, position, heading)
    }

    pub fn push_neutron(&mut self, neutron: Neutron) {
        self.neutrons.push(neutron);
    }

    /// React the atom and count the collision. No-op on an already reacted atom.
    pub(crate) fn react_atom(&mut self, id: AtomId) -> bool {
        let reacted = self
            .atoms
            .get_mut(id.index())
            .map(Atom::react)
            .unwrap_or(false);
        if reacted {
            self.collision_count += 1;
        }
        reacted
    }
}
