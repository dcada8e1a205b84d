//! Neutron-atom contact tests

use crate::core::types::{AtomId, Vec2};
use crate::simulation::store::{Atom, Neutron};
use crate::spatial::AtomIndex;

/// True iff the centres are strictly closer than `contact_radius`
#[inline]
pub fn in_contact(a: Vec2, b: Vec2, contact_radius: f64) -> bool {
    a.distance(&b) < contact_radius
}

#[inline]
pub fn collides(neutron: &Neutron, atom: &Atom, contact_radius: f64) -> bool {
    in_contact(neutron.position, atom.position(), contact_radius)
}

/// First unreacted atom, in placement order, in contact with `pos`
pub fn first_collision_linear(atoms: &[Atom], pos: Vec2, contact_radius: f64) -> Option<AtomId> {
    atoms
        .iter()
        .find(|a| !a.reacted() && in_contact(pos, a.position(), contact_radius))
        .map(|a| a.id)
}

/// Same answer as [`first_collision_linear`], restricted to the index neighbourhood.
///
/// Atom ids are placement indices, so the smallest matching id is the one an
/// ordered scan would have reached first.
pub fn first_collision(
    atoms: &[Atom],
    index: &AtomIndex,
    pos: Vec2,
    contact_radius: f64,
) -> Option<AtomId> {
    index
        .query_neighbors(pos)
        .filter(|id| {
            atoms
                .get(id.index())
                .map(|a| !a.reacted() && in_contact(pos, a.position(), contact_radius))
                .unwrap_or(false)
        })
        .min()
}
