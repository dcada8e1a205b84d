//! Sparse hash grid for collision candidate queries

use ahash::AHashMap;

use crate::core::types::{AtomId, Vec2};

/// Sparse hash grid over atom positions
///
/// With `cell_size >= contact radius`, every atom within contact range of a
/// point lies in the 3x3 block of cells around it.
#[derive(Debug, Clone)]
pub struct AtomIndex {
    cell_size: f64,
    cells: AHashMap<(i32, i32), Vec<AtomId>>,
}

impl AtomIndex {
    pub fn new(cell_size: f64) -> Self {
        Self {
            cell_size,
            cells: AHashMap::new(),
        }
    }

    #[inline]
    fn cell_coord(&self, pos: Vec2) -> (i32, i32) {
        (
            (pos.x / self.cell_size).floor() as i32,
            (pos.y / self.cell_size).floor() as i32,
        )
    }

    pub fn clear(&mut self) {
        self.cells.clear();
    }

    pub fn insert(&mut self, atom: AtomId, pos: Vec2) {
        let coord = self.cell_coord(pos);
        self.cells.entry(coord).or_default().push(atom);
    }

    pub fn len(&self) -> usize {
        self.cells.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Query all atoms in neighboring cells (3x3 neighborhood), in no particular order
    pub fn query_neighbors(&self, pos: Vec2) -> impl Iterator<Item = AtomId> + '_ {
        let (cx, cy) = self.cell_coord(pos);

        (-1..=1).flat_map(move |dx| {
            (-1..=1).flat_map(move |dy| {
                self.cells
                    .get(&(cx.saturating_add(dx), cy.saturating_add(dy)))
                    .into_iter()
                    .flatten()
                    .copied()
            })
        })
    }

    /// Rebuild grid from positions
    pub fn rebuild(&mut self, atoms: impl Iterator<Item = (AtomId, Vec2)>) {
        self.clear();
        for (atom, pos) in atoms {
            self.insert(atom, pos);
        }
    }
}
