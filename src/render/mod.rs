//! Renderer seam for the simulation
//!
//! The simulation pushes deltas into a [`Renderer`]; renderers only draw.
//! This module is READ-ONLY - it never modifies simulation state.

pub mod colors;

use ahash::AHashMap;

use crate::core::types::{AtomId, NeutronId, Vec2};
use crate::render::colors::{atom_style, ShapeStyle};
use crate::simulation::sim::Metrics;
use crate::simulation::store::{Atom, Neutron};
use crate::simulation::tick::TickReport;

/// Receiver of visual updates
pub trait Renderer {
    /// Replace every drawn shape with the given particles
    fn reset(&mut self, atoms: &[Atom], neutrons: &[Neutron]);

    /// Draw a newly injected neutron
    fn neutron_added(&mut self, neutron: &Neutron);

    /// Apply one tick worth of moves, removals, spawns and atom restyles
    fn apply_tick(&mut self, report: &TickReport);

    /// Refresh the counters display
    fn metrics(&mut self, _metrics: Metrics) {}
}

/// Renderer that draws nothing
#[derive(Debug, Default, Clone, Copy)]
pub struct NullRenderer;

impl Renderer for NullRenderer {
    fn reset(&mut self, _atoms: &[Atom], _neutrons: &[Neutron]) {}
    fn neutron_added(&mut self, _neutron: &Neutron) {}
    fn apply_tick(&mut self, _report: &TickReport) {}
}

/// A drawn atom shape
#[derive(Debug, Clone, PartialEq)]
pub struct AtomShape {
    pub id: AtomId,
    pub position: Vec2,
    pub style: ShapeStyle,
}

/// Headless mirror of what a canvas would show
#[derive(Debug, Default, Clone)]
pub struct RecordingRenderer {
    pub atoms: Vec<AtomShape>,
    pub neutrons: AHashMap<NeutronId, Vec2>,
    pub last_metrics: Metrics,
    pub ticks_applied: u64,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reacted_shapes(&self) -> usize {
        self.atoms
            .iter()
            .filter(|a| a.style == atom_style(true))
            .count()
    }
}

impl Renderer for RecordingRenderer {
    fn reset(&mut self, atoms: &[Atom], neutrons: &[Neutron]) {
        self.atoms = atoms
            .iter()
            .map(|a| AtomShape {
                id: a.id,
                position: a.position(),
                style: atom_style(a.reacted()),
            })
            .collect();
        self.neutrons = neutrons.iter().map(|n| (n.id, n.position)).collect();
        self.ticks_applied = 0;
    }

    fn neutron_added(&mut self, neutron: &Neutron) {
        self.neutrons.insert(neutron.id, neutron.position);
    }

    fn apply_tick(&mut self, report: &TickReport) {
        for id in &report.removed {
            self.neutrons.remove(id);
        }
        for &(id, position) in &report.moved {
            self.neutrons.insert(id, position);
        }
        for neutron in &report.spawned {
            self.neutrons.insert(neutron.id, neutron.position);
        }
        for id in &report.reacted {
            if let Some(shape) = self.atoms.get_mut(id.index()) {
                shape.style = atom_style(true);
            }
        }
        self.ticks_applied += 1;
    }

    fn metrics(&mut self, metrics: Metrics) {
        self.last_metrics = metrics;
    }
}

/// Renderer that logs every delta through `tracing`
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingRenderer;

impl Renderer for TracingRenderer {
    fn reset(&mut self, atoms: &[Atom], neutrons: &[Neutron]) {
        tracing::info!("Drawing {} atoms and {} neutrons", atoms.len(), neutrons.len());
    }

    fn neutron_added(&mut self, neutron: &Neutron) {
        tracing::debug!(
            "Drawing neutron {} at ({:.1}, {:.1})",
            neutron.id.0,
            neutron.position.x,
            neutron.position.y
        );
    }

    fn apply_tick(&mut self, report: &TickReport) {
        if report.is_empty() {
            return;
        }
        tracing::debug!(
            tick = report.tick,
            moved = report.moved.len(),
            removed = report.removed.len(),
            spawned = report.spawned.len(),
            "Redraw"
        );
        for id in &report.reacted {
            tracing::info!("Atom {} reacted on tick {}", id.0, report.tick);
        }
    }

    fn metrics(&mut self, metrics: Metrics) {
        tracing::trace!("{}", metrics);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::placement::{LayoutMode, LayoutParams};
    use crate::simulation::sim::Simulation;

    #[test]
    fn test_recording_renderer_mirrors_simulation() {
        let mut sim = Simulation::with_seed(3);
        let params = LayoutParams::from_config(sim.config());
        sim.reset_and_place(1, LayoutMode::Circle, params);

        let mut canvas = RecordingRenderer::new();
        canvas.reset(sim.atoms(), sim.neutrons());

        let atom = sim.atoms()[0].position();
        let n = sim.inject_neutron_at(atom - Vec2::new(6.0, 0.0), 0.0);
        canvas.neutron_added(&n);

        for _ in 0..5 {
            let report = sim.tick();
            canvas.apply_tick(&report);
            canvas.metrics(sim.metrics());

            assert_eq!(canvas.neutrons.len(), sim.neutrons().len());
            for live in sim.neutrons() {
                assert_eq!(canvas.neutrons.get(&live.id), Some(&live.position));
            }
        }

        assert!(!canvas.neutrons.contains_key(&n.id));
        assert_eq!(canvas.reacted_shapes(), 1);
        assert_eq!(canvas.last_metrics, sim.metrics());
        assert_eq!(canvas.ticks_applied, 5);
    }
}
