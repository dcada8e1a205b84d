//! Fixed-cadence driver
//!
//! Calls [`Simulation::tick`] synchronously on the calling thread and pushes
//! each report to a renderer. Stopping is simply not calling it again.

use std::thread;
use std::time::Duration;

use crate::core::types::Tick;
use crate::render::Renderer;
use crate::simulation::sim::{Metrics, Simulation};

/// Drives a simulation at a constant interval
#[derive(Debug, Clone, Copy)]
pub struct FixedCadence {
    pub interval: Duration,
}

impl FixedCadence {
    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }

    /// Cadence taken from the simulation config (`tick_interval_ms`)
    pub fn realtime(sim: &Simulation) -> Self {
        Self::new(Duration::from_millis(sim.config().tick_interval_ms))
    }

    /// Run as fast as possible
    pub fn headless() -> Self {
        Self::new(Duration::ZERO)
    }

    /// One scheduled step: tick, render, report metrics
    pub fn step(&self, sim: &mut Simulation, renderer: &mut dyn Renderer) -> Metrics {
        let report = sim.tick();
        renderer.apply_tick(&report);
        let metrics = sim.metrics();
        renderer.metrics(metrics);
        metrics
    }

    /// Run exactly `ticks` steps, returning the metrics after each one
    pub fn run_ticks(
        &self,
        sim: &mut Simulation,
        renderer: &mut dyn Renderer,
        ticks: Tick,
    ) -> Vec<Metrics> {
        let mut history = Vec::with_capacity(ticks as usize);
        for i in 0..ticks {
            if i > 0 {
                self.pause();
            }
            history.push(self.step(sim, renderer));
        }
        history
    }

    /// Run until no neutrons remain or `max_ticks` steps have been taken
    pub fn run_until_quiescent(
        &self,
        sim: &mut Simulation,
        renderer: &mut dyn Renderer,
        max_ticks: Tick,
    ) -> Vec<Metrics> {
        let mut history = Vec::new();
        for i in 0..max_ticks {
            if sim.neutrons().is_empty() {
                tracing::debug!("No neutrons left after {} ticks", i);
                break;
            }
            if i > 0 {
                self.pause();
            }
            history.push(self.step(sim, renderer));
        }
        history
    }

    fn pause(&self) {
        if !self.interval.is_zero() {
            thread::sleep(self.interval);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::Vec2;
    use crate::render::{NullRenderer, RecordingRenderer};

    #[test]
    fn test_run_ticks_counts_steps() {
        let mut sim = Simulation::with_seed(1);
        sim.inject_neutron_at(Vec2::new(400.0, 300.0), 0.0);
        let history = FixedCadence::headless().run_ticks(&mut sim, &mut NullRenderer, 10);
        assert_eq!(history.len(), 10);
        assert_eq!(sim.tick_count(), 10);
        assert!(history.iter().all(|m| m.neutrons == 1));
    }

    #[test]
    fn test_quiescent_run_stops_when_empty() {
        let mut sim = Simulation::with_seed(1);
        // 9 units from the right edge: gone on the 4th step
        sim.inject_neutron_at(Vec2::new(791.0, 300.0), 0.0);
        let mut canvas = RecordingRenderer::new();
        let history = FixedCadence::headless().run_until_quiescent(&mut sim, &mut canvas, 100);
        assert_eq!(history.len(), 4);
        assert_eq!(history.last().map(|m| m.neutrons), Some(0));
        assert!(canvas.neutrons.is_empty());
    }

    #[test]
    fn test_realtime_uses_config_interval() {
        let sim = Simulation::with_seed(1);
        assert_eq!(FixedCadence::realtime(&sim).interval, Duration::from_millis(50));
    }
}
