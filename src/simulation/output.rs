//! Run output and serialization

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::core::error::Result;
use crate::core::types::Tick;
use crate::simulation::sim::{Metrics, PlacementSummary, Simulation};

/// Complete record of one headless run
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RunOutput {
    pub seed: u64,
    pub placement: Option<PlacementSummary>,
    pub neutrons_injected: usize,
    pub history: Vec<Metrics>,
    pub statistics: RunStats,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RunStats {
    pub ticks_run: Tick,
    pub wall_time_ms: u64,
    pub atoms: usize,
    pub collisions: u64,
    /// Share of atoms that reacted (0 when there are no atoms)
    pub reacted_fraction: f64,
    pub peak_neutrons: usize,
    /// First tick at which `peak_neutrons` was reached (0 = before any tick)
    pub peak_tick: Tick,
    pub neutrons_remaining: usize,
}

impl RunOutput {
    pub fn new(
        sim: &Simulation,
        neutrons_injected: usize,
        history: Vec<Metrics>,
        elapsed: Duration,
    ) -> Self {
        let atoms = sim.atoms().len();
        let final_metrics = sim.metrics();

        let (peak_tick, peak_neutrons) = history
            .iter()
            .enumerate()
            .map(|(i, m)| (i as Tick + 1, m.neutrons))
            .fold((0, neutrons_injected), |best, cur| {
                if cur.1 > best.1 {
                    cur
                } else {
                    best
                }
            });

        let reacted_fraction = if atoms == 0 {
            0.0
        } else {
            sim.reacted_count() as f64 / atoms as f64
        };

        Self {
            seed: sim.seed(),
            placement: sim.placement().copied(),
            neutrons_injected,
            statistics: RunStats {
                ticks_run: sim.tick_count(),
                wall_time_ms: elapsed.as_millis() as u64,
                atoms,
                collisions: final_metrics.collisions,
                reacted_fraction,
                peak_neutrons,
                peak_tick,
                neutrons_remaining: final_metrics.neutrons,
            },
            history,
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self)?)
    }

    pub fn summary(&self) -> String {
        let layout = self
            .placement
            .map(|p| format!("{} layout, {} of {} atoms placed", p.mode, p.placed, p.requested))
            .unwrap_or_else(|| "no atoms placed".to_string());
        format!(
            "Seed {}: {}\n{} ticks, {} collisions ({:.1}% reacted), peak {} neutrons at tick {}, {} remaining",
            self.seed,
            layout,
            self.statistics.ticks_run,
            self.statistics.collisions,
            self.statistics.reacted_fraction * 100.0,
            self.statistics.peak_neutrons,
            self.statistics.peak_tick,
            self.statistics.neutrons_remaining,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::Vec2;
    use crate::simulation::placement::{LayoutMode, LayoutParams};

    #[test]
    fn test_stats_from_single_fission() {
        let mut sim = Simulation::with_seed(8);
        let params = LayoutParams::from_config(sim.config());
        sim.reset_and_place(1, LayoutMode::Circle, params);
        let atom = sim.atoms()[0].position();
        sim.inject_neutron_at(atom - Vec2::new(4.0, 0.0), 0.0);

        let history: Vec<Metrics> = (0..3)
            .map(|_| {
                sim.tick();
                sim.metrics()
            })
            .collect();
        let output = RunOutput::new(&sim, 1, history, Duration::from_millis(2));

        assert_eq!(output.statistics.ticks_run, 3);
        assert_eq!(output.statistics.collisions, 1);
        assert_eq!(output.statistics.reacted_fraction, 1.0);
        assert_eq!(output.statistics.peak_neutrons, 3);
        assert_eq!(output.statistics.peak_tick, 1);
        assert!(output.summary().contains("circle layout, 1 of 1 atoms placed"));

        let json = output.to_json().unwrap();
        let back: RunOutput = serde_json::from_str(&json).unwrap();
        assert_eq!(back.statistics, output.statistics);
    }

    #[test]
    fn test_empty_run_has_zero_fraction() {
        let sim = Simulation::with_seed(8);
        let output = RunOutput::new(&sim, 0, Vec::new(), Duration::ZERO);
        assert_eq!(output.statistics.reacted_fraction, 0.0);
        assert_eq!(output.statistics.peak_tick, 0);
        assert!(output.summary().contains("no atoms placed"));
    }
}
