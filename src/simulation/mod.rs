pub mod collision;
pub mod output;
pub mod placement;
pub mod sim;
pub mod store;
pub mod tick;

pub use collision::{collides, first_collision, first_collision_linear};
pub use output::{RunOutput, RunStats};
pub use placement::{parse_atom_count, LayoutMode, LayoutParams};
pub use sim::{Metrics, PlacementSummary, Simulation};
pub use store::{Atom, Neutron, ParticleStore};
pub use tick::{run_reaction_tick, TickReport};
