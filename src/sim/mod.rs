//! Seesaw simulation core
//!
//! Pure and platform-independent:
//! - Seeded RNG only
//! - No rendering or storage dependencies

pub mod history;
pub mod physics;
pub mod state;

pub use history::{DropLog, DropLogEntry, Side};
pub use physics::{Balance, PhysicsResult, evaluate};
pub use state::{PlacedObject, SimulationState, Snapshot};
