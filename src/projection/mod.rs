//! Monthly net-worth projection: engine, ledger state, and snapshots

mod engine;
mod snapshot;
mod state;

pub use engine::{ProjectionConfig, ProjectionEngine, DEFAULT_PROJECTION_END_AGE};
pub use snapshot::{ProjectionOutcome, Snapshot};
pub use state::BucketState;
