//! Yearly snapshot output structures for projections

use serde::{Deserialize, Serialize};

/// One yearly row of projection output
///
/// Field names are a contract with the presentation layer and must not be
/// renamed. `year` duplicates `age` for charting compatibility.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    pub year: u32,
    pub age: u32,
    pub current_assets: f64,
    pub savings_contributions: f64,
    pub payouts_value: f64,
    pub total_net_worth: f64,
    /// Constant across all snapshots of one plan
    pub target_net_worth: f64,
    pub gap: f64,
}

/// Complete output of one projection run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectionOutcome {
    /// Initial t=0 snapshot plus one per simulated year, in age order
    pub snapshots: Vec<Snapshot>,

    /// Index into `snapshots` of the retirement-age row, if the horizon
    /// reached it
    pub retirement_snapshot_index: Option<usize>,

    /// First age at which total net worth crossed below zero, as a
    /// fractional age; None if the plan never depletes
    pub depletion_age: Option<f64>,
}

impl ProjectionOutcome {
    /// Snapshot at the ideal retirement age
    pub fn retirement_snapshot(&self) -> Option<&Snapshot> {
        self.retirement_snapshot_index
            .and_then(|i| self.snapshots.get(i))
    }

    /// Snapshot at the projection end age
    pub fn final_snapshot(&self) -> Option<&Snapshot> {
        self.snapshots.last()
    }
}
