//! Nestegg - Retirement projection engine
//!
//! This library provides:
//! - Month-by-month three-bucket net-worth simulation to a configurable end age
//! - Annuity-due time-value-of-money math for retirement targets
//! - Progressive bracket taxation with a numeric pre-tax inverse
//! - Plan assembly: gap, required savings, and sustainable-income metrics
//! - Boundary validation of raw request payloads

pub mod annuity;
pub mod plan;
pub mod projection;
pub mod scenario;
pub mod tax;

// Re-export commonly used types
pub use plan::{PlanAssembler, PlanInputs, PlanResult, Payout, RawPlanInputs};
pub use projection::{ProjectionConfig, ProjectionEngine, ProjectionOutcome, Snapshot};
pub use scenario::PlanRunner;
pub use tax::{TaxBracket, TaxModel, TaxSchedule};
