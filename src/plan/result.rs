//! Complete plan result payload

use serde::{Deserialize, Serialize};

use crate::projection::Snapshot;
use super::inputs::RawPlanInputs;

/// Everything the presentation layer needs for one plan
///
/// Field names and unit conventions are a contract: monetary fields are
/// plain currency units, ages are integer years, month counts integers,
/// and the externally consumed rate fields (`retirement_tax_rate`,
/// `post_retirement_growth_rate`) are whole-number percentages while all
/// internal computation stays in decimal fractions. Built once per
/// request and never mutated after return.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanResult {
    /// Balance required at retirement to fund spending through the
    /// projection end age
    pub target_net_worth: f64,

    // Projected bucket values at the retirement-age snapshot
    pub projected_current_assets: f64,
    pub projected_savings: f64,
    pub projected_payouts: f64,
    pub total_projected_net_worth: f64,

    /// Projected total at retirement minus the target
    pub gap: f64,
    pub gap_percentage: f64,

    /// Monthly savings needed to close a shortfall (back-solved estimate,
    /// not re-simulated); equals current savings when there is no gap
    pub required_monthly_savings: f64,
    pub current_monthly_savings: f64,

    pub years_until_retirement: u32,
    pub months_until_retirement: u32,

    /// Yearly snapshots from current age to projection end age
    pub year_by_year: Vec<Snapshot>,
    pub projection_end_age: u32,
    pub net_worth_at_projection_end: f64,

    /// First fractional age at which net worth goes negative, if any
    pub depletion_age: Option<f64>,

    /// Effective tax rate on retirement income, as a percentage
    pub retirement_tax_rate: f64,
    pub pre_tax_retirement_income: f64,

    /// Post-retirement growth assumption, as a percentage
    pub post_retirement_growth_rate: f64,

    pub max_sustainable_monthly_income: f64,
    pub max_sustainable_pre_tax_monthly_income: f64,
    pub income_goal_coverage_ratio: f64,

    /// Inputs echoed back in percent units
    pub inputs: RawPlanInputs,
}
