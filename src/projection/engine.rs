//! Core projection engine for monthly net-worth simulation

use std::collections::HashMap;

use log::debug;

use crate::annuity;
use crate::plan::PlanInputs;
use super::snapshot::{ProjectionOutcome, Snapshot};
use super::state::BucketState;

/// Default last simulated age
pub const DEFAULT_PROJECTION_END_AGE: u32 = 100;

/// Configuration for a projection run
#[derive(Debug, Clone)]
pub struct ProjectionConfig {
    /// Age at which the simulation stops (inclusive)
    pub projection_end_age: u32,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            projection_end_age: DEFAULT_PROJECTION_END_AGE,
        }
    }
}

/// Main projection engine
///
/// Runs the month-by-month three-bucket simulation from the current age
/// to the projection end age. A pure function of its validated inputs:
/// numeric edge cases are guarded in the annuity helpers, and no error
/// path exists inside the loop itself.
pub struct ProjectionEngine {
    config: ProjectionConfig,
}

impl ProjectionEngine {
    pub fn new(config: ProjectionConfig) -> Self {
        Self { config }
    }

    /// Simulate one plan
    ///
    /// `monthly_withdrawal` is the fixed pre-tax amount drawn every
    /// post-retirement month; `post_retirement_rate` is the annual growth
    /// assumption after retirement (already capped by the caller).
    /// Per month, in order: mature payouts land, the contribution or
    /// withdrawal is applied, then all three buckets grow.
    pub fn project(
        &self,
        inputs: &PlanInputs,
        target_net_worth: f64,
        monthly_withdrawal: f64,
        post_retirement_rate: f64,
    ) -> ProjectionOutcome {
        let end_age = self.config.projection_end_age;
        let months_until_retirement = inputs
            .ideal_retirement_age
            .saturating_sub(inputs.current_age)
            .saturating_mul(12);
        let months_until_end = end_age
            .saturating_sub(inputs.current_age)
            .saturating_mul(12);

        let pre_retirement_growth = 1.0 + annuity::monthly_rate(inputs.cagr);
        let post_retirement_growth = 1.0 + annuity::monthly_rate(post_retirement_rate);

        debug!(
            "projecting {} months ({} pre-retirement), withdrawal {:.2}/mo",
            months_until_end, months_until_retirement, monthly_withdrawal
        );

        // Month offset -> summed payout amounts; payouts beyond the
        // horizon are dropped.
        let mut payout_schedule: HashMap<u32, f64> = HashMap::new();
        for payout in &inputs.payouts {
            if payout.age > end_age || payout.age < inputs.current_age {
                continue;
            }
            let months_from_start =
                (payout.age - inputs.current_age).saturating_mul(12);
            *payout_schedule.entry(months_from_start).or_insert(0.0) += payout.amount;
        }

        let mut state = BucketState::new(inputs.current_asset_values);
        let mut snapshots = Vec::with_capacity(months_until_end as usize / 12 + 1);
        let mut depletion_age: Option<f64> = None;

        snapshots.push(take_snapshot(inputs.current_age, &state, target_net_worth));
        let mut retirement_snapshot_index =
            (inputs.current_age == inputs.ideal_retirement_age).then_some(0);

        for month in 1..=months_until_end {
            if let Some(&amount) = payout_schedule.get(&month) {
                state.payouts += amount;
            }

            let growth_multiplier = if month <= months_until_retirement {
                if inputs.monthly_savings > 0.0 {
                    state.contributions += inputs.monthly_savings;
                }
                pre_retirement_growth
            } else {
                state.withdraw(monthly_withdrawal);
                post_retirement_growth
            };

            state.grow(growth_multiplier);

            if depletion_age.is_none() && state.total_net_worth() < 0.0 {
                depletion_age = Some(inputs.current_age as f64 + month as f64 / 12.0);
            }

            if month % 12 == 0 {
                let age = inputs.current_age + month / 12;
                snapshots.push(take_snapshot(age, &state, target_net_worth));
                if age == inputs.ideal_retirement_age {
                    retirement_snapshot_index = Some(snapshots.len() - 1);
                }
            }
        }

        ProjectionOutcome {
            snapshots,
            retirement_snapshot_index,
            depletion_age,
        }
    }
}

fn take_snapshot(age: u32, state: &BucketState, target_net_worth: f64) -> Snapshot {
    let total_net_worth = state.total_net_worth();
    Snapshot {
        year: age,
        age,
        current_assets: state.existing_assets,
        savings_contributions: state.contributions,
        payouts_value: state.payouts,
        total_net_worth,
        target_net_worth,
        gap: total_net_worth - target_net_worth,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::Payout;
    use approx::assert_relative_eq;

    fn test_inputs() -> PlanInputs {
        PlanInputs {
            ideal_retirement_income: 5000.0,
            ideal_retirement_age: 65,
            withdrawal_rate: 0.04,
            current_age: 40,
            current_monthly_income: 8000.0,
            current_asset_values: 200_000.0,
            cagr: 0.05,
            monthly_savings: 1500.0,
            working_tax_rate: 0.30,
            payouts: vec![],
        }
    }

    fn engine() -> ProjectionEngine {
        ProjectionEngine::new(ProjectionConfig::default())
    }

    #[test]
    fn test_snapshots_span_current_age_to_end_age() {
        let outcome = engine().project(&test_inputs(), 1_000_000.0, 5000.0, 0.04);

        assert_eq!(outcome.snapshots.first().unwrap().age, 40);
        assert_eq!(outcome.snapshots.last().unwrap().age, 100);
        assert_eq!(outcome.snapshots.len(), 61);
    }

    #[test]
    fn test_zero_growth_zero_withdrawal_preserves_assets() {
        let mut inputs = test_inputs();
        inputs.cagr = 0.0;
        inputs.monthly_savings = 0.0;

        let outcome = engine().project(&inputs, 0.0, 0.0, 0.0);
        let last = outcome.final_snapshot().unwrap();
        assert_relative_eq!(last.current_assets, 200_000.0);
        assert_relative_eq!(last.total_net_worth, 200_000.0);
    }

    #[test]
    fn test_contributions_stop_at_retirement() {
        let mut inputs = test_inputs();
        inputs.current_age = 60;
        inputs.ideal_retirement_age = 65;
        inputs.cagr = 0.0;
        inputs.current_asset_values = 0.0;
        inputs.monthly_savings = 1000.0;

        // Small withdrawal so contributions only drain, never grow, after 65
        let outcome = engine().project(&inputs, 0.0, 100.0, 0.0);

        let at_65 = outcome.retirement_snapshot().unwrap();
        assert_relative_eq!(at_65.savings_contributions, 60_000.0);

        let at_66 = &outcome.snapshots[6];
        assert_eq!(at_66.age, 66);
        assert!(at_66.savings_contributions < at_65.savings_contributions);
    }

    #[test]
    fn test_payout_lands_at_its_age() {
        let mut inputs = test_inputs();
        inputs.current_age = 60;
        inputs.ideal_retirement_age = 65;
        inputs.cagr = 0.0;
        inputs.current_asset_values = 0.0;
        inputs.monthly_savings = 0.0;
        inputs.payouts = vec![Payout { amount: 50_000.0, age: 75 }];

        let outcome = engine().project(&inputs, 0.0, 100.0, 0.0);
        let age_74 = &outcome.snapshots[14];
        let age_75 = &outcome.snapshots[15];
        assert_eq!(age_75.age, 75);
        assert!(age_75.total_net_worth > age_74.total_net_worth + 40_000.0);
    }

    #[test]
    fn test_payouts_beyond_horizon_are_dropped() {
        let mut inputs = test_inputs();
        inputs.payouts = vec![Payout { amount: 50_000.0, age: 101 }];

        let with_late_payout = engine().project(&inputs, 0.0, 1000.0, 0.04);
        inputs.payouts.clear();
        let without = engine().project(&inputs, 0.0, 1000.0, 0.04);

        assert_relative_eq!(
            with_late_payout.final_snapshot().unwrap().total_net_worth,
            without.final_snapshot().unwrap().total_net_worth
        );
    }

    #[test]
    fn test_depletion_age_recorded_once() {
        let mut inputs = test_inputs();
        inputs.current_age = 64;
        inputs.ideal_retirement_age = 65;
        inputs.cagr = 0.0;
        inputs.current_asset_values = 10_000.0;
        inputs.monthly_savings = 0.0;

        let outcome = engine().project(&inputs, 0.0, 10_000.0, 0.0);
        let depletion = outcome.depletion_age.expect("plan should deplete");
        assert!(depletion >= 65.0);
        assert!(outcome.final_snapshot().unwrap().total_net_worth < 0.0);
    }

    #[test]
    fn test_retirement_at_current_age_uses_initial_snapshot() {
        let mut inputs = test_inputs();
        inputs.current_age = 65;
        inputs.ideal_retirement_age = 65;

        let outcome = engine().project(&inputs, 0.0, 1000.0, 0.04);
        assert_eq!(outcome.retirement_snapshot_index, Some(0));
        assert_eq!(outcome.retirement_snapshot().unwrap().age, 65);
    }

    #[test]
    fn test_configurable_end_age() {
        let engine = ProjectionEngine::new(ProjectionConfig {
            projection_end_age: 80,
        });
        let outcome = engine.project(&test_inputs(), 0.0, 1000.0, 0.04);
        assert_eq!(outcome.snapshots.last().unwrap().age, 80);
    }
}
