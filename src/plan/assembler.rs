//! Plan assembly: orchestrates tax inversion, annuity targets, and the
//! projection into one complete result

use log::debug;

use crate::annuity;
use crate::projection::{ProjectionConfig, ProjectionEngine};
use crate::tax::TaxModel;
use super::inputs::PlanInputs;
use super::result::PlanResult;

/// Assembles a [`PlanResult`] from validated inputs
///
/// Holds the tax model and projection config so one assembler can serve
/// many independent requests; `assemble` is a pure function of its
/// inputs.
#[derive(Debug, Clone)]
pub struct PlanAssembler {
    tax: TaxModel,
    config: ProjectionConfig,
}

impl PlanAssembler {
    pub fn new(tax: TaxModel, config: ProjectionConfig) -> Self {
        Self { tax, config }
    }

    pub fn projection_end_age(&self) -> u32 {
        self.config.projection_end_age
    }

    /// Compute the complete plan
    ///
    /// Control flow: invert the after-tax income target through the tax
    /// model, derive the required balance from the annuity math, run the
    /// simulation, then derive the gap, back-solved savings, and
    /// sustainable-income metrics.
    pub fn assemble(&self, inputs: &PlanInputs) -> PlanResult {
        let annual_after_tax_income = inputs.ideal_retirement_income * 12.0;
        let pre_tax_retirement_income = self.tax.pre_tax_needed(annual_after_tax_income);
        let monthly_withdrawal = pre_tax_retirement_income / 12.0;

        // Saturating arithmetic: a retirement age beyond the horizon is
        // accepted and resolved through the final-snapshot fallback, so
        // extreme values must not wrap the month counts.
        let years_until_retirement =
            inputs.ideal_retirement_age.saturating_sub(inputs.current_age);
        let months_until_retirement = years_until_retirement.saturating_mul(12);
        let months_in_retirement = self
            .config
            .projection_end_age
            .saturating_sub(inputs.ideal_retirement_age)
            .saturating_mul(12);

        // Conservative cap: post-retirement compounding never outruns the
        // stated sustainable-withdrawal assumption.
        let post_retirement_rate = inputs.cagr.min(inputs.withdrawal_rate);
        let post_retirement_monthly_rate = annuity::monthly_rate(post_retirement_rate);

        let target_net_worth = annuity::present_value_annuity_due(
            monthly_withdrawal,
            post_retirement_monthly_rate,
            months_in_retirement,
        );

        debug!(
            "target {:.2} from withdrawal {:.2}/mo over {} months at {:.4}%/yr",
            target_net_worth,
            monthly_withdrawal,
            months_in_retirement,
            post_retirement_rate * 100.0
        );

        let engine = ProjectionEngine::new(self.config.clone());
        let outcome = engine.project(
            inputs,
            target_net_worth,
            monthly_withdrawal,
            post_retirement_rate,
        );

        let retirement_snapshot = outcome
            .retirement_snapshot()
            .or_else(|| outcome.final_snapshot());

        let projected_current_assets =
            retirement_snapshot.map_or(0.0, |s| s.current_assets);
        let projected_savings =
            retirement_snapshot.map_or(0.0, |s| s.savings_contributions);
        let projected_payouts = retirement_snapshot.map_or(0.0, |s| s.payouts_value);
        let total_projected_net_worth =
            retirement_snapshot.map_or(0.0, |s| s.total_net_worth);

        let gap = total_projected_net_worth - target_net_worth;
        let gap_percentage = if target_net_worth > 0.0 {
            gap / target_net_worth * 100.0
        } else {
            0.0
        };

        // Back-solved estimate of the savings needed to close a
        // shortfall. Deliberately not reconciled against a second
        // simulation pass, so it can diverge slightly from a rerun
        // projection.
        let required_monthly_savings = if gap < 0.0 {
            annuity::required_monthly_contribution(
                -gap,
                annuity::monthly_rate(inputs.cagr),
                months_until_retirement,
            ) + inputs.monthly_savings
        } else {
            inputs.monthly_savings
        };

        let retirement_tax_rate = self.tax.effective_rate(pre_tax_retirement_income);

        let sustainable_pre_tax_monthly_income = annuity::sustainable_withdrawal(
            total_projected_net_worth,
            post_retirement_monthly_rate,
            months_in_retirement,
        );
        let max_sustainable_monthly_income =
            self.tax.after_tax(sustainable_pre_tax_monthly_income * 12.0) / 12.0;
        let income_goal_coverage_ratio = if inputs.ideal_retirement_income > 0.0 {
            max_sustainable_monthly_income / inputs.ideal_retirement_income
        } else {
            0.0
        };

        let net_worth_at_projection_end =
            outcome.final_snapshot().map_or(0.0, |s| s.total_net_worth);

        PlanResult {
            target_net_worth,
            projected_current_assets,
            projected_savings,
            projected_payouts,
            total_projected_net_worth,
            gap,
            gap_percentage,
            required_monthly_savings,
            current_monthly_savings: inputs.monthly_savings,
            years_until_retirement,
            months_until_retirement,
            year_by_year: outcome.snapshots,
            projection_end_age: self.config.projection_end_age,
            net_worth_at_projection_end,
            depletion_age: outcome.depletion_age,
            retirement_tax_rate: retirement_tax_rate * 100.0,
            pre_tax_retirement_income,
            post_retirement_growth_rate: post_retirement_rate * 100.0,
            max_sustainable_monthly_income,
            max_sustainable_pre_tax_monthly_income: sustainable_pre_tax_monthly_income,
            income_goal_coverage_ratio,
            inputs: inputs.to_raw(),
        }
    }
}

impl Default for PlanAssembler {
    fn default() -> Self {
        Self::new(TaxModel::default_2024(), ProjectionConfig::default())
    }
}
