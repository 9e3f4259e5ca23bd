//! Combined federal + provincial tax model with a fixed-point inverse

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use super::schedule::TaxSchedule;

/// Default iteration cap for the pre-tax income solver
pub const DEFAULT_SOLVER_ITERATIONS: u32 = 10;

/// Default convergence tolerance in currency units
pub const DEFAULT_SOLVER_TOLERANCE: f64 = 1.0;

/// Two additively composed schedules plus the inversion solver knobs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaxModel {
    pub federal: TaxSchedule,
    pub provincial: TaxSchedule,

    /// Iteration cap for `pre_tax_needed`; the solver returns its best
    /// estimate when the cap is reached, never an error
    pub solver_iterations: u32,

    /// Convergence tolerance for `pre_tax_needed`, in currency units
    pub solver_tolerance: f64,
}

impl TaxModel {
    /// Model with the given schedules and default solver knobs
    pub fn new(federal: TaxSchedule, provincial: TaxSchedule) -> Self {
        Self {
            federal,
            provincial,
            solver_iterations: DEFAULT_SOLVER_ITERATIONS,
            solver_tolerance: DEFAULT_SOLVER_TOLERANCE,
        }
    }

    /// 2024 Canadian federal + Ontario model
    pub fn default_2024() -> Self {
        Self::new(TaxSchedule::federal_2024(), TaxSchedule::ontario_2024())
    }

    /// Total tax payable across both schedules
    pub fn tax(&self, annual_income: f64) -> f64 {
        self.federal.tax(annual_income) + self.provincial.tax(annual_income)
    }

    /// Effective combined tax rate, in [0, 1]
    pub fn effective_rate(&self, annual_income: f64) -> f64 {
        if annual_income <= 0.0 {
            return 0.0;
        }
        (self.tax(annual_income) / annual_income).min(1.0)
    }

    /// After-tax income for a given pre-tax annual income
    pub fn after_tax(&self, annual_income: f64) -> f64 {
        if annual_income <= 0.0 {
            return 0.0;
        }
        annual_income * (1.0 - self.effective_rate(annual_income))
    }

    /// Pre-tax annual income needed to net `target_after_tax`.
    ///
    /// Fixed-point iteration: the effective rate depends on the income
    /// level, so start from a ~25% rate guess and adjust by the residual
    /// scaled with the current keep-rate. If the cap is reached the last
    /// guess is returned as an accepted approximation.
    pub fn pre_tax_needed(&self, target_after_tax: f64) -> f64 {
        if target_after_tax <= 0.0 {
            return 0.0;
        }

        let mut guess = target_after_tax / 0.75;

        for iteration in 0..self.solver_iterations {
            let calculated_after_tax = self.after_tax(guess);
            if (calculated_after_tax - target_after_tax).abs() < self.solver_tolerance {
                debug!(
                    "pre_tax_needed converged after {} iterations: {:.2}",
                    iteration + 1,
                    guess
                );
                return guess;
            }
            let difference = target_after_tax - calculated_after_tax;
            guess += difference / (1.0 - self.effective_rate(guess));
        }

        warn!(
            "pre_tax_needed hit the {}-iteration cap for target {:.2}; returning best estimate {:.2}",
            self.solver_iterations, target_after_tax, guess
        );
        guess
    }
}

impl Default for TaxModel {
    fn default() -> Self {
        Self::default_2024()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tax::TaxBracket;
    use approx::assert_relative_eq;

    #[test]
    fn test_effective_rate_bounds() {
        let model = TaxModel::default_2024();
        assert_relative_eq!(model.effective_rate(-100.0), 0.0);
        assert_relative_eq!(model.effective_rate(0.0), 0.0);

        for income in [10_000.0, 60_000.0, 120_000.0, 300_000.0, 2_000_000.0] {
            let rate = model.effective_rate(income);
            assert!((0.0..=1.0).contains(&rate), "rate {} out of bounds", rate);
        }
    }

    #[test]
    fn test_effective_rate_is_progressive() {
        let model = TaxModel::default_2024();
        assert!(model.effective_rate(150_000.0) > model.effective_rate(60_000.0));
        assert!(model.effective_rate(60_000.0) > model.effective_rate(25_000.0));
    }

    #[test]
    fn test_after_tax_below_credit_threshold_is_untaxed() {
        let model = TaxModel::default_2024();
        assert_relative_eq!(model.after_tax(10_000.0), 10_000.0);
    }

    #[test]
    fn test_pre_tax_needed_round_trip() {
        let model = TaxModel::default_2024();
        for pre_tax in [60_000.0, 90_000.0, 150_000.0, 250_000.0] {
            let after = model.after_tax(pre_tax);
            let recovered = model.pre_tax_needed(after);
            assert!(
                (model.after_tax(recovered) - after).abs() < DEFAULT_SOLVER_TOLERANCE,
                "round trip missed for {}: recovered {}",
                pre_tax,
                recovered
            );
        }
    }

    #[test]
    fn test_pre_tax_needed_non_positive_target() {
        let model = TaxModel::default_2024();
        assert_relative_eq!(model.pre_tax_needed(0.0), 0.0);
        assert_relative_eq!(model.pre_tax_needed(-500.0), 0.0);
    }

    #[test]
    fn test_synthetic_schedules_are_injectable() {
        // Flat 10% + flat 5% with no credits: effective rate is exactly 15%
        let flat = |rate: f64| {
            TaxSchedule::new(vec![TaxBracket { lower: 0.0, upper: None, rate }], 0.0)
        };
        let model = TaxModel::new(flat(0.10), flat(0.05));

        assert_relative_eq!(model.effective_rate(80_000.0), 0.15, epsilon = 1e-12);
        assert_relative_eq!(model.after_tax(80_000.0), 68_000.0, epsilon = 1e-9);

        let needed = model.pre_tax_needed(68_000.0);
        assert!((needed - 80_000.0).abs() < 1.5);
    }
}
