//! Batch runner for independent plan computations
//!
//! Builds the tax model and projection config once, then runs many plans
//! without rebuilding them. Each computation is a pure function of its
//! inputs with no shared mutable state, so batches parallelize freely.

use rayon::prelude::*;

use crate::plan::{PlanAssembler, PlanInputs, PlanResult};
use crate::projection::ProjectionConfig;
use crate::tax::TaxModel;

/// Pre-built runner for one or many plan computations
#[derive(Debug, Clone)]
pub struct PlanRunner {
    assembler: PlanAssembler,
}

impl PlanRunner {
    /// Runner with the default 2024 tax model and projection config
    pub fn new() -> Self {
        Self {
            assembler: PlanAssembler::default(),
        }
    }

    /// Runner with a specific tax model and projection config
    pub fn with_parts(tax: TaxModel, config: ProjectionConfig) -> Self {
        Self {
            assembler: PlanAssembler::new(tax, config),
        }
    }

    pub fn projection_end_age(&self) -> u32 {
        self.assembler.projection_end_age()
    }

    /// Compute a single plan
    pub fn run(&self, inputs: &PlanInputs) -> PlanResult {
        self.assembler.assemble(inputs)
    }

    /// Compute many independent plans in parallel
    pub fn run_batch(&self, inputs: &[PlanInputs]) -> Vec<PlanResult> {
        inputs.par_iter().map(|i| self.assembler.assemble(i)).collect()
    }
}

impl Default for PlanRunner {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn test_inputs(monthly_savings: f64) -> PlanInputs {
        PlanInputs {
            ideal_retirement_income: 5000.0,
            ideal_retirement_age: 65,
            withdrawal_rate: 0.04,
            current_age: 40,
            current_monthly_income: 8000.0,
            current_asset_values: 200_000.0,
            cagr: 0.05,
            monthly_savings,
            working_tax_rate: 0.30,
            payouts: vec![],
        }
    }

    #[test]
    fn test_batch_matches_single_runs() {
        let runner = PlanRunner::new();
        let inputs: Vec<_> = [500.0, 1500.0, 3000.0].map(test_inputs).into();

        let batch = runner.run_batch(&inputs);
        assert_eq!(batch.len(), 3);

        for (inputs, result) in inputs.iter().zip(&batch) {
            let single = runner.run(inputs);
            assert_relative_eq!(
                single.total_projected_net_worth,
                result.total_projected_net_worth
            );
            assert_relative_eq!(single.gap, result.gap);
        }
    }

    #[test]
    fn test_higher_savings_never_hurt() {
        let runner = PlanRunner::new();
        let results = runner.run_batch(&[test_inputs(500.0), test_inputs(2500.0)]);
        assert!(results[1].total_projected_net_worth >= results[0].total_projected_net_worth);
    }

    #[test]
    fn test_custom_end_age_propagates() {
        let runner = PlanRunner::with_parts(
            TaxModel::default_2024(),
            ProjectionConfig { projection_end_age: 90 },
        );
        let result = runner.run(&test_inputs(1500.0));
        assert_eq!(result.projection_end_age, 90);
        assert_eq!(result.year_by_year.last().unwrap().age, 90);
    }
}
