//! Plan input types and boundary validation
//!
//! Two layers: [`RawPlanInputs`] is the wire payload with percentages as
//! whole numbers, validated into [`PlanInputs`] where every rate is a
//! decimal fraction. The projection and assembly code only ever sees
//! `PlanInputs` and performs no re-validation or coercion of its own.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A one-time lump sum landing at a specific age
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Payout {
    /// Lump sum amount, non-negative
    pub amount: f64,

    /// Age at which the payout lands (wire key `year` for presentation
    /// layer compatibility)
    #[serde(rename = "year")]
    pub age: u32,
}

/// Raw request payload with percentage rates as whole numbers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawPlanInputs {
    /// Target monthly after-tax spend in retirement
    pub ideal_retirement_income: f64,
    pub ideal_retirement_age: u32,
    /// Whole-number percentage, e.g. 4 for 4%
    pub withdrawal_rate: f64,
    pub current_age: u32,
    pub current_monthly_income: f64,
    pub current_asset_values: f64,
    /// Whole-number percentage annual growth assumption
    pub cagr: f64,
    pub monthly_savings: f64,
    /// Whole-number percentage
    pub working_tax_rate: f64,
    #[serde(default)]
    pub payouts: Vec<Payout>,
}

/// Validated inputs with all rates as decimal fractions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanInputs {
    pub ideal_retirement_income: f64,
    pub ideal_retirement_age: u32,
    pub withdrawal_rate: f64,
    pub current_age: u32,
    pub current_monthly_income: f64,
    pub current_asset_values: f64,
    pub cagr: f64,
    pub monthly_savings: f64,
    pub working_tax_rate: f64,
    pub payouts: Vec<Payout>,
}

/// Rejected inputs, carrying every human-readable message at once
#[derive(Debug, Clone, Error)]
#[error("invalid plan inputs: {}", .messages.join("; "))]
pub struct ValidationError {
    pub messages: Vec<String>,
}

impl RawPlanInputs {
    /// Collect every validation failure as a human-readable message.
    ///
    /// `projection_end_age` bounds payout ages; it is a policy knob, not
    /// a fixed constant.
    pub fn validate(&self, projection_end_age: u32) -> Vec<String> {
        let mut errors = Vec::new();

        if self.ideal_retirement_income <= 0.0 {
            errors.push("Ideal retirement income must be positive".to_string());
        }
        if self.ideal_retirement_age <= self.current_age {
            errors.push("Ideal retirement age must be greater than current age".to_string());
        }
        if self.withdrawal_rate <= 0.0 || self.withdrawal_rate > 100.0 {
            errors.push("Withdrawal rate must be between 0 and 100".to_string());
        }
        if self.current_monthly_income < 0.0 {
            errors.push("Current monthly income must be non-negative".to_string());
        }
        if self.current_asset_values < 0.0 {
            errors.push("Current asset values must be non-negative".to_string());
        }
        if self.cagr < -100.0 || self.cagr > 100.0 {
            errors.push("CAGR must be between -100 and 100".to_string());
        }
        if self.monthly_savings < 0.0 {
            errors.push("Monthly savings must be non-negative".to_string());
        }
        if self.working_tax_rate < 0.0 || self.working_tax_rate > 100.0 {
            errors.push("Working tax rate must be between 0 and 100".to_string());
        }

        for (i, payout) in self.payouts.iter().enumerate() {
            if payout.amount < 0.0 {
                errors.push(format!("Payout {} amount must be non-negative", i + 1));
            }
            if payout.age <= self.current_age {
                errors.push(format!("Payout {} age must be after current age", i + 1));
            }
            if payout.age > projection_end_age {
                errors.push(format!(
                    "Payout {} age must be {} or less",
                    i + 1,
                    projection_end_age
                ));
            }
        }

        errors
    }

    /// Validate and convert percent units to decimal fractions
    pub fn into_plan_inputs(self, projection_end_age: u32) -> Result<PlanInputs, ValidationError> {
        let messages = self.validate(projection_end_age);
        if !messages.is_empty() {
            return Err(ValidationError { messages });
        }

        Ok(PlanInputs {
            ideal_retirement_income: self.ideal_retirement_income,
            ideal_retirement_age: self.ideal_retirement_age,
            withdrawal_rate: self.withdrawal_rate / 100.0,
            current_age: self.current_age,
            current_monthly_income: self.current_monthly_income,
            current_asset_values: self.current_asset_values,
            cagr: self.cagr / 100.0,
            monthly_savings: self.monthly_savings,
            working_tax_rate: self.working_tax_rate / 100.0,
            payouts: self.payouts,
        })
    }
}

impl PlanInputs {
    /// Re-express rates as whole-number percentages for the echo field of
    /// the result payload
    pub fn to_raw(&self) -> RawPlanInputs {
        RawPlanInputs {
            ideal_retirement_income: self.ideal_retirement_income,
            ideal_retirement_age: self.ideal_retirement_age,
            withdrawal_rate: self.withdrawal_rate * 100.0,
            current_age: self.current_age,
            current_monthly_income: self.current_monthly_income,
            current_asset_values: self.current_asset_values,
            cagr: self.cagr * 100.0,
            monthly_savings: self.monthly_savings,
            working_tax_rate: self.working_tax_rate * 100.0,
            payouts: self.payouts.clone(),
        }
    }
}
