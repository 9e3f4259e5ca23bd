//! Time-value-of-money primitives shared by the target and projection math
//!
//! Every formula here uses the annuity-due convention: the cash flow
//! (contribution or withdrawal) lands first, then the month's growth is
//! applied to the resulting balance. The projection engine moves money in
//! the same order, so closed-form results and simulated results agree at
//! period boundaries.

/// Rates closer to zero than this fall back to the linear formulas.
const RATE_EPSILON: f64 = 1e-12;

/// Floor for annual rates before fractional exponentiation.
const MIN_ANNUAL_RATE: f64 = -0.999999;

/// Convert an annual growth rate to the equivalent monthly rate.
///
/// The annual rate is floored at -0.999999 so the base of the fractional
/// power stays positive.
pub fn monthly_rate(annual_rate: f64) -> f64 {
    let safe_annual_rate = annual_rate.max(MIN_ANNUAL_RATE);
    (1.0 + safe_annual_rate).powf(1.0 / 12.0) - 1.0
}

/// Future value of `months` level contributions of `contribution`,
/// contribution-then-growth each month.
pub fn future_value_annuity_due(contribution: f64, monthly_rate: f64, months: u32) -> f64 {
    if contribution <= 0.0 || months == 0 {
        return 0.0;
    }
    if monthly_rate.abs() < RATE_EPSILON {
        return contribution * months as f64;
    }

    let annuity_factor = ((1.0 + monthly_rate).powi(months as i32) - 1.0) / monthly_rate;
    contribution * annuity_factor * (1.0 + monthly_rate)
}

/// Balance required so `months` level withdrawals of `withdrawal`,
/// withdrawal-then-growth each month, exhaust to exactly zero.
///
/// Degenerates to `withdrawal * months` when the rate is effectively zero
/// or when the annuity/growth factors underflow (extreme negative rates).
pub fn present_value_annuity_due(withdrawal: f64, monthly_rate: f64, months: u32) -> f64 {
    if withdrawal <= 0.0 || months == 0 {
        return 0.0;
    }
    if monthly_rate.abs() < RATE_EPSILON {
        return withdrawal * months as f64;
    }

    let growth_factor = (1.0 + monthly_rate).powi(months as i32);
    let annuity_due_factor = ((growth_factor - 1.0) / monthly_rate) * (1.0 + monthly_rate);
    if annuity_due_factor.abs() < RATE_EPSILON || growth_factor.abs() < RATE_EPSILON {
        return withdrawal * months as f64;
    }

    withdrawal * annuity_due_factor / growth_factor
}

/// Constant monthly withdrawal that exhausts `balance` to zero after
/// `months` withdrawal-then-growth cycles.
///
/// Exact algebraic inverse of [`present_value_annuity_due`].
pub fn sustainable_withdrawal(balance: f64, monthly_rate: f64, months: u32) -> f64 {
    if balance <= 0.0 || months == 0 {
        return 0.0;
    }
    if monthly_rate.abs() < RATE_EPSILON {
        return balance / months as f64;
    }

    let growth_factor = (1.0 + monthly_rate).powi(months as i32);
    let annuity_due_factor = ((growth_factor - 1.0) / monthly_rate) * (1.0 + monthly_rate);
    if annuity_due_factor.abs() < RATE_EPSILON {
        return 0.0;
    }

    balance * growth_factor / annuity_due_factor
}

/// Level monthly contribution that accumulates to `future_value` after
/// `months` contribution-then-growth cycles (sinking-fund inverse of
/// [`future_value_annuity_due`]).
///
/// With no months remaining the whole amount is due immediately.
pub fn required_monthly_contribution(future_value: f64, monthly_rate: f64, months: u32) -> f64 {
    if future_value <= 0.0 {
        return 0.0;
    }
    if months == 0 {
        return future_value;
    }
    if monthly_rate > 0.0 {
        let denominator =
            (1.0 + monthly_rate) * ((1.0 + monthly_rate).powi(months as i32) - 1.0);
        future_value * (monthly_rate / denominator)
    } else {
        future_value / months as f64
    }
}
