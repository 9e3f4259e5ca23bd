//! Three-bucket ledger state for a projection in progress

/// Net worth split across the three simulation buckets
///
/// The bucket split is a business rule, not an accounting convenience:
/// post-retirement withdrawals drain the buckets in a fixed waterfall
/// order, so the buckets must stay separate for the whole run.
#[derive(Debug, Clone)]
pub struct BucketState {
    /// Assets held today, grown forward (only bucket allowed to go
    /// negative, unbounded below)
    pub existing_assets: f64,

    /// Accumulated monthly savings contributions
    pub contributions: f64,

    /// Matured one-time payouts
    pub payouts: f64,
}

impl BucketState {
    /// Seed the ledger at projection start
    pub fn new(current_asset_values: f64) -> Self {
        Self {
            existing_assets: current_asset_values,
            contributions: 0.0,
            payouts: 0.0,
        }
    }

    pub fn total_net_worth(&self) -> f64 {
        self.existing_assets + self.contributions + self.payouts
    }

    /// Drain `amount` through the waterfall: payouts first, then
    /// contributions, then existing assets. The first two floor at zero;
    /// existing assets absorb any remainder and may go negative.
    pub fn withdraw(&mut self, amount: f64) {
        let mut remaining = amount;
        if remaining <= 0.0 {
            return;
        }

        if self.payouts >= remaining {
            self.payouts -= remaining;
            return;
        }
        remaining -= self.payouts;
        self.payouts = 0.0;

        if self.contributions >= remaining {
            self.contributions -= remaining;
            return;
        }
        remaining -= self.contributions;
        self.contributions = 0.0;

        self.existing_assets -= remaining;
    }

    /// Apply one month of growth to all three buckets
    pub fn grow(&mut self, multiplier: f64) {
        self.existing_assets *= multiplier;
        self.contributions *= multiplier;
        self.payouts *= multiplier;
    }
}
