//! Tax bracket tables and the basic personal amount credit
//!
//! A schedule is an ordered set of marginal brackets plus the tax-free
//! basic personal amount, converted to a credit at the lowest bracket
//! rate. Schedules are injectable so tests (and other jurisdictions or
//! years) can substitute their own tables; compiled-in 2024 Canadian
//! federal and Ontario tables are provided as defaults. Tables can also
//! be loaded from CSV (`lower,upper,rate` per row, blank upper bound for
//! the unbounded top bracket).

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fs::File;
use std::path::Path;

/// A single marginal tax bracket
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TaxBracket {
    /// Lower bound of the bracket (inclusive)
    pub lower: f64,

    /// Upper bound of the bracket; None for the unbounded top bracket
    pub upper: Option<f64>,

    /// Marginal rate applied within the bracket
    pub rate: f64,
}

impl TaxBracket {
    /// Taxable width of this bracket for the given income
    fn width_up_to(&self, income: f64) -> f64 {
        let ceiling = self.upper.unwrap_or(f64::INFINITY).min(income);
        (ceiling - self.lower).max(0.0)
    }
}

/// An ordered bracket table plus basic personal amount for one jurisdiction
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaxSchedule {
    /// Brackets in ascending, non-overlapping order
    pub brackets: Vec<TaxBracket>,

    /// Tax-free income threshold, credited at the lowest bracket rate
    pub basic_personal_amount: f64,
}

impl TaxSchedule {
    pub fn new(brackets: Vec<TaxBracket>, basic_personal_amount: f64) -> Self {
        Self { brackets, basic_personal_amount }
    }

    /// Total tax payable on `income` under this schedule.
    ///
    /// Sums marginal rate times bracket width up to the income, then
    /// subtracts the basic personal credit, floored at zero.
    pub fn tax(&self, income: f64) -> f64 {
        if income <= 0.0 {
            return 0.0;
        }

        let mut tax = 0.0;
        for bracket in &self.brackets {
            if income <= bracket.lower {
                break;
            }
            tax += bracket.width_up_to(income) * bracket.rate;
        }

        let lowest_rate = self.brackets.first().map(|b| b.rate).unwrap_or(0.0);
        let basic_personal_credit = self.basic_personal_amount * lowest_rate;
        (tax - basic_personal_credit).max(0.0)
    }

    /// Load a bracket table from CSV
    ///
    /// Expected columns: `lower,upper,rate` with a header row. A blank
    /// upper bound marks the unbounded top bracket.
    pub fn from_csv(
        path: &Path,
        basic_personal_amount: f64,
    ) -> Result<Self, Box<dyn Error>> {
        let file = File::open(path)?;
        let mut reader = csv::Reader::from_reader(file);

        let mut brackets = Vec::new();
        for result in reader.records() {
            let record = result?;
            let lower: f64 = record[0].parse()?;
            let upper: Option<f64> = if record[1].trim().is_empty() {
                None
            } else {
                Some(record[1].parse()?)
            };
            let rate: f64 = record[2].parse()?;
            brackets.push(TaxBracket { lower, upper, rate });
        }

        Ok(Self::new(brackets, basic_personal_amount))
    }

    /// 2024 Canadian federal brackets and basic personal amount
    pub fn federal_2024() -> Self {
        Self::new(
            vec![
                TaxBracket { lower: 0.0, upper: Some(55_867.0), rate: 0.15 },
                TaxBracket { lower: 55_867.0, upper: Some(111_733.0), rate: 0.205 },
                TaxBracket { lower: 111_733.0, upper: Some(173_205.0), rate: 0.26 },
                TaxBracket { lower: 173_205.0, upper: Some(246_752.0), rate: 0.29 },
                TaxBracket { lower: 246_752.0, upper: None, rate: 0.33 },
            ],
            15_705.0,
        )
    }

    /// 2024 Ontario provincial brackets and basic personal amount
    pub fn ontario_2024() -> Self {
        Self::new(
            vec![
                TaxBracket { lower: 0.0, upper: Some(51_446.0), rate: 0.0505 },
                TaxBracket { lower: 51_446.0, upper: Some(102_894.0), rate: 0.0915 },
                TaxBracket { lower: 102_894.0, upper: Some(150_000.0), rate: 0.1116 },
                TaxBracket { lower: 150_000.0, upper: Some(220_000.0), rate: 0.1216 },
                TaxBracket { lower: 220_000.0, upper: None, rate: 0.1316 },
            ],
            11_865.0,
        )
    }
}
