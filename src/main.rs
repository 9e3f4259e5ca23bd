//! Nestegg CLI
//!
//! Reads a raw plan payload from JSON, validates it at the boundary, and
//! prints the year-by-year projection with the plan summary.

use std::fs::File;
use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use nestegg::projection::ProjectionConfig;
use nestegg::{PlanRunner, RawPlanInputs, TaxModel};

#[derive(Parser)]
#[command(name = "nestegg", about = "Retirement projection engine")]
struct Cli {
    /// JSON file with the raw plan inputs (percentages as whole numbers)
    input: PathBuf,

    /// Last simulated age
    #[arg(long, default_value_t = 100)]
    end_age: u32,

    /// Write the full result as JSON to this path
    #[arg(long)]
    json_out: Option<PathBuf>,

    /// Write the year-by-year table as CSV to this path
    #[arg(long)]
    csv_out: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let payload = std::fs::read_to_string(&cli.input)
        .with_context(|| format!("reading {}", cli.input.display()))?;
    let raw: RawPlanInputs =
        serde_json::from_str(&payload).context("parsing plan inputs")?;

    let inputs = raw.into_plan_inputs(cli.end_age)?;

    let runner = PlanRunner::with_parts(
        TaxModel::default_2024(),
        ProjectionConfig {
            projection_end_age: cli.end_age,
        },
    );
    let result = runner.run(&inputs);

    println!("Nestegg v0.1.0");
    println!("==============\n");

    println!(
        "{:>4} {:>16} {:>16} {:>14} {:>16} {:>16}",
        "Age", "Assets", "Contributions", "Payouts", "Net Worth", "Gap"
    );
    println!("{}", "-".repeat(88));
    for row in &result.year_by_year {
        println!(
            "{:>4} {:>16.2} {:>16.2} {:>14.2} {:>16.2} {:>16.2}",
            row.age,
            row.current_assets,
            row.savings_contributions,
            row.payouts_value,
            row.total_net_worth,
            row.gap,
        );
    }

    println!("\nSummary:");
    println!("  Target Net Worth: ${:.2}", result.target_net_worth);
    println!(
        "  Projected at {}: ${:.2}",
        inputs.ideal_retirement_age, result.total_projected_net_worth
    );
    println!(
        "  Gap: ${:.2} ({:.1}%)",
        result.gap, result.gap_percentage
    );
    println!(
        "  Required Monthly Savings: ${:.2} (current ${:.2})",
        result.required_monthly_savings, result.current_monthly_savings
    );
    println!(
        "  Pre-Tax Retirement Income: ${:.2}/yr (effective tax {:.1}%)",
        result.pre_tax_retirement_income, result.retirement_tax_rate
    );
    println!(
        "  Max Sustainable Income: ${:.2}/mo ({:.0}% of goal)",
        result.max_sustainable_monthly_income,
        result.income_goal_coverage_ratio * 100.0
    );
    match result.depletion_age {
        Some(age) => println!("  Depletion Age: {:.1}", age),
        None => println!("  Depletion Age: never"),
    }

    if let Some(path) = &cli.json_out {
        let file = File::create(path)
            .with_context(|| format!("creating {}", path.display()))?;
        serde_json::to_writer_pretty(file, &result).context("writing JSON result")?;
        println!("\nFull result written to: {}", path.display());
    }

    if let Some(path) = &cli.csv_out {
        let mut file = File::create(path)
            .with_context(|| format!("creating {}", path.display()))?;
        writeln!(
            file,
            "Age,CurrentAssets,SavingsContributions,PayoutsValue,TotalNetWorth,TargetNetWorth,Gap"
        )?;
        for row in &result.year_by_year {
            writeln!(
                file,
                "{},{:.2},{:.2},{:.2},{:.2},{:.2},{:.2}",
                row.age,
                row.current_assets,
                row.savings_contributions,
                row.payouts_value,
                row.total_net_worth,
                row.target_net_worth,
                row.gap,
            )?;
        }
        println!("Year-by-year table written to: {}", path.display());
    }

    Ok(())
}
