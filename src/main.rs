//! Investment Planner CLI
//!
//! Projects a monthly investment for a plan and prints the value range

use anyhow::{bail, Context, Result};
use clap::Parser;
use investment_planner::{
    format::{format_inr, format_range},
    project, GrowthSchedule, PlannerConfig, RiskProfile, RiskTier, ScenarioRunner,
};
use log::info;
use serde::Serialize;
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "investment-planner", version, about = "Project investment growth for a savings plan")]
struct Args {
    /// Plan JSON returned by the analytics service (overrides PLAN_PATH)
    #[arg(long)]
    plan: Option<PathBuf>,

    /// Predicted monthly surplus when no plan file is given
    #[arg(long)]
    surplus: Option<f64>,

    /// Risk profile when no plan file is given (Conservative, Moderate, Aggressive)
    #[arg(long)]
    profile: Option<String>,

    /// Percent of the surplus to invest each month (0-100)
    #[arg(long)]
    percent: Option<f64>,

    /// Projection horizon in years
    #[arg(long)]
    years: Option<u32>,

    /// Choose an instrument for a tier, e.g. --select "High Risk=Gold" (repeatable)
    #[arg(long = "select", value_name = "TIER=NAME")]
    selections: Vec<String>,

    /// Also project every horizon preset
    #[arg(long)]
    horizons: bool,

    /// Write the monthly growth schedule to this CSV file
    #[arg(long)]
    schedule: Option<PathBuf>,

    /// Print JSON instead of text
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct CliOutput {
    risk_profile: RiskProfile,
    monthly_investment: f64,
    projection_years: u32,
    total_invested: f64,
    projected_min: f64,
    projected_max: f64,
    horizons: Vec<investment_planner::ScenarioOutcome>,
}

fn main() -> Result<()> {
    env_logger::init();

    let args = Args::parse();

    let mut config = PlannerConfig::from_env();
    if let Some(path) = args.plan {
        config.plan_path = Some(path);
    }
    if let Some(surplus) = args.surplus {
        config.predicted_surplus = surplus;
    }
    if let Some(profile) = &args.profile {
        config.risk_profile = profile.parse().context("invalid --profile")?;
    }
    if let Some(percent) = args.percent {
        config.investment_pct = percent;
    }
    if let Some(years) = args.years {
        config.projection_years = years;
    }

    let plan = config.load_plan().context("failed to load investment plan")?;
    info!("Loaded {} plan with surplus {:.2}", plan.risk_profile, plan.predicted_surplus);

    let mut selection = plan.default_selection();
    for choice in &args.selections {
        let Some((tier, name)) = choice.split_once('=') else {
            bail!("--select expects TIER=NAME, got '{}'", choice);
        };
        let tier: RiskTier = tier.parse()?;
        plan.select(&mut selection, tier, name.trim())?;
    }

    let input = plan.projection_input(config.investment_pct, config.projection_years, selection.clone())?;
    let result = project(&input)?;

    let horizons = if args.horizons {
        ScenarioRunner::new(plan.clone()).run_horizons(config.investment_pct, &selection)?
    } else {
        Vec::new()
    };

    if let Some(path) = &args.schedule {
        let schedule = GrowthSchedule::build(&input, config.schedule_start_or_today())?;
        let file = File::create(path)
            .with_context(|| format!("unable to create {}", path.display()))?;
        schedule.write_csv(BufWriter::new(file))?;
        info!("Wrote {} schedule rows to {}", schedule.rows.len(), path.display());
    }

    if args.json {
        let output = CliOutput {
            risk_profile: plan.risk_profile,
            monthly_investment: input.monthly_investment,
            projection_years: input.projection_years,
            total_invested: result.total_invested,
            projected_min: result.projected_min,
            projected_max: result.projected_max,
            horizons,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!("Investment Planner v{}", env!("CARGO_PKG_VERSION"));
    println!("======================\n");
    println!("Predicted Monthly Surplus: {}", format_inr(plan.predicted_surplus));
    println!("Investor Profile: {}", plan.risk_profile);
    if !plan.justification.is_empty() {
        println!("  {}", plan.justification);
    }
    println!();

    println!("Investing {}% = {} per month", config.investment_pct, format_inr(input.monthly_investment));
    for tier in plan.offered_tiers() {
        let weight = plan.allocation_percentages.weight(tier);
        match selection.get(tier) {
            Some(option) => println!(
                "  {:<12} {:>5.1}%  {} ({}% - {}% p.a.)",
                tier.as_str(), weight * 100.0, option.name,
                option.return_range.min, option.return_range.max
            ),
            None => println!("  {:<12} {:>5.1}%  (no selection)", tier.as_str(), weight * 100.0),
        }
    }
    println!();

    println!("Projected Value after {} Year{}:", input.projection_years, if input.projection_years > 1 { "s" } else { "" });
    println!("  You Invest:            {}", format_inr(result.total_invested));
    println!("  Potential Value Range: {}", format_range(result.projected_min, result.projected_max));

    if !horizons.is_empty() {
        println!("\n{:>6} {:>16} {:>34}", "Years", "Invested", "Potential Value");
        println!("{}", "-".repeat(58));
        for outcome in &horizons {
            println!(
                "{:>6} {:>16} {:>34}",
                outcome.projection_years,
                format_inr(outcome.result.total_invested),
                format_range(outcome.result.projected_min, outcome.result.projected_max),
            );
        }
    }

    println!("\nThese projections are illustrative estimates and do not guarantee future results.");
    Ok(())
}
