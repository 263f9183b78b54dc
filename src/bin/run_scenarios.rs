//! Run a CSV batch of SIP or NPS scenarios in parallel
//!
//! Writes one output row per scenario; rows that fail validation carry the
//! error text instead of results.

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use log::{info, warn};
use rayon::prelude::*;
use serde::Serialize;
use std::path::PathBuf;
use std::time::Instant;

use wealth_calc::projection::{NpsBounds, SipBounds};
use wealth_calc::scenario::{load_nps_scenarios, load_sip_scenarios, ScenarioOutcome};
use wealth_calc::{NpsPolicy, NpsProjector, ScenarioRunner, SipProjector};

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum ScenarioKind {
    Sip,
    Nps,
}

#[derive(Debug, Parser)]
#[command(name = "run_scenarios", about = "Project a CSV batch of SIP or NPS scenarios")]
struct Args {
    #[arg(value_enum)]
    kind: ScenarioKind,

    /// Scenario CSV
    input: PathBuf,

    #[arg(long, default_value = "scenario_output.csv")]
    output: PathBuf,

    /// Enforce the calculators' accepted input ranges
    #[arg(long)]
    strict: bool,
}

#[derive(Debug, Serialize)]
struct SipOutputRow<'a> {
    #[serde(rename = "ScenarioId")]
    id: &'a str,
    #[serde(rename = "FutureValue")]
    future_value: Option<u64>,
    #[serde(rename = "TotalInvested")]
    total_invested: Option<u64>,
    #[serde(rename = "TotalReturns")]
    total_returns: Option<u64>,
    #[serde(rename = "Error")]
    error: String,
}

#[derive(Debug, Serialize)]
struct NpsOutputRow<'a> {
    #[serde(rename = "ScenarioId")]
    id: &'a str,
    #[serde(rename = "MaturityCorpus")]
    maturity_corpus: Option<u64>,
    #[serde(rename = "TotalInvestment")]
    total_investment: Option<u64>,
    #[serde(rename = "Lumpsum")]
    lumpsum: Option<u64>,
    #[serde(rename = "AnnuityAmount")]
    annuity_amount: Option<u64>,
    #[serde(rename = "MonthlyPension")]
    monthly_pension: Option<u64>,
    #[serde(rename = "TaxSaved")]
    tax_saved: Option<u64>,
    #[serde(rename = "Error")]
    error: String,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let runner = if args.strict {
        ScenarioRunner::with_projectors(
            SipProjector::with_bounds(SipBounds::default()),
            NpsProjector::new(NpsPolicy::default()).with_bounds(NpsBounds::default()),
        )
    } else {
        ScenarioRunner::new()
    };

    let start = Instant::now();
    let mut writer = csv::Writer::from_path(&args.output)
        .with_context(|| format!("Unable to create {}", args.output.display()))?;

    let (total, failed) = match args.kind {
        ScenarioKind::Sip => {
            let scenarios = load_sip_scenarios(&args.input)
                .with_context(|| format!("Unable to read {}", args.input.display()))?;
            info!("Loaded {} SIP scenarios", scenarios.len());

            let outcomes: Vec<_> = scenarios.par_iter().map(|s| runner.run_sip(s)).collect();
            for outcome in &outcomes {
                let result = outcome.result.as_ref().ok();
                writer.serialize(SipOutputRow {
                    id: &outcome.id,
                    future_value: result.map(|r| r.future_value),
                    total_invested: result.map(|r| r.total_invested),
                    total_returns: result.map(|r| r.total_returns),
                    error: error_text(outcome),
                })?;
            }
            (outcomes.len(), count_failures(&outcomes))
        }
        ScenarioKind::Nps => {
            let scenarios = load_nps_scenarios(&args.input)
                .with_context(|| format!("Unable to read {}", args.input.display()))?;
            info!("Loaded {} NPS scenarios", scenarios.len());

            let outcomes: Vec<_> = scenarios.par_iter().map(|s| runner.run_nps(s)).collect();
            for outcome in &outcomes {
                let result = outcome.result.as_ref().ok();
                writer.serialize(NpsOutputRow {
                    id: &outcome.id,
                    maturity_corpus: result.map(|r| r.maturity_corpus),
                    total_investment: result.map(|r| r.total_investment),
                    lumpsum: result.map(|r| r.lumpsum),
                    annuity_amount: result.map(|r| r.annuity_amount),
                    monthly_pension: result.map(|r| r.monthly_pension),
                    tax_saved: result.map(|r| r.tax_saved),
                    error: error_text(outcome),
                })?;
            }
            (outcomes.len(), count_failures(&outcomes))
        }
    };

    writer.flush()?;
    println!(
        "Projected {} scenarios ({} invalid) in {:?}",
        total,
        failed,
        start.elapsed()
    );
    println!("Output written to {}", args.output.display());
    Ok(())
}

fn error_text<T>(outcome: &ScenarioOutcome<T>) -> String {
    match &outcome.result {
        Ok(_) => String::new(),
        Err(e) => {
            warn!("Scenario {} rejected: {}", outcome.id, e);
            e.to_string()
        }
    }
}

fn count_failures<T>(outcomes: &[ScenarioOutcome<T>]) -> usize {
    outcomes.iter().filter(|o| o.result.is_err()).count()
}
