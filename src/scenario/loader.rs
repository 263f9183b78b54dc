//! Load SIP and NPS scenario batches from CSV

use csv::Reader;
use serde::{Deserialize, Serialize};
use std::io::Read;
use std::path::Path;

use crate::projection::{NpsInput, SipInput};

/// A labelled SIP input
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SipScenario {
    pub id: String,
    pub input: SipInput,
}

/// A labelled NPS input
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NpsScenario {
    pub id: String,
    pub input: NpsInput,
}

/// Raw row: ScenarioId,MonthlyInvestment,AnnualReturnPct,Years
#[derive(Debug, Deserialize)]
struct SipRow {
    #[serde(rename = "ScenarioId")]
    id: String,
    #[serde(rename = "MonthlyInvestment")]
    monthly_investment: f64,
    #[serde(rename = "AnnualReturnPct")]
    annual_return_pct: f64,
    #[serde(rename = "Years")]
    years: u32,
}

/// Raw row: ScenarioId,MonthlyContribution,CurrentAge,RetirementAge,ExpectedReturnPct,AnnuityReturnPct
#[derive(Debug, Deserialize)]
struct NpsRow {
    #[serde(rename = "ScenarioId")]
    id: String,
    #[serde(rename = "MonthlyContribution")]
    monthly_contribution: f64,
    #[serde(rename = "CurrentAge")]
    current_age: u32,
    #[serde(rename = "RetirementAge")]
    retirement_age: u32,
    #[serde(rename = "ExpectedReturnPct")]
    expected_return_pct: f64,
    #[serde(rename = "AnnuityReturnPct")]
    annuity_return_pct: f64,
}

pub fn load_sip_scenarios_from_reader<R: Read>(reader: R) -> Result<Vec<SipScenario>, csv::Error> {
    let mut csv_reader = Reader::from_reader(reader);
    let mut scenarios = Vec::new();

    for result in csv_reader.deserialize() {
        let row: SipRow = result?;
        scenarios.push(SipScenario {
            id: row.id,
            input: SipInput {
                monthly_investment: row.monthly_investment,
                annual_return_rate_percent: row.annual_return_pct,
                years: row.years,
            },
        });
    }

    Ok(scenarios)
}

pub fn load_nps_scenarios_from_reader<R: Read>(reader: R) -> Result<Vec<NpsScenario>, csv::Error> {
    let mut csv_reader = Reader::from_reader(reader);
    let mut scenarios = Vec::new();

    for result in csv_reader.deserialize() {
        let row: NpsRow = result?;
        scenarios.push(NpsScenario {
            id: row.id,
            input: NpsInput {
                monthly_contribution: row.monthly_contribution,
                current_age: row.current_age,
                retirement_age: row.retirement_age,
                expected_return_rate_percent: row.expected_return_pct,
                annuity_return_rate_percent: row.annuity_return_pct,
            },
        });
    }

    Ok(scenarios)
}

pub fn load_sip_scenarios<P: AsRef<Path>>(path: P) -> Result<Vec<SipScenario>, csv::Error> {
    let file = std::fs::File::open(path).map_err(csv::Error::from)?;
    load_sip_scenarios_from_reader(file)
}

pub fn load_nps_scenarios<P: AsRef<Path>>(path: P) -> Result<Vec<NpsScenario>, csv::Error> {
    let file = std::fs::File::open(path).map_err(csv::Error::from)?;
    load_nps_scenarios_from_reader(file)
}
