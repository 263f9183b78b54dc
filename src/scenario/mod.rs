//! Scenario runner for batch projections
//!
//! Holds one configured SIP and NPS projector and applies them to many
//! inputs, so every scenario in a batch sees the same bounds and policy.

pub mod loader;

pub use loader::{
    load_nps_scenarios, load_nps_scenarios_from_reader, load_sip_scenarios,
    load_sip_scenarios_from_reader, NpsScenario, SipScenario,
};

use crate::error::Result;
use crate::projection::{NpsInput, NpsProjector, NpsResult, SipInput, SipProjector, SipResult};

/// Result of one labelled scenario; invalid inputs keep their error
#[derive(Debug, Clone, PartialEq)]
pub struct ScenarioOutcome<T> {
    pub id: String,
    pub result: Result<T>,
}

/// Batch runner over a fixed pair of projectors
///
/// # Example
/// ```ignore
/// let runner = ScenarioRunner::new();
/// for outcome in runner.run_sip_batch(&scenarios) {
///     println!("{}: {:?}", outcome.id, outcome.result);
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct ScenarioRunner {
    sip: SipProjector,
    nps: NpsProjector,
}

impl ScenarioRunner {
    /// Lenient projectors and the default NPS policy
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_projectors(sip: SipProjector, nps: NpsProjector) -> Self {
        Self { sip, nps }
    }

    pub fn run_sip(&self, scenario: &SipScenario) -> ScenarioOutcome<SipResult> {
        ScenarioOutcome {
            id: scenario.id.clone(),
            result: self.sip.project(&scenario.input),
        }
    }

    pub fn run_nps(&self, scenario: &NpsScenario) -> ScenarioOutcome<NpsResult> {
        ScenarioOutcome {
            id: scenario.id.clone(),
            result: self.nps.project(&scenario.input),
        }
    }

    pub fn run_sip_batch(&self, scenarios: &[SipScenario]) -> Vec<ScenarioOutcome<SipResult>> {
        scenarios.iter().map(|s| self.run_sip(s)).collect()
    }

    pub fn run_nps_batch(&self, scenarios: &[NpsScenario]) -> Vec<ScenarioOutcome<NpsResult>> {
        scenarios.iter().map(|s| self.run_nps(s)).collect()
    }

    /// Project one SIP input at several annual return rates
    pub fn sip_rate_sweep(&self, base: &SipInput, rates_percent: &[f64]) -> Vec<Result<SipResult>> {
        rates_percent
            .iter()
            .map(|&rate| {
                self.sip.project(&SipInput {
                    annual_return_rate_percent: rate,
                    ..*base
                })
            })
            .collect()
    }

    /// Project one NPS input at several retirement ages
    pub fn nps_retirement_sweep(&self, base: &NpsInput, retirement_ages: &[u32]) -> Vec<Result<NpsResult>> {
        retirement_ages
            .iter()
            .map(|&retirement_age| {
                self.nps.project(&NpsInput {
                    retirement_age,
                    ..*base
                })
            })
            .collect()
    }

    pub fn sip_projector(&self) -> &SipProjector {
        &self.sip
    }

    pub fn nps_projector(&self) -> &NpsProjector {
        &self.nps
    }
}
