//! Systematic Investment Plan projection

use log::debug;
use serde::{Deserialize, Serialize};

use super::bounds::{months_in, require_non_negative, require_positive, SipBounds};
use super::growth::{GrowthPoint, GrowthSeries};
use super::round_currency;
use crate::error::{CalcError, Result};
use crate::formulas::{future_value_of_annuity_due, monthly_rate_from_annual_percent};

/// Inputs for a SIP projection
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SipInput {
    /// Amount invested at the start of every month
    pub monthly_investment: f64,
    /// Expected annual return, in percent
    pub annual_return_rate_percent: f64,
    /// Investment horizon in whole years
    pub years: u32,
}

/// Rounded SIP outcome plus the year-wise growth series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SipResult {
    pub future_value: u64,
    pub total_invested: u64,
    pub total_returns: u64,
    pub growth_series: Vec<GrowthPoint>,
}

impl SipResult {
    /// Future value per unit invested (1.0 when nothing was earned)
    pub fn wealth_gain_ratio(&self) -> f64 {
        if self.total_invested == 0 {
            return 0.0;
        }
        self.future_value as f64 / self.total_invested as f64
    }
}

/// Projects SIP inputs into a [`SipResult`]. Holds no state between calls.
#[derive(Debug, Clone, Default)]
pub struct SipProjector {
    bounds: Option<SipBounds>,
}

impl SipProjector {
    /// Projector with base validation only
    pub fn new() -> Self {
        Self { bounds: None }
    }

    /// Projector that also enforces the accepted input ranges
    pub fn with_bounds(bounds: SipBounds) -> Self {
        Self { bounds: Some(bounds) }
    }

    pub fn bounds(&self) -> Option<&SipBounds> {
        self.bounds.as_ref()
    }

    /// Validate the input without projecting it
    pub fn validate(&self, input: &SipInput) -> Result<()> {
        require_positive("monthly_investment", input.monthly_investment)?;
        require_non_negative("annual_return_rate_percent", input.annual_return_rate_percent)?;
        if input.years < 1 {
            return Err(CalcError::invalid("years", "must be at least 1"));
        }

        if let Some(bounds) = &self.bounds {
            bounds
                .monthly_investment
                .check("monthly_investment", input.monthly_investment)?;
            bounds
                .annual_return_rate_percent
                .check("annual_return_rate_percent", input.annual_return_rate_percent)?;
            bounds.years.check("years", input.years)?;
        }
        Ok(())
    }

    pub fn project(&self, input: &SipInput) -> Result<SipResult> {
        self.validate(input)?;

        let periods = months_in("years", input.years)?;
        let periodic_rate = monthly_rate_from_annual_percent(input.annual_return_rate_percent);

        let future_value = round_currency(future_value_of_annuity_due(
            input.monthly_investment,
            periodic_rate,
            periods,
        ));
        let total_invested = round_currency(input.monthly_investment * periods as f64);
        // A non-negative rate never loses money, so this only guards float noise
        let total_returns = future_value.saturating_sub(total_invested);

        let growth_series =
            GrowthSeries::new(input.monthly_investment, periodic_rate, input.years)?.to_vec();

        debug!(
            "SIP {:.2}/month at {}% for {} years -> FV {} (invested {})",
            input.monthly_investment,
            input.annual_return_rate_percent,
            input.years,
            future_value,
            total_invested
        );

        Ok(SipResult {
            future_value,
            total_invested,
            total_returns,
            growth_series,
        })
    }
}
