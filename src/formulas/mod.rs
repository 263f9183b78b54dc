//! Time-value-of-money formulas behind the SIP and NPS calculators
//!
//! Every function here is pure and total over its documented domain.
//! Callers validate inputs (finite, non-negative) before reaching this layer.

mod annuity;
mod payout;

pub use annuity::future_value_of_annuity_due;
pub use payout::{estimate_tax_saved, monthly_pension_from_annuity, split_corpus, CorpusSplit};

/// Months per year, used for periodic rate and period conversions
pub const MONTHS_PER_YEAR: u32 = 12;

/// Convert an annual percentage (e.g. 12.0 for 12%) into a monthly periodic rate
pub fn monthly_rate_from_annual_percent(annual_percent: f64) -> f64 {
    annual_percent / 100.0 / MONTHS_PER_YEAR as f64
}
