//! Corpus split, pension and tax-benefit arithmetic

use serde::{Deserialize, Serialize};

/// A corpus divided into a withdrawable lumpsum and the remainder
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CorpusSplit {
    pub lumpsum: f64,
    pub remainder: f64,
}

/// Split an unrounded corpus into `lumpsum = corpus * fraction` and its complement.
///
/// The remainder is taken as `corpus - lumpsum` so both halves come from the
/// same unrounded corpus and add back up to it. Rounding is left to the caller.
pub fn split_corpus(corpus: f64, lumpsum_fraction: f64) -> CorpusSplit {
    let lumpsum = corpus * lumpsum_fraction;
    CorpusSplit {
        lumpsum,
        remainder: corpus - lumpsum,
    }
}

/// Monthly payout from an annuity at a simple (non-compounding) annual yield
pub fn monthly_pension_from_annuity(annuity_amount: f64, annual_rate_percent: f64) -> f64 {
    annuity_amount * (annual_rate_percent / 100.0) / 12.0
}

/// Tax saved on a year's contributions at a flat bracket
pub fn estimate_tax_saved(annual_contribution: f64, tax_bracket: f64) -> f64 {
    annual_contribution * tax_bracket
}
