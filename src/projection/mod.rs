//! SIP and NPS projectors and the year-wise growth series they produce

mod bounds;
mod growth;
mod nps;
mod sip;

pub use bounds::{Bounds, NpsBounds, SipBounds};
pub use growth::{GrowthPoint, GrowthSeries};
pub use nps::{
    NpsGrowthPoint, NpsInput, NpsPolicy, NpsProjector, NpsResult, ELIGIBLE_AGES,
    ILLUSTRATIVE_TAX_BRACKET, NPS_LUMPSUM_FRACTION,
};
pub use sip::{SipInput, SipProjector, SipResult};

/// Round a non-negative currency amount to the nearest whole unit
pub(crate) fn round_currency(amount: f64) -> u64 {
    amount.round().max(0.0) as u64
}
