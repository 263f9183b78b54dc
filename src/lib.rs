//! Wealth Calculators - projection formulas and calculator directory
//!
//! This library provides:
//! - Annuity-due future value, corpus split, pension and tax-benefit formulas
//! - SIP projections with a year-wise growth series
//! - NPS projections with the fixed lumpsum/annuity split and pension estimate
//! - A searchable, immutable directory of calculators
//! - Batch scenario runs over CSV inputs
//!
//! All computation is pure and synchronous; nothing is cached between calls.

pub mod error;
pub mod formulas;
pub mod projection;
pub mod catalog;
pub mod scenario;
pub mod format;

// Re-export commonly used types
pub use error::{CalcError, CatalogLoadError};
pub use projection::{
    GrowthPoint, NpsInput, NpsPolicy, NpsProjector, NpsResult, SipInput, SipProjector, SipResult,
};
pub use catalog::{CatalogEntry, CatalogIndex, CatalogQuery, CatalogQueryEngine, SortMode};
pub use scenario::ScenarioRunner;
