//! National Pension System projection
//!
//! The corpus grows as an annuity due; at retirement a fixed fraction is
//! withdrawable and the rest must buy an annuity that pays a monthly pension.

use log::debug;
use serde::{Deserialize, Serialize};

use super::bounds::{
    months_in, require_fraction, require_non_negative, require_positive, Bounds, NpsBounds,
};
use super::growth::{GrowthPoint, GrowthSeries};
use super::round_currency;
use crate::error::{CalcError, Result};
use crate::formulas::{
    estimate_tax_saved, future_value_of_annuity_due, monthly_pension_from_annuity,
    monthly_rate_from_annual_percent, split_corpus, MONTHS_PER_YEAR,
};

/// Share of the maturity corpus that may be withdrawn as a lumpsum
pub const NPS_LUMPSUM_FRACTION: f64 = 0.6;

/// Flat tax bracket assumed when illustrating the tax benefit (not a tax-law computation)
pub const ILLUSTRATIVE_TAX_BRACKET: f64 = 0.3;

/// Youngest and oldest age accepted as a current age
pub const ELIGIBLE_AGES: Bounds<u32> = Bounds { min: 18, max: 70 };

/// Policy constants applied to every NPS projection
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NpsPolicy {
    /// Withdrawable share of the corpus; the remainder is annuitised
    pub lumpsum_fraction: f64,
    /// Tax bracket applied to a year's contributions
    pub tax_bracket: f64,
}

impl Default for NpsPolicy {
    fn default() -> Self {
        Self {
            lumpsum_fraction: NPS_LUMPSUM_FRACTION,
            tax_bracket: ILLUSTRATIVE_TAX_BRACKET,
        }
    }
}

impl NpsPolicy {
    pub fn validate(&self) -> Result<()> {
        require_fraction("lumpsum_fraction", self.lumpsum_fraction)?;
        require_fraction("tax_bracket", self.tax_bracket)
    }
}

/// Inputs for an NPS projection
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NpsInput {
    pub monthly_contribution: f64,
    pub current_age: u32,
    pub retirement_age: u32,
    /// Expected annual return during accumulation, in percent
    pub expected_return_rate_percent: f64,
    /// Annual yield of the purchased annuity, in percent
    pub annuity_return_rate_percent: f64,
}

impl NpsInput {
    /// Years of contributions; zero when the age range is inverted
    pub fn years_to_retirement(&self) -> u32 {
        self.retirement_age.saturating_sub(self.current_age)
    }
}

/// Rounded NPS outcome.
///
/// Each currency field is rounded on its own, so `lumpsum + annuity_amount`
/// may differ from `maturity_corpus` by one unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NpsResult {
    pub years: u32,
    pub periods: u32,
    pub maturity_corpus: u64,
    pub total_investment: u64,
    pub total_returns: u64,
    pub annuity_amount: u64,
    pub lumpsum: u64,
    pub monthly_pension: u64,
    pub tax_saved: u64,
}

impl NpsResult {
    pub fn annual_pension(&self) -> u64 {
        self.monthly_pension * MONTHS_PER_YEAR as u64
    }
}

/// A growth point labelled with the subscriber's age at that year boundary
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NpsGrowthPoint {
    pub age: u32,
    #[serde(flatten)]
    pub point: GrowthPoint,
}

/// Projects NPS inputs into an [`NpsResult`] under a fixed [`NpsPolicy`]
#[derive(Debug, Clone, Default)]
pub struct NpsProjector {
    policy: NpsPolicy,
    bounds: Option<NpsBounds>,
}

impl NpsProjector {
    pub fn new(policy: NpsPolicy) -> Self {
        Self { policy, bounds: None }
    }

    /// Also enforce the accepted input ranges
    pub fn with_bounds(mut self, bounds: NpsBounds) -> Self {
        self.bounds = Some(bounds);
        self
    }

    pub fn policy(&self) -> &NpsPolicy {
        &self.policy
    }

    /// Validate the input and policy without projecting
    pub fn validate(&self, input: &NpsInput) -> Result<()> {
        require_positive("monthly_contribution", input.monthly_contribution)?;
        ELIGIBLE_AGES.check("current_age", input.current_age)?;
        if input.retirement_age <= input.current_age {
            return Err(CalcError::InvalidAgeRange {
                current_age: input.current_age,
                retirement_age: input.retirement_age,
            });
        }
        require_non_negative("expected_return_rate_percent", input.expected_return_rate_percent)?;
        require_non_negative("annuity_return_rate_percent", input.annuity_return_rate_percent)?;
        self.policy.validate()?;

        if let Some(bounds) = &self.bounds {
            bounds
                .monthly_contribution
                .check("monthly_contribution", input.monthly_contribution)?;
            bounds.age.check("current_age", input.current_age)?;
            bounds.age.check("retirement_age", input.retirement_age)?;
            bounds
                .expected_return_rate_percent
                .check("expected_return_rate_percent", input.expected_return_rate_percent)?;
            bounds
                .annuity_return_rate_percent
                .check("annuity_return_rate_percent", input.annuity_return_rate_percent)?;
        }
        Ok(())
    }

    pub fn project(&self, input: &NpsInput) -> Result<NpsResult> {
        self.validate(input)?;

        let years = input.years_to_retirement();
        let periods = months_in("retirement_age", years)?;
        let periodic_rate = monthly_rate_from_annual_percent(input.expected_return_rate_percent);

        let corpus = future_value_of_annuity_due(input.monthly_contribution, periodic_rate, periods);
        let invested = input.monthly_contribution * periods as f64;

        // Split before rounding so both halves derive from the same corpus
        let split = split_corpus(corpus, self.policy.lumpsum_fraction);
        let pension = monthly_pension_from_annuity(split.remainder, input.annuity_return_rate_percent);
        let tax_saved = estimate_tax_saved(
            input.monthly_contribution * MONTHS_PER_YEAR as f64,
            self.policy.tax_bracket,
        );

        let maturity_corpus = round_currency(corpus);
        let total_investment = round_currency(invested);

        debug!(
            "NPS {:.2}/month from age {} to {} at {}% -> corpus {}",
            input.monthly_contribution,
            input.current_age,
            input.retirement_age,
            input.expected_return_rate_percent,
            maturity_corpus
        );

        Ok(NpsResult {
            years,
            periods,
            maturity_corpus,
            total_investment,
            total_returns: maturity_corpus.saturating_sub(total_investment),
            annuity_amount: round_currency(split.remainder),
            lumpsum: round_currency(split.lumpsum),
            monthly_pension: round_currency(pension),
            tax_saved: round_currency(tax_saved),
        })
    }

    /// Year-wise corpus growth from the current age up to retirement
    pub fn growth_series(&self, input: &NpsInput) -> Result<Vec<NpsGrowthPoint>> {
        self.validate(input)?;

        let years = input.years_to_retirement();
        months_in("retirement_age", years)?;
        let periodic_rate = monthly_rate_from_annual_percent(input.expected_return_rate_percent);
        let series = GrowthSeries::new(input.monthly_contribution, periodic_rate, years)?;

        Ok(series
            .iter()
            .map(|point| NpsGrowthPoint {
                age: input.current_age + point.year_index,
                point,
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::{prop_assert, proptest};

    fn reference_input() -> NpsInput {
        NpsInput {
            monthly_contribution: 5000.0,
            current_age: 30,
            retirement_age: 60,
            expected_return_rate_percent: 10.0,
            annuity_return_rate_percent: 6.0,
        }
    }

    #[test]
    fn test_reference_projection() {
        let result = NpsProjector::default().project(&reference_input()).unwrap();
        assert_eq!(result.years, 30);
        assert_eq!(result.periods, 360);
        assert_eq!(result.total_investment, 1_800_000);
        assert_eq!(result.tax_saved, 18_000);

        let corpus = future_value_of_annuity_due(5000.0, 10.0 / 100.0 / 12.0, 360);
        assert_eq!(result.maturity_corpus, corpus.round() as u64);
        assert_eq!(result.lumpsum, (corpus * 0.6).round() as u64);
        assert_eq!(result.annuity_amount, (corpus - corpus * 0.6).round() as u64);
        assert_eq!(
            result.monthly_pension,
            ((corpus - corpus * 0.6) * 0.06 / 12.0).round() as u64
        );
        assert_eq!(
            result.total_returns,
            result.maturity_corpus - result.total_investment
        );
    }

    #[test]
    fn test_reference_corpus_magnitude() {
        // ~1.14 crore for 5000/month over 30 years at 10%
        let result = NpsProjector::default().project(&reference_input()).unwrap();
        assert!(result.maturity_corpus > 11_000_000 && result.maturity_corpus < 11_500_000);
        assert_eq!(result.annual_pension(), result.monthly_pension * 12);
    }

    #[test]
    fn test_inverted_ages_fail_with_age_range() {
        let input = NpsInput {
            current_age: 30,
            retirement_age: 25,
            ..reference_input()
        };
        let err = NpsProjector::default().project(&input).unwrap_err();
        assert_eq!(
            err,
            CalcError::InvalidAgeRange {
                current_age: 30,
                retirement_age: 25
            }
        );
    }

    #[test]
    fn test_equal_ages_fail_with_age_range() {
        let input = NpsInput {
            retirement_age: 30,
            ..reference_input()
        };
        assert!(matches!(
            NpsProjector::default().project(&input),
            Err(CalcError::InvalidAgeRange { .. })
        ));
    }

    #[test]
    fn test_current_age_outside_eligibility() {
        let input = NpsInput {
            current_age: 16,
            ..reference_input()
        };
        assert!(matches!(
            NpsProjector::default().project(&input),
            Err(CalcError::InvalidInput { field: "current_age", .. })
        ));
    }

    #[test]
    fn test_rejects_bad_contribution_and_rates() {
        let projector = NpsProjector::default();
        let zero = NpsInput {
            monthly_contribution: 0.0,
            ..reference_input()
        };
        assert!(projector.project(&zero).is_err());

        let negative_annuity = NpsInput {
            annuity_return_rate_percent: -2.0,
            ..reference_input()
        };
        assert!(matches!(
            projector.project(&negative_annuity),
            Err(CalcError::InvalidInput { field: "annuity_return_rate_percent", .. })
        ));
    }

    #[test]
    fn test_policy_constants_are_configurable() {
        let policy = NpsPolicy {
            lumpsum_fraction: 1.0,
            tax_bracket: 0.0,
        };
        let result = NpsProjector::new(policy).project(&reference_input()).unwrap();
        assert_eq!(result.lumpsum, result.maturity_corpus);
        assert_eq!(result.annuity_amount, 0);
        assert_eq!(result.monthly_pension, 0);
        assert_eq!(result.tax_saved, 0);
    }

    #[test]
    fn test_invalid_policy_is_rejected() {
        let policy = NpsPolicy {
            lumpsum_fraction: 1.5,
            ..NpsPolicy::default()
        };
        assert!(matches!(
            NpsProjector::new(policy).project(&reference_input()),
            Err(CalcError::InvalidInput { field: "lumpsum_fraction", .. })
        ));
    }

    #[test]
    fn test_bounds_reject_retirement_past_seventy() {
        let input = NpsInput {
            retirement_age: 75,
            ..reference_input()
        };
        assert!(NpsProjector::default().project(&input).is_ok());
        let strict = NpsProjector::default().with_bounds(NpsBounds::default());
        assert!(matches!(
            strict.project(&input),
            Err(CalcError::InvalidInput { field: "retirement_age", .. })
        ));
    }

    #[test]
    fn test_growth_series_is_labelled_by_age() {
        let series = NpsProjector::default().growth_series(&reference_input()).unwrap();
        assert_eq!(series.len(), 31);
        assert_eq!(series[0].age, 30);
        assert_eq!(series[0].point.projected_value, 0.0);
        assert_eq!(series[30].age, 60);

        let result = NpsProjector::default().project(&reference_input()).unwrap();
        assert_eq!(round_currency(series[30].point.projected_value), result.maturity_corpus);
    }

    #[test]
    fn test_series_and_projection_reject_the_same_overlong_horizon() {
        let input = NpsInput {
            retirement_age: 400_000_000,
            ..reference_input()
        };
        let projector = NpsProjector::default();
        let projected = projector.project(&input).unwrap_err();
        let series = projector.growth_series(&input).unwrap_err();
        assert!(matches!(projected, CalcError::InvalidInput { field: "retirement_age", .. }));
        assert_eq!(series, projected);
    }

    #[test]
    fn test_identity_holds_for_tiny_positive_rates() {
        let projector = NpsProjector::default();
        for k in 1..=500 {
            let input = NpsInput {
                monthly_contribution: 50_000.0,
                current_age: 18,
                retirement_age: 70,
                expected_return_rate_percent: k as f64 * 2e-9,
                annuity_return_rate_percent: 6.0,
            };
            let result = projector.project(&input).unwrap();
            assert!(result.maturity_corpus >= result.total_investment);
            assert_eq!(
                result.total_investment + result.total_returns,
                result.maturity_corpus
            );
        }
    }

    proptest! {
        #![proptest_config(proptest::test_runner::Config::with_cases(64))]

        #[test]
        fn prop_split_halves_within_one_unit_of_corpus(
            contribution in 500u32..50_000,
            current_age in 18u32..60,
            span in 1u32..30,
            expected_bp in 0u32..1400,
            annuity_bp in 0u32..1000
        ) {
            let input = NpsInput {
                monthly_contribution: contribution as f64,
                current_age,
                retirement_age: current_age + span,
                expected_return_rate_percent: expected_bp as f64 / 100.0,
                annuity_return_rate_percent: annuity_bp as f64 / 100.0,
            };
            let result = NpsProjector::default().project(&input).unwrap();
            let halves = result.lumpsum + result.annuity_amount;
            prop_assert!(halves.abs_diff(result.maturity_corpus) <= 1);
            prop_assert!(result.maturity_corpus >= result.total_investment);
        }
    }
}
