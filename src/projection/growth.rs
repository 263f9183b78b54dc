//! Year-wise growth series for a level monthly contribution

use serde::{Deserialize, Serialize};

use super::bounds::months_in;
use crate::error::Result;
use crate::formulas::{future_value_of_annuity_due, MONTHS_PER_YEAR};

/// Invested amount and projected value at the end of a whole year
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GrowthPoint {
    pub year_index: u32,
    pub invested_so_far: f64,
    pub projected_value: f64,
}

/// Descriptor for a growth series over `years` whole years.
///
/// Holds only the inputs, so the series can be walked any number of times;
/// each walk recomputes every point from the annuity formula. The month count
/// of the final year must fit in `u32`, so no point ever saturates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GrowthSeries {
    monthly_amount: f64,
    periodic_rate: f64,
    years: u32,
}

impl GrowthSeries {
    pub fn new(monthly_amount: f64, periodic_rate: f64, years: u32) -> Result<Self> {
        months_in("years", years)?;
        Ok(Self {
            monthly_amount,
            periodic_rate,
            years,
        })
    }

    /// Number of points, one per year boundary including year 0
    pub fn len(&self) -> usize {
        self.years as usize + 1
    }

    /// A series always holds the year 0 point
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Point for a year boundary no later than `years`
    fn point(&self, year_index: u32) -> GrowthPoint {
        let months = year_index * MONTHS_PER_YEAR;
        GrowthPoint {
            year_index,
            invested_so_far: self.monthly_amount * months as f64,
            projected_value: future_value_of_annuity_due(self.monthly_amount, self.periodic_rate, months),
        }
    }

    /// Walk the series from year 0 to `years` inclusive
    pub fn iter(&self) -> impl Iterator<Item = GrowthPoint> + '_ {
        (0..=self.years).map(move |year| self.point(year))
    }

    pub fn to_vec(&self) -> Vec<GrowthPoint> {
        self.iter().collect()
    }
}
