//! Input validation shared by the projectors
//!
//! Base checks (finite, positive, non-negative) always run. The documented
//! input-widget ranges are optional and only enforced when a projector is
//! built with bounds.

use serde::{Deserialize, Serialize};
use std::fmt::Display;

use crate::error::{CalcError, Result};

/// Inclusive range for a single input field
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds<T> {
    pub min: T,
    pub max: T,
}

impl<T: PartialOrd + Copy + Display> Bounds<T> {
    pub const fn new(min: T, max: T) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: T) -> bool {
        value >= self.min && value <= self.max
    }

    /// Fail with `InvalidInput` when `value` falls outside the range
    pub fn check(&self, field: &'static str, value: T) -> Result<()> {
        if self.contains(value) {
            Ok(())
        } else {
            Err(CalcError::invalid(
                field,
                format!("{} is outside the accepted range {}..={}", value, self.min, self.max),
            ))
        }
    }
}

/// Accepted ranges for the SIP calculator inputs
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SipBounds {
    pub monthly_investment: Bounds<f64>,
    pub annual_return_rate_percent: Bounds<f64>,
    pub years: Bounds<u32>,
}

impl Default for SipBounds {
    fn default() -> Self {
        Self {
            monthly_investment: Bounds::new(500.0, 100_000.0),
            annual_return_rate_percent: Bounds::new(1.0, 30.0),
            years: Bounds::new(1, 40),
        }
    }
}

/// Accepted ranges for the NPS calculator inputs
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NpsBounds {
    pub monthly_contribution: Bounds<f64>,
    /// Applies to both current and retirement age
    pub age: Bounds<u32>,
    pub expected_return_rate_percent: Bounds<f64>,
    pub annuity_return_rate_percent: Bounds<f64>,
}

impl Default for NpsBounds {
    fn default() -> Self {
        Self {
            monthly_contribution: Bounds::new(500.0, 50_000.0),
            age: Bounds::new(18, 70),
            expected_return_rate_percent: Bounds::new(4.0, 14.0),
            annuity_return_rate_percent: Bounds::new(4.0, 10.0),
        }
    }
}

/// Finite and strictly positive
pub(crate) fn require_positive(field: &'static str, value: f64) -> Result<()> {
    if !value.is_finite() {
        return Err(CalcError::invalid(field, format!("{} is not a finite number", value)));
    }
    if value <= 0.0 {
        return Err(CalcError::invalid(field, format!("{} must be greater than zero", value)));
    }
    Ok(())
}

/// Finite and zero or greater
pub(crate) fn require_non_negative(field: &'static str, value: f64) -> Result<()> {
    if !value.is_finite() {
        return Err(CalcError::invalid(field, format!("{} is not a finite number", value)));
    }
    if value < 0.0 {
        return Err(CalcError::invalid(field, format!("{} must not be negative", value)));
    }
    Ok(())
}

/// A fraction in [0, 1], used for policy constants
pub(crate) fn require_fraction(field: &'static str, value: f64) -> Result<()> {
    require_non_negative(field, value)?;
    if value > 1.0 {
        return Err(CalcError::invalid(field, format!("{} must not exceed 1", value)));
    }
    Ok(())
}

/// Number of monthly periods in `years`, rejecting overflow
pub(crate) fn months_in(field: &'static str, years: u32) -> Result<u32> {
    years
        .checked_mul(crate::formulas::MONTHS_PER_YEAR)
        .ok_or_else(|| CalcError::invalid(field, format!("{} years is too long to project", years)))
}
