//! Level annuity valuation with payments at the start of each period

/// Future value of a level annuity due.
///
/// FV = amount * ((1 + r)^n - 1) / r * (1 + r)
///
/// The trailing (1 + r) reflects that each payment is made at the start of
/// its period and therefore earns one extra period of growth. At a zero rate
/// the closed form is undefined and the limit `amount * periods` is returned.
///
/// The growth factor is evaluated as `expm1(n * ln1p(r)) / r`, which stays
/// accurate for rates so small that `1 + r` would drop most of their digits.
///
/// # Arguments
/// * `amount` - Payment per period, non-negative
/// * `periodic_rate` - Growth rate per period as a decimal (0.01 for 1%/month)
/// * `periods` - Number of payments
pub fn future_value_of_annuity_due(amount: f64, periodic_rate: f64, periods: u32) -> f64 {
    if periodic_rate == 0.0 {
        return amount * periods as f64;
    }

    let accumulation = (periods as f64 * periodic_rate.ln_1p()).exp_m1() / periodic_rate;
    amount * accumulation * (1.0 + periodic_rate)
}
