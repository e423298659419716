use rust_decimal::Decimal;

/// Trailing average of the `window` prices ending at `index` (inclusive)
///
/// Returns zero until `window` observations have been consumed. Signal
/// thresholds are then evaluated against zero, so any positive price
/// clears the upper band during the cold start.
pub fn trailing_average(prices: &[Decimal], index: usize, window: usize) -> Decimal {
    if window == 0 || index + 1 < window || index >= prices.len() {
        return Decimal::ZERO;
    }

    let sum: Decimal = prices[index + 1 - window..=index].iter().sum();
    sum / Decimal::from(window)
}
