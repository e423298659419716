// Trading strategy module
pub mod bollinger;
pub mod mean_reversion;
pub mod moving_average;

pub use bollinger::BollingerStrategy;
pub use mean_reversion::MeanReversionStrategy;
pub use moving_average::SmaStrategy;

use crate::backtest::state::{BacktestState, LatchMode};
use crate::data::PriceSeries;
use crate::models::{Position, Signal, StrategyKind};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Band around the trailing average that triggers entries and exits
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SignalBands {
    /// Observations in the trailing average
    pub window: usize,
    /// Buy above `average * upper`
    #[serde(with = "rust_decimal::serde::str")]
    pub upper: Decimal,
    /// Sell below `average * lower`
    #[serde(with = "rust_decimal::serde::str")]
    pub lower: Decimal,
}

impl Default for SignalBands {
    fn default() -> Self {
        Self {
            window: 5,
            upper: Decimal::new(105, 2), // +5%
            lower: Decimal::new(95, 2),  // -5%
        }
    }
}

impl SignalBands {
    pub fn above_upper(&self, price: Decimal, average: Decimal) -> bool {
        price > average * self.upper
    }

    pub fn below_lower(&self, price: Decimal, average: Decimal) -> bool {
        price < average * self.lower
    }
}

/// Base trait for all backtested strategies
pub trait Strategy: Send + Sync {
    /// Get strategy name
    fn name(&self) -> &str;

    fn kind(&self) -> StrategyKind;

    fn bands(&self) -> &SignalBands;

    /// Price the signal at `index` is evaluated against
    fn reference_price(
        &self,
        series: &PriceSeries,
        index: usize,
        state: &BacktestState,
    ) -> Decimal;

    /// Signal for this step given the reference price and trailing average
    fn evaluate(&self, reference: Decimal, average: Decimal, state: &BacktestState) -> Signal;

    fn first_trade_latch(&self) -> LatchMode;

    /// Whether a sell records the first-trade price when nothing is latched yet
    fn latches_on_sell(&self) -> bool {
        false
    }
}

/// Buy above the upper band while FLAT, sell below the lower band while LONG
pub(crate) fn guarded_band_signal(
    bands: &SignalBands,
    reference: Decimal,
    average: Decimal,
    position: Position,
) -> Signal {
    if bands.above_upper(reference, average) && position == Position::Flat {
        Signal::Buy
    } else if bands.below_lower(reference, average) && position == Position::Long {
        Signal::Sell
    } else {
        Signal::Hold
    }
}

/// Build the strategy for a kind
pub fn strategy_for(kind: StrategyKind, bands: SignalBands) -> Box<dyn Strategy> {
    match kind {
        StrategyKind::MeanReversion => Box::new(MeanReversionStrategy::new(bands)),
        StrategyKind::Sma => Box::new(SmaStrategy::new(bands)),
        StrategyKind::Bollinger => Box::new(BollingerStrategy::new(bands)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_bands() {
        let bands = SignalBands::default();
        assert_eq!(bands.window, 5);
        assert!(bands.above_upper(Decimal::new(10501, 2), Decimal::from(100)));
        assert!(!bands.above_upper(Decimal::from(105), Decimal::from(100)));
        assert!(bands.below_lower(Decimal::new(9499, 2), Decimal::from(100)));
        assert!(!bands.below_lower(Decimal::from(95), Decimal::from(100)));
    }

    #[test]
    fn test_zero_average_admits_any_positive_buy() {
        let bands = SignalBands::default();
        let signal = guarded_band_signal(&bands, Decimal::new(1, 2), Decimal::ZERO, Position::Flat);
        assert_eq!(signal, Signal::Buy);
    }

    #[test]
    fn test_guarded_signal_respects_position() {
        let bands = SignalBands::default();
        let avg = Decimal::from(100);

        assert_eq!(
            guarded_band_signal(&bands, Decimal::from(110), avg, Position::Long),
            Signal::Hold
        );
        assert_eq!(
            guarded_band_signal(&bands, Decimal::from(90), avg, Position::Flat),
            Signal::Hold
        );
        assert_eq!(
            guarded_band_signal(&bands, Decimal::from(90), avg, Position::Long),
            Signal::Sell
        );
    }

    #[test]
    fn test_strategy_for_kinds() {
        for kind in StrategyKind::ALL {
            let strategy = strategy_for(kind, SignalBands::default());
            assert_eq!(strategy.kind(), kind);
        }
    }

    #[test]
    fn test_bands_deserialize_from_strings() {
        let bands: SignalBands =
            serde_json::from_str(r#"{"window":3,"upper":"1.10","lower":"0.90"}"#).unwrap();
        assert_eq!(bands.window, 3);
        assert_eq!(bands.upper, Decimal::new(110, 2));
        assert_eq!(bands.lower, Decimal::new(90, 2));
    }
}
