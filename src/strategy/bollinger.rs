use super::{SignalBands, Strategy};
use crate::backtest::state::{BacktestState, LatchMode};
use crate::data::PriceSeries;
use crate::models::{Position, Signal, StrategyKind};
use rust_decimal::Decimal;

/// Bollinger-style band crossover
///
/// Buys like the SMA strategy, but a sell fires on any close below the
/// lower band whether or not a position is open. A sell while FLAT books
/// `price - entry_price` against the stale (or initial zero) entry price.
/// A sell before any buy latches its own price as the first-trade price;
/// once a buy has latched, sells leave it alone.
#[derive(Debug, Clone, Default)]
pub struct BollingerStrategy {
    bands: SignalBands,
}

impl BollingerStrategy {
    pub fn new(bands: SignalBands) -> Self {
        Self { bands }
    }
}

impl Strategy for BollingerStrategy {
    fn name(&self) -> &str {
        "Bollinger"
    }

    fn kind(&self) -> StrategyKind {
        StrategyKind::Bollinger
    }

    fn bands(&self) -> &SignalBands {
        &self.bands
    }

    fn reference_price(
        &self,
        series: &PriceSeries,
        index: usize,
        state: &BacktestState,
    ) -> Decimal {
        series.get(index).unwrap_or(state.last_reference)
    }

    fn evaluate(&self, reference: Decimal, average: Decimal, state: &BacktestState) -> Signal {
        if self.bands.above_upper(reference, average) && state.position == Position::Flat {
            Signal::Buy
        } else if self.bands.below_lower(reference, average) {
            Signal::Sell
        } else {
            Signal::Hold
        }
    }

    fn first_trade_latch(&self) -> LatchMode {
        LatchMode::ResetOnEverySignal
    }

    fn latches_on_sell(&self) -> bool {
        true
    }
}
