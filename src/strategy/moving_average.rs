use super::{guarded_band_signal, SignalBands, Strategy};
use crate::backtest::state::{BacktestState, LatchMode};
use crate::data::PriceSeries;
use crate::models::{Signal, StrategyKind};
use rust_decimal::Decimal;

/// Simple moving average crossover
///
/// Same ±5% band as mean reversion, evaluated on the current price. The
/// first-trade price is overwritten on every buy, so the return percentage
/// is relative to the most recent entry.
#[derive(Debug, Clone, Default)]
pub struct SmaStrategy {
    bands: SignalBands,
}

impl SmaStrategy {
    pub fn new(bands: SignalBands) -> Self {
        Self { bands }
    }
}

impl Strategy for SmaStrategy {
    fn name(&self) -> &str {
        "Simple Moving Average"
    }

    fn kind(&self) -> StrategyKind {
        StrategyKind::Sma
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
        guarded_band_signal(&self.bands, reference, average, state.position)
    }

    fn first_trade_latch(&self) -> LatchMode {
        LatchMode::ResetOnEverySignal
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Position;

    #[test]
    fn test_reference_is_current_price() {
        let strategy = SmaStrategy::default();
        let series = PriceSeries::parse(&["10", "20", "5"]).unwrap();
        let state = BacktestState::new(strategy.first_trade_latch());

        assert_eq!(strategy.reference_price(&series, 1, &state), Decimal::from(20));
        assert_eq!(strategy.reference_price(&series, 2, &state), Decimal::from(5));
    }

    #[test]
    fn test_no_sell_while_flat() {
        let strategy = SmaStrategy::default();
        let state = BacktestState::new(strategy.first_trade_latch());
        assert_eq!(state.position, Position::Flat);

        let signal = strategy.evaluate(Decimal::from(80), Decimal::from(100), &state);
        assert_eq!(signal, Signal::Hold);
    }
}
