use super::{guarded_band_signal, SignalBands, Strategy};
use crate::backtest::state::{BacktestState, LatchMode};
use crate::data::PriceSeries;
use crate::models::{Signal, StrategyKind};
use rust_decimal::Decimal;

/// Mean reversion strategy
///
/// Evaluates the *next* observation against the trailing average of the
/// current one (peek-ahead). On the final observation there is nothing to
/// peek at, so the previous step's reference price is carried forward.
///
/// Entry: reference > average * 1.05 while FLAT.
/// Exit: reference < average * 0.95 while LONG.
/// The first-trade price is taken from the first buy only.
#[derive(Debug, Clone, Default)]
pub struct MeanReversionStrategy {
    bands: SignalBands,
}

impl MeanReversionStrategy {
    pub fn new(bands: SignalBands) -> Self {
        Self { bands }
    }
}

impl Strategy for MeanReversionStrategy {
    fn name(&self) -> &str {
        "Mean Reversion"
    }

    fn kind(&self) -> StrategyKind {
        StrategyKind::MeanReversion
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
        series.get(index + 1).unwrap_or(state.last_reference)
    }

    fn evaluate(&self, reference: Decimal, average: Decimal, state: &BacktestState) -> Signal {
        guarded_band_signal(&self.bands, reference, average, state.position)
    }

    fn first_trade_latch(&self) -> LatchMode {
        LatchMode::WriteOnce
    }
}
