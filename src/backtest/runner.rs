use crate::backtest::metrics::{BacktestRun, StepTrace, TradeRecord};
use crate::backtest::state::BacktestState;
use crate::data::PriceSeries;
use crate::error::BacktestError;
use crate::indicators::{format_percentage, round_price};
use crate::models::{BacktestResult, Notice, Position, Signal, StrategyKind};
use crate::strategy::{strategy_for, SignalBands, Strategy};
use crate::Result;
use rust_decimal::Decimal;

/// Replays a price series once through a strategy
#[derive(Debug, Clone, Default)]
pub struct BacktestRunner;

impl BacktestRunner {
    pub fn new() -> Self {
        Self
    }

    /// Run a backtest over raw price lines
    ///
    /// # Arguments
    /// * `strategy` - The strategy to replay
    /// * `lines` - Prices in iteration order (oldest first), `"null"` already removed
    /// * `label` - Instrument label used in notices and logs
    pub fn run<S, L>(&self, strategy: &S, lines: &[L], label: &str) -> Result<BacktestRun>
    where
        S: Strategy + ?Sized,
        L: AsRef<str>,
    {
        let series = PriceSeries::parse(lines)?;
        self.run_series(strategy, &series, label)
    }

    pub fn run_series<S>(
        &self,
        strategy: &S,
        series: &PriceSeries,
        label: &str,
    ) -> Result<BacktestRun>
    where
        S: Strategy + ?Sized,
    {
        tracing::info!(
            "Starting backtest: {} on {} ({} observations)",
            strategy.name(),
            label,
            series.len()
        );

        let window = strategy.bands().window;
        let mut state = BacktestState::new(strategy.first_trade_latch());
        let mut trades = Vec::new();
        let mut trace = Vec::with_capacity(series.len());
        let mut notice = None;
        let mut entry_step = None;

        for (index, &price) in series.prices().iter().enumerate() {
            state.step = index + 1;

            let average = series.trailing_average(index, window);
            let reference = strategy.reference_price(series, index, &state);
            state.last_reference = reference;

            let signal = strategy.evaluate(reference, average, &state);
            match signal {
                Signal::Buy => {
                    state.open(reference);
                    entry_step = Some(state.step);
                    tracing::debug!(
                        "{} step {}: BUY @ {} (avg {})",
                        label,
                        state.step,
                        reference,
                        average
                    );
                }
                Signal::Sell => {
                    let entry_price = state.entry_price;
                    let pnl = state.close(reference);
                    if strategy.latches_on_sell() {
                        state.first_trade.record_if_unset(reference);
                    }
                    trades.push(TradeRecord {
                        entry_step: entry_step.take(),
                        exit_step: state.step,
                        entry_price,
                        exit_price: reference,
                        pnl,
                    });
                    tracing::debug!(
                        "{} step {}: SELL @ {} (avg {}), pnl {}",
                        label,
                        state.step,
                        reference,
                        average,
                        pnl
                    );
                }
                Signal::Hold => {}
            }

            if signal != Signal::Hold && series.is_last(index) {
                let today = Notice {
                    label: label.to_string(),
                    signal,
                };
                tracing::info!("{}", today);
                notice = Some(today);
            }

            trace.push(StepTrace {
                step: state.step,
                price,
                reference_price: reference,
                average,
                signal,
            });
        }

        if state.position == Position::Long {
            tracing::debug!("{} ends with an open position from {}", label, state.entry_price);
        }

        let first_trade_price = state.first_trade.value();
        let return_pct = state
            .realized_profit
            .checked_div(first_trade_price)
            .ok_or(BacktestError::ZeroReferencePrice)?
            * Decimal::ONE_HUNDRED;

        let result = BacktestResult {
            total_profit: round_price(state.realized_profit),
            return_percentage: format_percentage(return_pct),
        };

        tracing::info!(
            "Backtest complete: {} on {}: {} trades, profit {} ({})",
            strategy.name(),
            label,
            trades.len(),
            result.total_profit,
            result.return_percentage
        );

        Ok(BacktestRun {
            label: label.to_string(),
            result,
            first_trade_price,
            trades,
            trace,
            notice,
        })
    }
}

/// Run one strategy with the default bands and return only the numeric result
pub fn run_strategy<L: AsRef<str>>(
    kind: StrategyKind,
    lines: &[L],
    label: &str,
) -> Result<BacktestResult> {
    let strategy = strategy_for(kind, SignalBands::default());
    let run = BacktestRunner::new().run(strategy.as_ref(), lines, label)?;
    Ok(run.result)
}
