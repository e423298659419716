use crate::models::{BacktestResult, Notice, Signal};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A closed trade: one sell matched to the entry price it was booked against
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TradeRecord {
    /// Step of the opening buy; `None` when a sell fired without one
    pub entry_step: Option<usize>,
    pub exit_step: usize,
    pub entry_price: Decimal,
    pub exit_price: Decimal,
    pub pnl: Decimal,
}

/// What the engine saw and decided at one step
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StepTrace {
    /// 1-based
    pub step: usize,
    pub price: Decimal,
    pub reference_price: Decimal,
    pub average: Decimal,
    pub signal: Signal,
}

/// Everything a single run produced
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BacktestRun {
    pub label: String,
    pub result: BacktestResult,
    /// Denominator used for the return percentage
    pub first_trade_price: Decimal,
    pub trades: Vec<TradeRecord>,
    pub trace: Vec<StepTrace>,
    /// Set only when the final observation fired a signal
    pub notice: Option<Notice>,
}

impl BacktestRun {
    pub fn buy_count(&self) -> usize {
        self.signal_count(Signal::Buy)
    }

    pub fn sell_count(&self) -> usize {
        self.signal_count(Signal::Sell)
    }

    fn signal_count(&self, signal: Signal) -> usize {
        self.trace.iter().filter(|s| s.signal == signal).count()
    }

    pub fn winning_trades(&self) -> usize {
        self.trades.iter().filter(|t| t.pnl > Decimal::ZERO).count()
    }

    pub fn print_report(&self, strategy_name: &str) {
        println!("\n📊 {} [{}]", self.label, strategy_name);
        println!("  Observations:      {}", self.trace.len());
        println!(
            "  Buys / Sells:      {} / {}",
            self.buy_count(),
            self.sell_count()
        );
        println!(
            "  Closed Trades:     {} ({} winning)",
            self.trades.len(),
            self.winning_trades()
        );
        println!("  Total Profit:      {}", self.result.total_profit);
        println!("  Return:            {}", self.result.return_percentage);
        if let Some(notice) = &self.notice {
            println!("  🔔 {}", notice);
        }
    }
}
