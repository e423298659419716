use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The three backtested signal strategies
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum StrategyKind {
    MeanReversion,
    Sma,
    Bollinger,
}

impl StrategyKind {
    /// All strategies, in tie-break priority order
    pub const ALL: [StrategyKind; 3] = [
        StrategyKind::MeanReversion,
        StrategyKind::Sma,
        StrategyKind::Bollinger,
    ];

    /// Key used as the field suffix in the results book
    pub fn key(&self) -> &'static str {
        match self {
            StrategyKind::MeanReversion => "mean_reversion",
            StrategyKind::Sma => "sma",
            StrategyKind::Bollinger => "bollinger",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            StrategyKind::MeanReversion => "Mean Reversion",
            StrategyKind::Sma => "Simple Moving Average",
            StrategyKind::Bollinger => "Bollinger",
        }
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Trading signal
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Signal {
    Buy,
    Sell,
    Hold,
}

/// Binary position state: FLAT waits to buy, LONG waits to sell
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum Position {
    #[default]
    Flat,
    Long,
}

/// Final numbers for one (strategy, instrument) run
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BacktestResult {
    #[serde(with = "rust_decimal::serde::float")]
    pub total_profit: Decimal,
    pub return_percentage: String,
}

/// Advisory notice for a signal firing on the final observation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Notice {
    pub label: String,
    pub signal: Signal,
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let action = match self.signal {
            Signal::Buy => "buy",
            Signal::Sell => "sell",
            Signal::Hold => "hold",
        };
        write!(f, "You should {} this stock today: {}", action, self.label)
    }
}
