pub mod metrics;
pub mod runner;
pub mod state;
pub mod synthetic;

pub use metrics::{BacktestRun, StepTrace, TradeRecord};
pub use runner::{run_strategy, BacktestRunner};
pub use state::{BacktestState, FirstTradePrice, LatchMode};
pub use synthetic::{to_price_lines, DailyClose, MarketScenario, SyntheticSeriesGenerator};
