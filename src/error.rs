use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BacktestError {
    /// A price entry is not a decimal number; fatal for that ticker's run
    #[error("invalid price {value:?} at position {position}")]
    Parse { position: usize, value: String },

    /// The first-trade price latched at exactly zero
    ///
    /// Only negative closes can produce this: with non-negative prices a buy
    /// needs a price above a non-negative band, and a sell before any buy
    /// needs a positive average, whose first positive close already bought.
    #[error("first trade price is zero, return percentage is undefined")]
    ZeroReferencePrice,

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize results: {0}")]
    Json(#[from] serde_json::Error),
}
