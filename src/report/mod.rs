use crate::error::BacktestError;
use crate::models::{BacktestResult, StrategyKind};
use crate::Result;
use rust_decimal::Decimal;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Pick the most profitable strategy, ties going to mean reversion, then SMA
pub fn best_strategy(mean_reversion: Decimal, sma: Decimal, bollinger: Decimal) -> StrategyKind {
    if mean_reversion >= sma && mean_reversion >= bollinger {
        StrategyKind::MeanReversion
    } else if sma >= bollinger {
        StrategyKind::Sma
    } else {
        StrategyKind::Bollinger
    }
}

/// Aggregate results keyed by ticker and strategy
#[derive(Debug, Clone, Default)]
pub struct ResultsBook {
    entries: BTreeMap<String, BTreeMap<StrategyKind, BacktestResult>>,
}

impl ResultsBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, ticker: &str, kind: StrategyKind, result: BacktestResult) {
        self.entries
            .entry(ticker.to_string())
            .or_default()
            .insert(kind, result);
    }

    pub fn get(&self, ticker: &str, kind: StrategyKind) -> Option<&BacktestResult> {
        self.entries.get(ticker).and_then(|results| results.get(&kind))
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Best strategy for a ticker, only once all three have a result
    pub fn best_for(&self, ticker: &str) -> Option<StrategyKind> {
        let results = self.entries.get(ticker)?;
        let profit = |kind: StrategyKind| results.get(&kind).map(|r| r.total_profit);

        Some(best_strategy(
            profit(StrategyKind::MeanReversion)?,
            profit(StrategyKind::Sma)?,
            profit(StrategyKind::Bollinger)?,
        ))
    }

    /// Flat JSON object of `{ticker}_{kind}_profit`, `{ticker}_{kind}_returns`
    /// and `{ticker}_best_strategy` keys
    pub fn to_json(&self) -> Result<Value> {
        let mut map = Map::new();
        for (ticker, results) in &self.entries {
            for (kind, result) in results {
                let fields = serde_json::to_value(result)?;
                map.insert(
                    format!("{}_{}_profit", ticker, kind.key()),
                    fields["total_profit"].clone(),
                );
                map.insert(
                    format!("{}_{}_returns", ticker, kind.key()),
                    fields["return_percentage"].clone(),
                );
            }
            if let Some(best) = self.best_for(ticker) {
                map.insert(
                    format!("{}_best_strategy", ticker),
                    Value::String(best.key().to_string()),
                );
            }
        }
        Ok(Value::Object(map))
    }

    pub fn write_to(&self, path: &Path) -> Result<()> {
        let file = File::create(path).map_err(|source| BacktestError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, &self.to_json()?)?;
        writer.flush().map_err(|source| BacktestError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        tracing::info!("Wrote results for {} tickers to {}", self.entries.len(), path.display());
        Ok(())
    }
}
