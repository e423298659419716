use crate::error::BacktestError;
use crate::indicators::{round_price, trailing_average};
use crate::Result;
use rust_decimal::Decimal;
use std::str::FromStr;

/// Ordered closing prices for one instrument, oldest first, rounded to 2 places
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PriceSeries {
    prices: Vec<Decimal>,
}

impl PriceSeries {
    /// Parse raw price lines in iteration order
    ///
    /// Any entry that is not a decimal number fails the whole series; the
    /// `"null"` sentinel must already have been dropped by
    /// [`clean_price_lines`](crate::data::clean_price_lines).
    pub fn parse<S: AsRef<str>>(lines: &[S]) -> Result<Self> {
        let prices = lines
            .iter()
            .enumerate()
            .map(|(i, line)| parse_price(line.as_ref(), i + 1))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { prices })
    }

    pub fn len(&self) -> usize {
        self.prices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }

    /// Price at a 0-based index
    pub fn get(&self, index: usize) -> Option<Decimal> {
        self.prices.get(index).copied()
    }

    pub fn prices(&self) -> &[Decimal] {
        &self.prices
    }

    /// Trailing average as of `index`, zero during the cold start
    pub fn trailing_average(&self, index: usize, window: usize) -> Decimal {
        trailing_average(&self.prices, index, window)
    }

    pub fn is_last(&self, index: usize) -> bool {
        index + 1 == self.prices.len()
    }
}

fn parse_price(raw: &str, position: usize) -> Result<Decimal> {
    let trimmed = raw.trim();
    let value = Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .map_err(|_| BacktestError::Parse {
            position,
            value: raw.to_string(),
        })?;

    Ok(round_price(value))
}
