use chrono::{Datelike, Duration, NaiveDate, Weekday};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::indicators::round_price;

/// Market scenario types for synthetic data generation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
pub enum MarketScenario {
    /// Steady uptrend with noise (+0.5% daily average)
    Uptrend,
    /// Steady downtrend with noise (-0.5% daily average)
    Downtrend,
    /// Sideways/choppy market (mean-reverting around the base price)
    Sideways,
    /// High volatility (±8% daily swings)
    Volatile,
}

/// One trading day's close
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyClose {
    pub date: NaiveDate,
    pub close: Decimal,
}

/// Generates synthetic daily closes for trying the strategies
pub struct SyntheticSeriesGenerator {
    rng: StdRng,
    base_price: f64,
    start_date: NaiveDate,
}

impl SyntheticSeriesGenerator {
    /// Create a new generator with a seed for reproducibility
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            base_price: 150.0,
            start_date: NaiveDate::from_ymd_opt(2024, 1, 2).unwrap_or_default(),
        }
    }

    /// Generate `num_days` weekday closes, oldest first
    pub fn generate(&mut self, scenario: MarketScenario, num_days: usize) -> Vec<DailyClose> {
        let dates = trading_days(self.start_date, num_days);
        let mut closes = Vec::with_capacity(num_days);
        let mut price = self.base_price;

        for date in dates {
            price = match scenario {
                MarketScenario::Uptrend => price * (1.005 + self.rng.gen_range(-0.01..0.01)),
                MarketScenario::Downtrend => price * (0.995 + self.rng.gen_range(-0.01..0.01)),
                MarketScenario::Sideways => {
                    // Pull back toward the base price
                    let reversion = (self.base_price - price) * 0.2;
                    price + reversion + price * self.rng.gen_range(-0.02..0.02)
                }
                MarketScenario::Volatile => price * (1.0 + self.rng.gen_range(-0.08..0.08)),
            };
            price = price.max(0.01);

            let close = Decimal::from_f64(price).map(round_price).unwrap_or(Decimal::ZERO);
            closes.push(DailyClose { date, close });
        }

        closes
    }

    pub fn base_price(&self) -> f64 {
        self.base_price
    }
}

/// Price lines in the same oldest-first order as the closes
pub fn to_price_lines(closes: &[DailyClose]) -> Vec<String> {
    closes.iter().map(|c| c.close.to_string()).collect()
}

fn trading_days(start: NaiveDate, count: usize) -> Vec<NaiveDate> {
    let mut days = Vec::with_capacity(count);
    let mut date = start;
    while days.len() < count {
        if !matches!(date.weekday(), Weekday::Sat | Weekday::Sun) {
            days.push(date);
        }
        date += Duration::days(1);
    }
    days
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_uptrend() {
        let mut gen = SyntheticSeriesGenerator::new(42);
        let closes = gen.generate(MarketScenario::Uptrend, 250);

        assert_eq!(closes.len(), 250);

        let first = closes.first().unwrap().close;
        let last = closes.last().unwrap().close;
        assert!(last > first, "Uptrend should end higher: {} -> {}", first, last);
    }

    #[test]
    fn test_generate_downtrend() {
        let mut gen = SyntheticSeriesGenerator::new(42);
        let closes = gen.generate(MarketScenario::Downtrend, 250);

        let first = closes.first().unwrap().close;
        let last = closes.last().unwrap().close;
        assert!(last < first, "Downtrend should end lower: {} -> {}", first, last);
    }

    #[test]
    fn test_generate_sideways_stays_near_base() {
        let mut gen = SyntheticSeriesGenerator::new(42);
        let closes = gen.generate(MarketScenario::Sideways, 250);

        let base = Decimal::from_f64(gen.base_price()).unwrap();
        let low = base * Decimal::new(85, 2);
        let high = base * Decimal::new(115, 2);
        for close in &closes {
            assert!(
                close.close > low && close.close < high,
                "Sideways should stay near base: {} vs {}",
                close.close,
                base
            );
        }
    }

    #[test]
    fn test_same_seed_same_series() {
        let a = SyntheticSeriesGenerator::new(7).generate(MarketScenario::Volatile, 50);
        let b = SyntheticSeriesGenerator::new(7).generate(MarketScenario::Volatile, 50);
        assert_eq!(a, b);
    }

    #[test]
    fn test_dates_skip_weekends() {
        let mut gen = SyntheticSeriesGenerator::new(42);
        let closes = gen.generate(MarketScenario::Sideways, 30);

        for pair in closes.windows(2) {
            assert!(pair[1].date > pair[0].date, "Dates should be sequential");
        }
        for close in &closes {
            assert!(!matches!(close.date.weekday(), Weekday::Sat | Weekday::Sun));
        }
    }

    #[test]
    fn test_price_lines_have_two_places() {
        let mut gen = SyntheticSeriesGenerator::new(42);
        let closes = gen.generate(MarketScenario::Volatile, 20);

        for line in to_price_lines(&closes) {
            let decimals = line.split('.').nth(1).map(|d| d.len()).unwrap_or(0);
            assert!(decimals <= 2, "{} has more than two decimals", line);
        }
    }
}
