use crate::models::Position;
use rust_decimal::Decimal;

/// How the first-trade reference price is recorded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LatchMode {
    /// Set by the first signal only
    WriteOnce,
    /// Overwritten by every latching signal. Preserved quirk: the latch
    /// flag in the SMA and Bollinger reports is never cleared, so the
    /// return percentage divides by the most recent signal price.
    ResetOnEverySignal,
}

/// Reference price for the return percentage, falling back to 1
#[derive(Debug, Clone, PartialEq)]
pub struct FirstTradePrice {
    mode: LatchMode,
    value: Option<Decimal>,
}

impl FirstTradePrice {
    pub fn new(mode: LatchMode) -> Self {
        Self { mode, value: None }
    }

    pub fn record(&mut self, price: Decimal) {
        match self.mode {
            LatchMode::WriteOnce if self.value.is_some() => {}
            _ => self.value = Some(price),
        }
    }

    /// Record only when nothing has been latched yet, whatever the mode
    pub fn record_if_unset(&mut self, price: Decimal) {
        if self.value.is_none() {
            self.value = Some(price);
        }
    }

    /// Latched price, or 1 when nothing has been recorded
    pub fn value(&self) -> Decimal {
        self.value.unwrap_or(Decimal::ONE)
    }

    pub fn is_recorded(&self) -> bool {
        self.value.is_some()
    }
}

/// Mutable state threaded through every step of one run
#[derive(Debug, Clone)]
pub struct BacktestState {
    /// 1-based count of consumed observations
    pub step: usize,
    pub position: Position,
    /// Only meaningful while LONG; keeps its last value otherwise
    pub entry_price: Decimal,
    /// Reference price of the previous step, reused when no next price exists
    pub last_reference: Decimal,
    pub realized_profit: Decimal,
    pub first_trade: FirstTradePrice,
}

impl BacktestState {
    pub fn new(mode: LatchMode) -> Self {
        Self {
            step: 0,
            position: Position::Flat,
            entry_price: Decimal::ZERO,
            last_reference: Decimal::ZERO,
            realized_profit: Decimal::ZERO,
            first_trade: FirstTradePrice::new(mode),
        }
    }

    /// Open a LONG position at `price`
    pub fn open(&mut self, price: Decimal) {
        self.entry_price = price;
        self.position = Position::Long;
        self.first_trade.record(price);
    }

    /// Close at `price` and book `price - entry_price`, returning the trade P&L
    pub fn close(&mut self, price: Decimal) -> Decimal {
        let pnl = price - self.entry_price;
        self.realized_profit += pnl;
        self.position = Position::Flat;
        pnl
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_trade_defaults_to_one() {
        let latch = FirstTradePrice::new(LatchMode::WriteOnce);
        assert!(!latch.is_recorded());
        assert_eq!(latch.value(), Decimal::ONE);
    }

    #[test]
    fn test_write_once_keeps_first() {
        let mut latch = FirstTradePrice::new(LatchMode::WriteOnce);
        latch.record(Decimal::from(50));
        latch.record(Decimal::from(80));
        assert_eq!(latch.value(), Decimal::from(50));
    }

    #[test]
    fn test_reset_mode_keeps_latest() {
        let mut latch = FirstTradePrice::new(LatchMode::ResetOnEverySignal);
        latch.record(Decimal::from(50));
        latch.record(Decimal::from(80));
        assert_eq!(latch.value(), Decimal::from(80));
    }

    #[test]
    fn test_record_if_unset_leaves_existing_value() {
        let mut latch = FirstTradePrice::new(LatchMode::ResetOnEverySignal);
        latch.record_if_unset(Decimal::from(40));
        assert_eq!(latch.value(), Decimal::from(40));

        latch.record(Decimal::from(100));
        latch.record_if_unset(Decimal::from(94));
        assert_eq!(latch.value(), Decimal::from(100));
    }

    #[test]
    fn test_open_close_books_profit() {
        let mut state = BacktestState::new(LatchMode::WriteOnce);
        state.open(Decimal::from(100));
        assert_eq!(state.position, Position::Long);

        let pnl = state.close(Decimal::from(94));
        assert_eq!(pnl, Decimal::from(-6));
        assert_eq!(state.realized_profit, Decimal::from(-6));
        assert_eq!(state.position, Position::Flat);
        assert_eq!(state.entry_price, Decimal::from(100));
    }
}
