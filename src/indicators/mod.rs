// Price indicators and numeric formatting shared by every strategy

pub mod moving_average;
pub mod rounding;

pub use moving_average::trailing_average;
pub use rounding::{format_percentage, round_price};
