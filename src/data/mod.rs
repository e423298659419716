pub mod loader;
pub mod series;

pub use loader::{clean_price_lines, discover_price_files, load_price_file, InputOrder};
pub use series::PriceSeries;
