pub mod candle_series;
pub mod market_data;
pub mod signal_log;

pub use candle_series::{CandleSeries, MAX_CAPACITY};
pub use market_data::MarketDataStore;
pub use signal_log::SignalLog;
