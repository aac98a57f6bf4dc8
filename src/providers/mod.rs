pub mod alpha_vantage;
pub mod exchange_rate;

pub use alpha_vantage::AlphaVantageNewsProvider;
pub use exchange_rate::ExchangeRateApiProvider;
