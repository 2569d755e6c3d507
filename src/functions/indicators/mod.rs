pub mod momentum;
pub mod trend;
pub mod volatility;
pub mod volume;

pub use momentum::{add_rsi, RSI};
pub use trend::{add_ema_cross, add_ma_cross, add_macd, EMACross, MACross, MACD};
pub use volatility::{add_bollinger_bands, BollingerBands};
pub use volume::{add_vwap, VWAP};
