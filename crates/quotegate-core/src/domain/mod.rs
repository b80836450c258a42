mod bar;
mod exchange;
mod period;
mod quote;
mod timestamp;

pub use bar::{Bar, BarSeries};
pub use exchange::{Exchange, InstrumentListing, SecurityClass};
pub use period::{InstrumentKind, Period};
pub use quote::{IntradayCurve, MinutePoint, PriceLevel, QuoteSnapshot, TickTrade, TradeLog, TradeSide};
pub use timestamp::UtcTimestamp;
