mod demo;
mod feed;
mod instrument;

pub use demo::DemoMarket;
pub use feed::{QuoteSource, load_snapshot, spawn_feed};
pub use instrument::{Instrument, InstrumentError};
