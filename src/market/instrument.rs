use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Instrument {
    pub symbol: String,
    #[serde(alias = "name", default)]
    pub display_name: String,
    pub price: f64,
    pub percent_change: f64,
}

#[derive(Debug, Error, PartialEq)]
pub enum InstrumentError {
    #[error("instrument record has an empty symbol")]
    EmptySymbol,

    #[error("{symbol}: {field} is not a finite number")]
    NonFinite { symbol: String, field: &'static str },
}

impl Instrument {
    pub fn new(
        symbol: impl Into<String>,
        display_name: impl Into<String>,
        price: f64,
        percent_change: f64,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            display_name: display_name.into(),
            price,
            percent_change,
        }
    }

    /// Rejects records that would poison bubble state with NaN or an unusable key.
    pub fn validate(&self) -> Result<(), InstrumentError> {
        if self.symbol.trim().is_empty() {
            return Err(InstrumentError::EmptySymbol);
        }

        if !self.price.is_finite() {
            return Err(InstrumentError::NonFinite {
                symbol: self.symbol.clone(),
                field: "price",
            });
        }

        if !self.percent_change.is_finite() {
            return Err(InstrumentError::NonFinite {
                symbol: self.symbol.clone(),
                field: "percentChange",
            });
        }

        Ok(())
    }
}
