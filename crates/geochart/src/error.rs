use thiserror::Error;

/// Errors raised at the parsing and validation edges of the crate.
///
/// The numerical core never fails; these only come from turning loosely
/// typed input (sign strings, chart JSON, house numbers) into typed values.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeoChartError {
    #[error("Unknown zodiac sign: {0}")]
    UnknownSign(String),
    #[error("Unknown house: {0}. Houses are numbered 1-12")]
    UnknownHouse(u8),
    #[error("Invalid chart JSON: {0}")]
    InvalidJson(String),
    #[error("Invalid chart response: {0}")]
    InvalidResponse(String),
}
