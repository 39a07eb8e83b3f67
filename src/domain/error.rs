// Domain errors raised while reading technician input
use thiserror::Error;

/// Which group of form fields failed to parse.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Please enter both the manometer (mmH₂O) and device (kPa) pressures as numbers.")]
    Pressure,

    #[error("Offset values must be entered as numbers.")]
    Offset,
}

pub type ParseResult<T> = Result<T, ParseError>;
