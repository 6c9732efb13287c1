pub mod duration;
pub mod filters;
pub mod iata;
pub mod normalize;
pub mod search;
pub mod supplier;

pub use supplier::FlightProvider;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Authentication with provider failed: {0}")]
    Authentication(String),
    #[error("Provider returned {status}: {payload}")]
    Provider { status: u16, payload: String },
    #[error("Provider request failed: {0}")]
    Transport(String),
    #[error("Unexpected provider response: {0}")]
    Decode(String),
    #[error("Validation failed: {0}")]
    Validation(String),
    #[error("Parse error: {0}")]
    Parse(String),
}

pub type CoreResult<T> = Result<T, CoreError>;
