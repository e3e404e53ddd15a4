use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum HeadingError {
    /// Manual entry was not a whole number in 0..=359.
    #[error("invalid heading input {0:?}, expected a whole number from 0 to 359")]
    InvalidHeadingInput(String),
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ExploreError {
    #[error("no position fix available")]
    PositionUnavailable,
    #[error("invalid explore settings: {0}")]
    InvalidSettings(String),
}
