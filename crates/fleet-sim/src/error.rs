use fleet_dispatch::DispatchError;
use fleet_rating::RatingError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("dispatch failed: {0}")]
    Dispatch(#[from] DispatchError),

    #[error("rating failed: {0}")]
    Rating(#[from] RatingError),
}

pub type SimResult<T> = Result<T, SimError>;

#[derive(Debug, Error)]
pub enum OutputError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type OutputResult<T> = Result<T, OutputError>;
