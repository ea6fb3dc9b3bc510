use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("no measurement data")]
    NoMeasurements,
}

impl warp::reject::Reject for ApiError {}

pub type Result<T> = std::result::Result<T, ApiError>;
