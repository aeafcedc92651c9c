use foundation::math::CoordinateError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ContentError {
    #[error("location {name:?}: {source}")]
    InvalidCoordinate {
        name: String,
        #[source]
        source: CoordinateError,
    },

    #[error("duplicate location name {0:?}")]
    DuplicateLocation(String),

    #[error("location at position {0} has an empty name")]
    EmptyName(usize),

    #[error("content document is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ContentError>;
