use crate::model::TripId;
use tripsplit_domain::TripEditError;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CodecError {
    #[error("invalid trip document: {0}")]
    InvalidDocument(String),
    #[error("invalid share token: {0}")]
    InvalidShareToken(String),
    #[error("failed to encode trip: {0}")]
    Encode(String),
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("failed to access trip '{id}': {source}")]
    Io {
        id: TripId,
        #[source]
        source: std::io::Error,
    },
    #[error("stored trip '{id}' is unreadable: {source}")]
    Corrupted {
        id: TripId,
        #[source]
        source: CodecError,
    },
    #[error("failed to encode trip '{id}': {source}")]
    Encode {
        id: TripId,
        #[source]
        source: CodecError,
    },
    #[error("invalid trip id '{0}'")]
    InvalidId(TripId),
}

#[derive(Debug, thiserror::Error)]
pub enum TripServiceError {
    #[error(transparent)]
    Edit(#[from] TripEditError),
    #[error(transparent)]
    Codec(#[from] CodecError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("trip '{0}' not found")]
    TripNotFound(TripId),
}
