use crate::{
    error::{CodecError, StoreError},
    model::TripId,
};
use tripsplit_domain::Trip;

/// Converts trips to and from their stored and shared text forms.
pub trait TripCodec: Send + Sync {
    fn decode(&self, content: &str) -> Result<Trip, CodecError>;

    fn encode(&self, trip: &Trip) -> Result<String, CodecError>;

    fn decode_share_token(&self, token: &str) -> Result<Trip, CodecError>;

    fn encode_share_token(&self, trip: &Trip) -> Result<String, CodecError>;
}

/// Last-write-wins trip storage.
pub trait TripStore: Send + Sync {
    fn load(&self, id: &TripId) -> Result<Option<Trip>, StoreError>;

    fn save(&self, id: &TripId, trip: &Trip) -> Result<(), StoreError>;
}

pub trait IdGenerator: Send + Sync {
    fn next_id(&self) -> String;
}
