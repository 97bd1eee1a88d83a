#![warn(clippy::uninlined_format_args)]

pub mod error;
pub mod model;
pub mod ports;
pub mod trip_service;

pub use error::{CodecError, StoreError, TripServiceError};
pub use model::{SavedTrip, TripId};
pub use ports::{IdGenerator, TripCodec, TripStore};
pub use trip_service::TripService;
