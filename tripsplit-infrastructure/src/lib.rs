#![warn(clippy::uninlined_format_args)]

pub mod file_store;
pub mod id_generator;
pub mod json_codec;
mod records;

pub use file_store::JsonFileTripStore;
pub use id_generator::UuidIdGenerator;
pub use json_codec::JsonTripCodec;
