use crate::records::TripRecord;
use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use tripsplit_application::{CodecError, TripCodec};
use tripsplit_domain::{DEFAULT_TRIP_DURATION, Trip};

/// JSON trip documents, shared as URL-safe base64 of the compact form.
#[derive(Clone, Copy, Debug)]
pub struct JsonTripCodec {
    default_trip_duration: u32,
}

impl JsonTripCodec {
    /// `default_trip_duration` fills in documents without a usable `tripDuration`.
    pub fn new(default_trip_duration: u32) -> Self {
        Self {
            default_trip_duration,
        }
    }

    fn parse(&self, content: &str) -> Result<Trip, String> {
        let record: TripRecord = serde_json::from_str(content).map_err(|err| err.to_string())?;
        let trip = record.into_trip(self.default_trip_duration);
        trip.validate_amounts().map_err(|err| err.to_string())?;
        Ok(trip)
    }
}

impl Default for JsonTripCodec {
    fn default() -> Self {
        Self::new(DEFAULT_TRIP_DURATION)
    }
}

impl TripCodec for JsonTripCodec {
    fn decode(&self, content: &str) -> Result<Trip, CodecError> {
        self.parse(content).map_err(CodecError::InvalidDocument)
    }

    fn encode(&self, trip: &Trip) -> Result<String, CodecError> {
        serde_json::to_string_pretty(&TripRecord::from_trip(trip))
            .map_err(|err| CodecError::Encode(err.to_string()))
    }

    fn decode_share_token(&self, token: &str) -> Result<Trip, CodecError> {
        let bytes = URL_SAFE_NO_PAD
            .decode(token.trim())
            .map_err(|err| CodecError::InvalidShareToken(err.to_string()))?;
        let content = String::from_utf8(bytes)
            .map_err(|err| CodecError::InvalidShareToken(err.to_string()))?;
        self.parse(&content).map_err(|err| {
            tracing::debug!(error = %err, "Share token carries an unreadable trip");
            CodecError::InvalidShareToken(err)
        })
    }

    fn encode_share_token(&self, trip: &Trip) -> Result<String, CodecError> {
        let content = serde_json::to_string(&TripRecord::from_trip(trip))
            .map_err(|err| CodecError::Encode(err.to_string()))?;
        Ok(URL_SAFE_NO_PAD.encode(content))
    }
}
