use crate::json_codec::JsonTripCodec;
use std::{
    fs, io,
    path::{Path, PathBuf},
};
use tripsplit_application::{StoreError, TripCodec, TripId, TripStore};
use tripsplit_domain::Trip;

/// One document per trip, stored as `<dir>/<id>.json`.
pub struct JsonFileTripStore<C = JsonTripCodec> {
    dir: PathBuf,
    codec: C,
}

impl<C> JsonFileTripStore<C> {
    /// The directory is created on first save.
    pub fn new(dir: impl Into<PathBuf>, codec: C) -> Self {
        Self {
            dir: dir.into(),
            codec,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, id: &TripId) -> Result<PathBuf, StoreError> {
        let raw = id.as_str();
        let valid = !raw.is_empty()
            && raw != "."
            && raw != ".."
            && !raw.contains(['/', '\\'])
            && !raw.contains("..");
        if !valid {
            return Err(StoreError::InvalidId(id.clone()));
        }
        Ok(self.dir.join(format!("{raw}.json")))
    }
}

impl<C: TripCodec> TripStore for JsonFileTripStore<C> {
    fn load(&self, id: &TripId) -> Result<Option<Trip>, StoreError> {
        let path = self.path_for(id)?;
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "No stored trip");
                return Ok(None);
            }
            Err(source) => {
                return Err(StoreError::Io {
                    id: id.clone(),
                    source,
                });
            }
        };

        let trip = self.codec.decode(&content).map_err(|source| {
            tracing::error!(path = %path.display(), error = %source, "Stored trip is unreadable");
            StoreError::Corrupted {
                id: id.clone(),
                source,
            }
        })?;
        Ok(Some(trip))
    }

    fn save(&self, id: &TripId, trip: &Trip) -> Result<(), StoreError> {
        let path = self.path_for(id)?;
        let content = self.codec.encode(trip).map_err(|source| StoreError::Encode {
            id: id.clone(),
            source,
        })?;
        let io_error = |source: io::Error| StoreError::Io {
            id: id.clone(),
            source,
        };

        fs::create_dir_all(&self.dir).map_err(io_error)?;
        fs::write(&path, content).map_err(io_error)?;
        tracing::debug!(path = %path.display(), "Wrote trip document");
        Ok(())
    }
}
