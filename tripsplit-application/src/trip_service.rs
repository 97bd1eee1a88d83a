use crate::{
    error::TripServiceError,
    model::{SavedTrip, TripId},
    ports::{IdGenerator, TripCodec, TripStore},
};
use tripsplit_domain::{
    ExpenseDraft, ExpenseId, ParticipantDraft, ParticipantId, SettlementReport, TaskDraft, TaskId,
    Trip,
};

/// Trip use cases shared by every host
#[derive(Clone, Copy)]
pub struct TripService<'a> {
    codec: &'a dyn TripCodec,
    store: &'a dyn TripStore,
    ids: &'a dyn IdGenerator,
}

impl<'a> TripService<'a> {
    pub fn new(
        codec: &'a dyn TripCodec,
        store: &'a dyn TripStore,
        ids: &'a dyn IdGenerator,
    ) -> Self {
        Self { codec, store, ids }
    }

    /// Decodes a trip document.
    pub fn open(&self, content: &str) -> Result<Trip, TripServiceError> {
        Ok(self.codec.decode(content)?)
    }

    pub fn open_shared(&self, token: &str) -> Result<Trip, TripServiceError> {
        Ok(self.codec.decode_share_token(token)?)
    }

    pub fn export(&self, trip: &Trip) -> Result<String, TripServiceError> {
        Ok(self.codec.encode(trip)?)
    }

    pub fn share(&self, trip: &Trip) -> Result<String, TripServiceError> {
        Ok(self.codec.encode_share_token(trip)?)
    }

    pub fn load(&self, id: &TripId) -> Result<Trip, TripServiceError> {
        match self.store.load(id)? {
            Some(trip) => {
                tracing::info!(
                    trip_id = %id,
                    participant_count = trip.participants.len(),
                    expense_count = trip.expenses.len(),
                    "Loaded trip"
                );
                Ok(trip)
            }
            None => {
                tracing::warn!(trip_id = %id, "Trip not found");
                Err(TripServiceError::TripNotFound(id.clone()))
            }
        }
    }

    /// Saves a trip under `id`, allocating a fresh id when none is given.
    pub fn save(&self, id: Option<TripId>, trip: &Trip) -> Result<SavedTrip, TripServiceError> {
        let (id, created) = match id {
            Some(id) => (id, false),
            None => (TripId::new(self.ids.next_id()), true),
        };
        self.store.save(&id, trip)?;
        tracing::info!(trip_id = %id, created, "Saved trip");
        Ok(SavedTrip { id, created })
    }

    pub fn settle(&self, trip: &Trip) -> SettlementReport {
        trip.settle()
    }

    pub fn add_participant(
        &self,
        trip: &mut Trip,
        draft: ParticipantDraft,
    ) -> Result<ParticipantId, TripServiceError> {
        let participant = trip.add_participant(ParticipantId::new(self.ids.next_id()), draft)?;
        Ok(participant.id.clone())
    }

    pub fn add_expense(
        &self,
        trip: &mut Trip,
        draft: ExpenseDraft,
    ) -> Result<ExpenseId, TripServiceError> {
        let expense = trip.add_expense(ExpenseId::new(self.ids.next_id()), draft)?;
        Ok(expense.id.clone())
    }

    pub fn add_task(&self, trip: &mut Trip, draft: TaskDraft) -> Result<TaskId, TripServiceError> {
        let task = trip.add_task(TaskId::new(self.ids.next_id()), draft)?;
        Ok(task.id.clone())
    }
}
