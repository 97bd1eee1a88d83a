use rstest::{fixture, rstest};
use std::{
    collections::HashMap,
    sync::{
        Mutex,
        atomic::{AtomicU64, Ordering},
    },
};
use tripsplit_application::{
    CodecError, IdGenerator, StoreError, TripCodec, TripId, TripService, TripServiceError,
    TripStore,
};
use tripsplit_domain::{
    ExpenseCategory, ExpenseDraft, Money, ParticipantDraft, TaskDraft, TaskType, Trip,
    TripEditError,
};

struct NamedCodec;

impl TripCodec for NamedCodec {
    fn decode(&self, content: &str) -> Result<Trip, CodecError> {
        content
            .parse::<u32>()
            .map(Trip::new)
            .map_err(|err| CodecError::InvalidDocument(err.to_string()))
    }

    fn encode(&self, trip: &Trip) -> Result<String, CodecError> {
        Ok(trip.trip_duration.to_string())
    }

    fn decode_share_token(&self, token: &str) -> Result<Trip, CodecError> {
        let content = token
            .strip_prefix("share:")
            .ok_or_else(|| CodecError::InvalidShareToken(token.to_owned()))?;
        self.decode(content)
    }

    fn encode_share_token(&self, trip: &Trip) -> Result<String, CodecError> {
        Ok(format!("share:{}", self.encode(trip)?))
    }
}

#[derive(Default)]
struct MemoryStore {
    trips: Mutex<HashMap<TripId, Trip>>,
}

impl TripStore for MemoryStore {
    fn load(&self, id: &TripId) -> Result<Option<Trip>, StoreError> {
        let trips = self.trips.lock().expect("store lock");
        Ok(trips.get(id).cloned())
    }

    fn save(&self, id: &TripId, trip: &Trip) -> Result<(), StoreError> {
        let mut trips = self.trips.lock().expect("store lock");
        trips.insert(id.clone(), trip.clone());
        Ok(())
    }
}

#[derive(Default)]
struct SequentialIds(AtomicU64);

impl IdGenerator for SequentialIds {
    fn next_id(&self) -> String {
        format!("id-{}", self.0.fetch_add(1, Ordering::Relaxed) + 1)
    }
}

static CODEC: NamedCodec = NamedCodec;

#[fixture]
fn store() -> MemoryStore {
    MemoryStore::default()
}

#[fixture]
fn ids() -> SequentialIds {
    SequentialIds::default()
}

fn participant(name: &str, stay_days: Option<u32>) -> ParticipantDraft {
    ParticipantDraft {
        name: name.to_owned(),
        stay_days,
        ..ParticipantDraft::default()
    }
}

#[rstest]
fn builds_and_settles_trip_with_generated_ids(store: MemoryStore, ids: SequentialIds) {
    let service = TripService::new(&CODEC, &store, &ids);
    let mut trip = Trip::new(3);

    let ana = service
        .add_participant(&mut trip, participant("Ana", None))
        .expect("add ana");
    let bia = service
        .add_participant(&mut trip, participant("Bia", Some(1)))
        .expect("add bia");
    let expense = service
        .add_expense(
            &mut trip,
            ExpenseDraft {
                name: "Casa".to_owned(),
                amount: Money::from_i64(100),
                category: ExpenseCategory::Accommodation,
                participant_ids: vec![ana.clone(), bia.clone()],
            },
        )
        .expect("add expense");
    let task = service
        .add_task(
            &mut trip,
            TaskDraft {
                name: String::new(),
                task_type: TaskType::Cooking,
                participant_id: bia.clone(),
            },
        )
        .expect("add task");

    assert_eq!(ana.as_str(), "id-1");
    assert_eq!(bia.as_str(), "id-2");
    assert_eq!(expense.as_str(), "id-3");
    assert_eq!(task.as_str(), "id-4");

    let report = service.settle(&trip);
    assert_eq!(
        report.result_for(&ana).map(|r| r.raw_share),
        Some(Money::from_i64(75))
    );
    assert_eq!(
        report.result_for(&bia).map(|r| r.raw_share),
        Some(Money::from_i64(25))
    );
}

#[rstest]
fn save_allocates_id_once_and_overwrites(store: MemoryStore, ids: SequentialIds) {
    let service = TripService::new(&CODEC, &store, &ids);

    let first = service.save(None, &Trip::new(3)).expect("first save");
    assert!(first.created);

    let second = service
        .save(Some(first.id.clone()), &Trip::new(5))
        .expect("second save");
    assert!(!second.created);
    assert_eq!(second.id, first.id);

    let loaded = service.load(&first.id).expect("load");
    assert_eq!(loaded.trip_duration, 5);
}

#[rstest]
fn load_reports_missing_trip(store: MemoryStore, ids: SequentialIds) {
    let service = TripService::new(&CODEC, &store, &ids);

    let err = service.load(&TripId::from("nope")).expect_err("missing trip");

    assert!(matches!(err, TripServiceError::TripNotFound(id) if id.as_str() == "nope"));
}

#[rstest]
fn edit_errors_are_propagated(store: MemoryStore, ids: SequentialIds) {
    let service = TripService::new(&CODEC, &store, &ids);
    let mut trip = Trip::default();

    let err = service
        .add_participant(&mut trip, participant("   ", None))
        .expect_err("blank name");

    assert!(matches!(err, TripServiceError::Edit(TripEditError::BlankName)));
    assert!(trip.participants.is_empty());
}

#[rstest]
fn share_tokens_go_through_codec(store: MemoryStore, ids: SequentialIds) {
    let service = TripService::new(&CODEC, &store, &ids);

    let token = service.share(&Trip::new(6)).expect("share");
    assert_eq!(token, "share:6");
    assert_eq!(
        service.open_shared(&token).map(|trip| trip.trip_duration).ok(),
        Some(6)
    );

    let err = service.open_shared("garbage").expect_err("bad token");
    assert!(matches!(
        err,
        TripServiceError::Codec(CodecError::InvalidShareToken(_))
    ));
}
