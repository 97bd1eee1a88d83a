use tripsplit_application::IdGenerator;
use uuid::Uuid;

/// Random UUID v4 ids, the format stored trips already use
pub struct UuidIdGenerator;

impl IdGenerator for UuidIdGenerator {
    fn next_id(&self) -> String {
        Uuid::new_v4().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generates_distinct_hyphenated_ids() {
        let first = UuidIdGenerator.next_id();
        let second = UuidIdGenerator.next_id();

        assert_ne!(first, second);
        assert_eq!(first.len(), 36);
        assert!(Uuid::parse_str(&first).is_ok());
    }
}
