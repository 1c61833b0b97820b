use chrono::{DateTime, Duration, SubsecRound, Utc};
use uuid::Uuid;

pub type Id = String;

pub type Timestamp = DateTime<Utc>;

pub fn generate_id() -> Id {
    Uuid::new_v4().to_string()
}

/// True when `value` is a hyphenated or simple UUID string.
pub fn is_valid_id(value: &str) -> bool {
    Uuid::parse_str(value).is_ok()
}

/// Current time truncated to the microsecond precision PostgreSQL stores.
pub fn now() -> Timestamp {
    Utc::now().trunc_subsecs(6)
}

/// Next `updatedAt` value for a row last touched at `previous`: `candidate`,
/// unless that would not move past `previous`.
///
/// Always strictly greater than `previous`, even when the wall clock has not
/// advanced a full microsecond or has stepped backwards.
pub fn bump_timestamp(previous: Timestamp, candidate: Timestamp) -> Timestamp {
    candidate.max(previous + Duration::microseconds(1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_ids_are_valid_and_unique() {
        let a = generate_id();
        let b = generate_id();
        assert!(is_valid_id(&a));
        assert!(is_valid_id(&b));
        assert_ne!(a, b);
    }

    #[test]
    fn test_is_valid_id_rejects_garbage() {
        assert!(is_valid_id("00000000-0000-0000-0000-000000000000"));
        assert!(!is_valid_id("not-a-uuid"));
        assert!(!is_valid_id(""));
    }

    #[test]
    fn test_bump_timestamp_is_strictly_increasing() {
        let far_future = now() + Duration::hours(1);
        let bumped = bump_timestamp(far_future, now());
        assert_eq!(bumped - far_future, Duration::microseconds(1));

        let past = now() - Duration::seconds(5);
        assert!(bump_timestamp(past, now()) > past);
    }

    #[test]
    fn test_bump_timestamp_never_goes_backwards() {
        let previous = now();
        let stale = previous - Duration::milliseconds(5);
        assert_eq!(
            bump_timestamp(previous, stale),
            previous + Duration::microseconds(1)
        );

        let fresh = previous + Duration::milliseconds(5);
        assert_eq!(bump_timestamp(previous, fresh), fresh);
    }

    #[test]
    fn test_now_has_microsecond_precision() {
        let ts = now();
        assert_eq!(ts.timestamp_subsec_nanos() % 1_000, 0);
    }
}
