//! Property tests for record metadata validation

use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use proptest::prelude::*;

use core_kernel::record::{ensure_date_not_future, parse_date, validate_props, CREATION_DATE, UPDATE_DATE};
use core_kernel::{RecordError, RecordProps};

const ID: &str = "a1b2c3d4-e5f6-7890-1234-567890abcdef";

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 1, 1, 10, 0, 0).unwrap()
}

proptest! {
    #[test]
    fn updated_before_created_is_always_rejected(
        created_offset in 1i64..1_000_000,
        gap in 1i64..1_000_000,
    ) {
        let created_at = now() - Duration::seconds(created_offset);
        let updated_at = created_at - Duration::seconds(gap);
        let result = validate_props(&RecordProps::new(ID, created_at, updated_at), now());

        prop_assert_eq!(result.unwrap_err(), RecordError::UpdatedBeforeCreated);
    }

    #[test]
    fn ordered_past_timestamps_are_accepted(
        created_offset in 0i64..1_000_000,
        elapsed in 0i64..1_000_000,
    ) {
        let created_at = now() - Duration::seconds(created_offset);
        let updated_at = (created_at + Duration::seconds(elapsed)).min(now());
        let meta = validate_props(&RecordProps::new(ID, created_at, updated_at), now()).unwrap();

        prop_assert!(meta.updated_at >= meta.created_at);
        prop_assert_eq!(meta.id.to_string(), ID);
    }

    #[test]
    fn future_creation_is_rejected_before_ordering(ahead in 1i64..1_000_000) {
        let created_at = now() + Duration::seconds(ahead);
        let result = validate_props(&RecordProps::new(ID, created_at, now()), now());

        prop_assert_eq!(result.unwrap_err(), RecordError::FutureDate(CREATION_DATE));
    }

    #[test]
    fn future_update_is_rejected(ahead in 1i64..1_000_000) {
        let updated_at = now() + Duration::seconds(ahead);
        let result = validate_props(&RecordProps::new(ID, now(), updated_at), now());

        prop_assert_eq!(result.unwrap_err(), RecordError::FutureDate(UPDATE_DATE));
    }

    #[test]
    fn malformed_ids_are_rejected(id in "[0-9a-f]{0,35}|[0-9a-f]{37,40}|[g-z]{36}") {
        let result = validate_props(&RecordProps::new(id, now(), now()), now());
        prop_assert_eq!(result.unwrap_err(), RecordError::InvalidId);
    }

    #[test]
    fn dates_after_today_are_future(days in 1i64..36_500) {
        let date = now().date_naive() + Duration::days(days);
        prop_assert!(ensure_date_not_future("Birth date", date, now()).is_err());
    }

    #[test]
    fn iso_dates_round_trip_through_parse(days in 0i64..50_000) {
        let date = NaiveDate::from_ymd_opt(1900, 1, 1).unwrap() + Duration::days(days);
        prop_assert_eq!(parse_date("Birth date", &date.to_string()).unwrap(), date);
    }
}

#[test]
fn today_is_not_future() {
    assert!(ensure_date_not_future("Birth date", now().date_naive(), now()).is_ok());
}

#[test]
fn unparseable_date_names_the_field() {
    let err = parse_date("Birth date", "not-a-date").unwrap_err();
    assert_eq!(err.to_string(), "Birth date must be a valid date.");
}
