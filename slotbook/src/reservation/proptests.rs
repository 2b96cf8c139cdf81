//! Property-based tests for reservation and identifier parsing.

use super::{Reservation, ReservationId};
use crate::identity::{ItemName, Username};
use crate::SlotDate;
use chrono::NaiveDate;
use proptest::prelude::*;

// Strategy for generating raw identifiers with random case and padding
fn padded_identifier_strategy() -> impl Strategy<Value = String> {
    ("[a-zA-Z0-9_]{1,20}", 0usize..3, 0usize..3)
        .prop_map(|(core, left, right)| format!("{}{core}{}", " ".repeat(left), " ".repeat(right)))
}

// Strategy for generating calendar dates in a plausible range
fn date_strategy() -> impl Strategy<Value = NaiveDate> {
    (2000i32..2100, 1u32..=12, 1u32..=28)
        .prop_map(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d).unwrap())
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 1000,
        .. ProptestConfig::default()
    })]

    // Normalized identifiers are lowercase and trimmed
    #[test]
    fn username_normalization(raw in padded_identifier_strategy()) {
        let name: Username = raw.parse().unwrap();
        prop_assert_eq!(name.as_str(), raw.trim().to_lowercase());
    }

    // Parsing a normalized identifier again is a no-op
    #[test]
    fn item_name_idempotent(raw in padded_identifier_strategy()) {
        let once: ItemName = raw.parse().unwrap();
        let twice: ItemName = once.as_str().parse().unwrap();
        prop_assert_eq!(once, twice);
    }

    // Identifiers with inner whitespace are always rejected
    #[test]
    fn identifier_with_inner_space_rejected(a in "[a-z]{1,8}", b in "[a-z]{1,8}") {
        let raw = format!("{a} {b}");
        prop_assert!(raw.parse::<Username>().is_err());
    }

    // Both accepted date formats denote the same day
    #[test]
    fn date_formats_agree(date in date_strategy()) {
        let us: SlotDate = date.format("%m-%d-%Y").to_string().parse().unwrap();
        let iso: SlotDate = date.format("%Y-%m-%d").to_string().parse().unwrap();
        prop_assert_eq!(us, iso);
        prop_assert_eq!(us.value(), date);
    }

    // Text order of displayed dates matches calendar order
    #[test]
    fn date_display_preserves_order(a in date_strategy(), b in date_strategy()) {
        let left = SlotDate::new(a);
        let right = SlotDate::new(b);
        prop_assert_eq!(left.cmp(&right), left.to_string().cmp(&right.to_string()));
    }

    // Every positive integer is a valid reservation id
    #[test]
    fn reservation_id_positive(value in 1i64..i64::MAX) {
        let id: ReservationId = value.to_string().parse().unwrap();
        prop_assert_eq!(id.value(), value);
    }

    // A reservation involves exactly its requester and provider
    #[test]
    fn reservation_involves_only_parties(
        requester in "[a-z]{1,8}",
        provider in "[a-z]{1,8}",
        other in "[a-z]{9,12}",
    ) {
        let reservation = Reservation::builder(
            ReservationId::new(1),
            requester.parse().unwrap(),
            provider.parse().unwrap(),
            "item".parse().unwrap(),
            "2021-06-01".parse().unwrap(),
        )
        .build();

        prop_assert!(reservation.involves(&requester.parse().unwrap()));
        prop_assert!(reservation.involves(&provider.parse().unwrap()));
        prop_assert!(!reservation.involves(&other.parse().unwrap()));
    }
}
