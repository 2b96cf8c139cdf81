//! Property-based tests for the booking operations.
//!
//! Random sequences of provisioning, publishing, booking and cancelling are
//! applied to a fresh database; after every step the ledgers must agree.

use std::collections::HashSet;

use proptest::prelude::*;

use crate::database::test_util::create_test_database;
use crate::database::Database;
use crate::identity::Caller;
use crate::reservation::ReservationId;
use crate::SlotDate;

use super::{RetryPolicy, Scheduler};

const PROVIDERS: [&str; 3] = ["dr_a", "dr_b", "dr_c"];
const REQUESTERS: [&str; 3] = ["alice", "bob", "carol"];
const ITEMS: [&str; 2] = ["pfizer", "moderna"];
const DATES: [&str; 2] = ["2021-06-01", "2021-06-02"];

#[derive(Debug, Clone)]
enum Step {
    Publish { provider: usize, date: usize },
    Provision { item: usize, count: u32 },
    Book { requester: usize, date: usize, item: usize },
    Cancel { requester: usize, id: i64 },
}

fn step_strategy() -> impl Strategy<Value = Step> {
    prop_oneof![
        (0..PROVIDERS.len(), 0..DATES.len())
            .prop_map(|(provider, date)| Step::Publish { provider, date }),
        (0..ITEMS.len(), 1u32..4).prop_map(|(item, count)| Step::Provision { item, count }),
        (0..REQUESTERS.len(), 0..DATES.len(), 0..ITEMS.len())
            .prop_map(|(requester, date, item)| Step::Book { requester, date, item }),
        (0..REQUESTERS.len(), 1i64..8).prop_map(|(requester, id)| Step::Cancel { requester, id }),
    ]
}

fn date(index: usize) -> SlotDate {
    DATES[index].parse().unwrap()
}

fn apply(scheduler: &mut Scheduler, step: &Step) {
    // Rejections are expected; only the resulting state is checked.
    let _ = match *step {
        Step::Publish { provider, date: d } => scheduler
            .upload_availability(&Caller::provider(PROVIDERS[provider].parse().unwrap()), date(d)),
        Step::Provision { item, count } => scheduler
            .add_doses(
                &Caller::provider(PROVIDERS[0].parse().unwrap()),
                &ITEMS[item].parse().unwrap(),
                count,
            )
            .map(|_| ()),
        Step::Book { requester, date: d, item } => scheduler
            .book(
                &Caller::requester(REQUESTERS[requester].parse().unwrap()),
                date(d),
                ITEMS[item].parse().unwrap(),
            )
            .map(|_| ()),
        Step::Cancel { requester, id } => scheduler
            .cancel(
                &Caller::requester(REQUESTERS[requester].parse().unwrap()),
                ReservationId::new(id),
            )
            .map(|_| ()),
    };
}

/// Every booked (provider, date) is absent from the pool and unique.
fn check_ledgers(db: &Database) -> Result<(), TestCaseError> {
    let conn = db.connection();
    let reservations = Database::list_all_reservations(conn).unwrap();

    let mut booked = HashSet::new();
    for reservation in &reservations {
        let key = (reservation.provider().clone(), reservation.date());
        prop_assert!(booked.insert(key), "slot booked twice: {reservation:?}");

        let open = Database::list_providers(conn, reservation.date()).unwrap();
        prop_assert!(!open.contains(reservation.provider()));
    }
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 200,
        .. ProptestConfig::default()
    })]

    #[test]
    fn ledgers_stay_consistent(steps in prop::collection::vec(step_strategy(), 1..40)) {
        let mut scheduler = Scheduler::with_policy(create_test_database(), RetryPolicy::no_retry());

        let mut provisioned = [0u32; ITEMS.len()];
        for step in &steps {
            let before = Database::list_all_reservations(scheduler.database().connection())
                .unwrap()
                .len();
            apply(&mut scheduler, step);
            if let Step::Provision { item, count } = *step {
                provisioned[item] += count;
            }
            check_ledgers(scheduler.database())?;

            let after = Database::list_all_reservations(scheduler.database().connection())
                .unwrap()
                .len();
            prop_assert!(after.abs_diff(before) <= 1);
        }

        // Doses are conserved: what is in stock plus what is reserved equals
        // what was provisioned.
        let conn = scheduler.database().connection();
        let reservations = Database::list_all_reservations(conn).unwrap();
        for (index, name) in ITEMS.iter().enumerate() {
            let item = name.parse().unwrap();
            let in_stock = Database::find_doses(conn, &item).unwrap().unwrap_or(0);
            let reserved = reservations.iter().filter(|r| *r.item() == item).count();
            prop_assert_eq!(in_stock as usize + reserved, provisioned[index] as usize);
        }
    }

    #[test]
    fn book_then_cancel_restores_state(pool in 1usize..=3, stock in 1u32..5) {
        let mut scheduler = Scheduler::with_policy(create_test_database(), RetryPolicy::no_retry());
        let d = date(0);
        for provider in &PROVIDERS[..pool] {
            scheduler.upload_availability(&Caller::provider(provider.parse().unwrap()), d).unwrap();
        }
        let caregiver = Caller::provider(PROVIDERS[0].parse().unwrap());
        scheduler.add_doses(&caregiver, &"pfizer".parse().unwrap(), stock).unwrap();

        let before = scheduler.search_schedule(d).unwrap();
        let patient = Caller::requester("alice".parse().unwrap());
        let booking = scheduler.book(&patient, d, "pfizer".parse().unwrap()).unwrap();
        prop_assert_eq!(&booking.provider, &before.providers[0]);

        scheduler.cancel(&patient, booking.reservation_id).unwrap();
        prop_assert_eq!(scheduler.search_schedule(d).unwrap(), before);
    }
}
