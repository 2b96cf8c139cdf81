//! Common test utilities for integration tests.
//!
//! This module provides a shared on-disk store and seeding helpers for
//! testing the slotbook library.

pub mod database;

use slotbook::{Caller, ItemName, SlotDate, Username};

/// Parses a provider or requester name.
#[allow(dead_code)]
pub fn user(name: &str) -> Username {
    name.parse().unwrap()
}

/// Parses an item name.
#[allow(dead_code)]
pub fn item(name: &str) -> ItemName {
    name.parse().unwrap()
}

/// Parses a date in either accepted format.
#[allow(dead_code)]
pub fn date(raw: &str) -> SlotDate {
    raw.parse().unwrap()
}

/// A requester caller.
#[allow(dead_code)]
pub fn patient(name: &str) -> Caller {
    Caller::requester(user(name))
}

/// A provider caller.
#[allow(dead_code)]
pub fn caregiver(name: &str) -> Caller {
    Caller::provider(user(name))
}
