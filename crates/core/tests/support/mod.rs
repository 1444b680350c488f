//! Shared test helpers for `gradebook-core` integration tests.
//!
//! In-memory mocks for every core port so controller tests can script
//! service responses and count requests.

#![allow(dead_code)]

pub mod mocks;
