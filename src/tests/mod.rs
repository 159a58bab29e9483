//! Crate-internal test suites.
//!
//! - `unit`: scenario tests for the planner, session, favorites and filters
//! - `property`: proptest invariants for reconciliation and sorting
//! - `integration`: the HTTP client against wiremock

mod common;
mod integration;
mod property;
mod unit;
