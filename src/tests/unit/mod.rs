//! Scenario tests across the core modules.

mod filter_precedence_tests;
mod reconciliation_tests;
