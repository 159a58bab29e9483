//! Shared fixtures for the test suites.

#![allow(dead_code)]
