//! HTTP implementation of the backend seams.

pub mod client;

pub use client::ApiClient;
