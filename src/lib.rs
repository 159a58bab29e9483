/// Tourdesk - tour storefront client core
///
/// Image-collection reconciliation for the admin tour editor, optimistic
/// favorites, and catalog filter resolution, on top of a REST backend.

pub mod api;
pub mod config;
pub mod core;

#[cfg(test)]
mod tests;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
