//! Client core: reconciliation of ordered image collections, optimistic
//! favorites and catalog filter resolution.

pub mod backend;
pub mod catalog;
pub mod error;
pub mod favorites;
pub mod gallery;
pub mod logging;

pub use error::{Result, TourdeskError};
