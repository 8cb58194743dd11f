//! Prefix-based cleanup of Unreal Engine asset folders.
//!
//! The engine is split into a scanner that turns a root directory and a set
//! of selected name prefixes into a [`model::ScanResult`], and a cleaner that
//! removes those files one by one while reporting progress to a
//! [`cleaner::DeleteObserver`].

pub mod allowlist;
pub mod catalog;
pub mod cleaner;
pub mod constants;
pub mod error;
pub mod logging;
pub mod model;
pub mod preferences;
pub mod scanner;
pub mod selection;

pub use error::CleanupError;
