//! testscan: a test declaration scanner and identifier synchronizer.
//!
//! The crate walks JavaScript/TypeScript sources, recognizes test and suite
//! declarations for several framework idioms, aggregates them into a
//! normalized [`inventory::Inventory`], and can rewrite the scanned files to
//! embed or remove opaque registry identifiers (`@S`/`@T` tokens).

pub use crate::errors::{print_report, Result, ScanError};

pub mod analyzer;
pub mod cli;
pub mod errors;
pub mod frameworks;
pub mod inventory;
pub mod registry;
pub mod render;
pub mod sync;
pub mod syntax;
