//! Shared utilities for the kmap-rs CLI

pub mod format;
pub mod table;

pub use format::*;
pub use table::*;
