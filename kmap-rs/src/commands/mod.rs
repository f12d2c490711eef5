//! Command implementations

pub mod map;
