//! Command implementations.

pub mod info;
pub mod permissions;
pub mod scan;
