//! Port implementations.

pub mod memory;
