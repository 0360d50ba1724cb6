//! Application layer: command handlers wiring the domain to the ports.

pub mod handlers;
