//! Autocloser Core - Conversation lifecycle and billing ledger engine.
//!
//! This crate implements the domain core of an AI sales-closing platform:
//! conversation tracking with lead qualification, a per-conversation message
//! ledger with delivery retries, subscription billing periods, and payment
//! transaction reconciliation.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
