//! # Providers
//!
//! Clients for the external services the summarizer depends on.

pub mod ai;
pub mod factory;
