//! Shared types and billing engine for the Cotton Waste Billing Platform
//!
//! This crate contains the domain model and the pure derivation logic shared
//! between the backend and the browser UI (via WASM): lot resolution, rate
//! availability, bale generation with weight reconciliation, and value
//! derivation for sales orders and invoices.

pub mod availability;
pub mod bale;
pub mod error;
pub mod models;
pub mod resolution;
pub mod types;
pub mod validation;
pub mod valuation;

pub use error::*;
pub use models::*;
pub use types::*;
pub use validation::*;
