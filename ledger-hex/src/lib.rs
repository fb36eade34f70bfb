//! # Ledger Hex
//!
//! Application service layer and HTTP adapter for the ledger service.
//!
//! ## Architecture
//!
//! - `service/` - Application service (orchestrates domain operations)
//! - `inbound/` - HTTP adapter (Axum server)
//! - `openapi/` - Generated API description
//!
//! The service is generic over `R: TransactionRepository`, allowing
//! different repository implementations to be injected.

pub mod inbound;
pub mod openapi;
pub mod service;

#[cfg(test)]
mod service_tests;

pub use service::LedgerService;
