//! # Ledger Types
//!
//! Domain types and port traits for the ledger transaction service.
//! This crate has no IO dependencies - only data structures,
//! validation rules, and trait definitions.
//!
//! ## Architecture
//!
//! This crate is the innermost core of the hexagonal architecture:
//! - `domain/` - Pure domain types (Transaction, TransactionSummary)
//! - `ports/` - Trait definitions that adapters must implement
//! - `dto/` - Data Transfer Objects for API boundaries
//! - `validation/` - Field-level checks for incoming JSON payloads
//! - `error/` - Domain, repository and application error types

pub mod domain;
pub mod dto;
pub mod error;
pub mod ports;
pub mod validation;

// Re-export commonly used types
pub use domain::{Transaction, TransactionId, TransactionSummary};
pub use dto::*;
pub use error::{AppError, DomainError, RepoError, ValidationErrors};
pub use ports::TransactionRepository;
