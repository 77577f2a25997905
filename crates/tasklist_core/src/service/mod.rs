//! Use-case services over the list/task repositories.
//!
//! # Responsibility
//! - Validate caller input before any store write.
//! - Own transaction boundaries for multi-step ordering operations.
//! - Keep boundary layers decoupled from SQL and ordering details.

pub mod list_service;
pub mod ordering_service;
