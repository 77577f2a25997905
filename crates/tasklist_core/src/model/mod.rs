//! Domain model for lists, tasks and their rendered views.
//!
//! # Invariants
//! - Every list and task is identified by a stable UUID.
//! - Within one list, tasks render by `priority` descending.

pub mod list;
pub mod task;
