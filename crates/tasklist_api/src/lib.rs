//! Boundary layer over `tasklist_core`.
//!
//! Every call returns an [`ApiResponse`] envelope with a stable [`ErrorCode`]
//! on failure. See [`config`] for the environment variables it reads.

pub mod api;
pub mod config;
pub mod response;

pub use api::TaskListApi;
pub use config::ApiConfig;
pub use response::{ApiError, ApiResponse, ErrorCode};
