//! Demo HTTP service used to exercise a CI pipeline.
//!
//! Four stateless JSON endpoints behind a single axum router:
//!
//! ```text
//! GET  /healthz       -> {"status":"ok"}
//! GET  /              -> {"message":"Hello from jenkins-demo-app"}
//! GET  /api/v1/echo   -> {"echo":<message or "empty">}
//! POST /api/v1/sum    -> {"total":<sum>} | 400 {"error":...}
//! ```
//!
//! # Modules
//!
//! - [`config`]: Configuration loading from environment
//! - [`error`]: Unified error types
//! - [`sum`]: Validation and totalling for the sum endpoint
//! - [`api`]: HTTP router and handlers
//! - [`metrics`]: Prometheus metrics
//! - [`utils`]: Utility functions

pub mod api;
pub mod config;
pub mod error;
pub mod metrics;
pub mod sum;
pub mod utils;

pub use config::Config;
pub use error::{AppError, Result};
