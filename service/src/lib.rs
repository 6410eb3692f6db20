//! `prospect-service`: HTTP front end for the prospect pipeline.
//!
//! Exposes `POST /api/generate`, which researches one geography and returns
//! the link to a freshly published Google Sheet, and `GET /healthz` for
//! liveness checks.

pub mod commands;
pub mod http;
pub mod protocol;

/// Service version reported by `/healthz`.
pub const SERVICE_VERSION: &str = env!("CARGO_PKG_VERSION");
