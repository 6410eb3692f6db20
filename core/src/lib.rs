//! Root of the `prospect-core` library.
//!
//! Builds a prioritized sales-prospect list for one geography: a grounded
//! Gemini query finds the companies, and the result is published as a
//! formatted, publicly readable Google Sheet.

// Prevent accidental direct writes to stdout/stderr in library code. All
// user-visible output goes through the service binary or the tracing stack.
#![deny(clippy::print_stdout, clippy::print_stderr)]

pub mod api_clients;
pub mod config;
pub mod error;
pub mod parser;
pub mod pipeline;
pub mod prompt;
pub mod prospect;
pub mod provider_auth;
pub mod publisher;
pub mod research;
pub mod sheet_layout;

pub use config::ProspectConfig;
pub use error::{ErrorCategory, ProspectError};
pub use pipeline::{GenerateRequest, GenerateSummary, ProspectPipeline};
pub use prospect::{Geography, Priority, PriorityCounts, ProspectRow};
pub use publisher::{GoogleSheetPublisher, SheetPublisher};
pub use research::{GeminiResearcher, ProspectResearcher};
