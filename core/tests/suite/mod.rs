// Adapter tests against wiremock stand-ins for the Google APIs.
mod auth;
mod gemini;
mod pipeline;
mod sheets;
