//! Operational JSON endpoints and shared HTTP middleware.
//!
//! # Modules
//!
//! - [`dto`] - Response payloads
//! - [`handlers`] - Health check handler
//! - [`middleware`] - Rate limiting and request tracing

pub mod dto;
pub mod handlers;
pub mod middleware;
