//! Gatekey HTTP token issuance service.
//!
//! Thin HTTP boundary around [`gatekey_core`]: request parsing, permissive
//! CORS, and error-to-status mapping. The issuance pipeline itself is pure
//! and synchronous; this crate owns the I/O.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod config;
pub mod error;
pub mod routes;

pub use config::IssuerConfig;
pub use error::{ApiError, ApiResult};
pub use routes::router;
