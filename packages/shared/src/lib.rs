//! Shared utilities for the Akinai storefront workspace.
//!
//! Cross-cutting concerns used by both the server and any future binaries:
//! time handling with a clock abstraction, and tracing setup.

pub mod logger;
pub mod time;
