//! Shared functionality
//!
//! Types used by every hedera crate: node handles and encoding label helpers.

pub mod encoding;
pub mod node;
