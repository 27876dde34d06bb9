//! Service plumbing shared by every Studio HTTP service.

pub mod config;
pub mod error;
pub mod extract;
pub mod health;
pub mod middleware;
pub mod sea_ext;
pub mod serde;
pub mod shutdown;
pub mod tracing;
