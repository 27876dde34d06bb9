//! Auth types shared across Studio services.
//!
//! Provides JWT validation for user access tokens and service tokens, and
//! the bearer-token extractors (`CurrentUser`, `AdminUser`, `ServiceCaller`).

pub mod identity;
pub mod token;
