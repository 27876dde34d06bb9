//! Test utilities for Studio services.
//!
//! Provides bearer-token minting for users, admins and services, calendar
//! fixtures, and isolated Postgres schemas for store-level tests. Test code
//! only.

pub mod auth;
pub mod db;
pub mod fixture;
