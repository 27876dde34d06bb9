pub mod account;
pub mod admin;
pub mod service_token;
pub mod session;
