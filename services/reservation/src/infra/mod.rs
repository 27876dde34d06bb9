pub mod db;
pub mod http;
pub mod service_token;
