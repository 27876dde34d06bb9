pub mod db;
pub mod password;
