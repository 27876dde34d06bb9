pub mod admission;
pub mod enrich;
pub mod query;
pub mod statistics;
