//! sea-orm entities for the identity service's store.

pub mod users;
