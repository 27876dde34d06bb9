pub mod class;
pub mod lookup;
