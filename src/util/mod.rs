pub mod id;
pub mod unicode;
