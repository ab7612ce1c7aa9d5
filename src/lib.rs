pub mod core;
pub mod import;
pub mod persistence;
pub mod rng;

pub use crate::core::error::StoreError;
pub use crate::core::store::TermStore;
pub use crate::core::types::Term;
