//! Domain layer: entities and business logic
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config
//! loading). The category hierarchy builder lives here.

pub mod entities;
pub mod error;
pub mod hierarchy;

pub use entities::*;
pub use error::DomainError;
pub use hierarchy::{CategoryForest, CategoryNode, CategoryOption, CategoryTree};
