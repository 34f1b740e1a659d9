//! Application layer: services and use cases
//!
//! This layer orchestrates domain logic over the store boundary traits.
//! Every service follows the same read/mutate contract: list reads go
//! through the query cache, mutations write through the store and
//! invalidate the cache keys they touched.

pub mod error;
pub mod services;

pub use error::{ApplicationError, ApplicationResult};
