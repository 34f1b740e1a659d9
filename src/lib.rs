//! brokerhub: admin toolkit for an insurance-brokerage network
//!
//! Manages the product catalog (companies, categories, products), the
//! network directory (branches, users), platform content (news, calendar
//! events) and document uploads over a pluggable record store.
//!
//! Layering follows domain-driven design:
//! - `domain`: entities and the category hierarchy, no I/O
//! - `application`: services orchestrating stores and the query cache
//! - `infrastructure`: store implementations, cache, DI container
//! - `cli`: argument parsing, dispatch, terminal output

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;
