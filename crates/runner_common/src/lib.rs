//! Common types for query runner plugins.
//!
//! A query runner takes a query as text, executes it against some external
//! system, and hands the host back a serialized table of records. Runners are
//! registered by name so the host can instantiate them from stored
//! configuration.
pub mod errors;
pub mod records;
pub mod registry;
pub mod runner;
