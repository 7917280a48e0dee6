//! Schema-migration steps for the viconv document store.
//!
//! Each [`step::MigrationStep`] is a leaf operation: one forward
//! transformation and its rollback, run against an explicitly-passed store
//! handle. Sequencing, tracking of applied steps, retries, and timeouts
//! are the caller's responsibility.

pub mod config;
pub mod db;
pub mod error;
pub mod migrations;
pub mod schema;
pub mod step;
