//! Explain SQL statements on a MySQL server and report optimization hints.
//!
//! Statements are read from a file, explained with `EXPLAIN FORMAT=json` and
//! every plan is written as a text report with advice derived from its table
//! access type and scan volume.
pub mod backend;
pub mod cli;
pub mod config;
pub mod engine;
pub mod errors;
pub mod explain;
pub mod sql;
pub mod template;
