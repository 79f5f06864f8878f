use std::{io, path::PathBuf};

/// Errors that can abort an explain analysis run.
///
/// Every variant is fatal for the binary; the library only propagates them so
/// a caller may decide otherwise.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The connection config file could not be read.
    #[error("failed to read connection config {}: {}", .path.display(), .source)]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The connection config is not a flat JSON object of strings.
    #[error("invalid connection config {}: {}", .path.display(), .source)]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Failed to open the database connection.
    #[error("failed to connect to database: {0}")]
    Connection(#[source] mysql_async::Error),

    /// The SQL input file could not be read.
    #[error("failed to read sql file {}: {}", .path.display(), .source)]
    FileRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The EXPLAIN query was rejected by the server.
    #[error("failed to explain statement `{statement}`: {source}")]
    Query {
        statement: String,
        #[source]
        source: mysql_async::Error,
    },

    /// The EXPLAIN result did not hold a single text value.
    #[error("failed to read plan of statement `{statement}`: {reason}")]
    RowScan { statement: String, reason: String },

    /// The plan document is not valid JSON or does not match the plan shape.
    #[error("invalid execution plan: {0}")]
    PlanParse(#[source] serde_json::Error),

    /// The report file could not be created.
    #[error("failed to create output file {}: {}", .path.display(), .source)]
    OutputCreate {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Writing the report failed.
    #[error("failed to write report: {0}")]
    OutputWrite(#[source] io::Error),
}
