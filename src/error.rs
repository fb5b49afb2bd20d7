//! Error types for the roster runner.
//!
//! Each variant marks the stage a run failed in, so callers can tell a
//! connection failure from a rejected query or an interrupted cursor.

use thiserror::Error;

/// Main error type for roster operations.
#[derive(Error, Debug)]
pub enum RosterError {
    /// Database connection errors (host unreachable, access denied, unknown database).
    #[error("Connection error: {0}")]
    Connection(String),

    /// The server rejected the statement before any row was produced.
    #[error("Query error: {0}")]
    Query(String),

    /// Failure while reading rows from an open cursor (missing column, dropped stream).
    #[error("Iteration error: {0}")]
    Iteration(String),

    /// Configuration errors (invalid config file, rejected SQL, bad connection string).
    #[error("Configuration error: {0}")]
    Config(String),

    /// Writing a row to the output failed.
    #[error("Output error: {0}")]
    Output(String),

    /// Internal application errors (unexpected states, bugs, etc.)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl RosterError {
    /// Creates a connection error with the given message.
    pub fn connection(msg: impl Into<String>) -> Self {
        Self::Connection(msg.into())
    }

    /// Creates a query error with the given message.
    pub fn query(msg: impl Into<String>) -> Self {
        Self::Query(msg.into())
    }

    /// Creates an iteration error with the given message.
    pub fn iteration(msg: impl Into<String>) -> Self {
        Self::Iteration(msg.into())
    }

    /// Creates a configuration error with the given message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Creates an output error with the given message.
    pub fn output(msg: impl Into<String>) -> Self {
        Self::Output(msg.into())
    }

    /// Creates an internal error with the given message.
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Returns the error category as a string for display purposes.
    pub fn category(&self) -> &'static str {
        match self {
            Self::Connection(_) => "Connection Error",
            Self::Query(_) => "Query Error",
            Self::Iteration(_) => "Iteration Error",
            Self::Config(_) => "Configuration Error",
            Self::Output(_) => "Output Error",
            Self::Internal(_) => "Internal Error",
        }
    }
}

impl From<std::io::Error> for RosterError {
    fn from(e: std::io::Error) -> Self {
        Self::Output(e.to_string())
    }
}

/// Result type alias using RosterError.
pub type Result<T> = std::result::Result<T, RosterError>;
