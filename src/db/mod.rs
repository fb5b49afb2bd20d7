//! Database abstraction layer.
//!
//! Provides a trait-based interface over a single database connection so the
//! runner can be driven by MySQL or by an in-memory mock.

mod mock;
mod mysql;
mod types;

pub use mock::MockDatabaseClient;
pub use mysql::MySqlClient;
pub use types::{Projection, TextRow, NULL_TEXT};

use crate::config::ConnectionConfig;
use crate::error::Result;
use crate::output::RowSink;
use async_trait::async_trait;

/// Opens a MySQL connection for the given configuration.
pub async fn connect(config: &ConnectionConfig) -> Result<Box<dyn DatabaseClient>> {
    let client = MySqlClient::connect(config).await?;
    Ok(Box::new(client))
}

/// Trait defining the interface for database clients.
///
/// A client owns one connection. `close` must be safe to call more than once.
#[async_trait]
pub trait DatabaseClient: Send {
    /// Executes `sql` and streams its rows forward-only into `sink`.
    ///
    /// Each row is reduced to `columns`, in that order, with every value read
    /// as text. Returns the number of rows written. Errors before the first
    /// row are query errors; errors after it are iteration errors.
    async fn stream_rows(
        &mut self,
        sql: &str,
        columns: &[String],
        sink: &mut dyn RowSink,
    ) -> Result<usize>;

    /// Closes the database connection.
    async fn close(&mut self) -> Result<()>;
}
