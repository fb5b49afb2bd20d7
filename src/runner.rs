//! The query runner: connect, run the configured query, print each row,
//! and release the connection.

use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use crate::config::{ConnectionConfig, QueryConfig};
use crate::db::{self, DatabaseClient};
use crate::error::Result;
use crate::output::RowSink;

/// The only statement the runner ever sends.
pub const STUDENT_QUERY: &str = "SELECT * FROM student";

/// Outcome of a successful run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    /// Rows written to the sink.
    pub rows: usize,
    /// Time spent streaming the rows.
    pub elapsed: Duration,
}

/// Runs [`STUDENT_QUERY`] over one connection.
#[derive(Debug, Clone)]
pub struct QueryRunner {
    connection: ConnectionConfig,
    query: QueryConfig,
}

impl QueryRunner {
    /// Creates a runner for the given connection and projection.
    pub fn new(connection: ConnectionConfig, query: QueryConfig) -> Self {
        Self { connection, query }
    }

    /// Opens a MySQL connection and runs the query into `sink`.
    ///
    /// The projection is checked before connecting.
    pub async fn run(&self, sink: &mut dyn RowSink) -> Result<RunSummary> {
        self.query.validate()?;

        info!("Connecting to {}", self.connection.display_string());
        let mut client = db::connect(&self.connection).await?;
        self.stream_and_close(client.as_mut(), sink).await
    }

    /// Runs the query over an already open client, then closes it.
    pub async fn run_with_client(
        &self,
        client: &mut dyn DatabaseClient,
        sink: &mut dyn RowSink,
    ) -> Result<RunSummary> {
        if let Err(e) = self.query.validate() {
            close_quietly(client).await;
            return Err(e);
        }
        self.stream_and_close(client, sink).await
    }

    async fn stream_and_close(
        &self,
        client: &mut dyn DatabaseClient,
        sink: &mut dyn RowSink,
    ) -> Result<RunSummary> {
        let start = Instant::now();
        debug!("Executing: {}", STUDENT_QUERY);

        let streamed = client
            .stream_rows(STUDENT_QUERY, &self.query.columns, sink)
            .await;
        let flushed = sink.finish();
        let closed = client.close().await;

        let rows = streamed?;
        flushed?;
        if let Err(e) = closed {
            // Every row already reached the sink.
            warn!("{}: {}", e.category(), e);
        }

        let elapsed = start.elapsed();
        info!("Printed {} rows in {:?}", rows, elapsed);
        Ok(RunSummary { rows, elapsed })
    }
}

async fn close_quietly(client: &mut dyn DatabaseClient) {
    if let Err(e) = client.close().await {
        warn!("{}: {}", e.category(), e);
    }
}
