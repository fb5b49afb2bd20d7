//! MySQL database client implementation.
//!
//! Provides the `MySqlClient` struct that implements the `DatabaseClient` trait
//! over a single sqlx `MySqlConnection`.

use crate::config::ConnectionConfig;
use crate::db::{DatabaseClient, Projection, TextRow};
use crate::error::{Result, RosterError};
use crate::output::RowSink;
use async_trait::async_trait;
use futures::TryStreamExt;
use sqlx::mysql::{MySqlConnectOptions, MySqlConnection, MySqlRow};
use sqlx::{Column as SqlxColumn, Connection, Row as SqlxRow};
use tracing::{debug, warn};

/// MySQL database client.
///
/// Holds one connection until `close` is called.
#[derive(Debug)]
pub struct MySqlClient {
    conn: Option<MySqlConnection>,
}

impl MySqlClient {
    /// Opens a connection using the resolved connection parameters.
    pub async fn connect(config: &ConnectionConfig) -> Result<Self> {
        let options = connect_options(config);

        debug!("Connecting to {}", config.display_string());
        let conn = MySqlConnection::connect_with(&options)
            .await
            .map_err(|e| map_connection_error(e, config))?;
        debug!("Successfully connected to database");

        Ok(Self { conn: Some(conn) })
    }

    /// Returns true while the connection is open.
    pub fn is_open(&self) -> bool {
        self.conn.is_some()
    }
}

fn connect_options(config: &ConnectionConfig) -> MySqlConnectOptions {
    let mut options = MySqlConnectOptions::new()
        .host(config.host())
        .port(config.port())
        .database(config.database());

    if let Some(user) = &config.user {
        options = options.username(user);
    }
    if let Some(password) = &config.password {
        options = options.password(password);
    }

    options
}

#[async_trait]
impl DatabaseClient for MySqlClient {
    async fn stream_rows(
        &mut self,
        sql: &str,
        columns: &[String],
        sink: &mut dyn RowSink,
    ) -> Result<usize> {
        let conn = self
            .conn
            .as_mut()
            .ok_or_else(|| RosterError::internal("connection already closed"))?;

        // Unprepared statement: rows come back in the text protocol, so every
        // column decodes as text whatever its SQL type.
        let mut rows = sqlx::raw_sql(sql).fetch(&mut *conn);
        let mut projection: Option<Projection> = None;
        let mut count = 0;

        while let Some(row) = rows
            .try_next()
            .await
            .map_err(|e| map_stream_error(e, count))?
        {
            let current = match projection.take() {
                Some(p) => p,
                None => {
                    let names: Vec<&str> = row.columns().iter().map(|c| c.name()).collect();
                    Projection::resolve(columns, names.as_slice())?
                }
            };
            let text_row = read_text_row(&row, &current)?;
            projection = Some(current);

            sink.write_row(&text_row)?;
            count += 1;
        }

        debug!("Streamed {} rows", count);
        Ok(count)
    }

    async fn close(&mut self) -> Result<()> {
        if let Some(conn) = self.conn.take() {
            conn.close().await.map_err(|e| {
                RosterError::connection(format!("Failed to close connection: {e}"))
            })?;
            debug!("Connection closed");
        }
        Ok(())
    }
}

/// Reads the projected columns of a row as text.
fn read_text_row(row: &MySqlRow, projection: &Projection) -> Result<TextRow> {
    projection
        .indices()
        .iter()
        .map(|&index| read_text(row, index))
        .collect::<Result<Vec<_>>>()
        .map(TextRow::new)
}

fn read_text(row: &MySqlRow, index: usize) -> Result<Option<String>> {
    match row.try_get_unchecked::<Option<String>, _>(index) {
        Ok(value) => Ok(value),
        // Binary columns that are not valid UTF-8
        Err(_) => row
            .try_get_unchecked::<Option<Vec<u8>>, _>(index)
            .map(|bytes| bytes.map(|b| String::from_utf8_lossy(&b).into_owned()))
            .map_err(|e| {
                RosterError::iteration(format!("Cannot read column {index} as text: {e}"))
            }),
    }
}

/// Classifies a cursor error by whether any row had been produced yet.
fn map_stream_error(error: sqlx::Error, rows_seen: usize) -> RosterError {
    if rows_seen == 0 {
        RosterError::query(format_query_error(&error))
    } else {
        warn!("Cursor failed after {} rows", rows_seen);
        RosterError::iteration(format!(
            "after {rows_seen} rows: {}",
            format_query_error(&error)
        ))
    }
}

/// Maps sqlx connection errors to user-friendly messages.
fn map_connection_error(error: sqlx::Error, config: &ConnectionConfig) -> RosterError {
    let host = config.host();
    let port = config.port();
    let user = config.user.as_deref().unwrap_or("root");
    let database = config.database();

    let error_str = error.to_string().to_lowercase();

    if error_str.contains("connection refused") {
        RosterError::connection(format!(
            "Cannot connect to {host}:{port}. Check that the server is running."
        ))
    } else if error_str.contains("access denied") {
        RosterError::connection(format!(
            "Access denied for user '{user}'. Check your credentials."
        ))
    } else if error_str.contains("unknown database") {
        RosterError::connection(format!("Database '{database}' does not exist."))
    } else if error_str.contains("timed out") || error_str.contains("timeout") {
        RosterError::connection(format!(
            "Connection to {host}:{port} timed out. The server may be overloaded or unreachable."
        ))
    } else if error_str.contains("lookup") || error_str.contains("resolve") {
        RosterError::connection(format!("Cannot resolve host '{host}'."))
    } else {
        RosterError::connection(format!("Cannot connect to {host}:{port}: {error}"))
    }
}

/// Formats a server error as `ERROR <sqlstate>: <message>` when possible.
fn format_query_error(error: &sqlx::Error) -> String {
    match error.as_database_error() {
        Some(db_error) => match db_error.code() {
            Some(code) => format!("ERROR {code}: {}", db_error.message()),
            None => format!("ERROR: {}", db_error.message()),
        },
        None => error.to_string(),
    }
}
