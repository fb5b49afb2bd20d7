//! Mock database client for testing.
//!
//! Serves `SELECT * FROM <table>` from in-memory tables and records what it
//! was asked to do, so tests can check the runner's behavior end to end.

use super::{DatabaseClient, Projection, TextRow};
use crate::error::{Result, RosterError};
use crate::output::RowSink;
use async_trait::async_trait;
use std::collections::HashMap;

#[derive(Debug, Clone, Default)]
struct MockTable {
    columns: Vec<String>,
    rows: Vec<Vec<Option<String>>>,
}

/// A mock database client backed by in-memory tables.
#[derive(Debug, Clone, Default)]
pub struct MockDatabaseClient {
    database: String,
    tables: HashMap<String, MockTable>,
    fail_after: Option<usize>,
    executed: Vec<String>,
    close_calls: usize,
}

impl MockDatabaseClient {
    /// Creates a new mock client for a database with no tables.
    pub fn new() -> Self {
        Self {
            database: "classroom".to_string(),
            ..Default::default()
        }
    }

    /// Adds a table with the given columns and rows.
    pub fn with_table(
        mut self,
        name: &str,
        columns: &[&str],
        rows: Vec<Vec<Option<&str>>>,
    ) -> Self {
        let table = MockTable {
            columns: columns.iter().map(|c| c.to_string()).collect(),
            rows: rows
                .into_iter()
                .map(|row| row.into_iter().map(|v| v.map(String::from)).collect())
                .collect(),
        };
        self.tables.insert(name.to_lowercase(), table);
        self
    }

    /// Makes the cursor fail once `rows` rows have been delivered.
    pub fn failing_after(mut self, rows: usize) -> Self {
        self.fail_after = Some(rows);
        self
    }

    /// Statements received, in order.
    pub fn executed(&self) -> &[String] {
        &self.executed
    }

    /// Returns true once `close` has been called.
    pub fn is_closed(&self) -> bool {
        self.close_calls > 0
    }

    /// Number of times `close` was called.
    pub fn close_calls(&self) -> usize {
        self.close_calls
    }

    fn lookup(&self, sql: &str) -> Result<&MockTable> {
        let name = table_name(sql).ok_or_else(|| {
            RosterError::query(format!("mock only supports SELECT * FROM <table>, got: {sql}"))
        })?;
        self.tables.get(&name.to_lowercase()).ok_or_else(|| {
            RosterError::query(format!(
                "ERROR 42S02: Table '{}.{name}' doesn't exist",
                self.database
            ))
        })
    }
}

/// Extracts `<table>` from `SELECT * FROM <table>`.
fn table_name(sql: &str) -> Option<&str> {
    let mut words = sql.trim().trim_end_matches(';').split_whitespace();
    let select = words.next()?;
    let star = words.next()?;
    let from = words.next()?;
    let table = words.next()?;
    let matches = select.eq_ignore_ascii_case("select")
        && star == "*"
        && from.eq_ignore_ascii_case("from")
        && words.next().is_none();
    matches.then(|| table.trim_matches('`'))
}

#[async_trait]
impl DatabaseClient for MockDatabaseClient {
    async fn stream_rows(
        &mut self,
        sql: &str,
        columns: &[String],
        sink: &mut dyn RowSink,
    ) -> Result<usize> {
        if self.is_closed() {
            return Err(RosterError::internal("connection already closed"));
        }
        self.executed.push(sql.to_string());

        let table = self.lookup(sql)?;
        let mut projection: Option<Projection> = None;
        let mut count = 0;

        for row in &table.rows {
            if self.fail_after == Some(count) {
                return Err(if count == 0 {
                    RosterError::query("connection lost")
                } else {
                    RosterError::iteration(format!("after {count} rows: connection lost"))
                });
            }
            let current = match projection.take() {
                Some(p) => p,
                None => Projection::resolve(columns, table.columns.as_slice())?,
            };
            let text_row: TextRow = current
                .indices()
                .iter()
                .map(|&i| row.get(i).cloned().flatten())
                .collect();
            projection = Some(current);

            sink.write_row(&text_row)?;
            count += 1;
        }

        Ok(count)
    }

    async fn close(&mut self) -> Result<()> {
        self.close_calls += 1;
        Ok(())
    }
}
