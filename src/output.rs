//! Row output.
//!
//! Rows are printed one field per line, in projection order, with no headers
//! or delimiters. A SQL NULL prints as `NULL`.

use crate::db::TextRow;
use crate::error::Result;
use std::io::{self, BufWriter, Stdout, Write};

/// Destination for streamed rows.
pub trait RowSink: Send {
    /// Writes one row.
    fn write_row(&mut self, row: &TextRow) -> Result<()>;

    /// Flushes anything buffered. Called once after streaming, on every path.
    fn finish(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Writes each field of each row on its own line.
#[derive(Debug)]
pub struct LinePrinter<W: Write + Send> {
    writer: W,
    lines: usize,
}

impl LinePrinter<BufWriter<Stdout>> {
    /// A printer over buffered standard output.
    pub fn stdout() -> Self {
        Self::new(BufWriter::new(io::stdout()))
    }
}

impl<W: Write + Send> LinePrinter<W> {
    /// Creates a printer over the given writer.
    pub fn new(writer: W) -> Self {
        Self { writer, lines: 0 }
    }

    /// Number of lines written so far.
    pub fn lines_written(&self) -> usize {
        self.lines
    }

    /// Consumes the printer, returning the writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write + Send> RowSink for LinePrinter<W> {
    fn write_row(&mut self, row: &TextRow) -> Result<()> {
        for field in row.display_fields() {
            writeln!(self.writer, "{field}")?;
            self.lines += 1;
        }
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}
