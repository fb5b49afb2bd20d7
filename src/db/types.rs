//! Row types shared by the database clients.
//!
//! Every field is read as text; a SQL NULL is kept distinct as `None`.

use crate::error::{Result, RosterError};

/// Text printed for a SQL NULL.
pub const NULL_TEXT: &str = "NULL";

/// One result row, reduced to the projected columns in projection order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextRow {
    fields: Vec<Option<String>>,
}

impl TextRow {
    /// Creates a row from already projected fields.
    pub fn new(fields: Vec<Option<String>>) -> Self {
        Self { fields }
    }

    /// Iterates the fields as display text.
    pub fn display_fields(&self) -> impl Iterator<Item = &str> {
        self.fields
            .iter()
            .map(|field| field.as_deref().unwrap_or(NULL_TEXT))
    }
}

impl<S: Into<String>> FromIterator<Option<S>> for TextRow {
    fn from_iter<I: IntoIterator<Item = Option<S>>>(iter: I) -> Self {
        Self::new(iter.into_iter().map(|f| f.map(Into::into)).collect())
    }
}

/// Positions of the wanted columns within a result set.
///
/// Lookup is by name: an exact match wins, otherwise the first
/// case-insensitive match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Projection {
    indices: Vec<usize>,
}

impl Projection {
    /// Resolves `wanted` against the column names of a result set.
    pub fn resolve<S: AsRef<str>>(wanted: &[String], available: &[S]) -> Result<Self> {
        let indices = wanted
            .iter()
            .map(|name| {
                find_column(name, available).ok_or_else(|| {
                    let columns: Vec<&str> = available.iter().map(AsRef::as_ref).collect();
                    RosterError::iteration(format!(
                        "column '{name}' not found in result set (columns: {})",
                        columns.join(", ")
                    ))
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { indices })
    }

    /// Column positions in projection order.
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }
}

fn find_column<S: AsRef<str>>(name: &str, available: &[S]) -> Option<usize> {
    available
        .iter()
        .position(|c| c.as_ref() == name)
        .or_else(|| {
            available
                .iter()
                .position(|c| c.as_ref().eq_ignore_ascii_case(name))
        })
}
