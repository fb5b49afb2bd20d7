//! Classroom roster - prints the students of a classroom MySQL database.
//!
//! This library exposes the core modules for use by the `roster` binary and
//! integration tests.

pub mod cli;
pub mod config;
pub mod db;
pub mod error;
pub mod logging;
pub mod output;
pub mod runner;
