//! Batch driver for the parameter extraction pipeline.
//!
//! Reads specification snippets from a directory, runs each through the
//! `extract_parameters` capability on the selected model backend, and writes
//! one YAML document per snippet.

pub mod backends;
pub mod cli;
pub mod config;
pub mod errors;
pub mod runner;
pub mod setup;
pub mod sink;
pub mod snippets;
