//! # KANON CLI Library
//!
//! Command-line front-end for the remote anonymization service:
//! - HTTP clients for the anonymization and canonicalization endpoints
//! - Endpoint configuration resolution (CLI, environment, TOML file)
//! - Subcommand implementations
//! - Text rendering of the KPI report

pub mod canonical;
pub mod cli;
pub mod client;
pub mod commands;
pub mod config;
pub mod output;
