//! CLI utilities for Wanderlust command-line tools
//!
//! Provides shared CLI functionality:
//! - Output format selection and JSON printing
//! - Status messages
//! - Spinners around network calls

#![warn(missing_docs)]

pub mod output;
pub mod progress;

pub use output::{format_count, format_duration, print_json, OutputFormat, Status};
