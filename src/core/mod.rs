//! Core abstractions for the MCP message core
//!
//! This module holds the error model shared by every layer of the crate.

pub mod error;

pub use error::{McpError, McpResult};
