//! MCP tool handlers for GBO server
//!
//! This module contains the implementation of all MCP tool handlers.
//! Each group of tools is in a separate file.

pub mod exchange;
pub mod metrics;
pub mod operations;
pub mod takt;
