//! Command-line surface of the `nika-mem` tool.

pub mod commands;
