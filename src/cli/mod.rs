//! Terminal presentation for the `cashflow_cli` binary.

pub mod output;
pub mod render;
