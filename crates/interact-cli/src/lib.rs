//! Library side of the `interact-detect` command-line tool.

pub mod logging;
pub mod pipeline;
pub mod types;
