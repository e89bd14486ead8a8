//! Pieces shared by the HTTP server and the binaries.

pub mod types;
pub mod utils;
