//! Smart File Wrangler command line interface
//!
//! Library half of the `wrangler` binary, exposed so integration tests can
//! drive configuration and output directly.

pub mod config;
pub mod error;
pub mod orchestrators;
pub mod output;
pub mod progress;
pub mod terminal;
