//! Progress reporting for the CLI
//!
//! Scans report through a channel provider; a renderer task drains the
//! channel and drives an indicatif spinner.

pub mod provider;
pub mod renderer;
pub mod utils;

pub use provider::{ChannelProvider, create_progress_infrastructure};
pub use renderer::render_progress;
pub use utils::format_bytes;
