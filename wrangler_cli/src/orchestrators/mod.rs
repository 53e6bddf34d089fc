//! Command orchestrators
//!
//! Coordinate between the CLI layer and the core scan pipeline.

pub mod scan_orchestrator;

pub use scan_orchestrator::{ScanOrchestrator, ScanOutputOptions};
