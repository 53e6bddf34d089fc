//! End-to-end scan: discovery, grouping and materialization

use serde::Serialize;
use std::path::Path;

use crate::cancel::CancellationToken;
use crate::config::ScanConfig;
use crate::discovery::discover_with;
use crate::error::{Result, ScanWarning};
use crate::media::{MediaItem, materialize, materialize_files};
use crate::progress::{NullProvider, ProgressProvider, ProgressUpdate, ScanStage};
use crate::sequence::SequenceAssembler;

/// Counters describing one scan
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ScanStats {
    pub files_discovered: usize,
    pub sequences: usize,
    pub standalone_files: usize,
    /// Frames that matched a pattern but fell short of the minimum length
    pub demoted_frames: usize,
}

/// Result of a completed scan
#[derive(Debug, Default)]
pub struct ScanReport {
    pub items: Vec<MediaItem>,
    pub warnings: Vec<ScanWarning>,
    pub stats: ScanStats,
}

/// Scan `root` with the given configuration
///
/// Cancellation is honoured between entries during discovery and once more
/// before grouping. A cancelled scan returns `Cancelled` and no items.
/// `progress` is completed whether the scan succeeds or fails.
pub fn scan(
    root: &Path,
    config: &ScanConfig,
    cancel: &CancellationToken,
    progress: &dyn ProgressProvider,
) -> Result<ScanReport> {
    log::debug!("Scanning {} with {config:?}", root.display());

    let result = run_scan(root, config, cancel, progress);
    progress.complete();

    match &result {
        Ok(report) => log::debug!(
            "Scan of {} finished: {} item(s), {} warning(s)",
            root.display(),
            report.items.len(),
            report.warnings.len()
        ),
        Err(e) => log::debug!("Scan of {} failed: {e}", root.display()),
    }

    result
}

fn run_scan(
    root: &Path,
    config: &ScanConfig,
    cancel: &CancellationToken,
    progress: &dyn ProgressProvider,
) -> Result<ScanReport> {
    progress.report(ProgressUpdate::Stage(ScanStage::Discovering));
    let discovered = discover_with(root, &config.discovery_options(), cancel, progress)?;
    cancel.check()?;

    let mut report = ScanReport {
        warnings: discovered.warnings,
        ..ScanReport::default()
    };
    report.stats.files_discovered = discovered.entries.len();

    if config.combine_frame_sequences() {
        progress.report(ProgressUpdate::Stage(ScanStage::Grouping));
        let mut assembly =
            SequenceAssembler::new(config.min_sequence_length())?.assemble(discovered.entries);
        report.stats.demoted_frames = assembly.demoted;
        report.warnings.append(&mut assembly.warnings);

        progress.report(ProgressUpdate::Stage(ScanStage::Materializing));
        report.items = materialize(assembly);
    } else {
        log::debug!("Frame sequence grouping disabled");
        progress.report(ProgressUpdate::Stage(ScanStage::Materializing));
        report.items = materialize_files(discovered.entries);
    }

    report.stats.sequences = report.items.iter().filter(|item| item.is_sequence()).count();
    report.stats.standalone_files = report.items.len() - report.stats.sequences;

    Ok(report)
}

/// Scan without cancellation or progress and return only the items
pub fn scan_media_items(root: &Path, config: &ScanConfig) -> Result<Vec<MediaItem>> {
    scan(root, config, &CancellationToken::new(), &NullProvider).map(|report| report.items)
}
