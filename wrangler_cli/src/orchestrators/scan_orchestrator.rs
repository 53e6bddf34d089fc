//! Scan command orchestrator
//!
//! Runs the blocking scan on tokio's blocking pool, wires Ctrl-C to the
//! scan's cancellation token and prints the report.

use crate::output::{OutputFormat, create_formatter};
use crate::progress::utils::pluralize;
use crate::progress::{create_progress_infrastructure, format_bytes, render_progress};
use anyhow::{Context, Result};
use colored::*;
use log::{debug, warn};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use wrangler_core::{
    CancellationToken, MediaRecord, NullProvider, ProgressProvider, ScanConfig, ScanReport, scan,
};

/// How a finished report is presented
#[derive(Debug, Clone, Copy)]
pub struct ScanOutputOptions {
    pub format: OutputFormat,
    pub use_color: bool,
    pub show_progress: bool,
}

/// Orchestrator for the scan command
pub struct ScanOrchestrator {
    config: ScanConfig,
    options: ScanOutputOptions,
    cancel: CancellationToken,
}

impl ScanOrchestrator {
    pub fn new(config: ScanConfig, options: ScanOutputOptions) -> Self {
        Self {
            config,
            options,
            cancel: CancellationToken::new(),
        }
    }

    /// Token that aborts the scan when cancelled
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Scan `root`, cancelling on Ctrl-C
    pub async fn run(&self, root: &Path) -> Result<ScanReport> {
        debug!("Starting scan of {} with {:?}", root.display(), self.config);

        let (provider, renderer) = if self.options.show_progress {
            let (provider, rx) = create_progress_infrastructure();
            (provider, Some(tokio::spawn(render_progress(rx))))
        } else {
            (Arc::new(NullProvider) as Arc<dyn ProgressProvider>, None)
        };

        let worker_root: PathBuf = root.to_path_buf();
        let worker_config = self.config.clone();
        let worker_cancel = self.cancel.clone();
        let worker_provider = Arc::clone(&provider);
        let mut worker = tokio::task::spawn_blocking(move || {
            scan(
                &worker_root,
                &worker_config,
                &worker_cancel,
                worker_provider.as_ref(),
            )
        });

        let joined = tokio::select! {
            result = &mut worker => result,
            signal = tokio::signal::ctrl_c() => {
                if signal.is_ok() {
                    warn!("Interrupt received, cancelling scan");
                    self.cancel.cancel();
                }
                worker.await
            }
        };

        // The scan task may have panicked before completing the provider
        provider.complete();
        if let Some(renderer) = renderer {
            finish_renderer(renderer).await;
        }

        joined
            .context("Scan task terminated unexpectedly")?
            .with_context(|| format!("Failed to scan {}", root.display()))
    }

    /// Print items to stdout, summary and warnings to stderr
    pub fn print_report(&self, report: &ScanReport) -> Result<()> {
        let records: Vec<MediaRecord> = report.items.iter().map(MediaRecord::from).collect();
        let formatter = create_formatter(self.options.format, self.options.use_color);

        if !records.is_empty() || self.options.format == OutputFormat::Json {
            println!("{}", formatter.format_batch(&records)?);
        }

        for warning in &report.warnings {
            let line = format!("warning: {warning}");
            if self.options.use_color {
                eprintln!("{}", line.yellow());
            } else {
                eprintln!("{line}");
            }
        }

        if self.options.format == OutputFormat::Text {
            let total_size: u64 = records.iter().map(|r| r.size).sum();
            let summary = format!(
                "{}, {} ({} discovered, {})",
                pluralize(report.stats.sequences, "sequence", "sequences"),
                pluralize(report.stats.standalone_files, "file", "files"),
                report.stats.files_discovered,
                format_bytes(total_size),
            );
            if self.options.use_color {
                eprintln!("{} {}", "✓".green(), summary.bold());
            } else {
                eprintln!("{summary}");
            }
        }

        Ok(())
    }
}

/// Wait for the progress renderer, returning whether it exited cleanly
async fn finish_renderer(renderer: tokio::task::JoinHandle<()>) -> bool {
    match renderer.await {
        Ok(()) => true,
        Err(e) => {
            warn!("Progress renderer failed: {e}");
            false
        }
    }
}
