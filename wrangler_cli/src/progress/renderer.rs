//! Progress rendering for the CLI
//!
//! Turns progress updates into a single stderr spinner.

use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;
use tokio::sync::mpsc;
use wrangler_core::{ProgressUpdate, ScanStage};

/// Render progress updates until the provider drops its sender
pub async fn render_progress(mut rx: mpsc::Receiver<ProgressUpdate>) {
    let mut renderer = ProgressRenderer::new();

    while let Some(update) = rx.recv().await {
        renderer.handle_update(update);
    }

    renderer.finish();
}

/// Spinner showing the current stage and discovery count
pub struct ProgressRenderer {
    spinner: Option<ProgressBar>,
    stage: Option<ScanStage>,
    discovered: usize,
}

impl ProgressRenderer {
    pub fn new() -> Self {
        Self {
            spinner: None,
            stage: None,
            discovered: 0,
        }
    }

    pub fn handle_update(&mut self, update: ProgressUpdate) {
        match update {
            ProgressUpdate::Stage(stage) => {
                self.stage = Some(stage);
                self.refresh();
            }
            ProgressUpdate::FilesDiscovered { count } => {
                self.discovered = count;
                self.refresh();
            }
            ProgressUpdate::Status { message } => self.show_status(message),
        }
    }

    fn spinner(&mut self) -> &ProgressBar {
        self.spinner.get_or_insert_with(|| {
            let spinner = ProgressBar::new_spinner();
            if let Ok(style) = ProgressStyle::default_spinner()
                .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏ ")
                .template("{spinner:.cyan} {msg} [{elapsed}]")
            {
                spinner.set_style(style);
            }
            spinner.enable_steady_tick(Duration::from_millis(100));
            spinner
        })
    }

    fn refresh(&mut self) {
        let label = self.stage.unwrap_or(ScanStage::Discovering).label();
        let message = format!(
            "{}: {} files",
            label.bold(),
            self.discovered.to_string().cyan()
        );
        self.spinner().set_message(message);
    }

    fn show_status(&self, message: String) {
        match &self.spinner {
            Some(spinner) => spinner.println(format!("{} {}", "→".green(), message)),
            None => eprintln!("{} {}", "→".green(), message),
        }
    }

    /// Clear the spinner
    pub fn finish(self) {
        if let Some(spinner) = self.spinner {
            spinner.finish_and_clear();
        }
    }
}

impl Default for ProgressRenderer {
    fn default() -> Self {
        Self::new()
    }
}
