use colored::*;
use std::error::Error as StdError;
use std::fmt;

/// CLI-specific error type with semantic exit codes
#[derive(Debug)]
pub struct CliError {
    /// The main error message
    message: String,

    /// Error category for exit code determination
    category: ErrorCategory,

    /// Additional context information
    context: Vec<(String, String)>,

    /// Suggestions for recovery
    pub suggestions: Vec<String>,

    /// Source error if any
    source: Option<Box<dyn StdError + Send + Sync>>,
}

/// Error categories that map to exit codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ErrorCategory {
    General,
    Misuse,
    Filesystem,
    Interrupted,
}

/// Semantic exit codes for the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    Success = 0,
    GeneralError = 1,
    Misuse = 2,
    FilesystemError = 4,
    Interrupted = 130,
}

/// Result type for CLI operations
pub type CliResult<T> = Result<T, CliError>;

/// Extension trait for adding context to errors
pub trait ErrorContext {
    fn with_context(self, key: &str, value: &str) -> Self;
    fn with_suggestion(self, suggestion: &str) -> Self;
}

impl CliError {
    fn new(message: &str, category: ErrorCategory) -> Self {
        Self {
            message: message.to_string(),
            category,
            context: Vec::new(),
            suggestions: Vec::new(),
            source: None,
        }
    }

    /// Create a general error
    pub fn general(message: &str) -> Self {
        Self::new(message, ErrorCategory::General)
    }

    /// Create a command misuse error
    pub fn misuse(message: &str) -> Self {
        let mut error = Self::new(message, ErrorCategory::Misuse);
        error
            .suggestions
            .push("Run 'wrangler --help' for usage information".to_string());
        error
    }

    /// Create a filesystem error
    pub fn filesystem(message: &str) -> Self {
        let mut error = Self::new(message, ErrorCategory::Filesystem);

        if message.contains("does not exist") || message.contains("not found") {
            error
                .suggestions
                .push("Check if the directory exists".to_string());
        } else if message.contains("not a directory") {
            error
                .suggestions
                .push("Pass a folder rather than a single file".to_string());
        } else if message.contains("permission") || message.contains("denied") {
            error.suggestions.push("Check folder permissions".to_string());
        }

        error
    }

    /// Create an error for a scan aborted by the user
    pub fn interrupted(message: &str) -> Self {
        Self::new(message, ErrorCategory::Interrupted)
    }

    /// Classify an error raised by the core library
    pub fn from_core(error: wrangler_core::Error) -> Self {
        use wrangler_core::Error;

        let message = error.to_string();
        let mut cli_error = match &error {
            Error::Validation(_) => Self::misuse(&message),
            Error::Io(_) => Self::filesystem(&message),
            Error::Scan(_) if error.is_invalid_root() => Self::filesystem(&message),
            Error::Scan(_) if error.is_cancelled() => Self::interrupted(&message),
            Error::Scan(_) => Self::general(&message),
        };

        if let Error::Validation(_) = &error {
            cli_error.suggestions.insert(
                0,
                "Review 'wrangler config list' and any WRANGLER_* environment variables"
                    .to_string(),
            );
        }

        cli_error.source = Some(Box::new(error));
        cli_error
    }

    /// Get the exit code for this error
    pub fn exit_code(&self) -> ExitCode {
        match self.category {
            ErrorCategory::General => ExitCode::GeneralError,
            ErrorCategory::Misuse => ExitCode::Misuse,
            ErrorCategory::Filesystem => ExitCode::FilesystemError,
            ErrorCategory::Interrupted => ExitCode::Interrupted,
        }
    }

    fn label(&self) -> &'static str {
        match self.category {
            ErrorCategory::General => "Error",
            ErrorCategory::Misuse => "Usage Error",
            ErrorCategory::Filesystem => "File Error",
            ErrorCategory::Interrupted => "Interrupted",
        }
    }

    /// Format the error for user display
    pub fn format_for_user(&self, debug: bool) -> String {
        let mut output = String::new();

        let prefix = match self.category {
            ErrorCategory::Misuse | ErrorCategory::Interrupted => self.label().yellow(),
            ErrorCategory::General | ErrorCategory::Filesystem => self.label().red(),
        };

        output.push_str(&format!("{}: {}\n", prefix, self.message));

        if !self.context.is_empty() {
            output.push_str("\nContext:\n");
            for (key, value) in &self.context {
                output.push_str(&format!("  {}: {}\n", key.bold(), value));
            }
        }

        // Error chain in debug mode
        if debug && let Some(source) = &self.source {
            output.push_str("\nCaused by:\n");
            let mut current: Option<&dyn StdError> = Some(source.as_ref());
            let mut level = 1;

            while let Some(err) = current {
                output.push_str(&format!("  {level}: {err}\n"));
                current = err.source();
                level += 1;
            }
        }

        if !self.suggestions.is_empty() {
            output.push_str("\nSuggestions:\n");
            for suggestion in &self.suggestions {
                output.push_str(&format!("  - {suggestion}\n"));
            }
        }

        output
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.label(), self.message)?;

        for (key, value) in &self.context {
            write!(f, " ({key}: {value})")?;
        }

        Ok(())
    }
}

impl StdError for CliError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn StdError + 'static))
    }
}

impl ErrorContext for CliError {
    fn with_context(mut self, key: &str, value: &str) -> Self {
        self.context.push((key.to_string(), value.to_string()));
        self
    }

    fn with_suggestion(mut self, suggestion: &str) -> Self {
        self.suggestions.push(suggestion.to_string());
        self
    }
}

/// Convert anyhow errors to CLI errors, keeping the core classification
impl From<anyhow::Error> for CliError {
    fn from(error: anyhow::Error) -> Self {
        let summary = format!("{error:#}");
        match error.downcast::<wrangler_core::Error>() {
            Ok(core) => {
                let mut cli_error = Self::from_core(core);
                cli_error.message = summary;
                cli_error
            }
            Err(other) => Self::general(&format!("{other:#}")),
        }
    }
}
