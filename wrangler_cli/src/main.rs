use anyhow::{Context, Result};
use clap::{Args, CommandFactory, Parser, Subcommand};
use clap_complete::{Shell, generate};
use colored::*;
use std::collections::BTreeMap;
use std::path::PathBuf;

use wrangler_cli::config::{ConfigManager, ScanOverrides, get_config};
use wrangler_cli::error::CliError;
use wrangler_cli::orchestrators::{ScanOrchestrator, ScanOutputOptions};
use wrangler_cli::output::OutputFormat;
use wrangler_cli::terminal;

#[derive(Parser)]
#[command(name = "wrangler")]
#[command(author, version, about = "Smart File Wrangler - media discovery and frame sequence grouping", long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan a folder and list its media items
    Scan(ScanArgs),

    /// Configuration management
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },

    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Args)]
struct ScanArgs {
    /// Folder to scan
    path: PathBuf,

    /// Descend into subfolders
    #[arg(short, long, overrides_with = "no_recursive")]
    recursive: bool,

    /// Only scan the top-level folder
    #[arg(long, overrides_with = "recursive")]
    no_recursive: bool,

    /// File extension to include (can be specified multiple times)
    #[arg(short = 't', long = "type", value_name = "EXT", conflicts_with = "all_types")]
    file_types: Vec<String>,

    /// Include every file regardless of extension
    #[arg(long)]
    all_types: bool,

    /// Exclude patterns (glob patterns, can be specified multiple times)
    #[arg(short = 'e', long = "exclude", value_name = "PATTERN")]
    exclude_patterns: Vec<String>,

    /// List every frame as a separate file
    #[arg(long)]
    no_combine: bool,

    /// Minimum number of frames for a sequence
    #[arg(short = 'm', long = "min-length", value_name = "FRAMES")]
    min_length: Option<usize>,

    /// Scan thumbnail folders as well
    #[arg(long)]
    include_thumbnails: bool,

    /// Name of the thumbnail folder to skip
    #[arg(long = "thumb-folder", value_name = "NAME")]
    thumbnail_folder: Option<String>,

    /// Follow symbolic links
    #[arg(long)]
    follow_links: bool,

    /// Output format
    #[arg(short, long, value_enum)]
    format: Option<OutputFormat>,

    /// Disable progress display
    #[arg(long)]
    no_progress: bool,
}

#[derive(Subcommand)]
enum ConfigCommand {
    /// Get a configuration value
    Get {
        /// Configuration key (e.g., scan.min_sequence_length)
        key: String,
    },

    /// Set a configuration value
    Set {
        /// Configuration key (e.g., scan.min_sequence_length)
        key: String,

        /// Value to set
        value: String,
    },

    /// List all configuration values
    List,

    /// Print the configuration file path
    Path,
}

impl ScanArgs {
    fn overrides(&self) -> ScanOverrides {
        let recursive = if self.no_recursive {
            Some(false)
        } else if self.recursive {
            Some(true)
        } else {
            None
        };

        let file_types = if self.all_types {
            Some(Vec::new())
        } else if self.file_types.is_empty() {
            None
        } else {
            Some(self.file_types.clone())
        };

        ScanOverrides {
            recursive,
            file_types,
            exclude_patterns: self.exclude_patterns.clone(),
            combine: self.no_combine.then_some(false),
            min_sequence_length: self.min_length,
            ignore_thumbnails: self.include_thumbnails.then_some(false),
            thumbnail_folder: self.thumbnail_folder.clone(),
            follow_links: self.follow_links.then_some(true),
        }
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Initialize logging based on debug flag
    if cli.debug {
        env_logger::Builder::from_env(env_logger::Env::default())
            .filter_level(log::LevelFilter::Debug)
            .filter_module("wrangler_core", log::LevelFilter::Debug)
            .filter_module("wrangler_cli", log::LevelFilter::Debug)
            .format_timestamp_millis()
            .init();
        eprintln!("Debug logging enabled");
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    }

    let debug = cli.debug;
    if let Err(error) = run(cli).await {
        let error = CliError::from(error);
        eprint!("{}", error.format_for_user(debug));
        std::process::exit(error.exit_code() as i32);
    }
}

async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Scan(args) => scan_command(args).await,
        Commands::Config { command } => config_command(command),
        Commands::Completions { shell } => {
            generate_completions(shell);
            Ok(())
        }
    }
}

async fn scan_command(args: ScanArgs) -> Result<()> {
    let mut config = get_config().context("Failed to load configuration")?;
    config.apply_cli_overrides(args.overrides());

    let scan_config = config.scan.to_scan_config()?;

    let format = match args.format {
        Some(format) => format,
        None => OutputFormat::from_string(&config.output.default_format)?,
    };
    let options = ScanOutputOptions {
        format,
        use_color: terminal::should_use_color(config.output.color_enabled),
        show_progress: !args.no_progress
            && config.output.progress_enabled
            && terminal::should_show_progress_by_default(),
    };

    let orchestrator = ScanOrchestrator::new(scan_config, options);
    let report = orchestrator.run(&args.path).await?;
    orchestrator.print_report(&report)
}

fn config_command(command: ConfigCommand) -> Result<()> {
    let mut manager = ConfigManager::new();

    match command {
        ConfigCommand::Get { key } => {
            println!("{}", manager.get(&key)?);
        }
        ConfigCommand::Set { key, value } => {
            manager.set(&key, &value)?;
            eprintln!("{}", format!("Set {key} = {value}").green());
            eprintln!(
                "Configuration saved to: {}",
                manager.get_config_path().display()
            );
        }
        ConfigCommand::List => {
            let items = manager.list()?;
            eprintln!("{}", "Configuration:".bold().blue());
            eprintln!("Config file: {}", manager.get_config_path().display());
            eprintln!();

            // Group items by section
            let mut sections: BTreeMap<String, Vec<(String, String)>> = BTreeMap::new();
            for (key, value) in items {
                let (section, field) = key.split_once('.').unwrap_or(("general", key.as_str()));
                sections
                    .entry(section.to_string())
                    .or_default()
                    .push((field.to_string(), value));
            }

            for (section, items) in sections {
                println!("[{}]", section.yellow());
                for (field, value) in items {
                    println!("  {} = {}", field.cyan(), value);
                }
                println!();
            }
        }
        ConfigCommand::Path => {
            println!("{}", manager.get_config_path().display());
        }
    }

    Ok(())
}

fn generate_completions(shell: Shell) {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();

    generate(shell, &mut cmd, name, &mut std::io::stdout());
}
