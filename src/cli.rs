use anyhow::{Context as _, Result};
use clap::{Parser, Subcommand, ValueEnum};
use internstats::config::SummaryConfig;
use internstats::report::{render_json, render_text};
use internstats::summarizer::{ColumnBinding, Dataset, build_report};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(
    name = "internstats",
    about = "Summarize internship record spreadsheets"
)]
pub struct Cli {
    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Do not write the rotating log file
    #[arg(long, global = true)]
    pub no_log_file: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build every view and print the summary
    Summarize {
        /// Input file (CSV, Parquet or JSON)
        #[arg(short, long)]
        file: PathBuf,

        /// Path to a JSON summary configuration file
        #[arg(long)]
        config: Option<PathBuf>,

        /// Output format
        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,

        /// Write the summary here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Size of the integration agent ranking (overrides the config)
        #[arg(long)]
        top: Option<usize>,
    },
    /// Show which header each record field was read from
    Columns {
        /// Input file (CSV, Parquet or JSON)
        #[arg(short, long)]
        file: PathBuf,

        /// Path to a JSON summary configuration file
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Write the default configuration as JSON
    InitConfig {
        /// Destination. Defaults to the user config directory.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

pub fn run_command(command: Commands) -> Result<()> {
    match command {
        Commands::Summarize {
            file,
            config,
            format,
            output,
            top,
        } => handle_summarize(&file, config.as_deref(), format, output.as_deref(), top),
        Commands::Columns { file, config } => handle_columns(&file, config.as_deref()),
        Commands::InitConfig { output } => handle_init_config(output),
    }
}

fn handle_summarize(
    file: &Path,
    config_path: Option<&Path>,
    format: OutputFormat,
    output: Option<&Path>,
    top: Option<usize>,
) -> Result<()> {
    let mut config = SummaryConfig::load_or_default(config_path)?;
    if let Some(n) = top {
        config.top_n = n;
    }

    let dataset = load_dataset(file, &config)?;
    let report = build_report(&dataset, &config);

    let rendered = match format {
        OutputFormat::Text => render_text(&report),
        OutputFormat::Json => render_json(&report)?,
    };

    match output {
        Some(path) => {
            std::fs::write(path, rendered)
                .with_context(|| format!("Failed to write summary to {}", path.display()))?;
            tracing::info!("Summary written to {}", path.display());
        }
        None => print!("{rendered}"),
    }

    for (view, error) in report.failures() {
        eprintln!("warning: view '{view}' unavailable: {error}");
    }
    Ok(())
}

fn handle_columns(file: &Path, config_path: Option<&Path>) -> Result<()> {
    let config = SummaryConfig::load_or_default(config_path)?;
    let dataset = load_dataset(file, &config)?;

    println!("{} records", dataset.len());
    for (field, binding) in dataset.bindings() {
        match binding {
            ColumnBinding::Header(header) => println!("  {:<20} {:?}", field.name(), header),
            ColumnBinding::Missing { expected } => {
                println!("  {:<20} MISSING, expected {expected}", field.name());
            }
        }
    }
    Ok(())
}

fn load_dataset(file: &Path, config: &SummaryConfig) -> Result<Dataset> {
    Dataset::load(file, config).map_err(|err| {
        let context = if err.is_configuration() {
            format!(
                "Cannot summarize {}: check the file type and the --config settings",
                file.display()
            )
        } else {
            format!("Failed to load {}", file.display())
        };
        anyhow::Error::new(err).context(context)
    })
}

fn handle_init_config(output: Option<PathBuf>) -> Result<()> {
    let path = match output {
        Some(p) => p,
        None => SummaryConfig::default_path()?,
    };

    SummaryConfig::default().save(&path)?;
    println!("Default configuration written to {}", path.display());
    Ok(())
}
