use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use survey_wizard::app::App;
use survey_wizard::config::Config;
use survey_wizard::logging;
use survey_wizard::survey::{PageCatalog, PageKind, SelectionMode};

#[derive(Parser)]
#[command(name = "survey-wizard")]
#[command(about = "Multi-page desirability survey in the terminal")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Config file path
    #[arg(short, long)]
    config: Option<String>,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// Submission endpoint (overrides submit.endpoint)
    #[arg(short, long)]
    endpoint: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// List the survey pages and their selection limits
    Pages,

    /// Print the effective configuration as TOML
    Config,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration first (needed for logging setup)
    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(endpoint) = cli.endpoint {
        config.submit.endpoint = endpoint;
    }

    // No subcommand runs the wizard, which owns the terminal
    let is_tui_mode = cli.command.is_none();
    let logging_handle = logging::init_logging(&config, is_tui_mode, cli.debug)?;
    tracing::debug!(log = %logging::describe(&logging_handle), "logging initialized");

    match cli.command {
        Some(Commands::Pages) => cmd_pages(),
        Some(Commands::Config) => cmd_config(&config)?,
        None => run_tui(config, logging_handle.log_file_path).await?,
    }

    Ok(())
}

async fn run_tui(config: Config, log_file_path: Option<PathBuf>) -> Result<()> {
    let mut app = App::new(config)?;
    let result = app.run().await;

    // Point at the log only if something was written
    if let Some(log_path) = log_file_path {
        if let Ok(metadata) = log_path.metadata() {
            if metadata.len() > 0 {
                eprintln!("Session log: {}", log_path.display());
            }
        }
    }

    result
}

fn cmd_pages() {
    let catalog = PageCatalog::standard();

    println!("Survey pages ({})", catalog.total_pages());
    println!("{}", "─".repeat(60));

    for page in catalog.pages() {
        let detail = match &page.kind {
            PageKind::Info { .. } => "info".to_string(),
            PageKind::Identity => "identity".to_string(),
            PageKind::Rating => "rating, 6 tracks".to_string(),
            PageKind::Question(group) => match group.mode {
                SelectionMode::Single => format!("{}: choose one", group.name),
                SelectionMode::Multi => format!(
                    "{}: up to {} of {}",
                    group.name,
                    group.max_selections(),
                    group.option_count()
                ),
            },
        };
        println!("{:>2}  {:<22} {}", page.number, detail, page.title());
    }
}

fn cmd_config(config: &Config) -> Result<()> {
    print!("{}", config.to_toml()?);
    Ok(())
}
