use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use stepwise::app::App;
use stepwise::config::Config;
use stepwise::{logging, watch};

#[derive(Parser)]
#[command(name = "stepwise")]
#[command(about = "Staged agent deployment status dashboard")]
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
}

#[derive(Subcommand)]
enum Commands {
    /// Run the progression without the TUI, printing each change
    Watch,

    /// List the configured steps
    Steps,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration first (needed for logging setup)
    let config = Config::load(cli.config.as_deref())?;

    // Determine if we're running in TUI mode (no subcommand)
    let is_tui_mode = cli.command.is_none();

    // Initialize logging (file-based for TUI, stderr for CLI)
    let logging_handle = logging::init_logging(&config, is_tui_mode, cli.debug)?;

    match cli.command {
        Some(Commands::Watch) => {
            let mut stdout = std::io::stdout();
            watch::run_watch(&config, &mut stdout).await?;
        }
        Some(Commands::Steps) => {
            cmd_steps(&config);
        }
        None => {
            run_tui(config, logging_handle.log_file_path).await?;
        }
    }

    Ok(())
}

async fn run_tui(config: Config, log_file_path: Option<PathBuf>) -> Result<()> {
    let mut app = App::new(config)?;
    let result = app.run().await;

    // Print log file path on exit if logs were written
    if let Some(log_path) = log_file_path {
        if let Ok(metadata) = log_path.metadata() {
            if metadata.len() > 0 {
                eprintln!("Session log: {}", log_path.display());
            }
        }
    }

    result
}

fn cmd_steps(config: &Config) {
    if config.steps.is_empty() {
        println!("No steps configured");
        return;
    }

    println!(
        "Steps ({}, revealed {}ms apart)",
        config.steps.len(),
        config.presenter.stagger_ms
    );
    println!("{}", "─".repeat(60));

    for (index, step) in config.steps.iter().enumerate() {
        println!("{}. {}", index + 1, step.label);
        if !step.sub_label.is_empty() {
            println!("   {}", step.sub_label);
        }
        if !step.detail.is_empty() {
            println!("   {}", step.detail);
        }
    }
}
