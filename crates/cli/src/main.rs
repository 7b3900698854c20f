use std::path::PathBuf;

use anyhow::Result;
use bmd_build_core::pipeline_manager::{PipelineManager, PipelineManagerConfig};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

/// bmd-build - The Bootstrap Material Design build pipeline
#[derive(Parser)]
#[command(name = "bmd-build")]
#[command(about = "Lint, compile, bundle and minify Bootstrap Material Design")]
#[command(version)]
struct Cli {
    /// Path to the workspace root (defaults to current directory)
    #[arg(short, long, default_value = ".")]
    workspace: PathBuf,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Print the actions of every task instead of performing them
    #[arg(long, global = true)]
    dry_run: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List series and tasks
    List,
    /// Show what a series or task would do without running it
    Plan {
        /// Series or task name
        #[arg(default_value = "default")]
        target: String,
    },
    /// Run series or tasks, one after another
    Run {
        /// Series or task names
        #[arg(default_value = "default")]
        targets: Vec<String>,
    },
    /// Print the step ordering of a series as Graphviz DOT
    Graph {
        /// Series or task name
        #[arg(default_value = "default")]
        target: String,
    },
    /// Re-run a series or task whenever its sources change
    Watch {
        /// Series or task name
        #[arg(default_value = "default")]
        target: String,
    },
    /// Print the JSON schema of bmd-build.yml
    Schema,
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Commands::Schema = cli.command {
        return commands::schema::execute();
    }

    // Initialize pipeline manager with all business logic
    let manager = PipelineManager::new(PipelineManagerConfig {
        workspace_root: cli.workspace,
        dry_run: cli.dry_run,
    })
    .map_err(|e| anyhow::anyhow!("Failed to initialize pipeline: {}", e))?;

    // Execute command (CLI layer only handles presentation)
    match cli.command {
        Commands::List => commands::list::execute(&manager),
        Commands::Plan { target } => commands::plan::execute(&manager, &target),
        Commands::Run { targets } => commands::run::execute(&manager, &targets).await,
        Commands::Graph { target } => commands::graph::execute(&manager, &target),
        Commands::Watch { target } => commands::watch::execute(&manager, &target).await,
        Commands::Schema => commands::schema::execute(),
    }
}
