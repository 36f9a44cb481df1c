//! SandQL command line entry point

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use sandql_sandbox::{practice_tasks, repl, task, OutputFormat, Sandbox, SandboxConfig};
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "sandql")]
#[command(about = "SELECT-only SQL practice sandbox", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// JSON configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Output format: table, json
    #[arg(short, long, global = true)]
    format: Option<OutputFormat>,

    /// JSON file of tables to query instead of the bundled students table
    #[arg(short, long, global = true)]
    table_file: Option<PathBuf>,

    /// Log level used when RUST_LOG is not set
    #[arg(long, global = true)]
    log_level: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run one query and print the result
    Query {
        /// SQL query
        sql: String,
    },

    /// Read queries from standard input, one per line
    Repl,

    /// Practice tasks
    Tasks {
        #[command(subcommand)]
        command: TaskCommands,
    },
}

#[derive(Subcommand)]
enum TaskCommands {
    /// List all tasks
    List,

    /// Show one task with its hint
    Show {
        /// Task id
        id: u32,
    },

    /// Grade an answer
    Check {
        /// Task id
        id: u32,

        /// Your query
        sql: String,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => SandboxConfig::from_file(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => SandboxConfig::default(),
    };
    if let Some(format) = cli.format {
        config = config.output_format(format);
    }
    if let Some(path) = &cli.table_file {
        config = config.table_file(path);
    }
    if let Some(level) = &cli.log_level {
        config = config.log_level(level);
    }

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level)),
        )
        .with_writer(std::io::stderr)
        .init();
    debug!(?config, "configuration loaded");

    let sandbox = Sandbox::new(config)?;

    match cli.command {
        Commands::Query { sql } => {
            let outcome = sandbox.query(&sql)?;
            println!("{}", sandbox.render(&outcome.result)?);
            debug!(stats = ?outcome.stats, "query stats");
        }

        Commands::Repl => {
            let stdin = std::io::stdin();
            repl::run(&sandbox, stdin.lock(), std::io::stdout())?;
        }

        Commands::Tasks { command } => match command {
            TaskCommands::List => {
                for task in practice_tasks() {
                    println!("{:>2}. [{}] {}", task.id, task.difficulty, task.title);
                }
            }

            TaskCommands::Show { id } => {
                let task = task(id)?;
                println!("Task {}: {} ({})", task.id, task.title, task.difficulty);
                println!();
                println!("{}", task.description);
                println!();
                println!("Hint: {}", task.hint);
            }

            TaskCommands::Check { id, sql } => {
                let task = task(id)?;
                let verdict = sandbox.check_task(id, &sql)?;
                println!("{}", verdict);
                if !verdict.is_correct() {
                    bail!("task {} not solved", task.id);
                }
                if !task.matches_text(&sql) {
                    println!("Reference answer: {}", task.expected_query);
                }
                println!("{}", task.explanation);
            }
        },
    }

    Ok(())
}
