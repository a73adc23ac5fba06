//! CLI entry point for the `nika-mem` command-line tool.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

use nika_memory::cli::commands;
use nika_memory::{MemError, MemoryConfig, MemoryEngine, MemResult};

#[derive(Parser)]
#[command(
    name = "nika-mem",
    about = "Persistent namespaced memory for agent sessions"
)]
struct Cli {
    /// Project root; skips the upward search for `.claude/`
    #[arg(long, global = true)]
    root: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, global = true)]
    verbose: bool,

    /// Defaults to `stats` when omitted
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show entry counts and timestamps
    Stats,
    /// Remove expired entries
    Gc,
    /// Print the whole store
    Dump,
    /// Store a value
    Remember {
        /// Namespace, e.g. project, agent, context
        namespace: String,
        /// Key within the namespace
        key: String,
        /// Value; parsed as JSON when valid, otherwise stored as text
        value: String,
        /// Comma-separated tags
        tags: Option<String>,
        /// Time-to-live in seconds
        #[arg(long)]
        ttl: Option<u64>,
    },
    /// Fetch a value and count the access
    Recall {
        /// Namespace
        namespace: String,
        /// Key within the namespace
        key: String,
    },
    /// List entries carrying a tag
    RecallTag {
        /// Tag to look up
        tag: String,
    },
    /// List entries in a namespace
    RecallNs {
        /// Namespace
        namespace: String,
    },
    /// Delete a value
    Forget {
        /// Namespace
        namespace: String,
        /// Key within the namespace
        key: String,
    },
    /// Delete every value in a namespace
    ForgetNs {
        /// Namespace
        namespace: String,
    },
}

fn open_engine(root: Option<PathBuf>) -> MemResult<MemoryEngine> {
    let cwd = std::env::current_dir()?;
    let engine = match root {
        None => MemoryEngine::open(&cwd),
        Some(root) => {
            let config = MemoryConfig {
                root: Some(root),
                ..MemoryConfig::load_or_default(&cwd)
            };
            MemoryEngine::new(config.resolve(&cwd))
        }
    };
    Ok(engine)
}

fn run(cli: Cli) -> MemResult<()> {
    let engine = open_engine(cli.root)?;
    let stdout = std::io::stdout();
    let out = &mut stdout.lock();

    match cli.command.unwrap_or(Commands::Stats) {
        Commands::Stats => commands::cmd_stats(&engine, out),
        Commands::Gc => commands::cmd_gc(&engine, out),
        Commands::Dump => commands::cmd_dump(&engine, out),
        Commands::Remember {
            namespace,
            key,
            value,
            tags,
            ttl,
        } => commands::cmd_remember(
            &engine,
            &namespace,
            &key,
            &value,
            tags.as_deref(),
            ttl,
            out,
        ),
        Commands::Recall { namespace, key } => {
            commands::cmd_recall(&engine, &namespace, &key, out)
        }
        Commands::RecallTag { tag } => commands::cmd_recall_tag(&engine, &tag, out),
        Commands::RecallNs { namespace } => {
            commands::cmd_recall_namespace(&engine, &namespace, out)
        }
        Commands::Forget { namespace, key } => {
            commands::cmd_forget(&engine, &namespace, &key, out)
        }
        Commands::ForgetNs { namespace } => {
            commands::cmd_forget_namespace(&engine, &namespace, out)
        }
    }
}

fn main() {
    let cli = Cli::parse();

    if cli.verbose {
        env_logger::Builder::new()
            .filter_level(log::LevelFilter::Debug)
            .init();
    }

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        let code = match &e {
            MemError::Io(_) => 1,
            MemError::Serialize(_) => 2,
            MemError::Config(_) => 3,
        };
        process::exit(code);
    }
}
