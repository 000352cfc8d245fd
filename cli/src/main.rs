//! # meshstack-cli
//!
//! Command-line tool for generating and checking MeshStack gateway
//! composition wiring.
//!
//! ## Installation
//!
//! ```bash
//! cargo install meshstack-cli
//! ```
//!
//! ## Commands
//!
//! - `mesh gen` - Scan the crate and write the generated composition unit
//! - `mesh check` - Verify the on-disk unit matches a fresh generation
//!
//! See `mesh --help` for the full command reference.

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use colored::Colorize;
use std::io;
use std::process;

mod commands;

#[derive(Parser)]
#[command(name = "mesh")]
#[command(about = "MeshStack CLI - Generate gateway composition wiring", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Enable verbose output
    #[arg(long, global = true)]
    verbose: bool,

    /// Generate shell completions
    #[arg(long, value_name = "SHELL")]
    completions: Option<Shell>,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan a crate's sources and write the generated composition unit
    Gen {
        /// Crate directory to scan (expects a src/ underneath)
        #[arg(long, default_value = ".")]
        crate_dir: String,

        /// Output path (defaults to src/composition.g.rs in the crate)
        #[arg(short, long)]
        out: Option<String>,

        /// Also write the composition manifest under .meshstack/
        #[arg(long)]
        manifest: bool,
    },

    /// Verify the on-disk unit matches a fresh generation
    Check {
        /// Crate directory to scan (expects a src/ underneath)
        #[arg(long, default_value = ".")]
        crate_dir: String,

        /// Generated unit path (defaults to src/composition.g.rs in the crate)
        #[arg(short, long)]
        out: Option<String>,
    },
}

fn main() {
    let cli = Cli::parse();

    if let Some(shell) = cli.completions {
        let mut cmd = Cli::command();
        generate(shell, &mut cmd, "mesh", &mut io::stdout());
        return;
    }

    init_tracing(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("{} {}", "Error:".red().bold(), e);
        process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    // The binary's own events carry the bin crate name as their target.
    let filter = if verbose {
        tracing_subscriber::EnvFilter::new("meshstack_compose=debug,mesh=debug")
    } else {
        tracing_subscriber::EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    match command {
        Commands::Gen {
            crate_dir,
            out,
            manifest,
        } => commands::generate::run(&crate_dir, out.as_deref(), manifest),
        Commands::Check { crate_dir, out } => commands::check::run(&crate_dir, out.as_deref()),
    }
}
