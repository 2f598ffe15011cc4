//! Clap argument definitions for the `sift` CLI.

use std::{env, path::PathBuf, process::exit};

use clap::{Args, CommandFactory, Parser, Subcommand, error::ErrorKind};

/// Top-level CLI options.
#[derive(Parser)]
#[command(name = "sift")]
#[command(about = "Extract searchable sections from a statically rendered site")]
#[command(version)]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Shared output mode flags.
#[derive(Args, Debug, Clone, Default)]
pub struct OutputArgs {
    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}

/// Arguments for `sift extract`.
#[derive(Args, Debug, Clone, Default)]
pub struct ExtractCommand {
    /// Site root containing the build output [default: current directory]
    pub root: Option<PathBuf>,

    /// Build output directory, relative to the site root [default: .next/server/app]
    #[arg(long)]
    pub output_dir: Option<String>,

    /// CSS selector for each page's content root [default: main]
    #[arg(long)]
    pub content_root: Option<String>,

    /// Stop at the first page that cannot be read
    #[arg(long)]
    pub fail_fast: bool,

    /// Sort pages by route instead of completion order
    #[arg(long)]
    pub sort: bool,

    #[command(flatten)]
    /// Output formatting flags.
    pub output: OutputArgs,
}

/// Arguments for `sift inspect`.
#[derive(Args, Debug, Clone)]
pub struct InspectCommand {
    /// HTML file to inspect
    pub file: PathBuf,

    #[command(flatten)]
    /// Output formatting flags.
    pub output: OutputArgs,
}

/// Arguments for `sift init`.
#[derive(Args, Debug, Clone, Default)]
pub struct InitCommand {
    /// Overwrite existing configuration file
    #[arg(long)]
    pub force: bool,
}

/// Supported `sift` subcommands.
#[derive(Subcommand)]
pub enum Commands {
    /// Extract sections from every page of a site
    #[command(after_help = "\
EXAMPLES:
  sift extract                          Extract the site in the current directory
  sift extract ./site --json            Print the result set as JSON
  sift extract --sort --fail-fast       Deterministic order, abort on unreadable pages
  sift extract --output-dir out         Read pages from ./out instead of .next/server/app")]
    Extract(ExtractCommand),

    /// Show how sift segments a single page
    Inspect(InspectCommand),

    /// Initialize sift configuration in current directory
    Init(InitCommand),

    /// Validate configuration and diagnose issues
    Check,

    /// Show effective configuration settings
    Config,
}

impl Commands {
    /// Returns false for commands that must run even when the configuration is invalid.
    pub fn requires_config(&self) -> bool {
        !matches!(self, Self::Init(_))
    }
}

/// Parses CLI arguments, printing a compact command list for top-level `--help`.
pub fn parse_cli() -> Cli {
    match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            if e.kind() == ErrorKind::DisplayHelp {
                let args: Vec<_> = env::args().collect();
                if args.len() <= 2 {
                    print_command_help();
                    exit(0);
                }
            }
            e.exit();
        }
    }
}

/// Prints top-level help with one line per subcommand.
fn print_command_help() {
    let cmd = Cli::command();
    let about = cmd.get_about().map(|s| s.to_string()).unwrap_or_default();

    println!("{about}");
    println!();
    println!("Usage: sift <COMMAND>");
    println!();
    println!("Commands:");

    for sub in cmd.get_subcommands() {
        let name = sub.get_name();
        if name == "help" {
            continue;
        }
        let about = sub.get_about().map(|s| s.to_string()).unwrap_or_default();
        println!("  {name:10} {about}");
    }

    println!(
        "  {:<10} Print this message or the help of the given subcommand(s)",
        "help"
    );
    println!();
    println!("Options:");
    println!("  -h, --help     Print help");
    println!("  -V, --version  Print version");
    println!();
    println!("Set SIFT_LOG (e.g. SIFT_LOG=debug) to control diagnostics on stderr.");
}
