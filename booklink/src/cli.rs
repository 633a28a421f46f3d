use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Command line interface for booklink
#[derive(Parser, Debug)]
#[command(author, version, about = "Resolve, render and check file links")]
pub struct Cli {
  /// Subcommand to execute (see [`Commands`])
  #[command(subcommand)]
  pub command: Commands,

  /// Enable verbose debug logging
  #[arg(short, long, global = true)]
  pub verbose: bool,

  /// Path to configuration file(s) (TOML or JSON, can be specified multiple
  /// times). Multiple files are merged in order, with later files overriding
  /// earlier ones
  #[arg(
    short = 'c',
    long = "config-file",
    global = true,
    action = clap::ArgAction::Append
  )]
  pub config_files: Vec<PathBuf>,
}

/// The page a command starts from.
#[derive(Args, Debug, Clone)]
pub struct PageArgs {
  /// Path of the page within its book, such as `/index`.
  #[arg(short, long)]
  pub page: String,

  /// Book of the page. May be omitted when the site has a single book.
  #[arg(short, long)]
  pub book: Option<String>,

  /// Domain of the book. Omitted for the default domain.
  #[arg(short, long)]
  pub domain: Option<String>,
}

/// All supported subcommands for the booklink CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
  /// Print the rendered file links of a page.
  Render {
    #[command(flatten)]
    target: PageArgs,

    /// Render for export; links never point at the local filesystem.
    #[arg(long)]
    export: bool,

    /// Leave the last-modified parameter off served file URLs.
    #[arg(long)]
    no_auto_last_modified: bool,

    /// Allow opening files locally when not exporting.
    #[arg(long)]
    allow_open: bool,

    /// Also render every page reachable through child edges. Element ids
    /// are prefixed with the page's position in the walk.
    #[arg(short, long)]
    recursive: bool,

    /// Path the application is mounted under, such as `/app`.
    #[arg(long, default_value = "")]
    context_path: String,
  },

  /// Print whether a page has visible file links.
  HasFiles {
    #[command(flatten)]
    target: PageArgs,

    /// Also look at every page reachable through child edges.
    #[arg(short, long)]
    recursive: bool,
  },

  /// Resolve every file link of every page and report the failures.
  Check,
}

impl Cli {
  /// Parse command line arguments
  #[must_use]
  pub fn parse_args() -> Self {
    Self::parse()
  }
}
