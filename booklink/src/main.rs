use std::io::{self, Write};

use booklink::{
  cli::{Cli, Commands},
  commands::{self, RenderOptions},
  site::build_site,
};
use booklink_config::Config;
use color_eyre::eyre::{Context, Result, bail};
use log::{LevelFilter, error, info};

fn main() -> Result<()> {
  color_eyre::install()?;

  let cli = Cli::parse_args();

  // Initialize logging first so we can log while loading the site
  env_logger::Builder::new()
    .filter_level(if cli.verbose {
      LevelFilter::Debug
    } else {
      LevelFilter::Info
    })
    .init();

  let config = Config::load(&cli.config_files)
    .wrap_err("Failed to load configuration")?;
  let site = build_site(&config).wrap_err("Failed to build site")?;
  info!(
    "Loaded {} books and {} pages",
    site.books().count(),
    site.pages().len()
  );

  let mut stdout = io::stdout().lock();
  match cli.command {
    Commands::Render {
      target,
      export,
      no_auto_last_modified,
      allow_open,
      recursive,
      context_path,
    } => {
      let options = RenderOptions {
        export,
        no_auto_last_modified,
        allow_open,
        recursive,
        context_path,
      };
      commands::render(&site, &config, &target, &options, &mut stdout)?;
    },

    Commands::HasFiles { target, recursive } => {
      let found = commands::has_files(&site, &target, recursive)?;
      writeln!(stdout, "{found}")?;
    },

    Commands::Check => {
      let failures = commands::check(&site, &config);
      if !failures.is_empty() {
        for failure in &failures {
          error!("{}: {}", failure.page, failure.error);
        }
        bail!("{} file links failed to resolve", failures.len());
      }
      info!("All file links resolve");
    },
  }

  stdout.flush()?;
  Ok(())
}
