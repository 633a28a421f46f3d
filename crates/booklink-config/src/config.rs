use std::{
  fs,
  path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

use crate::{
  error::ConfigError,
  link::LinkConfig,
  site::{BookConfig, PageConfig},
};

/// Configuration for booklink.
///
/// [`Config`] holds the link rendering policy and the description of the
/// books and pages of a site. Fields are loaded from one or more TOML or JSON
/// files.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
  /// How file links are rendered.
  pub link: LinkConfig,

  /// Books available to the site.
  pub books: Vec<BookConfig>,

  /// Pages of the site.
  pub pages: Vec<PageConfig>,
}

impl Config {
  /// Load configuration from a single TOML or JSON file, chosen by
  /// extension.
  ///
  /// Relative book source roots are resolved against the directory of
  /// `path`.
  ///
  /// # Errors
  ///
  /// Returns an error if the file cannot be read, has an unsupported
  /// extension, or does not parse.
  pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
    let path = path.as_ref();
    let content =
      fs::read_to_string(path).map_err(|source| {
        ConfigError::Read {
          path: path.to_path_buf(),
          source,
        }
      })?;

    let mut config: Self = match path.extension().and_then(|ext| ext.to_str())
    {
      Some(ext) => {
        match ext.to_lowercase().as_str() {
          "json" => {
            serde_json::from_str(&content).map_err(|source| {
              ConfigError::Json {
                path: path.to_path_buf(),
                source,
              }
            })?
          },
          "toml" => {
            toml::from_str(&content).map_err(|source| {
              ConfigError::Toml {
                path: path.to_path_buf(),
                source,
              }
            })?
          },
          _ => {
            return Err(ConfigError::Config(format!(
              "Unsupported config file format: {}",
              path.display()
            )));
          },
        }
      },
      None => {
        return Err(ConfigError::Config(format!(
          "Config file has no extension: {}",
          path.display()
        )));
      },
    };

    if let Some(base_dir) = path.parent() {
      config.resolve_source_roots(base_dir);
    }
    Ok(config)
  }

  /// Load and merge configuration files in order, later files extending
  /// earlier ones. Without files, a discovered `booklink.toml` or
  /// `booklink.json` in the current directory is used; failing that, the
  /// defaults.
  ///
  /// # Errors
  ///
  /// Returns an error if any file fails to load.
  pub fn load(config_files: &[PathBuf]) -> Result<Self, ConfigError> {
    let Some((first, rest)) = config_files.split_first() else {
      return match Self::find_config_file() {
        Some(discovered) => {
          log::info!("Using discovered config file: {}", discovered.display());
          Self::from_file(&discovered)
        },
        None => Ok(Self::default()),
      };
    };

    let mut merged = Self::from_file(first)?;
    for path in rest {
      merged.merge(Self::from_file(path)?);
    }

    if config_files.len() > 1 {
      log::info!("Loaded and merged {} config files", config_files.len());
    }
    Ok(merged)
  }

  /// Merge `other` into `self`: link policy is merged, books and pages are
  /// appended.
  pub fn merge(&mut self, other: Self) {
    self.link.merge(other.link);
    self.books.extend(other.books);
    self.pages.extend(other.pages);
  }

  /// Find a configuration file in the current directory.
  #[must_use]
  pub fn find_config_file() -> Option<PathBuf> {
    let current_dir = std::env::current_dir().ok()?;
    ["booklink.toml", "booklink.json", ".booklink.toml", ".booklink.json"]
      .iter()
      .map(|name| current_dir.join(name))
      .find(|candidate| candidate.exists())
  }

  /// Anchor relative source roots at `base_dir`. The result is absolute
  /// even when `base_dir` is relative or empty, as for a bare file name.
  fn resolve_source_roots(&mut self, base_dir: &Path) {
    for book in &mut self.books {
      if let Some(root) = &book.source_root
        && root.is_relative()
      {
        let joined = base_dir.join(root);
        book.source_root =
          Some(std::path::absolute(&joined).unwrap_or(joined));
      }
    }
  }
}
