//! Serialized description of books and pages.
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// A book available to the site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookConfig {
  /// Domain of the book. Omitted for the default domain.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub domain: Option<String>,

  /// Root-relative book name, such as `/docs`.
  pub name: String,

  /// Local directory holding the book's resources. Relative paths are
  /// resolved against the directory of the configuration file. Books
  /// without a source root have no locally reachable files.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub source_root: Option<PathBuf>,
}

/// Reference to a page from another page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRefConfig {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub domain: Option<String>,

  /// Book of the page; defaults to the book of the referring page.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub book: Option<String>,

  pub path: String,
}

/// A page of the site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageConfig {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub domain: Option<String>,

  pub book: String,

  pub path: String,

  #[serde(default)]
  pub title: String,

  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  pub children: Vec<PageRefConfig>,

  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  pub elements: Vec<ElementConfig>,
}

/// An element of a page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ElementConfig {
  /// A file reference.
  File {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    id:     Option<String>,
    #[serde(default)]
    hidden: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    domain: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    book:   Option<String>,
    path:   String,
    /// Already rendered markup replacing the generated label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    body:   Option<String>,
  },

  /// Any other element.
  Other {
    kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    id:   Option<String>,
  },
}
