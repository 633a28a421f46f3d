//! Book and page addressing.
//!
//! A book is a named collection of pages and resources, optionally scoped by
//! a domain. Every page or resource inside a book is addressed by a
//! [`PageRef`]: the book plus a path that starts with [`SEPARATOR`].
use std::{fmt, path::PathBuf};

use crate::error::ModelError;

/// Path separator used by book names and paths.
pub const SEPARATOR: char = '/';

/// Identifies a book: an optional domain (`None` is the default domain) and a
/// root-relative book name such as `/docs`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BookRef {
  domain: Option<String>,
  name:   String,
}

impl BookRef {
  /// Create a book reference.
  ///
  /// # Errors
  ///
  /// Returns [`ModelError::InvalidBookName`] when `name` does not start with
  /// a slash.
  pub fn new(
    domain: Option<String>,
    name: impl Into<String>,
  ) -> Result<Self, ModelError> {
    let name = name.into();
    if !name.starts_with(SEPARATOR) {
      return Err(ModelError::InvalidBookName(name));
    }
    let domain = domain.filter(|d| !d.trim().is_empty());
    Ok(Self { domain, name })
  }

  #[must_use]
  pub fn domain(&self) -> Option<&str> {
    self.domain.as_deref()
  }

  #[must_use]
  pub fn name(&self) -> &str {
    &self.name
  }

  /// Prefix contributed by this book to servlet paths. The root book `/`
  /// contributes nothing.
  fn path_prefix(&self) -> &str {
    if self.name == "/" { "" } else { &self.name }
  }
}

impl fmt::Display for BookRef {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match &self.domain {
      Some(domain) => write!(f, "{domain}:{}", self.name),
      None => f.write_str(&self.name),
    }
  }
}

/// A book plus a path within it. Used for pages and, through
/// [`ResourceRef`](crate::ResourceRef), for resources.
///
/// A path ending in [`SEPARATOR`] denotes a directory.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PageRef {
  book: BookRef,
  path: String,
}

impl PageRef {
  /// Create a page reference.
  ///
  /// # Errors
  ///
  /// Returns [`ModelError::InvalidPath`] when `path` does not start with a
  /// slash.
  pub fn new(
    book: BookRef,
    path: impl Into<String>,
  ) -> Result<Self, ModelError> {
    let path = path.into();
    if !path.starts_with(SEPARATOR) {
      return Err(ModelError::InvalidPath(path));
    }
    Ok(Self { book, path })
  }

  #[must_use]
  pub const fn book(&self) -> &BookRef {
    &self.book
  }

  #[must_use]
  pub fn path(&self) -> &str {
    &self.path
  }

  /// Whether the path is shaped like a directory (ends in the separator).
  #[must_use]
  pub fn is_directory_path(&self) -> bool {
    self.path.ends_with(SEPARATOR)
  }

  /// Path of this page as served: the book name followed by the path.
  #[must_use]
  pub fn servlet_path(&self) -> String {
    format!("{}{}", self.book.path_prefix(), self.path)
  }

  /// Directory containing this page, always ending in the separator.
  #[must_use]
  pub fn directory(&self) -> &str {
    self
      .path
      .rfind(SEPARATOR)
      .map_or("/", |idx| &self.path[..=idx])
  }

  /// Path segments below the book root, with the trailing separator dropped.
  pub fn segments(&self) -> impl Iterator<Item = &str> {
    self.path.split(SEPARATOR).filter(|s| !s.is_empty())
  }

  /// Relative filesystem path of this reference below a book's source root.
  #[must_use]
  pub fn relative_fs_path(&self) -> PathBuf {
    self.segments().collect()
  }
}

impl fmt::Display for PageRef {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if let Some(domain) = self.book.domain() {
      write!(f, "{domain}:")?;
    }
    write!(f, "{}", self.servlet_path())
  }
}

/// Resolve `path` against `base_dir` (which ends in the separator) and
/// normalize `.` and `..` segments.
///
/// Absolute paths are only normalized. Returns `None` when the path climbs
/// above the book root. A trailing separator on `path` is kept.
#[must_use]
pub fn join_path(base_dir: &str, path: &str) -> Option<String> {
  let combined = if path.starts_with(SEPARATOR) {
    path.to_owned()
  } else {
    format!("{base_dir}{path}")
  };

  let trailing = combined.ends_with(SEPARATOR)
    || combined.ends_with("/.")
    || combined.ends_with("/..");

  let mut stack: Vec<&str> = Vec::new();
  for segment in combined.split(SEPARATOR) {
    match segment {
      "" | "." => {},
      ".." => {
        stack.pop()?;
      },
      other => stack.push(other),
    }
  }

  let mut out = String::with_capacity(combined.len());
  for segment in &stack {
    out.push(SEPARATOR);
    out.push_str(segment);
  }
  if trailing || stack.is_empty() {
    out.push(SEPARATOR);
  }
  Some(out)
}

/// A registered book.
///
/// A book without a source root is resolvable (its pages can be linked and
/// traversed) but none of its resources are reachable on the local disk.
#[derive(Debug, Clone)]
pub struct Book {
  book_ref:    BookRef,
  source_root: Option<PathBuf>,
}

impl Book {
  #[must_use]
  pub const fn new(book_ref: BookRef, source_root: Option<PathBuf>) -> Self {
    Self {
      book_ref,
      source_root,
    }
  }

  #[must_use]
  pub const fn book_ref(&self) -> &BookRef {
    &self.book_ref
  }

  #[must_use]
  pub fn source_root(&self) -> Option<&std::path::Path> {
    self.source_root.as_deref()
  }
}
