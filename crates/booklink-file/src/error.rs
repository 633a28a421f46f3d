use std::fmt;

use booklink_model::{ModelError, PageRef};
use thiserror::Error;

/// Failures of the optional open-file capability.
#[derive(Debug, Error)]
pub enum CapabilityError {
  /// The capability exists but could not be obtained.
  #[error("failed to look up the open-file capability: {0}")]
  Lookup(String),

  /// The capability was found but failed when asked.
  #[error("open-file capability failed: {0}")]
  Invocation(String),
}

/// Errors raised while resolving or rendering a file element.
#[derive(Debug, Error)]
pub enum FileError {
  /// A locally verified directory was referenced without the trailing slash.
  #[error("References to directories must end in slash (/): {0}")]
  DirectoryWithoutSlash(PageRef),

  /// The element has no usable path.
  #[error("file element on {page} has no path")]
  MissingPath { page: PageRef },

  /// A domain was given without a book.
  #[error("file element on {page} sets domain `{domain}` without a book")]
  DomainWithoutBook { page: PageRef, domain: String },

  /// Paths into another book must be absolute.
  #[error("file element on {page}: path `{path}` in book `{book}` must start with a slash (/)")]
  RelativePathInBook {
    page: PageRef,
    book: String,
    path: String,
  },

  /// A relative path climbs above the root of its book.
  #[error("file element on {page}: path `{path}` leaves the book root")]
  PathAboveRoot { page: PageRef, path: String },

  #[error(transparent)]
  Capability(#[from] CapabilityError),

  #[error(transparent)]
  Model(#[from] ModelError),

  #[error("failed to write link markup: {0}")]
  Write(#[from] fmt::Error),
}
