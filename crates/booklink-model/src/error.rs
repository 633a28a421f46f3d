use std::path::PathBuf;

use thiserror::Error;

use crate::book::PageRef;

/// Errors raised by the book registry, page graph and resource access.
#[derive(Debug, Error)]
pub enum ModelError {
  /// Book names are root-relative and must start with `/`.
  #[error("book name must start with a slash (/): `{0}`")]
  InvalidBookName(String),

  /// Paths inside a book must start with `/`.
  #[error("path must start with a slash (/): `{0}`")]
  InvalidPath(String),

  /// A page edge points at a page the graph does not know.
  #[error("page not found: {0}")]
  PageNotFound(PageRef),

  /// The reference would leave the book's source root.
  #[error("resource is outside of its book's source root: {0}")]
  OutsideRoot(PageRef),

  /// The resource does not exist and the caller did not tolerate that.
  #[error("resource not found: {0}")]
  ResourceMissing(PageRef),

  /// Filesystem metadata could not be read.
  #[error("failed to read metadata of `{path}`: {source}")]
  Io {
    path:   PathBuf,
    #[source]
    source: std::io::Error,
  },
}
