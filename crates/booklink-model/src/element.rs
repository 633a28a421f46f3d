//! Elements owned by pages.
use std::sync::OnceLock;

use crate::{ResourceFile, ResourceRef};

/// An element of a page.
#[derive(Debug, Clone)]
pub enum Element {
  /// A reference to a file or directory.
  File(FileElement),
  /// Any other element. Only its kind and id matter here.
  Other(GenericElement),
}

impl Element {
  /// Kind name, used to pick per-kind presentation such as CSS classes.
  #[must_use]
  pub fn kind(&self) -> &str {
    match self {
      Self::File(_) => FileElement::KIND,
      Self::Other(other) => &other.kind,
    }
  }

  #[must_use]
  pub fn id(&self) -> Option<&str> {
    match self {
      Self::File(file) => file.id(),
      Self::Other(other) => other.id.as_deref(),
    }
  }

  #[must_use]
  pub const fn as_file(&self) -> Option<&FileElement> {
    match self {
      Self::File(file) => Some(file),
      Self::Other(_) => None,
    }
  }
}

impl From<FileElement> for Element {
  fn from(file: FileElement) -> Self {
    Self::File(file)
  }
}

impl From<GenericElement> for Element {
  fn from(other: GenericElement) -> Self {
    Self::Other(other)
  }
}

/// An element that is not a file reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenericElement {
  pub kind: String,
  pub id:   Option<String>,
}

/// Outcome of resolving a [`FileElement`].
///
/// Either all three parts are consistent or resolution failed; there is no
/// partial result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedFile {
  /// The resource inside its book.
  pub resource:     ResourceRef,
  /// The local handle, when the book is available and the resource exists.
  pub file:         Option<ResourceFile>,
  /// Directory flag: filesystem truth with a handle, path shape without.
  pub is_directory: bool,
}

/// A reference to a file or directory, attached to exactly one page.
///
/// `domain`, `book` and `path` describe the target. Without a book the
/// target lives in the enclosing page's book. The resolution slot is filled
/// once, before any output is produced.
#[derive(Debug, Clone, Default)]
pub struct FileElement {
  id:       Option<String>,
  hidden:   bool,
  domain:   Option<String>,
  book:     Option<String>,
  path:     Option<String>,
  body:     Option<String>,
  resolved: OnceLock<ResolvedFile>,
}

impl FileElement {
  /// Kind name of file elements.
  pub const KIND: &'static str = "file";

  #[must_use]
  pub fn new(path: impl Into<String>) -> Self {
    Self {
      path: Some(path.into()),
      ..Self::default()
    }
  }

  #[must_use]
  pub fn with_id(mut self, id: impl Into<String>) -> Self {
    self.id = Some(id.into());
    self
  }

  #[must_use]
  pub const fn with_hidden(mut self, hidden: bool) -> Self {
    self.hidden = hidden;
    self
  }

  #[must_use]
  pub fn with_domain(mut self, domain: impl Into<String>) -> Self {
    self.domain = Some(domain.into());
    self
  }

  #[must_use]
  pub fn with_book(mut self, book: impl Into<String>) -> Self {
    self.book = Some(book.into());
    self
  }

  /// Explicit, already rendered markup used instead of the generated label.
  #[must_use]
  pub fn with_body(mut self, body: impl Into<String>) -> Self {
    self.body = Some(body.into());
    self
  }

  #[must_use]
  pub fn id(&self) -> Option<&str> {
    self.id.as_deref()
  }

  #[must_use]
  pub const fn is_hidden(&self) -> bool {
    self.hidden
  }

  #[must_use]
  pub fn domain(&self) -> Option<&str> {
    non_blank(self.domain.as_deref())
  }

  #[must_use]
  pub fn book(&self) -> Option<&str> {
    non_blank(self.book.as_deref())
  }

  /// Trimmed path; blank paths count as absent.
  #[must_use]
  pub fn path(&self) -> Option<&str> {
    non_blank(self.path.as_deref())
  }

  /// Body markup. An empty body is the same as no body.
  #[must_use]
  pub fn body(&self) -> Option<&str> {
    self.body.as_deref().filter(|body| !body.is_empty())
  }

  /// The resolution, once it happened.
  #[must_use]
  pub fn resolved(&self) -> Option<&ResolvedFile> {
    self.resolved.get()
  }

  /// Store the resolution. The first stored value wins and is returned.
  pub fn set_resolved(&self, resolved: ResolvedFile) -> &ResolvedFile {
    self.resolved.get_or_init(|| resolved)
  }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
  value.map(str::trim).filter(|v| !v.is_empty())
}
