//! Pages and the collaborators that produce them.
use std::sync::Arc;

use indexmap::IndexSet;

use crate::{
  book::{Book, BookRef, PageRef},
  element::Element,
  error::ModelError,
};

/// How much of a page a capture materializes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CaptureLevel {
  /// Page identity, elements and edges; no element bodies are needed.
  Meta,
  /// Everything, including rendered bodies.
  Body,
}

/// A page: ordered elements plus ordered edges to child pages.
#[derive(Debug, Clone)]
pub struct Page {
  page_ref:    PageRef,
  title:       String,
  elements:    Vec<Element>,
  child_pages: IndexSet<PageRef>,
}

impl Page {
  #[must_use]
  pub fn new(page_ref: PageRef, title: impl Into<String>) -> Self {
    Self {
      page_ref,
      title: title.into(),
      elements: Vec::new(),
      child_pages: IndexSet::new(),
    }
  }

  #[must_use]
  pub fn with_element(mut self, element: impl Into<Element>) -> Self {
    self.elements.push(element.into());
    self
  }

  /// Add an edge to a child page. Duplicate edges are ignored.
  #[must_use]
  pub fn with_child(mut self, child: PageRef) -> Self {
    self.child_pages.insert(child);
    self
  }

  #[must_use]
  pub const fn page_ref(&self) -> &PageRef {
    &self.page_ref
  }

  #[must_use]
  pub fn title(&self) -> &str {
    &self.title
  }

  #[must_use]
  pub fn elements(&self) -> &[Element] {
    &self.elements
  }

  #[must_use]
  pub const fn child_pages(&self) -> &IndexSet<PageRef> {
    &self.child_pages
  }
}

/// Produces pages on demand.
pub trait PageCapture {
  /// Capture the page at `page_ref`.
  ///
  /// # Errors
  ///
  /// Returns [`ModelError::PageNotFound`] when no such page exists.
  fn capture_page(
    &self,
    page_ref: &PageRef,
    level: CaptureLevel,
  ) -> Result<Arc<Page>, ModelError>;
}

/// Resolves book references to the books available in this deployment.
pub trait BookResolver {
  /// The book, when it is known here.
  fn book(&self, book_ref: &BookRef) -> Option<&Book>;

  fn is_resolvable(&self, book_ref: &BookRef) -> bool {
    self.book(book_ref).is_some()
  }
}
