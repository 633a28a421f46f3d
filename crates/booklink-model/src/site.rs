//! An in-memory site: registered books and their captured pages.
use std::{
  collections::HashMap,
  sync::Arc,
};

use crate::{
  book::{Book, BookRef, PageRef},
  error::ModelError,
  page::{BookResolver, CaptureLevel, Page, PageCapture},
  resource::{
    ResourceAccess,
    ResourceFile,
    ResourceRef,
    ResourceStore,
    resource_below_root,
  },
};

/// Books and pages known to this deployment.
///
/// Immutable once built; safe to share between request threads.
#[derive(Debug, Default, Clone)]
pub struct Site {
  books: HashMap<BookRef, Book>,
  pages: HashMap<PageRef, Arc<Page>>,
}

impl Site {
  #[must_use]
  pub fn new() -> Self {
    Self::default()
  }

  /// Register a book. A later registration of the same book replaces the
  /// earlier one.
  pub fn add_book(&mut self, book: Book) {
    if let Some(previous) = self.books.insert(book.book_ref().clone(), book) {
      log::debug!("replaced book {}", previous.book_ref());
    }
  }

  /// Add a page.
  ///
  /// # Errors
  ///
  /// Pages can only be added to registered books; otherwise this returns the
  /// page reference back as [`ModelError::PageNotFound`].
  pub fn add_page(&mut self, page: Page) -> Result<(), ModelError> {
    if !self.books.contains_key(page.page_ref().book()) {
      return Err(ModelError::PageNotFound(page.page_ref().clone()));
    }
    self.pages.insert(page.page_ref().clone(), Arc::new(page));
    Ok(())
  }

  #[must_use]
  pub fn page(&self, page_ref: &PageRef) -> Option<&Arc<Page>> {
    self.pages.get(page_ref)
  }

  /// All pages, ordered by reference.
  #[must_use]
  pub fn pages(&self) -> Vec<&Arc<Page>> {
    let mut pages: Vec<_> = self.pages.values().collect();
    pages.sort_by(|a, b| a.page_ref().cmp(b.page_ref()));
    pages
  }

  pub fn books(&self) -> impl Iterator<Item = &Book> {
    self.books.values()
  }
}

impl PageCapture for Site {
  // Pages are held fully captured, so every level is served by the same page.
  fn capture_page(
    &self,
    page_ref: &PageRef,
    _level: CaptureLevel,
  ) -> Result<Arc<Page>, ModelError> {
    self
      .pages
      .get(page_ref)
      .cloned()
      .ok_or_else(|| ModelError::PageNotFound(page_ref.clone()))
  }
}

impl BookResolver for Site {
  fn book(&self, book_ref: &BookRef) -> Option<&Book> {
    self.books.get(book_ref)
  }
}

impl ResourceStore for Site {
  fn resource_file(
    &self,
    resource: &ResourceRef,
    access: ResourceAccess,
  ) -> Result<Option<ResourceFile>, ModelError> {
    let Some(book) = self.books.get(resource.book()) else {
      log::debug!("book {} is not available", resource.book());
      return Ok(None);
    };
    let Some(source_root) = book.source_root() else {
      log::debug!("book {} has no local source", resource.book());
      return Ok(None);
    };
    resource_below_root(source_root, resource, access)
  }
}
