//! Building the page model from the configured site description.
use std::sync::Arc;

use booklink_config::{Config, ElementConfig, PageConfig};
use booklink_model::{
  Book,
  BookRef,
  FileElement,
  GenericElement,
  Page,
  PageRef,
  Site,
};
use log::debug;

use crate::{cli::PageArgs, error::SiteError};

/// Build a [`Site`] holding every configured book and page.
///
/// Child references without a book point into the book of the page that
/// lists them; without a domain they use that page's domain.
///
/// # Errors
///
/// Returns [`SiteError::Model`] for invalid book names or page paths, and
/// for pages of books that are not configured.
pub fn build_site(config: &Config) -> Result<Site, SiteError> {
  let mut site = Site::new();

  for book in &config.books {
    let book_ref = BookRef::new(book.domain.clone(), book.name.as_str())?;
    debug!(
      "Registering book {book_ref} (source: {})",
      book
        .source_root
        .as_ref()
        .map_or_else(|| "none".to_owned(), |root| root.display().to_string())
    );
    site.add_book(Book::new(book_ref, book.source_root.clone()));
  }

  for page in &config.pages {
    site.add_page(build_page(page)?)?;
  }

  Ok(site)
}

fn build_page(config: &PageConfig) -> Result<Page, SiteError> {
  let book = BookRef::new(config.domain.clone(), config.book.as_str())?;
  let mut page = Page::new(
    PageRef::new(book.clone(), config.path.as_str())?,
    config.title.as_str(),
  );

  for child in &config.children {
    let child_book = match &child.book {
      Some(name) => BookRef::new(
        child.domain.clone().or_else(|| book.domain().map(str::to_owned)),
        name.as_str(),
      )?,
      None => book.clone(),
    };
    page = page.with_child(PageRef::new(child_book, child.path.as_str())?);
  }

  for element in &config.elements {
    page = match element {
      ElementConfig::File {
        id,
        hidden,
        domain,
        book,
        path,
        body,
      } => {
        let mut file = FileElement::new(path.as_str()).with_hidden(*hidden);
        if let Some(id) = id {
          file = file.with_id(id.as_str());
        }
        if let Some(domain) = domain {
          file = file.with_domain(domain.as_str());
        }
        if let Some(book) = book {
          file = file.with_book(book.as_str());
        }
        if let Some(body) = body {
          file = file.with_body(body.as_str());
        }
        page.with_element(file)
      },
      ElementConfig::Other { kind, id } => {
        page.with_element(GenericElement {
          kind: kind.clone(),
          id:   id.clone(),
        })
      },
    };
  }

  Ok(page)
}

/// Find the page named by `args`.
///
/// # Errors
///
/// Returns [`SiteError::AmbiguousBook`] when no book is given and the site
/// does not have exactly one, and [`SiteError::UnknownPage`] when the page
/// is not part of the site.
pub fn find_page(site: &Site, args: &PageArgs) -> Result<Arc<Page>, SiteError> {
  let book = match &args.book {
    Some(name) => BookRef::new(args.domain.clone(), name.as_str())?,
    None => {
      let mut books = site.books();
      match (books.next(), books.next()) {
        (Some(only), None) => only.book_ref().clone(),
        _ => return Err(SiteError::AmbiguousBook(site.books().count())),
      }
    },
  };

  let page_ref = PageRef::new(book, args.page.as_str())?;
  site
    .page(&page_ref)
    .cloned()
    .ok_or(SiteError::UnknownPage(page_ref))
}
