use booklink_model::{ModelError, PageRef};
use thiserror::Error;

/// Errors turning a configured site description into a model, and finding
/// pages in it.
#[derive(Debug, Error)]
pub enum SiteError {
  #[error("Invalid site description: {0}")]
  Model(#[from] ModelError),

  #[error("No book given and the site has {0} books; use --book")]
  AmbiguousBook(usize),

  #[error("Page not found: {0}")]
  UnknownPage(PageRef),
}
