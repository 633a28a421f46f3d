//! Resolution of file elements to resources.
use booklink_model::{
  BookRef,
  FileElement,
  Page,
  PageRef,
  ResolvedFile,
  ResourceAccess,
  ResourceRef,
  ResourceStore,
  SEPARATOR,
  join_path,
};

use crate::error::FileError;

/// The resource an element points at, before any filesystem access.
///
/// Without a book the path is taken relative to the directory of `page`.
/// With a book the path must be absolute; an unset domain then means the
/// domain of `page`.
///
/// # Errors
///
/// Returns a [`FileError`] describing the malformed reference.
pub fn target_of(
  page: &Page,
  element: &FileElement,
) -> Result<ResourceRef, FileError> {
  let page_ref = page.page_ref();
  let Some(path) = element.path() else {
    return Err(FileError::MissingPath {
      page: page_ref.clone(),
    });
  };

  let (book, base_dir) = match (element.domain(), element.book()) {
    (Some(domain), None) => {
      return Err(FileError::DomainWithoutBook {
        page:   page_ref.clone(),
        domain: domain.to_owned(),
      });
    },
    (domain, Some(book)) => {
      if !path.starts_with(SEPARATOR) {
        return Err(FileError::RelativePathInBook {
          page: page_ref.clone(),
          book: book.to_owned(),
          path: path.to_owned(),
        });
      }
      let domain = domain.or_else(|| page_ref.book().domain());
      (BookRef::new(domain.map(str::to_owned), book)?, "/")
    },
    (None, None) => (page_ref.book().clone(), page_ref.directory()),
  };

  let Some(normalized) = join_path(base_dir, path) else {
    return Err(FileError::PathAboveRoot {
      page: page_ref.clone(),
      path: path.to_owned(),
    });
  };
  Ok(PageRef::new(book, normalized)?)
}

/// Resolve `element`, which lives on `page`, exactly once.
///
/// The first call looks the resource up in `store` (sandboxed to the book,
/// tolerating a missing file) and stores the result in the element; later
/// calls return the stored result.
///
/// With a local handle, directory-ness is read from the filesystem and a
/// directory must be referenced with a trailing separator. Without one it is
/// inferred from the path alone.
///
/// # Errors
///
/// Returns [`FileError::DirectoryWithoutSlash`] for a directory referenced
/// without the trailing separator, and any error of [`target_of`] or of the
/// store.
pub fn resolve_file<'e, S>(
  store: &S,
  page: &Page,
  element: &'e FileElement,
) -> Result<&'e ResolvedFile, FileError>
where
  S: ResourceStore + ?Sized,
{
  if let Some(resolved) = element.resolved() {
    return Ok(resolved);
  }

  let resource = target_of(page, element)?;
  let file =
    store.resource_file(&resource, ResourceAccess::SANDBOXED_OPTIONAL)?;

  let is_directory = match &file {
    // Book unavailable or resource absent: go by the shape of the path.
    None => resource.is_directory_path(),
    Some(file) => {
      if file.is_directory() && !resource.is_directory_path() {
        return Err(FileError::DirectoryWithoutSlash(resource));
      }
      file.is_directory()
    },
  };

  log::debug!(
    "resolved {resource} (local: {}, directory: {is_directory})",
    file.is_some()
  );

  Ok(element.set_resolved(ResolvedFile {
    resource,
    file,
    is_directory,
  }))
}
