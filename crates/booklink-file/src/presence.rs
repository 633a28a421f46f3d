//! Whether a page, or its subtree, has visible file references.
use booklink_model::{
  BookResolver,
  CaptureLevel,
  Element,
  ModelError,
  Page,
  PageCapture,
  PageRef,
  traverse_pages_any_order,
};

/// Whether `page` owns a file element that is not hidden.
#[must_use]
pub fn has_own_visible_file(page: &Page) -> bool {
  page
    .elements()
    .iter()
    .any(|element| matches!(element, Element::File(file) if !file.is_hidden()))
}

/// Whether `page` has a visible file element; with `recursive`, also whether
/// any page reachable through child edges has one.
///
/// Pages are captured at [`CaptureLevel::Meta`], nothing is rendered, and the
/// walk stops at the first match. Edges into books that `site` cannot
/// resolve are pruned before they are followed.
///
/// # Errors
///
/// Propagates failures to capture a reachable page.
pub fn has_visible_file<S>(
  site: &S,
  page: &Page,
  recursive: bool,
) -> Result<bool, ModelError>
where
  S: PageCapture + BookResolver + ?Sized,
{
  let found = traverse_pages_any_order(
    site,
    page,
    CaptureLevel::Meta,
    |page| Ok(has_own_visible_file(page).then_some(())),
    |page| {
      if recursive {
        page.child_pages().iter().cloned().collect()
      } else {
        Vec::new()
      }
    },
    |child: &PageRef| site.is_resolvable(child.book()),
  )?;
  Ok(found.is_some())
}
