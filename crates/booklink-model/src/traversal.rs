//! Page graph traversal.
use std::collections::{HashSet, VecDeque};

use crate::{
  book::PageRef,
  error::ModelError,
  page::{CaptureLevel, Page, PageCapture},
};

/// Visit the pages reachable from `root`, in no particular order, until
/// `handle` returns `Some`.
///
/// - `handle` is called once per visited page; the first `Some` stops the
///   walk and is returned.
/// - `edges` lists the pages to consider next from a page.
/// - `filter` decides, before a page is queued, whether an edge is followed.
///
/// Each page is visited at most once even when reachable through several
/// paths. The walk uses an explicit work-list, so deep graphs do not grow the
/// stack.
///
/// # Errors
///
/// Propagates errors from capturing pages and from `handle`.
pub fn traverse_pages_any_order<C, T, H, E, F>(
  capture: &C,
  root: &Page,
  level: CaptureLevel,
  mut handle: H,
  mut edges: E,
  mut filter: F,
) -> Result<Option<T>, ModelError>
where
  C: PageCapture + ?Sized,
  H: FnMut(&Page) -> Result<Option<T>, ModelError>,
  E: FnMut(&Page) -> Vec<PageRef>,
  F: FnMut(&PageRef) -> bool,
{
  let mut visited: HashSet<PageRef> = HashSet::new();
  let mut pending: VecDeque<PageRef> = VecDeque::new();

  visited.insert(root.page_ref().clone());
  if let Some(found) = handle(root)? {
    return Ok(Some(found));
  }
  enqueue(root, &mut edges, &mut filter, &mut visited, &mut pending);

  while let Some(next) = pending.pop_front() {
    let page = capture.capture_page(&next, level)?;
    if let Some(found) = handle(&page)? {
      log::debug!("traversal stopped at {next}");
      return Ok(Some(found));
    }
    enqueue(&page, &mut edges, &mut filter, &mut visited, &mut pending);
  }

  Ok(None)
}

fn enqueue<E, F>(
  page: &Page,
  edges: &mut E,
  filter: &mut F,
  visited: &mut HashSet<PageRef>,
  pending: &mut VecDeque<PageRef>,
) where
  E: FnMut(&Page) -> Vec<PageRef>,
  F: FnMut(&PageRef) -> bool,
{
  for child in edges(page) {
    if visited.contains(&child) {
      continue;
    }
    if !filter(&child) {
      log::debug!("skipping edge {} -> {child}", page.page_ref());
      continue;
    }
    visited.insert(child.clone());
    pending.push_back(child);
  }
}
