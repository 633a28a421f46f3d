//! The work behind each subcommand.
use std::io::Write;

use booklink_config::Config;
use booklink_file::{
  BasicRequest,
  CapabilityGate,
  FileError,
  FileLinker,
  LinkHost,
  has_visible_file,
};
use booklink_model::{
  BookResolver,
  CaptureLevel,
  Element,
  Page,
  PageRef,
  Site,
  traverse_pages_any_order,
};
use color_eyre::eyre::{Context, Result};
use log::{debug, info};

use crate::{
  cli::PageArgs,
  host::{CliHost, capability_gate},
  site::find_page,
};

/// Options of the `render` command.
#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
  pub export:                bool,
  pub no_auto_last_modified: bool,
  pub allow_open:            bool,
  pub recursive:             bool,
  pub context_path:          String,
}

/// Write the visible file links of the page named by `args` to `out`, one
/// per line.
///
/// With `recursive`, every page reachable through child edges into
/// resolvable books follows, each introduced by an HTML comment naming it.
///
/// # Errors
///
/// Fails when the page cannot be found, a reachable page cannot be captured,
/// a file element does not resolve, or writing fails.
pub fn render(
  site: &Site,
  config: &Config,
  args: &PageArgs,
  options: &RenderOptions,
  out: &mut impl Write,
) -> Result<()> {
  let root = find_page(site, args)?;
  let linker = FileLinker::new(
    site,
    capability_gate(options.allow_open),
    config.link.clone(),
  );

  let mut request = BasicRequest::new()
    .exporting(options.export)
    .with_context_path(options.context_path.as_str());
  if options.no_auto_last_modified {
    request =
      request.with_header(config.link.last_modified_header(), "false");
  }

  let host = CliHost::new(&config.link);
  if !options.recursive {
    return render_page(&linker, &request, &host, &root, out);
  }

  let pages = collect_tree(site, &root)?;
  info!("Rendering {} pages below {}", pages.len(), root.page_ref());
  for (index, page) in pages.iter().enumerate() {
    writeln!(out, "<!-- {} -->", page.page_ref())?;
    render_page(&linker, &request, &host.for_page(index + 1), page, out)?;
  }
  Ok(())
}

fn render_page(
  linker: &FileLinker<&Site>,
  request: &BasicRequest,
  host: &dyn LinkHost,
  page: &Page,
  out: &mut impl Write,
) -> Result<()> {
  for file in page.elements().iter().filter_map(Element::as_file) {
    if file.is_hidden() {
      debug!("Skipping hidden file element on {}", page.page_ref());
      continue;
    }
    let html =
      linker
        .render_file(request, host, page, file)
        .wrap_err_with(|| {
          format!("Failed to render file link on {}", page.page_ref())
        })?;
    writeln!(out, "{html}")?;
  }
  Ok(())
}

/// `root` followed by every page reachable from it, in walk order.
fn collect_tree(site: &Site, root: &Page) -> Result<Vec<Page>> {
  let mut pages = Vec::new();
  traverse_pages_any_order(
    site,
    root,
    CaptureLevel::Body,
    |page| {
      pages.push(page.clone());
      Ok(None::<()>)
    },
    |page| page.child_pages().iter().cloned().collect(),
    |child| site.is_resolvable(child.book()),
  )?;
  Ok(pages)
}

/// Whether the page named by `args` has a visible file element (or, with
/// `recursive`, whether any reachable page has one).
///
/// # Errors
///
/// Fails when the page cannot be found or a reachable page cannot be
/// captured.
pub fn has_files(
  site: &Site,
  args: &PageArgs,
  recursive: bool,
) -> Result<bool> {
  let page = find_page(site, args)?;
  let found = has_visible_file(site, &page, recursive)
    .wrap_err_with(|| format!("Failed to search {}", page.page_ref()))?;
  Ok(found)
}

/// A file element that failed to resolve.
#[derive(Debug)]
pub struct CheckFailure {
  pub page:  PageRef,
  pub error: FileError,
}

/// Resolve every file element of every page without rendering anything.
#[must_use]
pub fn check(site: &Site, config: &Config) -> Vec<CheckFailure> {
  let linker =
    FileLinker::new(site, CapabilityGate::absent(), config.link.clone());
  let request = BasicRequest::new();
  let host = CliHost::new(&config.link);

  let mut failures = Vec::new();
  let mut checked = 0_usize;
  for page in site.pages() {
    for file in page.elements().iter().filter_map(Element::as_file) {
      checked += 1;
      if let Err(error) = linker.write_file(&request, &host, page, file, None)
      {
        debug!("{}: {error}", page.page_ref());
        failures.push(CheckFailure {
          page: page.page_ref().clone(),
          error,
        });
      }
    }
  }

  info!(
    "Checked {checked} file links on {} pages, {} failed",
    site.pages().len(),
    failures.len()
  );
  failures
}
