//! Host-side wiring: presentation policy and the open-file capability.
use std::{fmt, sync::Arc};

use booklink_config::LinkConfig;
use booklink_file::{CapabilityGate, ClassPolicy, LinkHost, StaticCapability};
use booklink_model::PageRef;

/// [`LinkHost`] for command line output.
///
/// Classes come from the link configuration. When several pages are
/// rendered into one document, ids are prefixed with the page's position so
/// they stay unique.
#[derive(Debug, Clone, Copy)]
pub struct CliHost<'a> {
  classes:    ClassPolicy<'a>,
  page_index: Option<usize>,
}

impl<'a> CliHost<'a> {
  #[must_use]
  pub const fn new(config: &'a LinkConfig) -> Self {
    Self {
      classes:    ClassPolicy::new(config),
      page_index: None,
    }
  }

  /// Host for the `index`th page of an aggregated document.
  #[must_use]
  pub const fn for_page(self, index: usize) -> Self {
    Self {
      page_index: Some(index),
      ..self
    }
  }
}

impl LinkHost for CliHost<'_> {
  fn link_css_class(&self, kind: &str) -> Option<String> {
    self.classes.link_css_class(kind)
  }

  fn ref_id_in_page(&self, page: &PageRef, id: &str) -> String {
    match self.page_index {
      Some(index) => format!("page{index}-{id}"),
      None => self.classes.ref_id_in_page(page, id),
    }
  }

  fn write_broken_path(
    &self,
    target: &PageRef,
    out: &mut dyn fmt::Write,
  ) -> fmt::Result {
    self.classes.write_broken_path(target, out)
  }
}

/// Capability gate for this process, wired at startup. The command line has
/// no desktop extension to look up; `--allow-open` stands in for an
/// installed one.
#[must_use]
pub fn capability_gate(allow_open: bool) -> CapabilityGate {
  if allow_open {
    CapabilityGate::with_capability(Arc::new(StaticCapability(true)))
  } else {
    CapabilityGate::absent()
  }
}
