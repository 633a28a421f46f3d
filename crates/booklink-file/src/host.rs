//! Presentation policy supplied by the host application.
use std::fmt;

use booklink_config::LinkConfig;
use booklink_model::PageRef;

/// Presentation decisions the host makes for links.
pub trait LinkHost {
  /// CSS class for generated links of the given element kind. `None` or an
  /// empty string means no class.
  fn link_css_class(&self, kind: &str) -> Option<String>;

  /// Id to emit for `id` on `page`. Hosts aggregating several pages into one
  /// document prefix ids here so fragments stay unique.
  fn ref_id_in_page(&self, _page: &PageRef, id: &str) -> String {
    id.to_owned()
  }

  /// Write the label for a reference that could not be resolved locally.
  ///
  /// # Errors
  ///
  /// Propagates write failures.
  fn write_broken_path(
    &self,
    target: &PageRef,
    out: &mut dyn fmt::Write,
  ) -> fmt::Result {
    out.write_char('¿')?;
    out.write_str(&html_escape::encode_text(&target.to_string()))?;
    out.write_char('?')
  }
}

/// [`LinkHost`] driven by the `link_classes` table of a [`LinkConfig`].
#[derive(Debug, Clone, Copy)]
pub struct ClassPolicy<'a> {
  config: &'a LinkConfig,
}

impl<'a> ClassPolicy<'a> {
  #[must_use]
  pub const fn new(config: &'a LinkConfig) -> Self {
    Self { config }
  }
}

impl LinkHost for ClassPolicy<'_> {
  fn link_css_class(&self, kind: &str) -> Option<String> {
    self.config.link_class(kind).map(str::to_owned)
  }
}
