//! The request a link is rendered for.
use std::collections::HashMap;

/// Per-request context consulted while rendering.
pub trait Request {
  /// Whether the output is being exported. Exported output never refers to
  /// the local filesystem.
  fn is_exporting(&self) -> bool;

  /// Value of a request header, matched case-insensitively.
  fn header(&self, name: &str) -> Option<&str>;

  /// Path under which the application is mounted, such as `""` or `/app`.
  fn context_path(&self) -> &str;

  /// Rewrite an already encoded URL so the session survives following it.
  fn encode_url(&self, url: &str) -> String {
    url.to_owned()
  }
}

/// A [`Request`] with fixed values.
#[derive(Debug, Clone, Default)]
pub struct BasicRequest {
  exporting:    bool,
  context_path: String,
  headers:      HashMap<String, String>,
}

impl BasicRequest {
  #[must_use]
  pub fn new() -> Self {
    Self::default()
  }

  #[must_use]
  pub const fn exporting(mut self, exporting: bool) -> Self {
    self.exporting = exporting;
    self
  }

  #[must_use]
  pub fn with_context_path(mut self, context_path: impl Into<String>) -> Self {
    self.context_path = context_path.into();
    self
  }

  #[must_use]
  pub fn with_header(
    mut self,
    name: impl AsRef<str>,
    value: impl Into<String>,
  ) -> Self {
    self
      .headers
      .insert(name.as_ref().to_ascii_lowercase(), value.into());
    self
  }
}

impl Request for BasicRequest {
  fn is_exporting(&self) -> bool {
    self.exporting
  }

  fn header(&self, name: &str) -> Option<&str> {
    self
      .headers
      .get(&name.to_ascii_lowercase())
      .map(String::as_str)
  }

  fn context_path(&self) -> &str {
    &self.context_path
  }
}
