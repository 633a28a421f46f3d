use std::collections::HashMap;

use serde::{Deserialize, Serialize};

const DEFAULT_LAST_MODIFIED_PARAMETER: &str = "lastModified";
const DEFAULT_LAST_MODIFIED_HEADER: &str = "X-Auto-Last-Modified";
const DEFAULT_OPEN_FILE_FUNCTION: &str = "booklink.openFile";

/// Configuration for rendering file links.
///
/// Scalar settings are kept as set by the configuration files, so a later
/// file can restore a default an earlier one changed. Read them through the
/// accessors, which fill in the defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LinkConfig {
  /// Query parameter carrying the encoded last-modified time of a file.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub last_modified_parameter: Option<String>,

  /// Request header that turns off the automatic last-modified parameter
  /// when its value is `false` (any case).
  #[serde(skip_serializing_if = "Option::is_none")]
  pub last_modified_header: Option<String>,

  /// Client-side function asked to open a file locally. Called with the
  /// domain, book and path of the file.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub open_file_function: Option<String>,

  /// CSS class per element kind, applied to generated link labels.
  ///
  /// An empty class disables the class for that kind.
  pub link_classes: HashMap<String, String>,
}

impl Default for LinkConfig {
  fn default() -> Self {
    Self {
      last_modified_parameter: None,
      last_modified_header:    None,
      open_file_function:      None,
      link_classes:            HashMap::from([(
        "file".to_owned(),
        "file-link".to_owned(),
      )]),
    }
  }
}

impl LinkConfig {
  #[must_use]
  pub fn last_modified_parameter(&self) -> &str {
    self
      .last_modified_parameter
      .as_deref()
      .unwrap_or(DEFAULT_LAST_MODIFIED_PARAMETER)
  }

  #[must_use]
  pub fn last_modified_header(&self) -> &str {
    self
      .last_modified_header
      .as_deref()
      .unwrap_or(DEFAULT_LAST_MODIFIED_HEADER)
  }

  #[must_use]
  pub fn open_file_function(&self) -> &str {
    self
      .open_file_function
      .as_deref()
      .unwrap_or(DEFAULT_OPEN_FILE_FUNCTION)
  }

  /// CSS class for `kind`, if one is configured and non-empty.
  #[must_use]
  pub fn link_class(&self, kind: &str) -> Option<&str> {
    self
      .link_classes
      .get(kind)
      .map(String::as_str)
      .filter(|class| !class.trim().is_empty())
  }

  /// Merge `other` over `self`. Scalars set in `other` replace those of
  /// `self`, even when set to their default; class maps are extended.
  pub fn merge(&mut self, other: Self) {
    if other.last_modified_parameter.is_some() {
      self.last_modified_parameter = other.last_modified_parameter;
    }
    if other.last_modified_header.is_some() {
      self.last_modified_header = other.last_modified_header;
    }
    if other.open_file_function.is_some() {
      self.open_file_function = other.open_file_function;
    }
    self.link_classes.extend(other.link_classes);
  }
}
