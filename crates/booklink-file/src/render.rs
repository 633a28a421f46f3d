//! Rendering of file elements as links.
use std::fmt::{self, Write};

use booklink_config::LinkConfig;
use booklink_model::{
  FileElement,
  Page,
  ResolvedFile,
  ResourceStore,
  SEPARATOR,
};
use html_escape::{encode_double_quoted_attribute, encode_text};

use crate::{
  capability::CapabilityGate,
  encode::{approximate_size, encode_last_modified, encode_url_path},
  error::{CapabilityError, FileError},
  host::LinkHost,
  request::Request,
  resolve::resolve_file,
};

/// Where a rendered link points.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Target {
  /// The local file itself; the reader's machine opens it.
  Local(String),
  /// The served resource, possibly with a cache-busting parameter.
  Served(String),
}

/// Resolves and renders file elements.
///
/// Owns the resource store, the capability gate and the link policy for the
/// lifetime of the application; everything request-specific is passed per
/// call.
#[derive(Debug)]
pub struct FileLinker<S> {
  store:  S,
  gate:   CapabilityGate,
  config: LinkConfig,
}

impl<S: ResourceStore> FileLinker<S> {
  #[must_use]
  pub const fn new(store: S, gate: CapabilityGate, config: LinkConfig) -> Self {
    Self {
      store,
      gate,
      config,
    }
  }

  /// Whether local opening is allowed for `request`.
  ///
  /// # Errors
  ///
  /// See [`CapabilityGate::is_open_allowed`].
  pub fn is_open_allowed(
    &self,
    request: &dyn Request,
  ) -> Result<bool, CapabilityError> {
    self.gate.is_open_allowed(request)
  }

  /// Resolve `element` on `page`. See [`resolve_file`].
  ///
  /// # Errors
  ///
  /// See [`resolve_file`].
  pub fn resolve<'e>(
    &self,
    page: &Page,
    element: &'e FileElement,
  ) -> Result<&'e ResolvedFile, FileError> {
    resolve_file(&self.store, page, element)
  }

  /// Resolve `element` and, when `out` is given, write its link markup.
  ///
  /// Resolution always happens first, so a metadata-only pass (`out` is
  /// `None`) still validates the reference. Nothing is written for an
  /// element that fails to resolve.
  ///
  /// # Errors
  ///
  /// Returns resolution errors, capability failures and write failures.
  pub fn write_file(
    &self,
    request: &dyn Request,
    host: &dyn LinkHost,
    page: &Page,
    element: &FileElement,
    out: Option<&mut dyn Write>,
  ) -> Result<(), FileError> {
    let resolved = self.resolve(page, element)?;
    let Some(out) = out else {
      return Ok(());
    };

    // Build into a buffer so a failure leaves `out` untouched.
    let mut markup = String::new();
    self.write_link(request, host, page, element, resolved, &mut markup)?;
    out.write_str(&markup)?;
    Ok(())
  }

  /// Resolve and render `element` into a new string.
  ///
  /// # Errors
  ///
  /// See [`Self::write_file`].
  pub fn render_file(
    &self,
    request: &dyn Request,
    host: &dyn LinkHost,
    page: &Page,
    element: &FileElement,
  ) -> Result<String, FileError> {
    let mut out = String::new();
    self.write_file(request, host, page, element, Some(&mut out))?;
    Ok(out)
  }

  fn write_link(
    &self,
    request: &dyn Request,
    host: &dyn LinkHost,
    page: &Page,
    element: &FileElement,
    resolved: &ResolvedFile,
    out: &mut String,
  ) -> Result<(), FileError> {
    let body = element.body();
    let allowed = self.gate.is_open_allowed(request)?;
    let target = self.target(request, resolved, allowed);

    out.push_str("<a");
    if let Some(id) = element.id() {
      let id = host.ref_id_in_page(page.page_ref(), id);
      write!(out, " id=\"{}\"", encode_double_quoted_attribute(&id))?;
    }
    if body.is_none()
      && let Some(class) = host.link_css_class(FileElement::KIND)
      && !class.is_empty()
    {
      write!(out, " class=\"{}\"", encode_double_quoted_attribute(&class))?;
    }

    match &target {
      Target::Local(uri) => {
        write!(out, " href=\"{}\"", encode_double_quoted_attribute(uri))?;
        let onclick = self.open_file_script(resolved)?;
        write!(
          out,
          " onclick=\"{}\"",
          encode_double_quoted_attribute(&onclick)
        )?;
      },
      Target::Served(url) => {
        let url = request.encode_url(url);
        write!(out, " href=\"{}\"", encode_double_quoted_attribute(&url))?;
      },
    }
    out.push('>');

    if let Some(body) = body {
      out.push_str(body);
      out.push_str("</a>");
      return Ok(());
    }

    match &resolved.file {
      None => host.write_broken_path(&resolved.resource, out)?,
      Some(file) => {
        out.push_str(&encode_text(file.name()));
        if resolved.is_directory {
          out.push(SEPARATOR);
        }
      },
    }
    out.push_str("</a>");

    if let Some(file) = &resolved.file
      && !resolved.is_directory
    {
      write!(out, " ({})", encode_text(&approximate_size(file.len())))?;
    }
    Ok(())
  }

  /// Pick the link target. Export mode never points at the local
  /// filesystem.
  fn target(
    &self,
    request: &dyn Request,
    resolved: &ResolvedFile,
    allowed: bool,
  ) -> Target {
    if let Some(file) = &resolved.file
      && allowed
      && !request.is_exporting()
    {
      return Target::Local(file.uri());
    }

    let path = format!(
      "{}{}",
      request.context_path(),
      resolved.resource.servlet_path()
    );

    let auto_last_modified = request
      .header(self.config.last_modified_header())
      .is_none_or(|value| !value.eq_ignore_ascii_case("false"));

    match &resolved.file {
      Some(file) if !resolved.is_directory && auto_last_modified => {
        let last_modified = encode_last_modified(file.last_modified());
        Target::Served(encode_url_path(
          &path,
          Some((
            self.config.last_modified_parameter(),
            last_modified.as_str(),
          )),
        ))
      },
      _ => Target::Served(encode_url_path(&path, None)),
    }
  }

  /// Client-side call asking the open-file extension to open the resource.
  fn open_file_script(
    &self,
    resolved: &ResolvedFile,
  ) -> Result<String, fmt::Error> {
    let book = resolved.resource.book();
    let quote = |value: Option<&str>| {
      serde_json::to_string(&value).map_err(|_| fmt::Error)
    };
    Ok(format!(
      "{}({}, {}, {}); return false;",
      self.config.open_file_function(),
      quote(book.domain())?,
      quote(Some(book.name()))?,
      quote(Some(resolved.resource.path()))?,
    ))
  }
}

#[cfg(test)]
mod tests {
  use std::sync::Arc;

  use booklink_model::{Book, BookRef, PageRef, Site};

  use super::*;
  use crate::{capability::StaticCapability, request::BasicRequest};

  struct NoClasses;

  impl LinkHost for NoClasses {
    fn link_css_class(&self, _kind: &str) -> Option<String> {
      None
    }
  }

  fn remote_site() -> (Site, Page) {
    let book = BookRef::new(None, "/remote").expect("valid book");
    let mut site = Site::new();
    site.add_book(Book::new(book.clone(), None));
    let page = Page::new(PageRef::new(book, "/index").expect("valid"), "Index");
    (site, page)
  }

  #[test]
  fn test_metadata_only_pass_resolves_without_output() {
    let (site, page) = remote_site();
    let linker = FileLinker::new(
      &site,
      CapabilityGate::absent(),
      LinkConfig::default(),
    );
    let element = FileElement::new("docs/");

    linker
      .write_file(&BasicRequest::new(), &NoClasses, &page, &element, None)
      .expect("resolves");
    assert!(element.resolved().is_some());
  }

  #[test]
  fn test_onclick_quotes_arguments() {
    let (site, page) = remote_site();
    let linker = FileLinker::new(
      &site,
      CapabilityGate::with_capability(Arc::new(StaticCapability(true))),
      LinkConfig::default(),
    );
    let element = FileElement::new("/a \"b\".txt");
    let resolved = linker.resolve(&page, &element).expect("resolves");

    let script = linker.open_file_script(resolved).expect("script");
    assert_eq!(
      script,
      r#"booklink.openFile(null, "/remote", "/a \"b\".txt"); return false;"#
    );
  }

  #[test]
  fn test_served_target_without_local_file() {
    let (site, page) = remote_site();
    let linker = FileLinker::new(
      &site,
      CapabilityGate::absent(),
      LinkConfig::default(),
    );
    let element = FileElement::new("a b.txt");
    let resolved = linker.resolve(&page, &element).expect("resolves");
    let request = BasicRequest::new().with_context_path("/app");

    assert_eq!(
      linker.target(&request, resolved, true),
      Target::Served("/app/remote/a%20b.txt".into())
    );
  }
}
