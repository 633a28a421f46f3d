use std::{
  fs,
  sync::Arc,
  time::{Duration, SystemTime},
};

use booklink_config::LinkConfig;
use booklink_file::{
  BasicRequest,
  CapabilityError,
  CapabilityGate,
  ClassPolicy,
  FileError,
  FileLinker,
  LinkHost,
  OpenFileCapability,
  Request,
  StaticCapability,
};
use booklink_model::{Book, BookRef, FileElement, Page, PageRef, Site};
use tempfile::TempDir;

struct Fixture {
  _dir: TempDir,
  site: Site,
  page: Page,
}

/// Book `/docs` backed by a temporary directory holding `files/report.pdf`
/// (1536 bytes, modified at second 1_000_000) and the directory `docs/`.
/// Book `/remote` is known but has no local source.
fn fixture() -> Fixture {
  let dir = TempDir::new().expect("tempdir");
  fs::create_dir_all(dir.path().join("files")).expect("mkdir");
  fs::create_dir_all(dir.path().join("docs")).expect("mkdir");
  let report = dir.path().join("files/report.pdf");
  fs::write(&report, vec![0_u8; 1536]).expect("write");
  fs::File::options()
    .write(true)
    .open(&report)
    .expect("open")
    .set_modified(SystemTime::UNIX_EPOCH + Duration::from_secs(1_000_000))
    .expect("set mtime");

  let docs = BookRef::new(None, "/docs").expect("valid book");
  let remote = BookRef::new(None, "/remote").expect("valid book");
  let mut site = Site::new();
  site.add_book(Book::new(docs.clone(), Some(dir.path().to_path_buf())));
  site.add_book(Book::new(remote, None));

  let page = Page::new(PageRef::new(docs, "/index").expect("valid"), "Index");
  Fixture {
    _dir: dir,
    site,
    page,
  }
}

fn linker(site: &Site, gate: CapabilityGate) -> FileLinker<&Site> {
  FileLinker::new(site, gate, LinkConfig::default())
}

fn render(
  linker: &FileLinker<&Site>,
  request: &BasicRequest,
  page: &Page,
  element: &FileElement,
) -> Result<String, FileError> {
  let config = LinkConfig::default();
  linker.render_file(request, &ClassPolicy::new(&config), page, element)
}

#[test]
fn test_local_file_gets_size_and_cache_busting_parameter() {
  let f = fixture();
  let linker = linker(&f.site, CapabilityGate::absent());
  let element = FileElement::new("files/report.pdf");

  let html =
    render(&linker, &BasicRequest::new(), &f.page, &element).expect("renders");

  assert_eq!(
    html,
    r#"<a class="file-link" href="/docs/files/report.pdf?lastModified=ugi0">report.pdf</a> (1.5 KB)"#
  );
}

#[test]
fn test_header_disables_cache_busting_parameter() {
  let f = fixture();
  let linker = linker(&f.site, CapabilityGate::absent());
  let element = FileElement::new("files/report.pdf");
  let request = BasicRequest::new().with_header("X-Auto-Last-Modified", "FALSE");

  let html = render(&linker, &request, &f.page, &element).expect("renders");

  assert!(html.contains(r#"href="/docs/files/report.pdf""#));
  assert!(!html.contains("lastModified"));
}

#[test]
fn test_other_header_values_keep_cache_busting_parameter() {
  let f = fixture();
  let linker = linker(&f.site, CapabilityGate::absent());
  let element = FileElement::new("files/report.pdf");
  let request = BasicRequest::new().with_header("X-Auto-Last-Modified", "true");

  let html = render(&linker, &request, &f.page, &element).expect("renders");
  assert!(html.contains("?lastModified=ugi0"));
}

#[test]
fn test_allowed_local_open_links_to_file_uri() {
  let f = fixture();
  let linker = linker(
    &f.site,
    CapabilityGate::with_capability(Arc::new(StaticCapability(true))),
  );
  let element = FileElement::new("files/report.pdf");

  let html =
    render(&linker, &BasicRequest::new(), &f.page, &element).expect("renders");

  assert!(html.contains(r#"href="file:///"#), "{html}");
  assert!(html.contains("/files/report.pdf\""));
  assert!(html.contains(
    r#"onclick="booklink.openFile(null, &quot;/docs&quot;, &quot;/files/report.pdf&quot;); return false;""#
  ));
  assert!(html.ends_with("</a> (1.5 KB)"));
}

#[test]
fn test_export_mode_never_links_locally() {
  let f = fixture();
  let linker = linker(
    &f.site,
    CapabilityGate::with_capability(Arc::new(StaticCapability(true))),
  );
  let request = BasicRequest::new().exporting(true);

  for path in ["files/report.pdf", "docs/", "missing.txt"] {
    let element = FileElement::new(path);
    let html = render(&linker, &request, &f.page, &element).expect("renders");
    assert!(!html.contains("file:"), "{html}");
    assert!(!html.contains("onclick"), "{html}");
  }
}

#[test]
fn test_disallowed_capability_uses_served_path() {
  let f = fixture();
  let linker = linker(
    &f.site,
    CapabilityGate::with_capability(Arc::new(StaticCapability(false))),
  );
  let element = FileElement::new("files/report.pdf");

  let html =
    render(&linker, &BasicRequest::new(), &f.page, &element).expect("renders");
  assert!(html.contains(r#"href="/docs/files/report.pdf?lastModified=ugi0""#));
  assert!(!html.contains("onclick"));
}

#[test]
fn test_unreachable_book_renders_broken_reference() {
  let f = fixture();
  let linker = linker(&f.site, CapabilityGate::absent());
  let element = FileElement::new("/docs/").with_book("/remote");

  let html =
    render(&linker, &BasicRequest::new(), &f.page, &element).expect("renders");

  assert_eq!(
    html,
    r#"<a class="file-link" href="/remote/docs/">¿/remote/docs/?</a>"#
  );
  let resolved = element.resolved().expect("resolved");
  assert!(resolved.is_directory);
  assert!(resolved.file.is_none());
}

#[test]
fn test_missing_file_in_local_book_is_broken_not_an_error() {
  let f = fixture();
  let linker = linker(&f.site, CapabilityGate::absent());
  let element = FileElement::new("nope.txt");

  let html =
    render(&linker, &BasicRequest::new(), &f.page, &element).expect("renders");
  assert_eq!(
    html,
    r#"<a class="file-link" href="/docs/nope.txt">¿/docs/nope.txt?</a>"#
  );
}

#[test]
fn test_directory_without_slash_fails() {
  let f = fixture();
  let linker = linker(&f.site, CapabilityGate::absent());
  let element = FileElement::new("docs");

  let mut out = String::from("before");
  let config = LinkConfig::default();
  let err = linker
    .write_file(
      &BasicRequest::new(),
      &ClassPolicy::new(&config),
      &f.page,
      &element,
      Some(&mut out),
    )
    .expect_err("directory without slash");

  assert!(matches!(err, FileError::DirectoryWithoutSlash(_)));
  assert_eq!(
    err.to_string(),
    "References to directories must end in slash (/): /docs/docs"
  );
  assert_eq!(out, "before");
  assert!(element.resolved().is_none());
}

#[test]
fn test_directory_without_slash_fails_metadata_only_pass() {
  let f = fixture();
  let linker = linker(&f.site, CapabilityGate::absent());
  let element = FileElement::new("docs");
  let config = LinkConfig::default();

  let result = linker.write_file(
    &BasicRequest::new(),
    &ClassPolicy::new(&config),
    &f.page,
    &element,
    None,
  );
  assert!(matches!(result, Err(FileError::DirectoryWithoutSlash(_))));
}

#[test]
fn test_directory_link() {
  let f = fixture();
  let linker = linker(&f.site, CapabilityGate::absent());
  let element = FileElement::new("docs/");

  let html =
    render(&linker, &BasicRequest::new(), &f.page, &element).expect("renders");
  assert_eq!(html, r#"<a class="file-link" href="/docs/docs/">docs/</a>"#);
}

#[test]
fn test_explicit_body_is_verbatim_without_class_or_size() {
  let f = fixture();
  let linker = linker(&f.site, CapabilityGate::absent());
  let element =
    FileElement::new("files/report.pdf").with_body("<em>The report</em>");

  let html =
    render(&linker, &BasicRequest::new(), &f.page, &element).expect("renders");
  assert_eq!(
    html,
    r#"<a href="/docs/files/report.pdf?lastModified=ugi0"><em>The report</em></a>"#
  );
}

struct PrefixedIds;

impl LinkHost for PrefixedIds {
  fn link_css_class(&self, _kind: &str) -> Option<String> {
    Some(String::new())
  }

  fn ref_id_in_page(&self, _page: &PageRef, id: &str) -> String {
    format!("page1-{id}")
  }
}

#[test]
fn test_id_uses_host_scheme_and_empty_class_is_skipped() {
  let f = fixture();
  let linker = linker(&f.site, CapabilityGate::absent());
  let element = FileElement::new("docs/").with_id("downloads");

  let html = linker
    .render_file(&BasicRequest::new(), &PrefixedIds, &f.page, &element)
    .expect("renders");
  assert_eq!(html, r#"<a id="page1-downloads" href="/docs/docs/">docs/</a>"#);
}

struct SessionRequest(BasicRequest);

impl Request for SessionRequest {
  fn is_exporting(&self) -> bool {
    self.0.is_exporting()
  }

  fn header(&self, name: &str) -> Option<&str> {
    self.0.header(name)
  }

  fn context_path(&self) -> &str {
    self.0.context_path()
  }

  fn encode_url(&self, url: &str) -> String {
    format!("{url};jsessionid=abc")
  }
}

#[test]
fn test_served_urls_go_through_session_rewriting() {
  let f = fixture();
  let linker = linker(&f.site, CapabilityGate::absent());
  let request =
    SessionRequest(BasicRequest::new().with_context_path("/app"));
  let config = LinkConfig::default();

  let host = ClassPolicy::new(&config);

  let relative = FileElement::new("my dir/").with_book("/remote");
  assert!(matches!(
    linker.render_file(&request, &host, &f.page, &relative),
    Err(FileError::RelativePathInBook { .. })
  ));

  let element = FileElement::new("/my dir/").with_book("/remote");
  let html = linker
    .render_file(&request, &host, &f.page, &element)
    .expect("renders");
  assert!(
    html.contains(r#"href="/app/remote/my%20dir/;jsessionid=abc""#),
    "{html}"
  );
}

struct Broken;

impl OpenFileCapability for Broken {
  fn is_allowed(
    &self,
    _request: &dyn Request,
  ) -> Result<bool, CapabilityError> {
    Err(CapabilityError::Invocation("extension crashed".into()))
  }
}

#[test]
fn test_capability_failure_aborts_render() {
  let f = fixture();
  let gate = CapabilityGate::with_capability(Arc::new(Broken));
  let linker = linker(&f.site, gate);
  let element = FileElement::new("files/report.pdf");

  let result = render(&linker, &BasicRequest::new(), &f.page, &element);
  assert!(matches!(result, Err(FileError::Capability(_))));
}

#[test]
fn test_absent_capability_is_looked_up_once_across_renders() {
  use std::sync::atomic::{AtomicUsize, Ordering};

  let f = fixture();
  let lookups = Arc::new(AtomicUsize::new(0));
  let counter = Arc::clone(&lookups);
  let gate = CapabilityGate::new(
    move || -> Result<Option<Arc<dyn OpenFileCapability>>, CapabilityError> {
      counter.fetch_add(1, Ordering::SeqCst);
      Ok(None)
    },
  );
  let linker = linker(&f.site, gate);

  for _ in 0..3 {
    let element = FileElement::new("files/report.pdf");
    render(&linker, &BasicRequest::new(), &f.page, &element).expect("renders");
  }
  assert!(!linker.is_open_allowed(&BasicRequest::new()).expect("no error"));
  assert_eq!(lookups.load(Ordering::SeqCst), 1);
}
