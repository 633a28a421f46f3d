use std::{
  fs,
  time::{Duration, SystemTime},
};

use booklink::{
  cli::PageArgs,
  commands::{self, RenderOptions},
  site::build_site,
};
use booklink_config::Config;
use booklink_file::FileError;
use booklink_model::Site;
use tempfile::TempDir;

const SITE: &str = r#"
[[books]]
name = "/docs"
source_root = "content"

[[pages]]
book = "/docs"
path = "/index"
title = "Index"
children = [{ path = "/guide" }, { book = "/elsewhere", path = "/index" }]

[[pages.elements]]
type = "file"
id = "dl"
path = "files/report.pdf"

[[pages.elements]]
type = "file"
hidden = true
path = "files/report.pdf"

[[pages]]
book = "/docs"
path = "/guide"
title = "Guide"

[[pages.elements]]
type = "file"
path = "missing.txt"

[[pages]]
book = "/docs"
path = "/empty"
children = [{ path = "/guide" }]

[[pages.elements]]
type = "file"
hidden = true
path = "files/report.pdf"

[[pages.elements]]
type = "other"
kind = "heading"

[[pages]]
book = "/docs"
path = "/broken"

[[pages.elements]]
type = "file"
path = "files"
"#;

struct Fixture {
  _dir:   TempDir,
  config: Config,
  site:   Site,
}

fn fixture() -> Fixture {
  fixture_in(TempDir::new().expect("tempdir"))
}

fn fixture_in(dir: TempDir) -> Fixture {
  let files = dir.path().join("content/files");
  fs::create_dir_all(&files).expect("mkdir");
  let report = files.join("report.pdf");
  fs::write(&report, vec![0_u8; 1536]).expect("write");
  fs::File::options()
    .write(true)
    .open(&report)
    .expect("open")
    .set_modified(SystemTime::UNIX_EPOCH + Duration::from_secs(1_000_000))
    .expect("set mtime");

  let path = dir.path().join("site.toml");
  fs::write(&path, SITE).expect("write");
  let config = Config::from_file(&path).expect("config loads");
  let site = build_site(&config).expect("site builds");
  Fixture {
    _dir: dir,
    config,
    site,
  }
}

fn page(path: &str) -> PageArgs {
  PageArgs {
    page:   path.into(),
    book:   None,
    domain: None,
  }
}

fn render(f: &Fixture, path: &str, options: &RenderOptions) -> String {
  let mut out = Vec::new();
  commands::render(&f.site, &f.config, &page(path), options, &mut out)
    .expect("renders");
  String::from_utf8(out).expect("utf-8")
}

#[test]
fn test_render_page() {
  let f = fixture();
  let out = render(&f, "/index", &RenderOptions::default());
  assert_eq!(
    out,
    "<a id=\"dl\" class=\"file-link\" \
     href=\"/docs/files/report.pdf?lastModified=ugi0\">report.pdf</a> (1.5 \
     KB)\n"
  );
}

#[test]
fn test_render_without_last_modified_under_context_path() {
  let f = fixture();
  let options = RenderOptions {
    no_auto_last_modified: true,
    context_path: "/app".into(),
    ..RenderOptions::default()
  };
  let out = render(&f, "/index", &options);
  assert!(out.contains("href=\"/app/docs/files/report.pdf\""), "{out}");
}

#[test]
fn test_render_allowing_local_open() {
  let f = fixture();
  let options = RenderOptions {
    allow_open: true,
    ..RenderOptions::default()
  };
  let out = render(&f, "/index", &options);
  assert!(out.contains("href=\"file:///"), "{out}");
  assert!(out.contains("onclick=\"booklink.openFile("), "{out}");

  let exported = render(
    &f,
    "/index",
    &RenderOptions {
      export: true,
      ..options
    },
  );
  assert!(!exported.contains("file:"), "{exported}");
}

#[test]
fn test_local_link_from_relative_config_path() {
  // Loaded as `./.tmpXXXX/site.toml`, so `source_root` starts out relative.
  let dir = TempDir::new_in(".").expect("tempdir");
  assert!(dir.path().is_relative());
  let name = dir
    .path()
    .file_name()
    .expect("name")
    .to_string_lossy()
    .into_owned();
  let f = fixture_in(dir);

  let options = RenderOptions {
    allow_open: true,
    ..RenderOptions::default()
  };
  let out = render(&f, "/index", &options);

  let cwd = std::env::current_dir().expect("cwd");
  assert!(
    out.contains(&format!("href=\"file://{}/", cwd.display())),
    "{out}"
  );
  assert!(out.contains(&format!("/{name}/content/files/report.pdf\"")));
}

#[test]
fn test_render_tree_prefixes_ids_and_skips_unknown_books() {
  let f = fixture();
  let options = RenderOptions {
    recursive: true,
    ..RenderOptions::default()
  };
  let out = render(&f, "/index", &options);

  let lines: Vec<&str> = out.lines().collect();
  assert_eq!(lines.len(), 4, "{out}");
  assert_eq!(lines[0], "<!-- /docs/index -->");
  assert!(lines[1].starts_with("<a id=\"page1-dl\""));
  assert_eq!(lines[2], "<!-- /docs/guide -->");
  assert_eq!(
    lines[3],
    "<a class=\"file-link\" href=\"/docs/missing.txt\">¿/docs/missing.txt?</a>"
  );
}

#[test]
fn test_render_fails_on_directory_without_slash() {
  let f = fixture();
  let mut out = Vec::new();
  let result = commands::render(
    &f.site,
    &f.config,
    &page("/broken"),
    &RenderOptions::default(),
    &mut out,
  );
  assert!(result.is_err());
  assert!(out.is_empty());
}

#[test]
fn test_has_files() {
  let f = fixture();
  assert!(commands::has_files(&f.site, &page("/index"), false).expect("ok"));
  assert!(!commands::has_files(&f.site, &page("/empty"), false).expect("ok"));
  assert!(commands::has_files(&f.site, &page("/empty"), true).expect("ok"));
  assert!(commands::has_files(&f.site, &page("/nowhere"), false).is_err());
}

#[test]
fn test_check_reports_each_failure() {
  let f = fixture();
  let failures = commands::check(&f.site, &f.config);

  assert_eq!(failures.len(), 1);
  assert_eq!(failures[0].page.to_string(), "/docs/broken");
  assert!(matches!(
    failures[0].error,
    FileError::DirectoryWithoutSlash(_)
  ));
}
