//! `booklink-file`.
//!
//! File references on booklink pages: resolving a reference to a local file
//! or to a resource of another book, rendering it as a link, and asking
//! whether a page tree contains any visible file references.
//!
//! # Example
//!
//! ```no_run
//! use booklink_config::LinkConfig;
//! use booklink_file::{BasicRequest, CapabilityGate, ClassPolicy, FileLinker};
//! use booklink_model::{Book, BookRef, FileElement, Page, PageRef, Site};
//!
//! let book = BookRef::new(None, "/docs").unwrap();
//! let mut site = Site::new();
//! site.add_book(Book::new(book.clone(), Some("content".into())));
//!
//! let page = Page::new(PageRef::new(book, "/index").unwrap(), "Index");
//! let element = FileElement::new("files/report.pdf");
//!
//! let config = LinkConfig::default();
//! let linker =
//!   FileLinker::new(&site, CapabilityGate::absent(), config.clone());
//! let host = ClassPolicy::new(&config);
//! let html = linker
//!   .render_file(&BasicRequest::new(), &host, &page, &element)
//!   .unwrap();
//! println!("{html}");
//! ```

pub mod capability;
pub mod encode;
pub mod error;
pub mod host;
pub mod presence;
pub mod render;
pub mod request;
pub mod resolve;

pub use capability::{
  CapabilityGate,
  CapabilityLocator,
  OpenFileCapability,
  StaticCapability,
};
pub use error::{CapabilityError, FileError};
pub use host::{ClassPolicy, LinkHost};
pub use presence::{has_own_visible_file, has_visible_file};
pub use render::FileLinker;
pub use request::{BasicRequest, Request};
pub use resolve::{resolve_file, target_of};
