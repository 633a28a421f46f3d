//! `booklink-model`.
//!
//! The collaborators that file links are rendered against: books and page
//! references, pages with their elements and child edges, sandboxed access to
//! the local files behind a book, and an any-order page graph traversal.
//!
//! [`Site`] is an in-memory implementation of every collaborator trait and is
//! what the `booklink` binary builds from its configuration.

pub mod book;
pub mod element;
pub mod error;
pub mod page;
pub mod resource;
mod site;
mod traversal;

pub use book::{Book, BookRef, PageRef, SEPARATOR, join_path};
pub use element::{Element, FileElement, GenericElement, ResolvedFile};
pub use error::ModelError;
pub use page::{BookResolver, CaptureLevel, Page, PageCapture};
pub use resource::{
  ResourceAccess,
  ResourceFile,
  ResourceRef,
  ResourceStore,
  resource_below_root,
};
pub use site::Site;
pub use traversal::traverse_pages_any_order;
