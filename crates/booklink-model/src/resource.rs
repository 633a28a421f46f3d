//! Local access to the resources of a book.
use std::{
  fs,
  io,
  path::{Path, PathBuf},
};

use jiff::Timestamp;
use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};

use crate::{
  book::{PageRef, SEPARATOR},
  error::ModelError,
};

/// A reference into a book's resource space. Resources are addressed exactly
/// like pages.
pub type ResourceRef = PageRef;

/// Characters escaped in the path of a `file://` URI.
const FILE_URI_PATH: &AsciiSet = &CONTROLS
  .add(b' ')
  .add(b'"')
  .add(b'#')
  .add(b'%')
  .add(b'<')
  .add(b'>')
  .add(b'?')
  .add(b'`')
  .add(b'{')
  .add(b'}');

/// How a resource lookup treats the edges of the book.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourceAccess {
  /// Allow the resolved file to live outside of the book's source root, for
  /// example through a symbolic link.
  pub allow_outside_root: bool,
  /// Return `None` instead of an error when the resource does not exist.
  pub tolerate_missing:   bool,
}

impl ResourceAccess {
  /// Sandboxed lookup that treats a missing resource as absent.
  pub const SANDBOXED_OPTIONAL: Self = Self {
    allow_outside_root: false,
    tolerate_missing:   true,
  };
}

/// A locally reachable file or directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceFile {
  path:          PathBuf,
  name:          String,
  is_directory:  bool,
  len:           u64,
  last_modified: Timestamp,
}

impl ResourceFile {
  /// Read the metadata of `path`.
  ///
  /// Returns `Ok(None)` when nothing exists at `path`. A relative `path` is
  /// made absolute against the current directory, so [`Self::uri`] names
  /// the same file.
  ///
  /// # Errors
  ///
  /// Returns [`ModelError::Io`] when the metadata exists but cannot be read.
  pub fn from_path(path: PathBuf) -> Result<Option<Self>, ModelError> {
    let path = std::path::absolute(&path).unwrap_or(path);
    let metadata = match fs::metadata(&path) {
      Ok(metadata) => metadata,
      Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
      Err(source) => return Err(ModelError::Io { path, source }),
    };

    let last_modified = metadata
      .modified()
      .ok()
      .and_then(|time| Timestamp::try_from(time).ok())
      .unwrap_or(Timestamp::UNIX_EPOCH);

    let name = path
      .file_name()
      .map(|name| name.to_string_lossy().into_owned())
      .unwrap_or_default();

    Ok(Some(Self {
      name,
      is_directory: metadata.is_dir(),
      len: metadata.len(),
      last_modified,
      path,
    }))
  }

  /// File or directory name, without any separator.
  #[must_use]
  pub fn name(&self) -> &str {
    &self.name
  }

  #[must_use]
  pub const fn is_directory(&self) -> bool {
    self.is_directory
  }

  /// Length in bytes.
  #[must_use]
  pub const fn len(&self) -> u64 {
    self.len
  }

  #[must_use]
  pub const fn is_empty(&self) -> bool {
    self.len == 0
  }

  #[must_use]
  pub const fn last_modified(&self) -> Timestamp {
    self.last_modified
  }

  #[must_use]
  pub fn path(&self) -> &Path {
    &self.path
  }

  /// `file://` URI of this resource. Directories end in a separator.
  #[must_use]
  pub fn uri(&self) -> String {
    let mut raw = self.path.to_string_lossy().replace('\\', "/");
    if !raw.starts_with(SEPARATOR) {
      raw.insert(0, SEPARATOR);
    }
    if self.is_directory && !raw.ends_with(SEPARATOR) {
      raw.push(SEPARATOR);
    }
    format!("file://{}", utf8_percent_encode(&raw, FILE_URI_PATH))
  }
}

/// Access to the local files backing the resources of books.
pub trait ResourceStore {
  /// Find the local file for `resource`.
  ///
  /// Returns `Ok(None)` when the book is not available in this deployment,
  /// has no local source, or (with `tolerate_missing`) when the resource
  /// does not exist.
  ///
  /// # Errors
  ///
  /// Returns [`ModelError::OutsideRoot`] when the resource would escape its
  /// book and that is not allowed, [`ModelError::ResourceMissing`] when the
  /// resource is absent and that is not tolerated, and [`ModelError::Io`] on
  /// metadata failures.
  fn resource_file(
    &self,
    resource: &ResourceRef,
    access: ResourceAccess,
  ) -> Result<Option<ResourceFile>, ModelError>;
}

impl<T: ResourceStore + ?Sized> ResourceStore for &T {
  fn resource_file(
    &self,
    resource: &ResourceRef,
    access: ResourceAccess,
  ) -> Result<Option<ResourceFile>, ModelError> {
    (**self).resource_file(resource, access)
  }
}

/// Look up `resource` below `source_root`.
///
/// Paths are built from the reference's segments, so `..` never reaches the
/// filesystem. With `allow_outside_root` unset the canonical location must
/// also stay below the canonical root, which rules out symbolic links that
/// point elsewhere.
///
/// # Errors
///
/// See [`ResourceStore::resource_file`].
pub fn resource_below_root(
  source_root: &Path,
  resource: &ResourceRef,
  access: ResourceAccess,
) -> Result<Option<ResourceFile>, ModelError> {
  if resource.segments().any(|s| s == ".." || s == ".") {
    return Err(ModelError::OutsideRoot(resource.clone()));
  }

  let path = source_root.join(resource.relative_fs_path());
  let Some(file) = ResourceFile::from_path(path)? else {
    log::debug!("no local file for {resource}");
    return if access.tolerate_missing {
      Ok(None)
    } else {
      Err(ModelError::ResourceMissing(resource.clone()))
    };
  };

  if !access.allow_outside_root {
    let canonical_root =
      fs::canonicalize(source_root).map_err(|source| {
        ModelError::Io {
          path: source_root.to_path_buf(),
          source,
        }
      })?;
    let canonical = fs::canonicalize(file.path()).map_err(|source| {
      ModelError::Io {
        path: file.path().to_path_buf(),
        source,
      }
    })?;
    if !canonical.starts_with(&canonical_root) {
      return Err(ModelError::OutsideRoot(resource.clone()));
    }
  }

  Ok(Some(file))
}
