//! Optional "open file locally" capability.
//!
//! Opening files on the desktop of the reader is provided by an optional
//! extension that a deployment may or may not include. The composition root
//! hands a [`CapabilityGate`] a [`CapabilityLocator`]; the gate looks the
//! capability up on first use and remembers when it is absent, so later
//! calls answer `false` without looking again.
//!
//! Whether opening is *allowed* may depend on the request, so that answer is
//! asked from the capability every time and never cached.
use std::{
  fmt,
  sync::{Arc, Mutex, OnceLock, PoisonError},
};

use crate::{error::CapabilityError, request::Request};

/// An installed extension able to open files on the reader's machine.
pub trait OpenFileCapability: Send + Sync {
  /// Whether local opening is currently allowed for `request`.
  ///
  /// # Errors
  ///
  /// Returns [`CapabilityError::Invocation`] when the extension fails.
  fn is_allowed(&self, request: &dyn Request) -> Result<bool, CapabilityError>;
}

/// Finds the optional capability. `Ok(None)` means it is not installed.
pub trait CapabilityLocator: Send + Sync {
  /// # Errors
  ///
  /// Returns [`CapabilityError::Lookup`] when the capability exists but
  /// cannot be obtained.
  fn locate(
    &self,
  ) -> Result<Option<Arc<dyn OpenFileCapability>>, CapabilityError>;
}

impl<F> CapabilityLocator for F
where
  F: Fn() -> Result<Option<Arc<dyn OpenFileCapability>>, CapabilityError>
    + Send
    + Sync,
{
  fn locate(
    &self,
  ) -> Result<Option<Arc<dyn OpenFileCapability>>, CapabilityError> {
    self()
  }
}

type Located = Option<Arc<dyn OpenFileCapability>>;

/// Cached access to the optional capability.
pub struct CapabilityGate {
  locator: Box<dyn CapabilityLocator>,
  located: OnceLock<Located>,
  lookup:  Mutex<()>,
}

impl CapabilityGate {
  /// Gate that looks the capability up through `locator` on first use.
  #[must_use]
  pub fn new(locator: impl CapabilityLocator + 'static) -> Self {
    Self {
      locator: Box::new(locator),
      located: OnceLock::new(),
      lookup:  Mutex::new(()),
    }
  }

  /// Gate wired to a capability known at startup.
  #[must_use]
  pub fn with_capability(capability: Arc<dyn OpenFileCapability>) -> Self {
    Self {
      located: OnceLock::from(Some(capability)),
      ..Self::absent()
    }
  }

  /// Gate for deployments without the capability.
  #[must_use]
  pub fn absent() -> Self {
    Self::new(|| -> Result<Located, CapabilityError> { Ok(None) })
  }

  /// Whether files may be opened locally for `request`.
  ///
  /// # Errors
  ///
  /// Lookup failures other than absence and failures of the capability
  /// itself are returned and not cached.
  pub fn is_open_allowed(
    &self,
    request: &dyn Request,
  ) -> Result<bool, CapabilityError> {
    match self.capability()? {
      Some(capability) => capability.is_allowed(request),
      None => Ok(false),
    }
  }

  fn capability(
    &self,
  ) -> Result<Option<&Arc<dyn OpenFileCapability>>, CapabilityError> {
    if let Some(located) = self.located.get() {
      return Ok(located.as_ref());
    }

    let _guard = self.lookup.lock().unwrap_or_else(PoisonError::into_inner);
    if let Some(located) = self.located.get() {
      return Ok(located.as_ref());
    }

    let located = self.locator.locate()?;
    if located.is_none() {
      log::warn!(
        "Unable to open local files; install an open-file capability if \
         desktop integration is desired."
      );
    }
    Ok(self.located.get_or_init(|| located).as_ref())
  }
}

impl fmt::Debug for CapabilityGate {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let state = match self.located.get() {
      None => "unresolved",
      Some(None) => "absent",
      Some(Some(_)) => "present",
    };
    f.debug_struct("CapabilityGate").field("state", &state).finish()
  }
}

/// A capability with a fixed answer.
#[derive(Debug, Clone, Copy)]
pub struct StaticCapability(pub bool);

impl OpenFileCapability for StaticCapability {
  fn is_allowed(
    &self,
    _request: &dyn Request,
  ) -> Result<bool, CapabilityError> {
    Ok(self.0)
  }
}
