//! Bundle resolution with host fallback.
//!
//! The [`ResourceResolver`] decides which bundle a map build reads from. An
//! icon pack is used when one is requested and the provider knows it;
//! otherwise the host's own bundle is used. Nothing is memoized here: every
//! build resolves afresh.

use crate::bundle::{Bundle, BundleProvider};
use crate::error::{Error, Result};
use crate::logging::targets;

/// The bundle chosen for a build.
#[derive(Debug)]
pub struct Resolution {
    bundle: Bundle,
    pack: Option<String>,
    fallback: Option<Error>,
}

impl Resolution {
    /// The bundle to read from.
    pub fn bundle(&self) -> &Bundle {
        &self.bundle
    }

    /// Returns true if an icon pack's bundle was chosen.
    pub fn used_external_pack(&self) -> bool {
        self.pack.is_some()
    }

    /// The icon pack whose bundle was chosen, if any.
    pub fn pack(&self) -> Option<&str> {
        self.pack.as_deref()
    }

    /// Namespace that documents are looked up in.
    ///
    /// This is the pack identifier when a pack was used and the host
    /// bundle's package otherwise.
    pub fn namespace(&self) -> &str {
        match &self.pack {
            Some(pack) => pack.as_str(),
            None => self.bundle.package_name(),
        }
    }

    /// Why a requested pack was not used, if resolution fell back to the host.
    pub fn fallback_error(&self) -> Option<&Error> {
        self.fallback.as_ref()
    }
}

/// Turns an optional icon pack identifier into a bundle.
#[derive(Debug)]
pub struct ResourceResolver<P> {
    provider: P,
}

impl<P: BundleProvider> ResourceResolver<P> {
    /// Create a resolver over a bundle provider.
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    /// Get the bundle provider.
    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Resolve the bundle for `pack`, falling back to the host bundle.
    ///
    /// An unknown pack is reported and never surfaced as a failure. Any other
    /// provider error is returned.
    pub fn resolve(&self, pack: Option<&str>) -> Result<Resolution> {
        let Some(pack) = pack else {
            return Ok(self.host(None));
        };

        match self.provider.bundle_for(pack) {
            Ok(bundle) => {
                tracing::debug!(target: targets::RESOLVER, pack, "using themed icon pack");
                Ok(Resolution {
                    bundle,
                    pack: Some(pack.to_string()),
                    fallback: None,
                })
            }
            Err(err) if err.is_pack_not_found() => {
                tracing::error!(target: targets::RESOLVER, pack, "Themed icon pack {pack} does not exist!");
                Ok(self.host(Some(err)))
            }
            Err(err) => Err(err),
        }
    }

    fn host(&self, fallback: Option<Error>) -> Resolution {
        Resolution {
            bundle: self.provider.own_bundle(),
            pack: None,
            fallback,
        }
    }
}
