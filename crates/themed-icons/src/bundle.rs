//! Resource bundles and their providers.
//!
//! A bundle is a resource container owned by the platform: either the host
//! application's own resources or those of an installed icon pack. This crate
//! only borrows bundles through the [`Bundle`] handle; it never opens, closes
//! or pools them.
//!
//! # Resource References
//!
//! Icon attributes name a resource inside the bundle they were read from:
//!
//! - `@drawable/themed_clock` - type and name in the bundle's own package
//! - `@com.example.pack:drawable/themed_clock` - explicit package
//! - `0x7f080012` or `2131230738` - a raw identifier
//!
//! A reference that cannot be resolved, or that resolves to zero, is absent.

use std::fmt;
use std::num::NonZeroU32;
use std::sync::Arc;

use crate::document::DocumentHandle;

/// Identifier of a resource within a bundle.
///
/// Zero is reserved by resource tables to mean "no resource", so it cannot be
/// represented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ResourceId(NonZeroU32);

impl ResourceId {
    /// Create an identifier, returning `None` for zero.
    pub const fn new(raw: u32) -> Option<Self> {
        match NonZeroU32::new(raw) {
            Some(id) => Some(Self(id)),
            None => None,
        }
    }

    /// The raw identifier value.
    pub const fn get(self) -> u32 {
        self.0.get()
    }
}

impl From<NonZeroU32> for ResourceId {
    fn from(raw: NonZeroU32) -> Self {
        Self(raw)
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:08x}", self.get())
    }
}

/// A parsed resource reference from a document attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceRef<'a> {
    /// A raw, non-zero identifier.
    Id(ResourceId),
    /// A symbolic `@[package:]kind/name` reference.
    Named {
        package: Option<&'a str>,
        kind: &'a str,
        name: &'a str,
    },
}

impl<'a> ResourceRef<'a> {
    /// Parse an attribute value into a reference.
    ///
    /// Returns `None` for empty values, `@null`, zero identifiers and
    /// anything that is not a reference.
    pub fn parse(value: &'a str) -> Option<Self> {
        let value = value.trim();

        if let Some(rest) = value.strip_prefix('@') {
            let rest = rest.strip_prefix('+').unwrap_or(rest);
            let (qualified_kind, name) = rest.split_once('/')?;
            let (package, kind) = match qualified_kind.split_once(':') {
                Some((package, kind)) => (Some(package), kind),
                None => (None, qualified_kind),
            };
            if kind.is_empty() || name.is_empty() || package.is_some_and(str::is_empty) {
                return None;
            }
            return Some(ResourceRef::Named {
                package,
                kind,
                name,
            });
        }

        let raw = match value
            .strip_prefix("0x")
            .or_else(|| value.strip_prefix("0X"))
        {
            Some(hex) => u32::from_str_radix(hex, 16).ok()?,
            None => value.parse::<u32>().ok()?,
        };
        ResourceId::new(raw).map(ResourceRef::Id)
    }
}

/// A resource container that documents and icons are read from.
pub trait ResourceBundle: fmt::Debug + Send + Sync {
    /// The package that owns this bundle's resources.
    fn package_name(&self) -> &str;

    /// Look up a resource by name and kind within the given package namespace.
    fn identifier(&self, name: &str, kind: &str, package: &str) -> Option<ResourceId>;

    /// Open a document resource for reading.
    fn open_document(&self, id: ResourceId) -> crate::Result<DocumentHandle>;

    /// Resolve an attribute value against this bundle.
    fn resolve_reference(&self, value: &str) -> Option<ResourceId> {
        match ResourceRef::parse(value)? {
            ResourceRef::Id(id) => Some(id),
            ResourceRef::Named {
                package,
                kind,
                name,
            } => self.identifier(name, kind, package.unwrap_or_else(|| self.package_name())),
        }
    }
}

/// Shared handle to a platform-owned bundle.
pub type Bundle = Arc<dyn ResourceBundle>;

/// Supplies bundles for the host application and for icon packs.
pub trait BundleProvider {
    /// The host application's own bundle.
    fn own_bundle(&self) -> Bundle;

    /// The bundle of an installed icon pack.
    ///
    /// Returns [`Error::PackNotFound`](crate::Error::PackNotFound) when the
    /// pack identifier is unknown.
    fn bundle_for(&self, pack: &str) -> crate::Result<Bundle>;
}

impl<P: BundleProvider + ?Sized> BundleProvider for &P {
    fn own_bundle(&self) -> Bundle {
        (**self).own_bundle()
    }

    fn bundle_for(&self, pack: &str) -> crate::Result<Bundle> {
        (**self).bundle_for(pack)
    }
}
