//! Core types for themed icon maps.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::bundle::{Bundle, ResourceId};

/// A themed icon to substitute for a package's default icon.
///
/// Pairs the bundle the icon was resolved from with the icon's identifier
/// inside that bundle. Equality is identity: two values are equal only when
/// they refer to the same bundle instance and the same identifier.
#[derive(Clone)]
pub struct ThemeData {
    bundle: Bundle,
    icon: ResourceId,
}

impl ThemeData {
    /// Create theme data for an icon inside `bundle`.
    pub fn new(bundle: Bundle, icon: ResourceId) -> Self {
        Self { bundle, icon }
    }

    /// The bundle the icon lives in.
    pub fn bundle(&self) -> &Bundle {
        &self.bundle
    }

    /// The icon identifier within [`bundle`](Self::bundle).
    pub fn icon(&self) -> ResourceId {
        self.icon
    }

    /// Returns true if this icon was resolved from `bundle`.
    pub fn is_from(&self, bundle: &Bundle) -> bool {
        Arc::ptr_eq(&self.bundle, bundle)
    }
}

impl PartialEq for ThemeData {
    fn eq(&self, other: &Self) -> bool {
        self.icon == other.icon && Arc::ptr_eq(&self.bundle, &other.bundle)
    }
}

impl Eq for ThemeData {}

impl fmt::Debug for ThemeData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ThemeData")
            .field("bundle", &self.bundle.package_name())
            .field("icon", &self.icon)
            .finish()
    }
}

/// Mapping from package identifier to its themed icon.
///
/// An empty map is a valid built state: theming is supported but nothing is
/// themed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ThemeIconMap {
    entries: HashMap<String, ThemeData>,
}

impl ThemeIconMap {
    /// Create an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an entry, replacing any earlier entry for the same package.
    ///
    /// Returns the replaced entry.
    pub fn insert(&mut self, package: impl Into<String>, data: ThemeData) -> Option<ThemeData> {
        self.entries.insert(package.into(), data)
    }

    /// Look up the themed icon for a package.
    pub fn get(&self, package: &str) -> Option<&ThemeData> {
        self.entries.get(package)
    }

    /// Returns true if the package has a themed icon.
    pub fn contains(&self, package: &str) -> bool {
        self.entries.contains_key(package)
    }

    /// Number of themed packages.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no package is themed.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over all entries in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ThemeData)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}
