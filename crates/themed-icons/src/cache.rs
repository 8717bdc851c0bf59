//! The themed icon map cache.
//!
//! [`ThemedIconCache`] owns the parsed icon map and decides when it is
//! rebuilt. The map moves through three states:
//!
//! - [`CacheState::Unbuilt`]: nothing parsed yet. The next lookup builds.
//! - [`CacheState::Built`]: a map, possibly empty, serving lookups.
//! - [`CacheState::Disabled`]: the last build failed. Every lookup misses.
//!
//! [`ThemedIconCache::set_supported`] always discards the current state and
//! rebuilds immediately. It is the only way out of `Built` or `Disabled`.
//!
//! # Example
//!
//! ```ignore
//! use themed_icons::platform::memory::{MemoryBundle, MemoryBundles};
//! use themed_icons::ThemedIconCache;
//!
//! let host = MemoryBundle::new("com.example.launcher").into_shared();
//! host.add_drawable("themed_a");
//! host.set_document(
//!     "xml",
//!     "grayscale_icon_map",
//!     r#"<icons><icon package="com.example.app" drawable="@drawable/themed_a"/></icons>"#,
//! );
//!
//! let mut cache = ThemedIconCache::with_provider(MemoryBundles::new(host), true);
//! let theme = cache.lookup("com.example.app", None);
//! assert!(theme.is_some());
//! ```
//!
//! The cache is not synchronized. Callers sharing one across threads must
//! serialize access themselves, for example behind a `parking_lot::Mutex`.

use std::fmt;

use crate::bundle::BundleProvider;
use crate::capability::ThemeCapability;
use crate::config::ThemedIconConfig;
use crate::document::{BundleDocumentLocator, DocumentLocator};
use crate::error::{Error, Result};
use crate::fingerprint;
use crate::logging::targets;
use crate::parser::parse_icon_map;
use crate::resolver::ResourceResolver;
use crate::types::{ThemeData, ThemeIconMap};

/// State of the cached icon map.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CacheState {
    /// No build has happened yet.
    #[default]
    Unbuilt,
    /// A successful build, possibly with no entries.
    Built(ThemeIconMap),
    /// The last build failed; lookups always miss.
    Disabled,
}

impl CacheState {
    /// Returns true if a map has been built.
    pub fn is_built(&self) -> bool {
        matches!(self, CacheState::Built(_))
    }

    /// Returns true if the last build failed.
    pub fn is_disabled(&self) -> bool {
        matches!(self, CacheState::Disabled)
    }

    /// The built map, if any.
    pub fn map(&self) -> Option<&ThemeIconMap> {
        match self {
            CacheState::Built(map) => Some(map),
            _ => None,
        }
    }
}

/// A non-fatal problem recorded during the most recent build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// The requested icon pack was unknown; the host bundle was used instead.
    PackNotFound { pack: String },
    /// The icon pack has no mapping document; the map is empty.
    MapMissing { pack: String, document: String },
    /// The build failed and the cache is disabled.
    ParseFailed { message: String },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::PackNotFound { pack } => {
                write!(f, "Themed icon pack {pack} does not exist!")
            }
            Diagnostic::MapMissing { pack, document } => {
                write!(f, "Icon map {document} does not exist in {pack}")
            }
            Diagnostic::ParseFailed { message } => {
                write!(f, "Unable to parse icon map: {message}")
            }
        }
    }
}

/// Lazily built mapping from package identifier to themed icon.
///
/// `P` supplies bundles and `L` finds the mapping document within one. Both
/// are consulted afresh on every build.
pub struct ThemedIconCache<P, L = BundleDocumentLocator> {
    resolver: ResourceResolver<P>,
    locator: L,
    config: ThemedIconConfig,
    supported: bool,
    state: CacheState,
    diagnostics: Vec<Diagnostic>,
}

impl<P: BundleProvider> ThemedIconCache<P, BundleDocumentLocator> {
    /// Create a cache with the default document locator and configuration.
    pub fn with_provider(provider: P, capability: impl ThemeCapability) -> Self {
        Self::new(
            provider,
            BundleDocumentLocator,
            capability,
            ThemedIconConfig::default(),
        )
    }
}

impl<P: BundleProvider, L: DocumentLocator> ThemedIconCache<P, L> {
    /// Create a cache.
    ///
    /// The capability is checked once and its answer passed to
    /// [`set_supported`](Self::set_supported), so the map is built before
    /// this returns.
    pub fn new(
        provider: P,
        locator: L,
        capability: impl ThemeCapability,
        config: ThemedIconConfig,
    ) -> Self {
        let mut cache = Self {
            resolver: ResourceResolver::new(provider),
            locator,
            config,
            supported: false,
            state: CacheState::Unbuilt,
            diagnostics: Vec::new(),
        };
        cache.set_supported(capability.is_themed_icon_enabled());
        cache
    }

    /// Set the supported flag and rebuild the map.
    ///
    /// The rebuild happens even if the flag is unchanged, and reads from the
    /// configured icon pack.
    pub fn set_supported(&mut self, enabled: bool) {
        self.supported = enabled;
        self.state = CacheState::Unbuilt;
        let pack = self.config.icon_pack.clone();
        self.build(pack.as_deref());
    }

    /// Look up the themed icon for `package`.
    ///
    /// If the map is unbuilt it is built first, reading from `pack` when
    /// given. The supported flag is not consulted. A disabled cache always
    /// misses.
    pub fn lookup(&mut self, package: &str, pack: Option<&str>) -> Option<ThemeData> {
        if matches!(self.state, CacheState::Unbuilt) {
            self.build(pack);
        }
        self.state.map()?.get(package).cloned()
    }

    /// Change the icon pack used for eager rebuilds.
    ///
    /// The cached map is left as it is; the pack takes effect on the next
    /// [`set_supported`](Self::set_supported).
    pub fn set_icon_pack(&mut self, pack: Option<String>) {
        self.config.icon_pack = pack;
    }

    /// Current state of the cached map.
    pub fn state(&self) -> &CacheState {
        &self.state
    }

    /// The supported flag last passed to [`set_supported`](Self::set_supported).
    pub fn is_supported(&self) -> bool {
        self.supported
    }

    /// Problems recorded by the most recent build.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Get the configuration.
    pub fn config(&self) -> &ThemedIconConfig {
        &self.config
    }

    /// Get the document locator.
    pub fn locator(&self) -> &L {
        &self.locator
    }

    /// Get the bundle provider.
    pub fn provider(&self) -> &P {
        self.resolver.provider()
    }

    /// Suffix for the downstream render cache's state key.
    pub fn fingerprint_suffix(&self) -> String {
        fingerprint::fingerprint_suffix(self.supported, &self.config.build_revision)
    }

    /// `base` followed by [`fingerprint_suffix`](Self::fingerprint_suffix).
    pub fn system_icon_state(&self, base: &str) -> String {
        fingerprint::system_icon_state(base, self.supported, &self.config.build_revision)
    }

    fn build(&mut self, pack: Option<&str>) {
        let _span = tracing::debug_span!(target: targets::CACHE, "build_icon_map", pack = ?pack).entered();

        let mut diagnostics = Vec::new();
        self.state = match self.build_map(pack, &mut diagnostics) {
            Ok(map) => {
                tracing::debug!(target: targets::CACHE, entries = map.len(), "themed icon map built");
                CacheState::Built(map)
            }
            Err(err) => {
                tracing::error!(target: targets::CACHE, error = %err, "Unable to parse icon map");
                diagnostics.push(Diagnostic::ParseFailed {
                    message: err.to_string(),
                });
                CacheState::Disabled
            }
        };
        self.diagnostics = diagnostics;
    }

    fn build_map(&self, pack: Option<&str>, diagnostics: &mut Vec<Diagnostic>) -> Result<ThemeIconMap> {
        let resolution = self.resolver.resolve(pack)?;
        if let Some(Error::PackNotFound { pack }) = resolution.fallback_error() {
            diagnostics.push(Diagnostic::PackNotFound { pack: pack.clone() });
        }

        let config = &self.config;
        let document = self.locator.find_document(
            resolution.bundle(),
            &config.document_name,
            &config.document_type,
            resolution.namespace(),
        )?;

        let Some(document) = document else {
            if let Some(pack) = resolution.pack() {
                tracing::error!(target: targets::CACHE, pack, "Icon map does not exist in {pack}");
                diagnostics.push(Diagnostic::MapMissing {
                    pack: pack.to_string(),
                    document: config.document_name.clone(),
                });
            }
            return Ok(ThemeIconMap::new());
        };

        parse_icon_map(resolution.bundle(), &document, config)
    }
}

impl<P: fmt::Debug, L: fmt::Debug> fmt::Debug for ThemedIconCache<P, L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ThemedIconCache")
            .field("resolver", &self.resolver)
            .field("locator", &self.locator)
            .field("supported", &self.supported)
            .field("state", &self.state)
            .field("diagnostics", &self.diagnostics)
            .finish_non_exhaustive()
    }
}
