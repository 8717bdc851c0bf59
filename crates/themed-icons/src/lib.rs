//! Themed icon map resolution.
//!
//! This crate maps application package identifiers to alternate, themed icon
//! resources. The mapping is read from a document bundled with the host
//! application or supplied by an external icon pack, parsed once, and cached
//! until the themed-icon setting is toggled.
//!
//! - **Resolution**: pick the icon pack's bundle, falling back to the host's
//! - **Parsing**: stream the mapping document and collect `icon` records
//! - **Caching**: a lazily built map that fails closed when parsing fails
//! - **Fingerprint**: a state suffix for downstream render caches
//!
//! Platform access goes through the [`ResourceBundle`](bundle::ResourceBundle),
//! [`BundleProvider`](bundle::BundleProvider) and
//! [`DocumentLocator`](document::DocumentLocator) traits. In-memory and
//! directory-backed implementations live in [`platform`].
//!
//! # Example
//!
//! ```ignore
//! use themed_icons::prelude::*;
//! use themed_icons::platform::memory::{MemoryBundle, MemoryBundles};
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
//! if let Some(theme) = cache.lookup("com.example.app", None) {
//!     println!("themed icon {} from {}", theme.icon(), theme.bundle().package_name());
//! }
//! let state = cache.system_icon_state("density=420");
//! ```

pub mod bundle;
pub mod cache;
pub mod capability;
pub mod config;
pub mod document;
pub mod fingerprint;
pub mod logging;
pub mod parser;
pub mod platform;
pub mod resolver;
pub mod stream;
pub mod types;

mod error;

pub use cache::{CacheState, Diagnostic, ThemedIconCache};
pub use config::ThemedIconConfig;
pub use error::{Error, Result};
pub use types::{ThemeData, ThemeIconMap};

/// Prelude module with commonly used types.
pub mod prelude {
    pub use crate::bundle::{Bundle, BundleProvider, ResourceBundle, ResourceId, ResourceRef};
    pub use crate::cache::{CacheState, Diagnostic, ThemedIconCache};
    pub use crate::capability::ThemeCapability;
    pub use crate::config::ThemedIconConfig;
    pub use crate::document::{BundleDocumentLocator, DocumentHandle, DocumentLocator};
    pub use crate::resolver::{Resolution, ResourceResolver};
    pub use crate::stream::{Element, ElementEvent, ElementStream};
    pub use crate::types::{ThemeData, ThemeIconMap};
}
