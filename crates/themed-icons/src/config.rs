//! Configuration for themed icon resolution.
//!
//! Every field has a default, so an empty TOML document is a valid
//! configuration:
//!
//! ```ignore
//! use themed_icons::ThemedIconConfig;
//!
//! let config = ThemedIconConfig::from_toml_str(r#"
//! icon_pack = "com.example.pack"
//! build_revision = "eng.20261019"
//! "#)?;
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Logical name of the mapping document.
pub const DEFAULT_DOCUMENT_NAME: &str = "grayscale_icon_map";
/// Resource type of the mapping document.
pub const DEFAULT_DOCUMENT_TYPE: &str = "xml";
/// Element name of a mapping record.
pub const DEFAULT_ICON_TAG: &str = "icon";
/// Attribute holding the package identifier.
pub const DEFAULT_PACKAGE_ATTRIBUTE: &str = "package";
/// Attribute holding the icon reference.
pub const DEFAULT_DRAWABLE_ATTRIBUTE: &str = "drawable";

/// Settings for locating and parsing the mapping document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemedIconConfig {
    /// Logical name of the mapping document within a bundle.
    pub document_name: String,
    /// Resource type of the mapping document.
    pub document_type: String,
    /// Element name of mapping records.
    pub icon_tag: String,
    /// Attribute naming the package a record applies to.
    pub package_attribute: String,
    /// Attribute referencing the themed icon.
    pub drawable_attribute: String,
    /// Icon pack used when the map is rebuilt eagerly.
    pub icon_pack: Option<String>,
    /// Platform build tag included in the state fingerprint.
    pub build_revision: String,
}

impl Default for ThemedIconConfig {
    fn default() -> Self {
        Self {
            document_name: DEFAULT_DOCUMENT_NAME.to_string(),
            document_type: DEFAULT_DOCUMENT_TYPE.to_string(),
            icon_tag: DEFAULT_ICON_TAG.to_string(),
            package_attribute: DEFAULT_PACKAGE_ATTRIBUTE.to_string(),
            drawable_attribute: DEFAULT_DRAWABLE_ATTRIBUTE.to_string(),
            icon_pack: None,
            build_revision: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

impl ThemedIconConfig {
    /// Create a configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the icon pack used for eager rebuilds.
    pub fn with_icon_pack(mut self, pack: impl Into<String>) -> Self {
        self.icon_pack = Some(pack.into());
        self
    }

    /// Set the platform build tag.
    pub fn with_build_revision(mut self, revision: impl Into<String>) -> Self {
        self.build_revision = revision.into();
        self
    }

    /// Parse a configuration from TOML text.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let config: Self = toml::from_str(s).map_err(|e| Error::config("<string>", e.message()))?;
        config.validate()?;
        Ok(config)
    }

    /// Read a configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        let config: Self = toml::from_str(&content).map_err(|e| Error::config(path, e.message()))?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize the configuration as TOML.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::config("<string>", e.to_string()))
    }

    /// Check that every name is usable.
    pub fn validate(&self) -> Result<()> {
        let names = [
            ("document_name", &self.document_name),
            ("document_type", &self.document_type),
            ("icon_tag", &self.icon_tag),
            ("package_attribute", &self.package_attribute),
            ("drawable_attribute", &self.drawable_attribute),
        ];
        for (property, value) in names {
            if value.trim().is_empty() {
                return Err(Error::invalid_value(property, "must not be empty"));
            }
        }

        if self.icon_pack.as_deref().is_some_and(|p| p.trim().is_empty()) {
            return Err(Error::invalid_value(
                "icon_pack",
                "must be omitted rather than empty",
            ));
        }

        Ok(())
    }
}
