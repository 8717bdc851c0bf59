//! Error types for themed icon resolution.

use std::fmt;
use std::path::PathBuf;

/// Result type alias for themed icon operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while resolving bundles or building the icon map.
///
/// None of these reach callers of [`ThemedIconCache`](crate::ThemedIconCache):
/// the cache recovers from every kind and only records a
/// [`Diagnostic`](crate::Diagnostic).
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The requested icon pack is not known to the bundle provider.
    #[error("Themed icon pack '{pack}' does not exist")]
    PackNotFound { pack: String },

    /// A resource identifier does not name a readable resource.
    #[error("Resource {resource} not found in '{package}'")]
    ResourceNotFound { package: String, resource: String },

    /// The mapping document could not be read as a well-formed element stream.
    #[error("Icon map parse error at byte {position}: {message}")]
    Parse { message: String, position: u64 },

    /// Underlying I/O failure while opening a bundle or document.
    #[error("Failed to read '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A configuration value is unusable.
    #[error("Invalid value for '{property}': {message}")]
    InvalidValue { property: String, message: String },

    /// A configuration file could not be decoded.
    #[error("Invalid configuration in '{path}': {message}")]
    Config { path: PathBuf, message: String },
}

impl Error {
    /// Create a pack-not-found error.
    pub fn pack_not_found(pack: impl Into<String>) -> Self {
        Self::PackNotFound { pack: pack.into() }
    }

    /// Create a resource-not-found error.
    pub fn resource_not_found(package: impl Into<String>, resource: impl fmt::Display) -> Self {
        Self::ResourceNotFound {
            package: package.into(),
            resource: resource.to_string(),
        }
    }

    /// Create a parse error.
    pub fn parse(message: impl Into<String>, position: u64) -> Self {
        Self::Parse {
            message: message.into(),
            position,
        }
    }

    /// Create an I/O error.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create a value error.
    pub fn invalid_value(property: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidValue {
            property: property.into(),
            message: message.into(),
        }
    }

    /// Create a configuration decoding error.
    pub fn config(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Config {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Returns true if this error means the pack identifier was unknown.
    pub fn is_pack_not_found(&self) -> bool {
        matches!(self, Self::PackNotFound { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::pack_not_found("com.example.pack");
        assert_eq!(
            err.to_string(),
            "Themed icon pack 'com.example.pack' does not exist"
        );
        assert!(err.is_pack_not_found());
    }

    #[test]
    fn test_parse_error_display() {
        let err = Error::parse("unexpected end of document", 42);
        assert_eq!(
            err.to_string(),
            "Icon map parse error at byte 42: unexpected end of document"
        );
        assert!(!err.is_pack_not_found());
    }

    #[test]
    fn test_io_error_source() {
        use std::error::Error as _;

        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err = Error::io("/packs/missing/xml/grayscale_icon_map.xml", io_err);
        assert!(err.source().is_some());
        assert!(err.to_string().contains("grayscale_icon_map.xml"));
    }
}
