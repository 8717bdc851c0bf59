//! Logging targets for themed icon resolution.
//!
//! This crate reports every recoverable failure through the `tracing` crate
//! and never installs a subscriber itself. To see the events, install one in
//! your application:
//!
//! ```ignore
//! tracing_subscriber::fmt()
//!     .with_env_filter("themed_icons=debug")
//!     .init();
//! ```

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Crate-wide target.
    pub const ROOT: &str = "themed_icons";
    /// Bundle resolution (pack lookup and fallback).
    pub const RESOLVER: &str = "themed_icons::resolver";
    /// Map cache lifecycle (builds, invalidation).
    pub const CACHE: &str = "themed_icons::cache";
    /// Mapping document parsing.
    pub const PARSER: &str = "themed_icons::parser";
}
