//! Device-state fingerprint.
//!
//! A downstream icon render cache keys its entries on a state string it
//! builds itself. Themed icon resolution contributes a suffix recording
//! whether theming is active and which platform build produced the icons, so
//! the render cache is invalidated when either changes. The suffix is opaque
//! to this crate.

/// Marker appended while themed icons are active.
pub const WITH_THEME: &str = ",with-theme";
/// Marker appended while themed icons are inactive.
pub const NO_THEME: &str = ",no-theme";

/// Build the fingerprint suffix, `,with-theme,<rev>` or `,no-theme,<rev>`.
pub fn fingerprint_suffix(supported: bool, build_revision: &str) -> String {
    let marker = if supported { WITH_THEME } else { NO_THEME };
    format!("{marker},{build_revision}")
}

/// Append the fingerprint suffix to a caller-defined base tag.
pub fn system_icon_state(base: &str, supported: bool, build_revision: &str) -> String {
    let mut state = String::with_capacity(base.len() + WITH_THEME.len() + build_revision.len() + 1);
    state.push_str(base);
    state.push_str(&fingerprint_suffix(supported, build_revision));
    state
}
