//! Device capability check for themed icons.

/// Answers whether the themed-icon feature is enabled on this device.
///
/// The cache consults this once, at construction, to seed its supported
/// flag. Later changes are pushed through
/// [`ThemedIconCache::set_supported`](crate::ThemedIconCache::set_supported).
pub trait ThemeCapability {
    /// Returns true if themed icons are enabled.
    fn is_themed_icon_enabled(&self) -> bool;
}

impl ThemeCapability for bool {
    fn is_themed_icon_enabled(&self) -> bool {
        *self
    }
}

impl<F> ThemeCapability for F
where
    F: Fn() -> bool,
{
    fn is_themed_icon_enabled(&self) -> bool {
        self()
    }
}
