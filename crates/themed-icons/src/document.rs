//! Locating mapping documents inside bundles.

use std::sync::Arc;

use crate::bundle::{Bundle, ResourceId};
use crate::stream::ElementStream;

/// An opened document resource.
///
/// The handle owns the document text; readers created from it with
/// [`elements`](Self::elements) are forward-only and not restartable, but a
/// handle can produce any number of independent readers.
#[derive(Debug, Clone)]
pub struct DocumentHandle {
    id: ResourceId,
    name: String,
    contents: Arc<str>,
}

impl DocumentHandle {
    /// Create a handle over already loaded document text.
    pub fn new(id: ResourceId, name: impl Into<String>, contents: impl Into<Arc<str>>) -> Self {
        Self {
            id,
            name: name.into(),
            contents: contents.into(),
        }
    }

    /// The resource identifier the document was opened from.
    pub fn id(&self) -> ResourceId {
        self.id
    }

    /// The logical name of the document.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The raw document text.
    pub fn contents(&self) -> &str {
        &self.contents
    }

    /// Start a new forward-only element stream over the document.
    pub fn elements(&self) -> ElementStream<&[u8]> {
        ElementStream::from_str(&self.contents)
    }
}

/// Finds named documents within a bundle.
pub trait DocumentLocator {
    /// Find the document `name` of type `kind`, scoped to `namespace`.
    ///
    /// Returns `Ok(None)` when the bundle has no such document and `Err` when
    /// the document exists but could not be opened.
    fn find_document(
        &self,
        bundle: &Bundle,
        name: &str,
        kind: &str,
        namespace: &str,
    ) -> crate::Result<Option<DocumentHandle>>;
}

impl<L: DocumentLocator + ?Sized> DocumentLocator for &L {
    fn find_document(
        &self,
        bundle: &Bundle,
        name: &str,
        kind: &str,
        namespace: &str,
    ) -> crate::Result<Option<DocumentHandle>> {
        (**self).find_document(bundle, name, kind, namespace)
    }
}

/// Locator that goes through the bundle's own resource table.
#[derive(Debug, Default, Clone, Copy)]
pub struct BundleDocumentLocator;

impl DocumentLocator for BundleDocumentLocator {
    fn find_document(
        &self,
        bundle: &Bundle,
        name: &str,
        kind: &str,
        namespace: &str,
    ) -> crate::Result<Option<DocumentHandle>> {
        match bundle.identifier(name, kind, namespace) {
            Some(id) => bundle.open_document(id).map(Some),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::memory::MemoryBundle;

    #[test]
    fn test_handle_accessors() {
        let id = ResourceId::new(3).unwrap();
        let handle = DocumentHandle::new(id, "grayscale_icon_map", "<icons/>");
        assert_eq!(handle.id(), id);
        assert_eq!(handle.name(), "grayscale_icon_map");
        assert_eq!(handle.contents(), "<icons/>");
    }

    #[test]
    fn test_bundle_locator_found() {
        let bundle = MemoryBundle::new("com.example.host");
        bundle.set_document("xml", "grayscale_icon_map", "<icons/>");
        let bundle: Bundle = bundle.into_shared();

        let handle = BundleDocumentLocator
            .find_document(&bundle, "grayscale_icon_map", "xml", "com.example.host")
            .unwrap()
            .unwrap();
        assert_eq!(handle.contents(), "<icons/>");
    }

    #[test]
    fn test_bundle_locator_respects_namespace() {
        let bundle = MemoryBundle::new("com.example.host");
        bundle.set_document("xml", "grayscale_icon_map", "<icons/>");
        let bundle: Bundle = bundle.into_shared();

        let found = BundleDocumentLocator
            .find_document(&bundle, "grayscale_icon_map", "xml", "com.example.pack")
            .unwrap();
        assert!(found.is_none());
    }

    #[test]
    fn test_bundle_locator_missing() {
        let bundle: Bundle = MemoryBundle::new("com.example.host").into_shared();
        let found = BundleDocumentLocator
            .find_document(&bundle, "grayscale_icon_map", "xml", "com.example.host")
            .unwrap();
        assert!(found.is_none());
    }
}
