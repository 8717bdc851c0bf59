//! In-memory bundles.
//!
//! Resource tables held entirely in memory. Useful for embedding a mapping
//! document in the application binary and for exercising the cache without a
//! platform. Contents can be changed after the bundle has been shared, which
//! takes effect on the next map build.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::bundle::{Bundle, BundleProvider, ResourceBundle, ResourceId};
use crate::document::DocumentHandle;
use crate::error::{Error, Result};
use crate::platform::ID_BASE;

#[derive(Debug, Default)]
struct ResourceTable {
    ids: HashMap<(String, String), ResourceId>,
    documents: HashMap<ResourceId, (String, Arc<str>)>,
    next: u32,
}

impl ResourceTable {
    fn intern(&mut self, kind: &str, name: &str) -> ResourceId {
        let key = (kind.to_string(), name.to_string());
        if let Some(id) = self.ids.get(&key) {
            return *id;
        }
        self.next += 1;
        let id = ResourceId::from(ID_BASE.saturating_add(self.next));
        self.ids.insert(key, id);
        id
    }
}

/// A bundle whose resource table lives in memory.
#[derive(Debug)]
pub struct MemoryBundle {
    package: String,
    table: RwLock<ResourceTable>,
}

impl MemoryBundle {
    /// Create an empty bundle owned by `package`.
    pub fn new(package: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            table: RwLock::new(ResourceTable::default()),
        }
    }

    /// Wrap the bundle for sharing.
    pub fn into_shared(self) -> Arc<Self> {
        Arc::new(self)
    }

    /// Register a resource, returning its identifier.
    ///
    /// Registering the same kind and name again returns the same identifier.
    pub fn add_resource(&self, kind: &str, name: &str) -> ResourceId {
        self.table.write().intern(kind, name)
    }

    /// Register a drawable resource.
    pub fn add_drawable(&self, name: &str) -> ResourceId {
        self.add_resource("drawable", name)
    }

    /// Register or replace a document resource.
    pub fn set_document(&self, kind: &str, name: &str, contents: impl Into<Arc<str>>) -> ResourceId {
        let mut table = self.table.write();
        let id = table.intern(kind, name);
        table
            .documents
            .insert(id, (name.to_string(), contents.into()));
        id
    }

    /// Remove a document resource entirely.
    ///
    /// Returns false if there was no such document.
    pub fn remove_document(&self, kind: &str, name: &str) -> bool {
        let mut table = self.table.write();
        match table.ids.remove(&(kind.to_string(), name.to_string())) {
            Some(id) => table.documents.remove(&id).is_some(),
            None => false,
        }
    }

    /// Look up an identifier without a namespace check.
    pub fn id_of(&self, kind: &str, name: &str) -> Option<ResourceId> {
        self.table
            .read()
            .ids
            .get(&(kind.to_string(), name.to_string()))
            .copied()
    }
}

impl ResourceBundle for MemoryBundle {
    fn package_name(&self) -> &str {
        &self.package
    }

    fn identifier(&self, name: &str, kind: &str, package: &str) -> Option<ResourceId> {
        if package != self.package {
            return None;
        }
        self.id_of(kind, name)
    }

    fn open_document(&self, id: ResourceId) -> Result<DocumentHandle> {
        let table = self.table.read();
        let (name, contents) = table
            .documents
            .get(&id)
            .ok_or_else(|| Error::resource_not_found(&self.package, id))?;
        Ok(DocumentHandle::new(id, name.clone(), contents.clone()))
    }
}

/// Bundle provider backed by in-memory bundles.
#[derive(Debug)]
pub struct MemoryBundles {
    host: Arc<MemoryBundle>,
    packs: RwLock<HashMap<String, Arc<MemoryBundle>>>,
}

impl MemoryBundles {
    /// Create a provider whose own bundle is `host`.
    pub fn new(host: Arc<MemoryBundle>) -> Self {
        Self {
            host,
            packs: RwLock::new(HashMap::new()),
        }
    }

    /// The host bundle.
    pub fn host(&self) -> &Arc<MemoryBundle> {
        &self.host
    }

    /// Install an icon pack, keyed by its package name.
    pub fn add_pack(&self, pack: Arc<MemoryBundle>) {
        self.packs.write().insert(pack.package.clone(), pack);
    }

    /// Uninstall an icon pack.
    pub fn remove_pack(&self, pack: &str) -> bool {
        self.packs.write().remove(pack).is_some()
    }
}

impl BundleProvider for MemoryBundles {
    fn own_bundle(&self) -> Bundle {
        self.host.clone()
    }

    fn bundle_for(&self, pack: &str) -> Result<Bundle> {
        match self.packs.read().get(pack) {
            Some(bundle) => Ok(Arc::clone(bundle) as Bundle),
            None => Err(Error::pack_not_found(pack)),
        }
    }
}
