//! Directory-backed bundles.
//!
//! A bundle directory groups resources by kind, one subdirectory per kind,
//! with the file stem as the resource name:
//!
//! ```text
//! com.example.pack/
//!     xml/grayscale_icon_map.xml
//!     drawable/themed_a.png
//!     drawable/themed_b.svg
//! ```
//!
//! Identifiers are assigned when the directory is scanned, in sorted order of
//! kind and then file name, so a given layout always produces the same ids.
//! Icon packs are subdirectories of a pack root named after the pack.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::bundle::{Bundle, BundleProvider, ResourceBundle, ResourceId};
use crate::document::DocumentHandle;
use crate::error::{Error, Result};
use crate::logging::targets;
use crate::platform::ID_BASE;

/// A bundle read from a directory.
#[derive(Debug)]
pub struct DirectoryBundle {
    package: String,
    root: PathBuf,
    ids: HashMap<(String, String), ResourceId>,
    paths: HashMap<ResourceId, (String, PathBuf)>,
}

impl DirectoryBundle {
    /// Scan `root` and build the resource table for `package`.
    pub fn open(package: impl Into<String>, root: impl Into<PathBuf>) -> Result<Self> {
        let package = package.into();
        let root = root.into();

        let mut kinds = sorted_entries(&root).map_err(|e| Error::io(&root, e))?;
        kinds.retain(|path| path.is_dir());

        let mut bundle = Self {
            package,
            root,
            ids: HashMap::new(),
            paths: HashMap::new(),
        };

        let mut next = 0u32;
        for kind_dir in kinds {
            let Some(kind) = file_name(&kind_dir) else {
                continue;
            };
            // Unreadable kind directories are skipped
            let Ok(files) = sorted_entries(&kind_dir) else {
                continue;
            };

            for path in files.into_iter().filter(|path| path.is_file()) {
                let Some(name) = path.file_stem().and_then(|s| s.to_str()) else {
                    continue;
                };
                let key = (kind.to_string(), name.to_string());
                if bundle.ids.contains_key(&key) {
                    tracing::warn!(
                        target: targets::ROOT,
                        path = %path.display(),
                        "duplicate resource name, keeping the first file"
                    );
                    continue;
                }
                next += 1;
                let id = ResourceId::from(ID_BASE.saturating_add(next));
                bundle.paths.insert(id, (name.to_string(), path.clone()));
                bundle.ids.insert(key, id);
            }
        }

        tracing::debug!(
            target: targets::ROOT,
            package = %bundle.package,
            resources = bundle.ids.len(),
            "scanned bundle directory"
        );
        Ok(bundle)
    }

    /// Directory the bundle was read from.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Number of resources found.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Returns true if the directory held no resources.
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Path of the file behind a resource.
    pub fn path_of(&self, id: ResourceId) -> Option<&Path> {
        self.paths.get(&id).map(|(_, path)| path.as_path())
    }
}

impl ResourceBundle for DirectoryBundle {
    fn package_name(&self) -> &str {
        &self.package
    }

    fn identifier(&self, name: &str, kind: &str, package: &str) -> Option<ResourceId> {
        if package != self.package {
            return None;
        }
        self.ids.get(&(kind.to_string(), name.to_string())).copied()
    }

    fn open_document(&self, id: ResourceId) -> Result<DocumentHandle> {
        let (name, path) = self
            .paths
            .get(&id)
            .ok_or_else(|| Error::resource_not_found(&self.package, id))?;
        let contents = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        Ok(DocumentHandle::new(id, name.clone(), contents))
    }
}

/// Bundle provider over a host directory and a root of icon pack directories.
///
/// Packs are scanned each time they are requested, so packs installed or
/// removed on disk are picked up by the next build.
#[derive(Debug)]
pub struct DirectoryBundles {
    host: Arc<DirectoryBundle>,
    pack_root: PathBuf,
}

impl DirectoryBundles {
    /// Create a provider whose packs live under `pack_root`.
    pub fn new(host: DirectoryBundle, pack_root: impl Into<PathBuf>) -> Self {
        Self {
            host: Arc::new(host),
            pack_root: pack_root.into(),
        }
    }

    /// Create a provider using [`default_pack_root`](Self::default_pack_root).
    ///
    /// Returns `None` if the platform has no user data directory.
    pub fn with_default_pack_root(host: DirectoryBundle) -> Option<Self> {
        Self::default_pack_root().map(|root| Self::new(host, root))
    }

    /// The per-user pack root, `<data dir>/icon-packs`.
    pub fn default_pack_root() -> Option<PathBuf> {
        dirs::data_dir().map(|dir| dir.join("icon-packs"))
    }

    /// The host bundle.
    pub fn host(&self) -> &Arc<DirectoryBundle> {
        &self.host
    }

    /// Directory that icon packs are looked up in.
    pub fn pack_root(&self) -> &Path {
        &self.pack_root
    }

    fn pack_dir(&self, pack: &str) -> Option<PathBuf> {
        let valid = !pack.is_empty()
            && pack != "."
            && pack != ".."
            && !pack.contains(['/', '\\']);
        if !valid {
            return None;
        }
        let dir = self.pack_root.join(pack);
        dir.is_dir().then_some(dir)
    }
}

impl BundleProvider for DirectoryBundles {
    fn own_bundle(&self) -> Bundle {
        self.host.clone()
    }

    fn bundle_for(&self, pack: &str) -> Result<Bundle> {
        let dir = self
            .pack_dir(pack)
            .ok_or_else(|| Error::pack_not_found(pack))?;
        let bundle: Bundle = Arc::new(DirectoryBundle::open(pack, dir)?);
        Ok(bundle)
    }
}

fn sorted_entries(dir: &Path) -> std::io::Result<Vec<PathBuf>> {
    let mut paths: Vec<PathBuf> = fs::read_dir(dir)?
        .flatten()
        .map(|entry| entry.path())
        .collect();
    paths.sort();
    Ok(paths)
}

fn file_name(path: &Path) -> Option<&str> {
    path.file_name().and_then(|s| s.to_str())
}
