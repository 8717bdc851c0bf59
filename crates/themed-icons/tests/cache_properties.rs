//! Behavioral tests for the themed icon cache.

use std::cell::{Cell, RefCell};
use std::sync::Arc;

use themed_icons::bundle::{Bundle, ResourceId};
use themed_icons::document::{BundleDocumentLocator, DocumentHandle, DocumentLocator};
use themed_icons::platform::memory::{MemoryBundle, MemoryBundles};
use themed_icons::{CacheState, Diagnostic, ThemeIconMap, ThemedIconCache, ThemedIconConfig};

const MAP_NAME: &str = "grayscale_icon_map";

const E2E_MAP: &str = r#"<icons>
    <icon package="com.example.app" drawable="@drawable/themed_a"/>
    <icon package="com.example.other" drawable="@drawable/themed_b"/>
</icons>"#;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn host() -> Arc<MemoryBundle> {
    let host = MemoryBundle::new("com.example.launcher").into_shared();
    host.add_drawable("themed_a");
    host.add_drawable("themed_b");
    host
}

/// Counts how often the mapping document is requested.
#[derive(Debug, Default)]
struct CountingLocator {
    calls: Cell<usize>,
}

impl CountingLocator {
    fn calls(&self) -> usize {
        self.calls.get()
    }
}

impl DocumentLocator for CountingLocator {
    fn find_document(
        &self,
        bundle: &Bundle,
        name: &str,
        kind: &str,
        namespace: &str,
    ) -> themed_icons::Result<Option<DocumentHandle>> {
        self.calls.set(self.calls.get() + 1);
        BundleDocumentLocator.find_document(bundle, name, kind, namespace)
    }
}

/// Serves whatever document text it currently holds.
#[derive(Debug, Default)]
struct ScriptedLocator {
    contents: RefCell<Option<String>>,
    calls: Cell<usize>,
}

impl ScriptedLocator {
    fn set(&self, contents: &str) {
        *self.contents.borrow_mut() = Some(contents.to_string());
    }
}

impl DocumentLocator for ScriptedLocator {
    fn find_document(
        &self,
        _bundle: &Bundle,
        name: &str,
        _kind: &str,
        _namespace: &str,
    ) -> themed_icons::Result<Option<DocumentHandle>> {
        self.calls.set(self.calls.get() + 1);
        let id = ResourceId::new(0x7f14_0001).unwrap();
        Ok(self
            .contents
            .borrow()
            .as_ref()
            .map(|contents| DocumentHandle::new(id, name, contents.as_str())))
    }
}

#[test]
fn test_repeated_lookup_does_not_reparse() {
    init_tracing();
    let host = host();
    host.set_document("xml", MAP_NAME, E2E_MAP);
    let locator = CountingLocator::default();
    let mut cache = ThemedIconCache::new(
        MemoryBundles::new(host),
        &locator,
        true,
        ThemedIconConfig::default(),
    );
    assert_eq!(locator.calls(), 1);

    let first = cache.lookup("com.example.app", None);
    for _ in 0..10 {
        assert_eq!(cache.lookup("com.example.app", None), first);
    }
    assert!(first.is_some());
    assert_eq!(locator.calls(), 1);
}

#[test]
fn test_duplicate_package_resolves_to_later_record() {
    init_tracing();
    let host = host();
    host.set_document(
        "xml",
        MAP_NAME,
        r#"<icons>
            <icon package="com.example.app" drawable="@drawable/themed_a"/>
            <icon package="com.example.app" drawable="@drawable/themed_b"/>
        </icons>"#,
    );
    let mut cache = ThemedIconCache::with_provider(MemoryBundles::new(host.clone()), true);

    let theme = cache.lookup("com.example.app", None).unwrap();
    assert_eq!(Some(theme.icon()), host.id_of("drawable", "themed_b"));
}

#[test]
fn test_malformed_records_are_skipped() {
    init_tracing();
    let host = host();
    host.set_document(
        "xml",
        MAP_NAME,
        r#"<icons>
            <icon drawable="@drawable/themed_a"/>
            <icon package="com.example.nodrawable"/>
            <icon package="com.example.zero" drawable="0"/>
            <icon package="com.example.app" drawable="@drawable/themed_a"/>
        </icons>"#,
    );
    let mut cache = ThemedIconCache::with_provider(MemoryBundles::new(host), true);

    assert!(cache.lookup("com.example.nodrawable", None).is_none());
    assert!(cache.lookup("com.example.zero", None).is_none());
    assert!(cache.lookup("com.example.app", None).is_some());
    assert_eq!(cache.state().map().map(ThemeIconMap::len), Some(1));
}

#[test]
fn test_missing_document_is_empty_not_disabled() {
    init_tracing();
    let host = host();
    let mut cache = ThemedIconCache::with_provider(MemoryBundles::new(host.clone()), true);

    assert_eq!(cache.state(), &CacheState::Built(ThemeIconMap::new()));
    assert!(cache.lookup("com.example.app", None).is_none());

    host.set_document("xml", MAP_NAME, E2E_MAP);
    cache.set_supported(true);
    assert!(cache.lookup("com.example.app", None).is_some());
}

#[test]
fn test_parse_failure_disables_until_toggle() {
    init_tracing();
    let locator = ScriptedLocator::default();
    locator.set(
        r#"<icons>
            <icon package="com.example.app" drawable="@drawable/themed_a"/>
            <icon package=com.example.other drawable="@drawable/themed_b"/>
        </icons>"#,
    );
    let mut cache = ThemedIconCache::new(
        MemoryBundles::new(host()),
        &locator,
        true,
        ThemedIconConfig::default(),
    );

    assert_eq!(cache.state(), &CacheState::Disabled);
    assert!(cache.lookup("com.example.app", None).is_none());
    assert!(cache.lookup("com.example.other", None).is_none());
    assert!(matches!(cache.diagnostics(), [Diagnostic::ParseFailed { .. }]));

    locator.set(E2E_MAP);
    assert!(cache.lookup("com.example.app", None).is_none());
    assert_eq!(locator.calls.get(), 1);

    cache.set_supported(true);
    assert!(cache.state().is_built());
    assert!(cache.lookup("com.example.app", None).is_some());
    assert!(cache.diagnostics().is_empty());
}

#[test]
fn test_toggle_rebuilds_from_new_document() {
    init_tracing();
    let host = host();
    host.set_document(
        "xml",
        MAP_NAME,
        r#"<icons><icon package="com.example.app" drawable="@drawable/themed_a"/></icons>"#,
    );
    let mut cache = ThemedIconCache::with_provider(MemoryBundles::new(host.clone()), true);
    cache.set_supported(true);
    assert!(cache.lookup("com.example.app", None).is_some());

    host.set_document(
        "xml",
        MAP_NAME,
        r#"<icons><icon package="com.example.other" drawable="@drawable/themed_b"/></icons>"#,
    );
    cache.set_supported(true);
    assert!(cache.lookup("com.example.app", None).is_none());
    let theme = cache.lookup("com.example.other", None).unwrap();
    assert_eq!(Some(theme.icon()), host.id_of("drawable", "themed_b"));
}

#[test]
fn test_host_document_end_to_end() {
    init_tracing();
    let host = host();
    host.set_document("xml", MAP_NAME, E2E_MAP);
    let mut cache = ThemedIconCache::with_provider(MemoryBundles::new(host.clone()), true);

    let theme = cache.lookup("com.example.app", None).unwrap();
    let host_bundle: Bundle = host.clone();
    assert!(theme.is_from(&host_bundle));
    assert_eq!(theme.bundle().package_name(), "com.example.launcher");
    assert_eq!(Some(theme.icon()), host.id_of("drawable", "themed_a"));

    assert!(cache.lookup("com.unknown", None).is_none());
}

#[test]
fn test_icon_pack_overrides_host_document() {
    init_tracing();
    let host = host();
    host.set_document("xml", MAP_NAME, E2E_MAP);
    let pack = MemoryBundle::new("com.example.pack").into_shared();
    let pack_icon = pack.add_drawable("pack_app");
    pack.set_document(
        "xml",
        MAP_NAME,
        r#"<icons><icon package="com.example.app" drawable="@drawable/pack_app"/></icons>"#,
    );
    let bundles = MemoryBundles::new(host);
    bundles.add_pack(pack.clone());

    let config = ThemedIconConfig::new().with_icon_pack("com.example.pack");
    let mut cache = ThemedIconCache::new(&bundles, BundleDocumentLocator, true, config);

    let theme = cache.lookup("com.example.app", None).unwrap();
    let pack_bundle: Bundle = pack;
    assert!(theme.is_from(&pack_bundle));
    assert_eq!(theme.icon(), pack_icon);
    assert!(cache.lookup("com.example.other", None).is_none());

    bundles.remove_pack("com.example.pack");
    cache.set_supported(true);
    assert!(cache.lookup("com.example.other", None).is_some());
    assert_eq!(
        cache.diagnostics(),
        &[Diagnostic::PackNotFound {
            pack: "com.example.pack".to_string()
        }]
    );
}

#[test]
fn test_fingerprint_suffix() {
    init_tracing();
    let config = ThemedIconConfig::new().with_build_revision("eng.20261019");
    let mut cache = ThemedIconCache::new(
        MemoryBundles::new(host()),
        BundleDocumentLocator,
        || false,
        config,
    );
    assert!(!cache.is_supported());
    assert_eq!(cache.fingerprint_suffix(), ",no-theme,eng.20261019");

    cache.set_supported(true);
    assert_eq!(
        cache.system_icon_state("v2"),
        "v2,with-theme,eng.20261019"
    );
}
