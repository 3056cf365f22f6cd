//! End-to-end tests of the content pipeline through the public API.
//!
//! Each test builds a content tree in a temp directory (optionally starting
//! from `fixtures/content`), points a `ContentStore` at it, and checks what
//! consumers would receive.

use site_content::assemble::{Assembled, ContentStore, Provenance};
use site_content::config::{ContentConfig, load_config};
use site_content::error::ContentError;
use site_content::fallback;
use site_content::markdown::{MarkdownRenderer, RENDER_ERROR_PLACEHOLDER, RenderError};
use site_content::settings::{SettingsCache, SettingsLoader};
use site_content::site::SiteContent;
use site_content::types::GeneralSettings;
use site_content::validate::Validate;
use std::fs;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use tempfile::TempDir;

// =========================================================================
// Helpers
// =========================================================================

fn copy_dir(src: &Path, dst: &Path) {
    for entry in fs::read_dir(src).unwrap() {
        let entry = entry.unwrap();
        let target = dst.join(entry.file_name());
        if entry.path().is_dir() {
            fs::create_dir_all(&target).unwrap();
            copy_dir(&entry.path(), &target);
        } else {
            fs::copy(entry.path(), &target).unwrap();
        }
    }
}

fn fixture_tree() -> TempDir {
    let tmp = TempDir::new().unwrap();
    copy_dir(
        &Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/content"),
        tmp.path(),
    );
    tmp
}

fn write(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn store(root: &Path) -> ContentStore {
    ContentStore::new(ContentConfig {
        content_root: root.to_path_buf(),
        ..ContentConfig::default()
    })
}

fn assemble(store: &ContentStore) -> SiteContent {
    SiteContent::assemble(store, &SettingsCache::new(store))
}

// =========================================================================
// Idempotence
// =========================================================================

#[test]
fn assembling_twice_gives_identical_results() {
    let tmp = fixture_tree();
    write(tmp.path(), "services/broken.md", "---\ntitle: [oops\n---\n");
    write(tmp.path(), "case-studies/no-client.md", "---\ntitle: X\nexcerpt: y\n---\n");
    let store = store(tmp.path());

    assert_eq!(assemble(&store), assemble(&store));
    assert_eq!(store.insight("missing"), store.insight("missing"));
}

// =========================================================================
// Fallback validity and fail-closed behaviour
// =========================================================================

#[test]
fn every_fallback_passes_validation() {
    assert!(fallback::homepage().validate().success);
    assert!(fallback::about().validate().success);
    assert!(fallback::settings().validate().success);
    for slug in ["web-development", "anything-else", ""] {
        assert!(fallback::service(slug).validate().success);
        assert!(fallback::case_study(slug).validate().success);
        assert!(fallback::insight(slug).validate().success);
        assert!(fallback::persona(slug).validate().success);
        assert!(fallback::resource(slug).validate().success);
    }
}

#[test]
fn empty_content_root_serves_fallbacks_everywhere() {
    let tmp = TempDir::new().unwrap();
    let site = assemble(&store(tmp.path()));
    assert_eq!(site.homepage.value, fallback::homepage());
    assert_eq!(site.about.value, fallback::about());
    assert_eq!(site.settings.value, fallback::settings());
    assert_eq!(site.insights.items, fallback::insights());
    assert_eq!(site.personas.items, fallback::personas());
}

#[test]
fn missing_required_field_never_leaks_partial_record() {
    let tmp = fixture_tree();
    write(
        tmp.path(),
        "insights/choosing-a-cloud-provider.md",
        "---\ntitle: Choosing a Cloud Provider\nexcerpt: x\n---\n",
    );
    let result = store(tmp.path()).insight("choosing-a-cloud-provider");
    assert_eq!(result.value, fallback::insight("choosing-a-cloud-provider"));
    match result.provenance {
        Provenance::Fallback(ContentError::Validation { errors }) => {
            assert_eq!(errors.len(), 1);
            assert_eq!(errors[0].field, "author");
        }
        other => panic!("expected validation fallback, got {other:?}"),
    }
}

// =========================================================================
// Partial-batch resilience
// =========================================================================

#[test]
fn one_malformed_file_leaves_the_rest_intact() {
    let tmp = fixture_tree();
    let before = store(tmp.path()).services();
    write(tmp.path(), "services/040-broken.md", "---\ntitle: [unclosed\n---\n");

    let after = store(tmp.path()).services();
    assert_eq!(after.provenance, Provenance::Cms);
    assert_eq!(after.items, before.items);
    assert_eq!(after.skipped.len(), 1);
    assert!(after.skipped[0].error.is_parse_failure());
}

#[test]
fn unreadable_middle_file_keeps_neighbours_in_order() {
    let tmp = TempDir::new().unwrap();
    write(
        tmp.path(),
        "services/a-first.md",
        "---\ntitle: First\nexcerpt: one\norder: 5\n---\n",
    );
    fs::write(tmp.path().join("services/b-broken.md"), [0xff, 0xfe, b'-', 0x80]).unwrap();
    write(
        tmp.path(),
        "services/c-third.md",
        "---\ntitle: Third\nexcerpt: three\norder: 5\n---\n",
    );

    let services = store(tmp.path()).services();
    assert_eq!(services.provenance, Provenance::Cms);
    let slugs: Vec<_> = services.items.iter().map(|s| s.slug.as_str()).collect();
    assert_eq!(slugs, vec!["a-first", "c-third"]);
    assert!(services.substituted.is_empty());
    assert_eq!(services.skipped.len(), 1);
    assert!(services.skipped[0].path.ends_with("b-broken.md"));
    assert!(matches!(
        services.skipped[0].error,
        ContentError::Unreadable { .. }
    ));
}

// =========================================================================
// Settings cache
// =========================================================================

struct CountingLoader {
    loads: AtomicUsize,
}

impl SettingsLoader for CountingLoader {
    fn load_settings(&self) -> Assembled<GeneralSettings> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        Assembled::cms(fallback::settings())
    }
}

#[test]
fn cache_loads_once_until_cleared() {
    let loader = CountingLoader {
        loads: AtomicUsize::new(0),
    };
    let cache = SettingsCache::new(&loader);

    let first = cache.get();
    assert_eq!(cache.get(), first);
    assert_eq!(loader.loads.load(Ordering::SeqCst), 1);

    cache.clear();
    cache.get();
    assert_eq!(loader.loads.load(Ordering::SeqCst), 2);

    cache.get_uncached();
    assert_eq!(loader.loads.load(Ordering::SeqCst), 3);
    cache.get();
    assert_eq!(loader.loads.load(Ordering::SeqCst), 3);
}

#[test]
fn site_assembly_reads_settings_through_the_cache() {
    let tmp = fixture_tree();
    let store = store(tmp.path());
    let cache = SettingsCache::new(&store);
    SiteContent::assemble(&store, &cache);

    write(tmp.path(), "settings/general.yml", "siteName: Changed\ncontactEmail: a@b.test\n");
    let site = SiteContent::assemble(&store, &cache);
    assert_eq!(site.settings.value.site_name, "Northwind Consulting");

    cache.clear();
    let site = SiteContent::assemble(&store, &cache);
    assert_eq!(site.settings.value.site_name, "Changed");
}

// =========================================================================
// Sorting
// =========================================================================

#[test]
fn collections_sort_by_order_then_newest_first() {
    let tmp = fixture_tree();
    let slugs: Vec<_> = store(tmp.path())
        .services()
        .items
        .into_iter()
        .map(|s| s.slug)
        .collect();
    assert_eq!(slugs, vec!["web-development", "cloud-infrastructure", "it-strategy"]);

    let insights: Vec<_> = store(tmp.path())
        .insights()
        .items
        .into_iter()
        .map(|i| i.slug)
        .collect();
    assert_eq!(insights, vec!["choosing-a-cloud-provider", "technical-debt-budget"]);
}

#[test]
fn full_ties_keep_file_name_order() {
    let tmp = TempDir::new().unwrap();
    for name in ["delta", "alpha", "charlie", "bravo"] {
        write(
            tmp.path(),
            &format!("resources/{name}.md"),
            &format!("---\ntitle: {name}\nexcerpt: x\norder: 5\npublishDate: 2024-01-01\n---\n"),
        );
    }
    let slugs: Vec<_> = store(tmp.path())
        .resources()
        .items
        .into_iter()
        .map(|r| r.slug)
        .collect();
    assert_eq!(slugs, vec!["alpha", "bravo", "charlie", "delta"]);
}

// =========================================================================
// Markdown render isolation
// =========================================================================

struct ExplodingRenderer;

impl MarkdownRenderer for ExplodingRenderer {
    fn render(&self, _markdown: &str) -> Result<String, RenderError> {
        Err(RenderError("unsupported syntax".into()))
    }
}

#[test]
fn render_failure_only_replaces_content() {
    let tmp = fixture_tree();
    let config = ContentConfig {
        content_root: tmp.path().to_path_buf(),
        ..ContentConfig::default()
    };
    let failing = ContentStore::with_renderer(config, Box::new(ExplodingRenderer));
    let working = store(tmp.path());

    let broken = failing.service("web-development");
    let good = working.service("web-development");
    assert_eq!(broken.provenance, Provenance::Cms);
    assert_eq!(broken.value.title, good.value.title);
    assert_eq!(broken.value.slug, good.value.slug);
    assert_eq!(broken.value.excerpt, good.value.excerpt);
    assert_eq!(broken.value.content, RENDER_ERROR_PLACEHOLDER);
    assert_ne!(good.value.content, RENDER_ERROR_PLACEHOLDER);
}

// =========================================================================
// Example scenario
// =========================================================================

#[test]
fn web_development_with_empty_excerpt() {
    let tmp = TempDir::new().unwrap();
    write(
        tmp.path(),
        "services/web-development.md",
        "---\ntitle: \"Web Development\"\nslug: \"web-development\"\nexcerpt: \"\"\n---\n# Hello",
    );
    let result = store(tmp.path()).service("web-development");

    assert_eq!(result.provenance, Provenance::Cms);
    assert_eq!(result.value.title, "Web Development");
    assert!(!result.value.excerpt.trim().is_empty());
    assert_eq!(result.value.content, "<h1>Hello</h1>\n");
    assert!(result.value.validate().success);
}

// =========================================================================
// Configuration
// =========================================================================

#[test]
fn config_file_relocates_content_directories() {
    let tmp = TempDir::new().unwrap();
    write(
        tmp.path(),
        "content.toml",
        "content_root = \"cms\"\n[paths]\ninsights = \"blog\"\n",
    );
    write(
        tmp.path(),
        "cms/blog/hello.md",
        "---\ntitle: Hello\nexcerpt: First post\nauthor: Sam\n---\nHi.",
    );
    let config = load_config(&tmp.path().join("content.toml")).unwrap();
    let insights = ContentStore::new(config).insights();
    assert_eq!(insights.provenance, Provenance::Cms);
    assert_eq!(insights.items[0].slug, "hello");
}

#[test]
fn manifest_serializes_fixture_site() {
    let tmp = fixture_tree();
    let manifest = assemble(&store(tmp.path())).manifest("https://northwind.test");
    let json = serde_json::to_value(&manifest).unwrap();
    assert_eq!(json["settings"]["site_name"], "Northwind Consulting");
    assert_eq!(json["services"].as_array().unwrap().len(), 3);
    assert_eq!(
        json["structuredData"]["organization"]["url"],
        "https://northwind.test/"
    );
    assert!(json["sources"].as_array().unwrap().iter().all(|s| s["source"] == "cms"));
}
