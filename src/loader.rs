//! File loaders: locate, read, and parse content files.
//!
//! Two modes, matching the two content layouts:
//!
//! - **Single-file** ([`read_yaml_file`]): one YAML document such as
//!   `pages/home.yml`. Any failure is returned to the caller as a
//!   [`ContentError`].
//! - **Directory** ([`read_directory`]): one document per item, e.g.
//!   `services/*.md`. Only a missing or unlistable directory fails the
//!   call. A file that cannot be read or parsed is logged, recorded in
//!   [`DirectoryListing::skipped`], and left out; the rest of the batch
//!   still loads.
//!
//! ## Supported documents
//!
//! | Extension | Format |
//! |---|---|
//! | `.md`, `.markdown` | YAML front-matter + markdown body |
//! | `.yml`, `.yaml` | pure YAML; an optional `body` key holds markdown |
//!
//! Hidden files (leading `.`) and anything else are ignored.

use crate::error::ContentError;
use crate::fields::RawFields;
use crate::frontmatter::{self, FrontmatterError};
use crate::naming::{self, StemParts};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

/// How a document's bytes are interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Markdown,
    Yaml,
}

impl DocumentFormat {
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_string_lossy().to_ascii_lowercase();
        match ext.as_str() {
            "md" | "markdown" => Some(Self::Markdown),
            "yml" | "yaml" => Some(Self::Yaml),
            _ => None,
        }
    }
}

/// One parsed content file, not yet normalized.
#[derive(Debug, Clone, PartialEq)]
pub struct RawDocument {
    pub path: PathBuf,
    /// Order prefix and slug derived from the file name
    pub stem: StemParts,
    pub fields: RawFields,
    /// Markdown body (empty if the file has none)
    pub body: String,
}

/// A directory entry that was left out of a batch.
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedFile {
    pub path: PathBuf,
    pub error: ContentError,
}

/// Result of loading a content directory.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DirectoryListing {
    /// Successfully parsed documents, in file-name order
    pub documents: Vec<RawDocument>,
    pub skipped: Vec<SkippedFile>,
}

fn read_text(path: &Path) -> Result<String, ContentError> {
    fs::read_to_string(path).map_err(|e| ContentError::from_io(path, &e))
}

fn frontmatter_error(path: &Path, err: FrontmatterError) -> ContentError {
    ContentError::parse(path, err)
}

/// Read one YAML file as a single mapping.
pub fn read_yaml_file(path: &Path) -> Result<RawFields, ContentError> {
    let text = read_text(path)?;
    frontmatter::parse_yaml(&text).map_err(|e| frontmatter_error(path, e))
}

/// Read and parse one content document, choosing the format by extension.
pub fn read_document(path: &Path) -> Result<RawDocument, ContentError> {
    let format = DocumentFormat::from_path(path)
        .ok_or_else(|| ContentError::parse(path, "unsupported file extension"))?;
    let text = read_text(path)?;

    let (fields, body) = match format {
        DocumentFormat::Markdown => {
            let (fields, body) =
                frontmatter::split(&text).map_err(|e| frontmatter_error(path, e))?;
            (fields, body.to_string())
        }
        DocumentFormat::Yaml => {
            let fields = frontmatter::parse_yaml(&text).map_err(|e| frontmatter_error(path, e))?;
            let body = fields.text(&["body"]).unwrap_or_default();
            (fields, body)
        }
    };

    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default();

    Ok(RawDocument {
        path: path.to_path_buf(),
        stem: naming::parse_file_stem(&stem),
        fields,
        body,
    })
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .map(|n| n.to_string_lossy().starts_with('.'))
        .unwrap_or(true)
}

/// Content files directly inside `dir`, sorted by file name.
pub fn list_documents(dir: &Path) -> Result<Vec<PathBuf>, ContentError> {
    if !dir.is_dir() {
        return Err(ContentError::not_found(dir));
    }
    let mut paths = Vec::new();
    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry.map_err(|e| match e.io_error() {
            Some(io) => ContentError::from_io(dir, io),
            None => ContentError::Unreadable {
                path: dir.to_path_buf(),
                message: e.to_string(),
            },
        })?;
        let path = entry.path();
        if entry.file_type().is_file()
            && !is_hidden(path)
            && DocumentFormat::from_path(path).is_some()
        {
            paths.push(path.to_path_buf());
        }
    }
    Ok(paths)
}

/// Load every document in a content directory.
///
/// Per-file failures are isolated: the file is logged and skipped.
pub fn read_directory(dir: &Path) -> Result<DirectoryListing, ContentError> {
    let mut listing = DirectoryListing::default();
    for path in list_documents(dir)? {
        match read_document(&path) {
            Ok(doc) => listing.documents.push(doc),
            Err(error) => {
                warn!(
                    path = %path.display(),
                    reason = error.label(),
                    "skipping content file: {error}"
                );
                listing.skipped.push(SkippedFile { path, error });
            }
        }
    }
    debug!(
        dir = %dir.display(),
        loaded = listing.documents.len(),
        skipped = listing.skipped.len(),
        "loaded content directory"
    );
    Ok(listing)
}

/// Locate the file for `slug` inside `dir` by name.
///
/// Tries `{slug}.md`, `{slug}.markdown`, `{slug}.yml`, `{slug}.yaml`, then any
/// `NNN-{slug}.*`. Does not look inside files; see
/// [`ContentStore`](crate::assemble::ContentStore) for the front-matter
/// slug lookup that follows a miss here.
pub fn find_by_slug(dir: &Path, slug: &str) -> Result<Option<PathBuf>, ContentError> {
    for ext in ["md", "markdown", "yml", "yaml"] {
        let candidate = dir.join(format!("{slug}.{ext}"));
        if candidate.is_file() {
            return Ok(Some(candidate));
        }
    }
    let found = list_documents(dir)?.into_iter().find(|p| {
        p.file_stem()
            .map(|s| naming::matches_slug(&s.to_string_lossy(), slug))
            .unwrap_or(false)
    });
    Ok(found)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::write_file;
    use tempfile::TempDir;

    // =========================================================================
    // Single-file mode
    // =========================================================================

    #[test]
    fn yaml_file_parses_mapping() {
        let tmp = TempDir::new().unwrap();
        let path = write_file(tmp.path(), "home.yml", "hero:\n  title: Hi\n");
        let fields = read_yaml_file(&path).unwrap();
        assert!(fields.object(&["hero"]).is_some());
    }

    #[test]
    fn missing_yaml_file_is_not_found() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("missing.yml");
        assert_eq!(
            read_yaml_file(&path).unwrap_err(),
            ContentError::not_found(&path)
        );
    }

    #[test]
    fn malformed_yaml_file_is_parse_error() {
        let tmp = TempDir::new().unwrap();
        let path = write_file(tmp.path(), "home.yml", "hero: [unclosed\n");
        let err = read_yaml_file(&path).unwrap_err();
        assert!(matches!(err, ContentError::Parse { .. }));
    }

    #[test]
    fn empty_yaml_file_is_empty_mapping() {
        let tmp = TempDir::new().unwrap();
        let path = write_file(tmp.path(), "home.yml", "");
        assert!(read_yaml_file(&path).unwrap().is_empty());
    }

    // =========================================================================
    // Documents
    // =========================================================================

    #[test]
    fn markdown_document_has_fields_body_and_stem() {
        let tmp = TempDir::new().unwrap();
        let path = write_file(
            tmp.path(),
            "010-web-development.md",
            "---\ntitle: Web Development\n---\n# Hello\n",
        );
        let doc = read_document(&path).unwrap();
        assert_eq!(doc.stem.order, Some(10));
        assert_eq!(doc.stem.slug, "web-development");
        assert_eq!(doc.fields.text(&["title"]).as_deref(), Some("Web Development"));
        assert_eq!(doc.body, "# Hello\n");
    }

    #[test]
    fn yaml_document_takes_body_key() {
        let tmp = TempDir::new().unwrap();
        let path = write_file(tmp.path(), "guide.yaml", "title: Guide\nbody: '**bold**'\n");
        let doc = read_document(&path).unwrap();
        assert_eq!(doc.body, "**bold**");
    }

    #[test]
    fn invalid_utf8_is_unreadable() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("broken.md");
        fs::write(&path, [0xff, 0xfe, 0x00, 0x80]).unwrap();
        let err = read_document(&path).unwrap_err();
        assert!(matches!(err, ContentError::Unreadable { .. }));
    }

    // =========================================================================
    // Directory mode
    // =========================================================================

    #[test]
    fn missing_directory_is_not_found() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("services");
        assert_eq!(read_directory(&dir).unwrap_err(), ContentError::not_found(&dir));
    }

    #[test]
    fn directory_skips_hidden_and_foreign_files() {
        let tmp = TempDir::new().unwrap();
        write_file(tmp.path(), "a.md", "---\ntitle: A\n---\n");
        write_file(tmp.path(), ".draft.md", "---\ntitle: Hidden\n---\n");
        write_file(tmp.path(), "notes.txt", "not content");
        fs::create_dir_all(tmp.path().join("nested.md")).unwrap();

        let listing = read_directory(tmp.path()).unwrap();
        assert_eq!(listing.documents.len(), 1);
        assert!(listing.skipped.is_empty());
    }

    #[test]
    fn one_bad_file_does_not_fail_the_batch() {
        let tmp = TempDir::new().unwrap();
        write_file(tmp.path(), "a.md", "---\ntitle: A\n---\n");
        write_file(tmp.path(), "b.md", "---\ntitle: [broken\n---\n");
        write_file(tmp.path(), "c.md", "---\ntitle: C\n---\n");

        let listing = read_directory(tmp.path()).unwrap();
        let titles: Vec<_> = listing
            .documents
            .iter()
            .map(|d| d.fields.text(&["title"]).unwrap())
            .collect();
        assert_eq!(titles, vec!["A", "C"]);
        assert_eq!(listing.skipped.len(), 1);
        assert!(listing.skipped[0].path.ends_with("b.md"));
        assert!(listing.skipped[0].error.is_parse_failure());
    }

    #[test]
    fn documents_come_back_in_file_name_order() {
        let tmp = TempDir::new().unwrap();
        write_file(tmp.path(), "020-b.md", "");
        write_file(tmp.path(), "010-a.md", "");
        write_file(tmp.path(), "030-c.yml", "title: C");

        let listing = read_directory(tmp.path()).unwrap();
        let slugs: Vec<_> = listing.documents.iter().map(|d| d.stem.slug.as_str()).collect();
        assert_eq!(slugs, vec!["a", "b", "c"]);
    }

    #[test]
    fn find_by_slug_exact_and_prefixed() {
        let tmp = TempDir::new().unwrap();
        write_file(tmp.path(), "cloud.md", "");
        write_file(tmp.path(), "020-web-development.md", "");

        assert!(find_by_slug(tmp.path(), "cloud").unwrap().unwrap().ends_with("cloud.md"));
        assert!(
            find_by_slug(tmp.path(), "web-development")
                .unwrap()
                .unwrap()
                .ends_with("020-web-development.md")
        );
        assert_eq!(find_by_slug(tmp.path(), "nope").unwrap(), None);
    }
}
