//! File-stem parsing for content entries.
//!
//! Content files may carry an optional numeric prefix (`NNN-`) that doubles
//! as a default sort position, followed by the slug:
//!
//! - `010-web-development.md` → order `10`, slug `web-development`
//! - `cloud-migration.md` → no order, slug `cloud-migration`
//!
//! The file name is only a convention. A `slug` or `order` key in the
//! front-matter always wins over what the file name suggests.

use std::path::{Component, Path};

/// Result of parsing a content file stem like `010-web-development`.
#[derive(Debug, Clone, PartialEq)]
pub struct StemParts {
    /// Number prefix if present (e.g., `10` from `010-web-development`)
    pub order: Option<u32>,
    /// Slug part after `NNN-`. For unprefixed stems, the full input.
    pub slug: String,
}

/// Parse a file stem following the `NNN-slug` convention.
///
/// - `"010-web-development"` → order=Some(10), slug="web-development"
/// - `"cloud-migration"` → order=None, slug="cloud-migration"
/// - `"2024-roadmap"` → order=Some(2024), slug="roadmap"
/// - `"007"` → order=Some(7), slug="007" (a bare number is still a usable slug)
pub fn parse_file_stem(stem: &str) -> StemParts {
    if let Some((prefix, rest)) = stem.split_once('-')
        && !rest.is_empty()
        && let Ok(order) = prefix.parse::<u32>()
    {
        return StemParts {
            order: Some(order),
            slug: rest.to_string(),
        };
    }
    if let Ok(order) = stem.parse::<u32>() {
        return StemParts {
            order: Some(order),
            slug: stem.to_string(),
        };
    }
    StemParts {
        order: None,
        slug: stem.to_string(),
    }
}

/// Whether a file stem names `slug`, with or without an order prefix.
pub fn matches_slug(stem: &str, slug: &str) -> bool {
    stem == slug || parse_file_stem(stem).slug == slug
}

/// Whether `slug` names an entry directly inside a content directory.
///
/// Rejects empty slugs, separators (`/` and `\` on every platform), `.`,
/// `..` and anything else that is not one plain path component.
pub fn is_plain_slug(slug: &str) -> bool {
    if slug.is_empty() || slug.contains(['/', '\\']) {
        return false;
    }
    let mut components = Path::new(slug).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefixed_multi_word_slug() {
        let p = parse_file_stem("010-web-development");
        assert_eq!(p.order, Some(10));
        assert_eq!(p.slug, "web-development");
    }

    #[test]
    fn unprefixed_slug_kept_whole() {
        let p = parse_file_stem("cloud-migration");
        assert_eq!(p.order, None);
        assert_eq!(p.slug, "cloud-migration");
    }

    #[test]
    fn bare_number_is_order_and_slug() {
        let p = parse_file_stem("007");
        assert_eq!(p.order, Some(7));
        assert_eq!(p.slug, "007");
    }

    #[test]
    fn trailing_dash_is_not_a_prefix() {
        let p = parse_file_stem("001-");
        assert_eq!(p.order, None);
        assert_eq!(p.slug, "001-");
    }

    #[test]
    fn zero_prefix() {
        let p = parse_file_stem("000-first");
        assert_eq!(p.order, Some(0));
        assert_eq!(p.slug, "first");
    }

    #[test]
    fn matches_slug_with_and_without_prefix() {
        assert!(matches_slug("web-development", "web-development"));
        assert!(matches_slug("020-web-development", "web-development"));
        assert!(!matches_slug("020-web-design", "web-development"));
    }

    #[test]
    fn plain_slugs_are_single_components() {
        assert!(is_plain_slug("web-development"));
        assert!(is_plain_slug("007"));
        assert!(is_plain_slug("v1.2-notes"));
    }

    #[test]
    fn traversal_and_separators_are_not_slugs() {
        for slug in ["", ".", "..", "../pages/about", "a/b", "a\\b", "/etc/passwd", "services/"] {
            assert!(!is_plain_slug(slug), "{slug:?} accepted");
        }
    }
}
