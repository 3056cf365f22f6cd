//! Site search and list selection.
//!
//! Search is a case-insensitive substring match over the assembled
//! records, which are already in memory after [`SiteContent::assemble`].
//! A few hundred records do not need an index.
//!
//! Searched fields per type:
//!
//! | Type | Fields |
//! |---|---|
//! | `Service` | title, excerpt, features, technologies |
//! | `CaseStudy` | title, excerpt, client, industry, technologies |
//! | `Insight` | title, excerpt, category, tags, author |
//! | `Resource` | title, excerpt, resource type |

use crate::assemble::DirectoryRecord;
use crate::site::SiteContent;
use crate::types::{CaseStudy, ContentKind, Insight, Resource, Service};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchHit {
    pub kind: ContentKind,
    pub slug: String,
    pub title: String,
    pub excerpt: String,
}

/// A record with searchable fields beyond title and excerpt.
trait Searchable: DirectoryRecord {
    fn keywords(&self) -> Vec<&str>;
}

impl Searchable for Service {
    fn keywords(&self) -> Vec<&str> {
        self.features
            .iter()
            .chain(&self.technologies)
            .map(String::as_str)
            .collect()
    }
}

impl Searchable for CaseStudy {
    fn keywords(&self) -> Vec<&str> {
        [self.client.as_str(), self.industry.as_str()]
            .into_iter()
            .chain(self.technologies.iter().map(String::as_str))
            .collect()
    }
}

impl Searchable for Insight {
    fn keywords(&self) -> Vec<&str> {
        [self.category.as_str(), self.author.as_str()]
            .into_iter()
            .chain(self.tags.iter().map(String::as_str))
            .collect()
    }
}

impl Searchable for Resource {
    fn keywords(&self) -> Vec<&str> {
        vec![self.resource_type.as_str()]
    }
}

fn hits_in<T: Searchable>(items: &[T], needle: &str, hits: &mut Vec<SearchHit>) {
    for item in items {
        let matched = [item.title(), item.excerpt()]
            .into_iter()
            .chain(item.keywords())
            .any(|field| field.to_lowercase().contains(needle));
        if matched {
            hits.push(SearchHit {
                kind: T::KIND,
                slug: item.slug().to_string(),
                title: item.title().to_string(),
                excerpt: item.excerpt().to_string(),
            });
        }
    }
}

/// Find records mentioning `query`, grouped by type in collection order.
///
/// A blank query matches nothing.
pub fn search(site: &SiteContent, query: &str) -> Vec<SearchHit> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }
    let mut hits = Vec::new();
    hits_in(&site.services.items, &needle, &mut hits);
    hits_in(&site.case_studies.items, &needle, &mut hits);
    hits_in(&site.insights.items, &needle, &mut hits);
    hits_in(&site.resources.items, &needle, &mut hits);
    hits
}

/// Items flagged `featured`, keeping their order.
pub fn featured<T: DirectoryRecord>(items: &[T]) -> Vec<&T> {
    items.iter().filter(|item| item.featured()).collect()
}

/// Insights in `category`, compared case-insensitively.
pub fn by_category<'a>(insights: &'a [Insight], category: &str) -> Vec<&'a Insight> {
    let wanted = category.trim();
    insights
        .iter()
        .filter(|insight| insight.category.eq_ignore_ascii_case(wanted))
        .collect()
}

/// Case studies that list `service_slug` among their services.
pub fn related_case_studies<'a>(
    case_studies: &'a [CaseStudy],
    service_slug: &str,
) -> Vec<&'a CaseStudy> {
    case_studies
        .iter()
        .filter(|study| study.services.iter().any(|s| s == service_slug))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fallback;
    use crate::settings::SettingsCache;
    use crate::test_helpers::store_at;
    use tempfile::TempDir;

    fn fallback_site() -> SiteContent {
        let tmp = TempDir::new().unwrap();
        let store = store_at(tmp.path());
        SiteContent::assemble(&store, &SettingsCache::new(&store))
    }

    #[test]
    fn search_is_case_insensitive_across_types() {
        let hits = search(&fallback_site(), "CLOUD");
        let kinds: Vec<_> = hits.iter().map(|h| h.kind).collect();
        assert!(kinds.contains(&ContentKind::Service));
        assert!(kinds.contains(&ContentKind::CaseStudy));
        assert!(kinds.contains(&ContentKind::Insight));
        assert!(kinds.contains(&ContentKind::Resource));

        let services: Vec<_> = hits
            .iter()
            .filter(|h| h.kind == ContentKind::Service)
            .map(|h| h.slug.as_str())
            .collect();
        assert_eq!(services, vec!["cloud-infrastructure"]);
    }

    #[test]
    fn search_matches_keywords() {
        let hits = search(&fallback_site(), "terraform");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].slug, "cloud-infrastructure");
    }

    #[test]
    fn blank_query_matches_nothing() {
        assert!(search(&fallback_site(), "   ").is_empty());
    }

    #[test]
    fn featured_filters_and_keeps_order() {
        let mut services = fallback::services();
        services[1].featured = false;
        let slugs: Vec<_> = featured(&services).iter().map(|s| s.slug.as_str()).collect();
        assert_eq!(slugs, vec!["web-development", "it-strategy"]);
    }

    #[test]
    fn category_match_ignores_case() {
        let insights = fallback::insights();
        assert_eq!(by_category(&insights, "cloud").len(), 1);
        assert!(by_category(&insights, "security").is_empty());
    }

    #[test]
    fn related_case_studies_by_service_slug() {
        let studies = fallback::case_studies();
        assert_eq!(related_case_studies(&studies, "web-development").len(), 1);
        assert!(related_case_studies(&studies, "it-strategy").is_empty());
    }
}
