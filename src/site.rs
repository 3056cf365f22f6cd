//! Whole-site assembly, load reports, and the build manifest.
//!
//! [`SiteContent::assemble`] loads every content type once. The CLI uses
//! the result three ways:
//!
//! - `check` prints [`SiteContent::report`], one line per content type;
//! - `build` writes [`SiteContent::manifest`] as `content.json`;
//! - strict mode fails both when [`SiteContent::parse_failures`] is non-empty.

use crate::assemble::{Assembled, Collection, ContentStore, Provenance};
use crate::error::ContentError;
use crate::seo;
use crate::settings::{SettingsCache, SettingsLoader};
use crate::types::{
    About, CaseStudy, ContentKind, GeneralSettings, Homepage, Insight, Persona, Resource, Service,
};
use serde::Serialize;
use serde_json::Value;
use std::path::PathBuf;
use tracing::info;

/// Every content type, assembled.
#[derive(Debug, Clone, PartialEq)]
pub struct SiteContent {
    pub settings: Assembled<GeneralSettings>,
    pub homepage: Assembled<Homepage>,
    pub about: Assembled<About>,
    pub services: Collection<Service>,
    pub case_studies: Collection<CaseStudy>,
    pub insights: Collection<Insight>,
    pub personas: Collection<Persona>,
    pub resources: Collection<Resource>,
}

/// One line of the `check` report.
#[derive(Debug, Clone, PartialEq)]
pub struct KindReport {
    pub kind: ContentKind,
    pub provenance: Provenance,
    pub items: usize,
    /// `(slug, reason)` for items replaced by their fallback
    pub substituted: Vec<(String, ContentError)>,
    /// `(path, reason)` for files left out
    pub skipped: Vec<(PathBuf, ContentError)>,
}

impl KindReport {
    fn single<T>(kind: ContentKind, assembled: &Assembled<T>) -> Self {
        Self {
            kind,
            provenance: assembled.provenance.clone(),
            items: 1,
            substituted: Vec::new(),
            skipped: Vec::new(),
        }
    }

    fn collection<T>(kind: ContentKind, collection: &Collection<T>) -> Self {
        Self {
            kind,
            provenance: collection.provenance.clone(),
            items: collection.len(),
            substituted: collection.substituted.clone(),
            skipped: collection
                .skipped
                .iter()
                .map(|s| (s.path.clone(), s.error.clone()))
                .collect(),
        }
    }

    /// Nothing fell back and nothing was skipped.
    pub fn is_clean(&self) -> bool {
        !self.provenance.is_fallback() && self.substituted.is_empty() && self.skipped.is_empty()
    }
}

impl SiteContent {
    /// Load everything. Settings come through `cache`.
    pub fn assemble<L: SettingsLoader>(store: &ContentStore, cache: &SettingsCache<L>) -> Self {
        let site = Self {
            settings: cache.get(),
            homepage: store.homepage(),
            about: store.about(),
            services: store.services(),
            case_studies: store.case_studies(),
            insights: store.insights(),
            personas: store.personas(),
            resources: store.resources(),
        };
        info!(
            fallbacks = site.report().iter().filter(|r| !r.is_clean()).count(),
            "assembled site content"
        );
        site
    }

    /// Per-type summary, in [`ContentKind::ALL`] order.
    pub fn report(&self) -> Vec<KindReport> {
        vec![
            KindReport::single(ContentKind::Settings, &self.settings),
            KindReport::single(ContentKind::Homepage, &self.homepage),
            KindReport::single(ContentKind::About, &self.about),
            KindReport::collection(ContentKind::Service, &self.services),
            KindReport::collection(ContentKind::CaseStudy, &self.case_studies),
            KindReport::collection(ContentKind::Insight, &self.insights),
            KindReport::collection(ContentKind::Persona, &self.personas),
            KindReport::collection(ContentKind::Resource, &self.resources),
        ]
    }

    /// Every unreadable or unparseable file, including skipped ones.
    pub fn parse_failures(&self) -> Vec<&ContentError> {
        let singles = [
            self.settings.provenance.reason(),
            self.homepage.provenance.reason(),
            self.about.provenance.reason(),
        ];
        let mut failures: Vec<&ContentError> = singles.into_iter().flatten().collect();
        failures.extend(self.services.problems());
        failures.extend(self.case_studies.problems());
        failures.extend(self.insights.problems());
        failures.extend(self.personas.problems());
        failures.extend(self.resources.problems());
        failures.retain(|err| err.is_parse_failure());
        failures.dedup();
        failures
    }

    /// Serializable snapshot of every record plus JSON-LD.
    pub fn manifest(&self, base_url: &str) -> Manifest {
        let settings = &self.settings.value;
        Manifest {
            generator: concat!("site-content ", env!("CARGO_PKG_VERSION")),
            site_url: base_url.trim_end_matches('/').to_string(),
            sources: self
                .report()
                .iter()
                .map(|r| SourceEntry {
                    kind: r.kind,
                    source: r.provenance.label(),
                    reason: r.provenance.reason().map(ToString::to_string),
                })
                .collect(),
            settings: settings.clone(),
            homepage: self.homepage.value.clone(),
            about: self.about.value.clone(),
            services: self.services.items.clone(),
            case_studies: self.case_studies.items.clone(),
            insights: self.insights.items.clone(),
            personas: self.personas.items.clone(),
            resources: self.resources.items.clone(),
            structured_data: StructuredData {
                organization: seo::organization_schema(settings, base_url),
                services: self
                    .services
                    .items
                    .iter()
                    .map(|s| seo::service_schema(s, settings, base_url))
                    .collect(),
                articles: self
                    .insights
                    .items
                    .iter()
                    .map(|i| seo::article_schema(i, settings, base_url))
                    .collect(),
            },
        }
    }
}

/// What `build` writes to `content.json`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Manifest {
    pub generator: &'static str,
    pub site_url: String,
    pub sources: Vec<SourceEntry>,
    pub settings: GeneralSettings,
    pub homepage: Homepage,
    pub about: About,
    pub services: Vec<Service>,
    pub case_studies: Vec<CaseStudy>,
    pub insights: Vec<Insight>,
    pub personas: Vec<Persona>,
    pub resources: Vec<Resource>,
    pub structured_data: StructuredData,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SourceEntry {
    pub kind: ContentKind,
    /// `"cms"` or `"fallback"`
    pub source: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StructuredData {
    pub organization: Value,
    pub services: Vec<Value>,
    pub articles: Vec<Value>,
}
