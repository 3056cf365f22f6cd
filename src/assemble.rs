//! Content assemblers: raw files in, complete typed records out.
//!
//! Every operation on [`ContentStore`] runs the same two-stage pipeline:
//!
//! ```text
//! loader ──► RawFields ──► coalesce (inline defaults) ──► validate ──► Assembled<T>
//!                │                                            │
//!                └── NotFound / Parse / Unreadable ──┐        └── Validation
//!                                                    ▼
//!                                             fallback::<type>()
//! ```
//!
//! Nothing here returns an error or panics. Every failure becomes the
//! [`Provenance::Fallback`] reason of a complete record from
//! [`crate::fallback`], plus a log line for editors:
//!
//! - missing file or directory: `warn`
//! - unreadable file, parse error, validation failure: `error`
//! - markdown render failure: `error`, and only `content` is replaced
//!
//! ## Directory mode
//!
//! Collections tolerate partial failure. A file that cannot be read or
//! parsed is skipped ([`Collection::skipped`]). A file that parses but
//! fails validation is replaced by the per-slug fallback
//! ([`Collection::substituted`]). Only a missing directory, or one with no
//! loadable documents, yields the complete fallback list.
//!
//! Collections are sorted by `order` ascending, then `publish_date`
//! descending. The sort is stable, so full ties keep file-name order.

use crate::config::ContentConfig;
use crate::error::ContentError;
use crate::fallback;
use crate::fields::{RawFields, first_non_empty};
use crate::loader::{self, RawDocument, SkippedFile};
use crate::markdown::{MarkdownRenderer, PulldownRenderer, render_or_placeholder};
use crate::naming;
use crate::types::{
    About, CaseStudy, CompanyValue, ContentKind, Hero, Homepage, Insight, Persona, Resource,
    SectionIntro, Seo, Service, Statistic, Storytelling, TeamMember, Testimonial,
};
use crate::validate::Validate;
use chrono::NaiveDate;
use serde::Serialize;
use std::path::Path;
use tracing::{debug, error, warn};

/// Where an assembled value came from.
#[derive(Debug, Clone, PartialEq)]
pub enum Provenance {
    /// Loaded from the CMS and passed validation.
    Cms,
    /// Built-in default content, with the reason it was needed.
    Fallback(ContentError),
}

impl Provenance {
    pub fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback(_))
    }

    pub fn reason(&self) -> Option<&ContentError> {
        match self {
            Self::Cms => None,
            Self::Fallback(reason) => Some(reason),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Cms => "cms",
            Self::Fallback(_) => "fallback",
        }
    }
}

/// A complete record plus its provenance.
#[derive(Debug, Clone, PartialEq)]
pub struct Assembled<T> {
    pub value: T,
    pub provenance: Provenance,
}

impl<T> Assembled<T> {
    pub fn cms(value: T) -> Self {
        Self {
            value,
            provenance: Provenance::Cms,
        }
    }

    pub fn fallback(value: T, reason: ContentError) -> Self {
        Self {
            value,
            provenance: Provenance::Fallback(reason),
        }
    }

    pub fn is_fallback(&self) -> bool {
        self.provenance.is_fallback()
    }
}

/// The assembled items of one content directory.
#[derive(Debug, Clone, PartialEq)]
pub struct Collection<T> {
    /// Sorted items, never partially populated.
    pub items: Vec<T>,
    /// `Fallback` when the whole list is the built-in default.
    pub provenance: Provenance,
    /// Items that failed validation and were replaced by a per-slug fallback.
    pub substituted: Vec<(String, ContentError)>,
    /// Files that could not be read or parsed and were left out.
    pub skipped: Vec<SkippedFile>,
}

impl<T> Collection<T> {
    fn fallback(items: Vec<T>, reason: ContentError, skipped: Vec<SkippedFile>) -> Self {
        Self {
            items,
            provenance: Provenance::Fallback(reason),
            substituted: Vec::new(),
            skipped,
        }
    }

    pub fn is_fallback(&self) -> bool {
        self.provenance.is_fallback()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Every error worth reporting: the collection-level fallback reason,
    /// substitutions, then skipped files.
    pub fn problems(&self) -> impl Iterator<Item = &ContentError> {
        self.provenance
            .reason()
            .into_iter()
            .chain(self.substituted.iter().map(|(_, err)| err))
            .chain(self.skipped.iter().map(|s| &s.error))
    }
}

/// A record type stored one file per item in a content directory.
pub trait DirectoryRecord: Validate + Clone + Serialize {
    const KIND: ContentKind;

    /// Coalesce a parsed document into a complete record.
    fn normalize(doc: &RawDocument, ctx: &Coalescer<'_>) -> Self;
    fn fallback(slug: &str) -> Self;
    fn fallback_all() -> Vec<Self>;

    fn slug(&self) -> &str;
    fn title(&self) -> &str;
    fn excerpt(&self) -> &str;
    fn order(&self) -> u32;
    fn featured(&self) -> bool;
    fn publish_date(&self) -> NaiveDate;
}

/// Sort by `order` ascending, then `publish_date` descending. Stable.
pub fn sort_records<T: DirectoryRecord>(items: &mut [T]) {
    items.sort_by(|a, b| {
        a.order()
            .cmp(&b.order())
            .then_with(|| b.publish_date().cmp(&a.publish_date()))
    });
}

/// Log a fallback the way editors expect to find it.
pub(crate) fn report(kind: ContentKind, slug: Option<&str>, err: &ContentError) {
    let slug = slug.unwrap_or("-");
    match err {
        ContentError::NotFound { .. } => {
            warn!(kind = %kind, slug, reason = err.label(), "using fallback content: {err}")
        }
        _ => error!(kind = %kind, slug, reason = err.label(), "using fallback content: {err}"),
    }
}

/// Validate a coalesced record, swapping in `fallback` on failure.
pub(crate) fn gate<T: Validate>(
    kind: ContentKind,
    slug: Option<&str>,
    record: T,
    fallback: impl FnOnce() -> T,
) -> Assembled<T> {
    let result = record.validate();
    if result.success {
        return Assembled::cms(record);
    }
    let fields = result.failed_fields();
    let err = ContentError::Validation {
        errors: result.errors,
    };
    error!(
        kind = %kind,
        slug = slug.unwrap_or("-"),
        reason = err.label(),
        fields = %fields,
        "using fallback content: {err}"
    );
    Assembled::fallback(fallback(), err)
}

// =============================================================================
// Field-level coalescing
// =============================================================================

/// Inline defaults and body rendering shared by every normalizer.
pub struct Coalescer<'a> {
    config: &'a ContentConfig,
    renderer: &'a dyn MarkdownRenderer,
}

impl Coalescer<'_> {
    /// Front-matter `slug`, else the file stem without its order prefix.
    pub fn slug(&self, doc: &RawDocument) -> String {
        let explicit = doc.fields.text(&["slug"]);
        first_non_empty(&[explicit.as_deref(), Some(&doc.stem.slug)]).unwrap_or_default()
    }

    /// Front-matter `order`, else the file-name prefix, else the configured default.
    pub fn order(&self, doc: &RawDocument) -> u32 {
        doc.fields
            .uint(&["order"])
            .or(doc.stem.order)
            .unwrap_or(self.config.defaults.order)
    }

    pub fn featured(&self, doc: &RawDocument) -> bool {
        doc.fields.flag(&["featured"]).unwrap_or(false)
    }

    /// Undated items get 1970-01-01 and so sort last among equal orders.
    pub fn publish_date(&self, doc: &RawDocument) -> NaiveDate {
        doc.fields
            .date(&["publishDate", "publish_date", "date"])
            .unwrap_or_default()
    }

    /// `excerpt`, else a placeholder built from the title. A blank title
    /// gets no placeholder so both fields fail validation together.
    pub fn excerpt(&self, fields: &RawFields, title: &str, placeholder: fn(&str) -> String) -> String {
        match fields.text(&["excerpt", "summary", "description"]) {
            Some(excerpt) => excerpt,
            None if title.trim().is_empty() => String::new(),
            None => placeholder(title.trim()),
        }
    }

    /// Minutes to read `body`, rounded up, at least one.
    pub fn read_time(&self, body: &str) -> u32 {
        let words = u32::try_from(body.split_whitespace().count()).unwrap_or(u32::MAX);
        words
            .div_ceil(self.config.defaults.words_per_minute.max(1))
            .max(1)
    }

    /// Render a markdown body, logging failures against the record.
    pub fn render(&self, kind: ContentKind, slug: &str, body: &str) -> String {
        let (html, err) = render_or_placeholder(self.renderer, body);
        if let Some(err) = err {
            error!(kind = %kind, slug, reason = "render-error", "{err}; showing placeholder");
        }
        html
    }
}

// =============================================================================
// ContentStore
// =============================================================================

/// Entry point for consumers: owns the configuration and markdown renderer.
///
/// `ContentStore` is `Send + Sync` and holds no mutable state, so a server
/// can share one behind an `Arc`. Each call reads the file system afresh;
/// the only cache is [`SettingsCache`](crate::settings::SettingsCache).
pub struct ContentStore {
    config: ContentConfig,
    renderer: Box<dyn MarkdownRenderer>,
}

impl ContentStore {
    pub fn new(config: ContentConfig) -> Self {
        Self::with_renderer(config, Box::new(PulldownRenderer))
    }

    pub fn with_renderer(config: ContentConfig, renderer: Box<dyn MarkdownRenderer>) -> Self {
        Self { config, renderer }
    }

    pub fn config(&self) -> &ContentConfig {
        &self.config
    }

    fn coalescer(&self) -> Coalescer<'_> {
        Coalescer {
            config: &self.config,
            renderer: self.renderer.as_ref(),
        }
    }

    /// Single-file mode: read one YAML document and coalesce it.
    pub(crate) fn load_single<T: Validate>(
        &self,
        kind: ContentKind,
        normalize: impl FnOnce(&RawFields) -> T,
        fallback: impl FnOnce() -> T,
    ) -> Assembled<T> {
        let path = self.config.path_for(kind);
        match loader::read_yaml_file(&path) {
            Ok(raw) => {
                debug!(kind = %kind, path = %path.display(), "loaded content file");
                gate(kind, None, normalize(&raw), fallback)
            }
            Err(err) => {
                report(kind, None, &err);
                Assembled::fallback(fallback(), err)
            }
        }
    }

    pub fn homepage(&self) -> Assembled<Homepage> {
        self.load_single(ContentKind::Homepage, homepage_from, fallback::homepage)
    }

    pub fn about(&self) -> Assembled<About> {
        self.load_single(ContentKind::About, about_from, fallback::about)
    }

    pub fn services(&self) -> Collection<Service> {
        self.collection()
    }

    pub fn case_studies(&self) -> Collection<CaseStudy> {
        self.collection()
    }

    pub fn insights(&self) -> Collection<Insight> {
        self.collection()
    }

    pub fn personas(&self) -> Collection<Persona> {
        self.collection()
    }

    pub fn resources(&self) -> Collection<Resource> {
        self.collection()
    }

    pub fn service(&self, slug: &str) -> Assembled<Service> {
        self.item(slug)
    }

    pub fn case_study(&self, slug: &str) -> Assembled<CaseStudy> {
        self.item(slug)
    }

    pub fn insight(&self, slug: &str) -> Assembled<Insight> {
        self.item(slug)
    }

    pub fn persona(&self, slug: &str) -> Assembled<Persona> {
        self.item(slug)
    }

    pub fn resource(&self, slug: &str) -> Assembled<Resource> {
        self.item(slug)
    }

    /// Directory mode for any record type.
    pub fn collection<T: DirectoryRecord>(&self) -> Collection<T> {
        let dir = self.config.path_for(T::KIND);
        let listing = match loader::read_directory(&dir) {
            Ok(listing) => listing,
            Err(err) => {
                report(T::KIND, None, &err);
                return Collection::fallback(T::fallback_all(), err, Vec::new());
            }
        };

        if listing.documents.is_empty() {
            let reason = listing
                .skipped
                .first()
                .map(|s| s.error.clone())
                .unwrap_or_else(|| ContentError::not_found(&dir));
            report(T::KIND, None, &reason);
            return Collection::fallback(T::fallback_all(), reason, listing.skipped);
        }

        let ctx = self.coalescer();
        let mut items = Vec::with_capacity(listing.documents.len());
        let mut substituted = Vec::new();
        for doc in &listing.documents {
            let record = T::normalize(doc, &ctx);
            let slug = record.slug().to_string();
            let assembled = gate(T::KIND, Some(slug.as_str()), record, || T::fallback(&slug));
            if let Provenance::Fallback(reason) = assembled.provenance {
                substituted.push((slug, reason));
            }
            items.push(assembled.value);
        }
        sort_records(&mut items);

        debug!(
            kind = %T::KIND,
            items = items.len(),
            substituted = substituted.len(),
            skipped = listing.skipped.len(),
            "assembled collection"
        );
        Collection {
            items,
            provenance: Provenance::Cms,
            substituted,
            skipped: listing.skipped,
        }
    }

    /// Single item by slug, matched the same way the collection names it.
    pub fn item<T: DirectoryRecord>(&self, slug: &str) -> Assembled<T> {
        let dir = self.config.path_for(T::KIND);
        let doc = match self.locate(&dir, slug) {
            Ok(doc) => doc,
            Err(err) => {
                report(T::KIND, Some(slug), &err);
                return Assembled::fallback(T::fallback(slug), err);
            }
        };
        let record = T::normalize(&doc, &self.coalescer());
        gate(T::KIND, Some(slug), record, || T::fallback(slug))
    }

    /// Find the document whose effective slug is `slug`.
    ///
    /// Only plain slugs are looked up; anything that could leave `dir` is
    /// `NotFound`. A file-name hit counts only when its effective slug
    /// matches too.
    fn locate(&self, dir: &Path, slug: &str) -> Result<RawDocument, ContentError> {
        if !naming::is_plain_slug(slug) {
            return Err(ContentError::not_found(dir));
        }
        let ctx = self.coalescer();
        if let Some(path) = loader::find_by_slug(dir, slug)? {
            let doc = loader::read_document(&path)?;
            if ctx.slug(&doc) == slug {
                return Ok(doc);
            }
        }
        let listing = loader::read_directory(dir)?;
        listing
            .documents
            .into_iter()
            .find(|doc| ctx.slug(doc) == slug)
            .ok_or_else(|| ContentError::not_found(dir.join(slug)))
    }
}

// =============================================================================
// Single-file normalizers
// =============================================================================

fn homepage_from(raw: &RawFields) -> Homepage {
    let hero_raw = raw.object(&["hero"]).unwrap_or_default();
    let hero = Hero {
        title: hero_raw.text_or(&["title"], ""),
        subtitle: hero_raw.text_or(&["subtitle"], ""),
        cta_text: hero_raw.text_or(&["ctaText", "cta_text"], "Contact us"),
        cta_link: hero_raw.text_or(&["ctaLink", "cta_link"], "/contact"),
    };
    let statistics = raw.objects(&["statistics", "stats"]).map(|items| {
        items
            .iter()
            .filter_map(|s| {
                Some(Statistic {
                    value: s.text(&["value", "number"])?,
                    label: s.text_or(&["label"], ""),
                })
            })
            .collect()
    });
    let intro = raw
        .object(&["servicesIntro", "services_intro"])
        .unwrap_or_default();
    let testimonials = raw
        .objects(&["testimonials"])
        .unwrap_or_default()
        .iter()
        .filter_map(|t| {
            Some(Testimonial {
                quote: t.text(&["quote"])?,
                author: t.text_or(&["author", "name"], ""),
                role: t.text_or(&["role"], ""),
                company: t.text_or(&["company"], ""),
            })
        })
        .collect();

    Homepage {
        seo: Seo::resolve(raw, &hero.title, &hero.subtitle),
        hero,
        statistics,
        services_intro: SectionIntro {
            title: intro.text_or(&["title"], "Our Services"),
            description: intro.text_or(&["description"], ""),
        },
        testimonials,
    }
}

fn about_from(raw: &RawFields) -> About {
    let title = raw.text_or(&["title"], "");
    let mission = raw.text_or(&["mission"], "");
    let values = raw.objects(&["values"]).map(|items| {
        items
            .iter()
            .filter_map(|v| {
                Some(CompanyValue {
                    title: v.text(&["title", "name"])?,
                    description: v.text_or(&["description"], ""),
                })
            })
            .collect()
    });
    let team = raw
        .objects(&["team"])
        .unwrap_or_default()
        .iter()
        .filter_map(|m| {
            Some(TeamMember {
                name: m.text(&["name"])?,
                role: m.text_or(&["role", "title"], ""),
                bio: m.text_or(&["bio"], ""),
                image: m.text(&["image", "photo"]),
            })
        })
        .collect();
    About {
        seo: Seo::resolve(raw, &title, &mission),
        subtitle: raw.text_or(&["subtitle"], ""),
        story: raw.text_or(&["story"], ""),
        values,
        team,
        title,
        mission,
    }
}

// =============================================================================
// Directory records
// =============================================================================

impl DirectoryRecord for Service {
    const KIND: ContentKind = ContentKind::Service;

    fn normalize(doc: &RawDocument, ctx: &Coalescer<'_>) -> Self {
        let f = &doc.fields;
        let slug = ctx.slug(doc);
        let title = f.text_or(&["title"], "");
        let excerpt = ctx.excerpt(f, &title, |t| {
            format!("Find out how our {t} services help your business grow.")
        });
        Service {
            seo: Seo::resolve(f, &title, &excerpt),
            content: ctx.render(Self::KIND, &slug, &doc.body),
            icon: f.text_or(&["icon"], ""),
            features: f.string_list(&["features"]),
            technologies: f.string_list(&["technologies", "tech"]),
            order: ctx.order(doc),
            featured: ctx.featured(doc),
            publish_date: ctx.publish_date(doc),
            body: doc.body.clone(),
            slug,
            title,
            excerpt,
        }
    }

    fn fallback(slug: &str) -> Self {
        fallback::service(slug)
    }

    fn fallback_all() -> Vec<Self> {
        fallback::services()
    }

    fn slug(&self) -> &str {
        &self.slug
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn excerpt(&self) -> &str {
        &self.excerpt
    }

    fn order(&self) -> u32 {
        self.order
    }

    fn featured(&self) -> bool {
        self.featured
    }

    fn publish_date(&self) -> NaiveDate {
        self.publish_date
    }
}

impl DirectoryRecord for CaseStudy {
    const KIND: ContentKind = ContentKind::CaseStudy;

    fn normalize(doc: &RawDocument, ctx: &Coalescer<'_>) -> Self {
        let f = &doc.fields;
        let slug = ctx.slug(doc);
        let title = f.text_or(&["title"], "");
        let excerpt = ctx.excerpt(f, &title, |t| format!("Read the full story: {t}."));
        CaseStudy {
            seo: Seo::resolve(f, &title, &excerpt),
            content: ctx.render(Self::KIND, &slug, &doc.body),
            client: f.text_or(&["client"], ""),
            industry: f.text_or(&["industry"], ""),
            challenge: f.text_or(&["challenge"], ""),
            solution: f.text_or(&["solution"], ""),
            results: f.string_list(&["results"]),
            technologies: f.string_list(&["technologies", "tech"]),
            services: f.string_list(&["services"]),
            order: ctx.order(doc),
            featured: ctx.featured(doc),
            publish_date: ctx.publish_date(doc),
            body: doc.body.clone(),
            slug,
            title,
            excerpt,
        }
    }

    fn fallback(slug: &str) -> Self {
        fallback::case_study(slug)
    }

    fn fallback_all() -> Vec<Self> {
        fallback::case_studies()
    }

    fn slug(&self) -> &str {
        &self.slug
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn excerpt(&self) -> &str {
        &self.excerpt
    }

    fn order(&self) -> u32 {
        self.order
    }

    fn featured(&self) -> bool {
        self.featured
    }

    fn publish_date(&self) -> NaiveDate {
        self.publish_date
    }
}

impl DirectoryRecord for Insight {
    const KIND: ContentKind = ContentKind::Insight;

    fn normalize(doc: &RawDocument, ctx: &Coalescer<'_>) -> Self {
        let f = &doc.fields;
        let slug = ctx.slug(doc);
        let title = f.text_or(&["title"], "");
        let excerpt = ctx.excerpt(f, &title, |t| format!("Our perspective on {t}."));
        let read_time_minutes = f
            .uint(&["readTime", "read_time", "readTimeMinutes"])
            .filter(|m| *m > 0)
            .unwrap_or_else(|| ctx.read_time(&doc.body));
        Insight {
            seo: Seo::resolve(f, &title, &excerpt),
            content: ctx.render(Self::KIND, &slug, &doc.body),
            author: f.text_or(&["author"], ""),
            category: f.text_or(&["category"], ""),
            tags: f.string_list(&["tags"]),
            read_time_minutes,
            order: ctx.order(doc),
            featured: ctx.featured(doc),
            publish_date: ctx.publish_date(doc),
            body: doc.body.clone(),
            slug,
            title,
            excerpt,
        }
    }

    fn fallback(slug: &str) -> Self {
        fallback::insight(slug)
    }

    fn fallback_all() -> Vec<Self> {
        fallback::insights()
    }

    fn slug(&self) -> &str {
        &self.slug
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn excerpt(&self) -> &str {
        &self.excerpt
    }

    fn order(&self) -> u32 {
        self.order
    }

    fn featured(&self) -> bool {
        self.featured
    }

    fn publish_date(&self) -> NaiveDate {
        self.publish_date
    }
}

impl DirectoryRecord for Persona {
    const KIND: ContentKind = ContentKind::Persona;

    fn normalize(doc: &RawDocument, ctx: &Coalescer<'_>) -> Self {
        let f = &doc.fields;
        let slug = ctx.slug(doc);
        let role = f.text_or(&["role"], "");
        let storytelling = f.object(&["storytelling"]).map(|s| Storytelling {
            hook: s.text_or(&["hook"], ""),
            challenge: s.text_or(&["challenge"], ""),
            resolution: s.text_or(&["resolution", "solution"], ""),
        });
        Persona {
            title: f.text_or(&["title"], ""),
            excerpt: ctx.excerpt(f, &role, |r| format!("How we help the {r}.")),
            content: ctx.render(Self::KIND, &slug, &doc.body),
            pain_points: f.string_list(&["painPoints", "pain_points"]),
            storytelling,
            order: ctx.order(doc),
            featured: ctx.featured(doc),
            publish_date: ctx.publish_date(doc),
            body: doc.body.clone(),
            slug,
            role,
        }
    }

    fn fallback(slug: &str) -> Self {
        fallback::persona(slug)
    }

    fn fallback_all() -> Vec<Self> {
        fallback::personas()
    }

    fn slug(&self) -> &str {
        &self.slug
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn excerpt(&self) -> &str {
        &self.excerpt
    }

    fn order(&self) -> u32 {
        self.order
    }

    fn featured(&self) -> bool {
        self.featured
    }

    fn publish_date(&self) -> NaiveDate {
        self.publish_date
    }
}

impl DirectoryRecord for Resource {
    const KIND: ContentKind = ContentKind::Resource;

    fn normalize(doc: &RawDocument, ctx: &Coalescer<'_>) -> Self {
        let f = &doc.fields;
        let slug = ctx.slug(doc);
        let title = f.text_or(&["title"], "");
        Resource {
            excerpt: ctx.excerpt(f, &title, |t| format!("Download {t}.")),
            content: ctx.render(Self::KIND, &slug, &doc.body),
            resource_type: f.text_or(&["resourceType", "resource_type", "type"], "guide"),
            download_url: f.text_or(&["downloadUrl", "download_url", "url"], ""),
            order: ctx.order(doc),
            featured: ctx.featured(doc),
            publish_date: ctx.publish_date(doc),
            body: doc.body.clone(),
            slug,
            title,
        }
    }

    fn fallback(slug: &str) -> Self {
        fallback::resource(slug)
    }

    fn fallback_all() -> Vec<Self> {
        fallback::resources()
    }

    fn slug(&self) -> &str {
        &self.slug
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn excerpt(&self) -> &str {
        &self.excerpt
    }

    fn order(&self) -> u32 {
        self.order
    }

    fn featured(&self) -> bool {
        self.featured
    }

    fn publish_date(&self) -> NaiveDate {
        self.publish_date
    }
}
