//! SEO metadata and JSON-LD structured data.
//!
//! Records carry an optional `seo:` block in their front-matter:
//!
//! ```yaml
//! seo:
//!   metaTitle: Web Development Services
//!   metaDescription: Custom web applications for growing companies.
//!   keywords: [web, rust]
//!   ogImage: /images/og/web.png
//! ```
//!
//! Anything missing falls back to the record's own title and excerpt, so
//! every page has a title and description.
//!
//! Structured data is emitted as `schema.org` JSON-LD values. Building
//! absolute URLs needs the public site URL, which consumers pass in.

use crate::fields::{RawFields, first_non_empty};
use crate::types::{GeneralSettings, Insight, Seo, Service};
use serde_json::{Value, json};

impl Seo {
    /// Coalesce the `seo:` block of `raw` with the record's title and excerpt.
    pub fn resolve(raw: &RawFields, title: &str, excerpt: &str) -> Self {
        let block = raw.object(&["seo"]).unwrap_or_default();
        let meta_title = block.text(&["metaTitle", "meta_title", "title"]);
        let meta_description = block.text(&["metaDescription", "meta_description", "description"]);
        Seo {
            meta_title: first_non_empty(&[meta_title.as_deref(), Some(title)]).unwrap_or_default(),
            meta_description: first_non_empty(&[meta_description.as_deref(), Some(excerpt)])
                .unwrap_or_default(),
            keywords: block.string_list(&["keywords"]),
            og_image: block.text(&["ogImage", "og_image", "image"]),
        }
    }
}

/// Join the site URL and an absolute route.
pub fn absolute_url(base_url: &str, route: &str) -> String {
    let base = base_url.trim_end_matches('/');
    if route.is_empty() || route == "/" {
        format!("{base}/")
    } else if route.starts_with('/') {
        format!("{base}{route}")
    } else {
        format!("{base}/{route}")
    }
}

/// `Organization` schema from the site settings.
pub fn organization_schema(settings: &GeneralSettings, base_url: &str) -> Value {
    let same_as: Vec<&str> = settings.social.iter().map(|s| s.url.as_str()).collect();
    let mut org = json!({
        "@context": "https://schema.org",
        "@type": "Organization",
        "name": settings.site_name,
        "url": absolute_url(base_url, "/"),
        "email": settings.contact_email,
        "description": settings.default_meta_description,
    });
    if !settings.phone.is_empty() {
        org["telephone"] = json!(settings.phone);
    }
    if !settings.address.is_empty() {
        org["address"] = json!(settings.address);
    }
    if !same_as.is_empty() {
        org["sameAs"] = json!(same_as);
    }
    org
}

/// `Service` schema for a service page.
pub fn service_schema(service: &Service, settings: &GeneralSettings, base_url: &str) -> Value {
    json!({
        "@context": "https://schema.org",
        "@type": "Service",
        "name": service.title,
        "description": service.seo.meta_description,
        "url": absolute_url(base_url, &format!("/services/{}", service.slug)),
        "provider": {
            "@type": "Organization",
            "name": settings.site_name,
            "url": absolute_url(base_url, "/"),
        },
    })
}

/// `Article` schema for an insight.
pub fn article_schema(insight: &Insight, settings: &GeneralSettings, base_url: &str) -> Value {
    let mut article = json!({
        "@context": "https://schema.org",
        "@type": "Article",
        "headline": insight.title,
        "description": insight.seo.meta_description,
        "url": absolute_url(base_url, &format!("/insights/{}", insight.slug)),
        "datePublished": insight.publish_date.format("%Y-%m-%d").to_string(),
        "author": { "@type": "Person", "name": insight.author },
        "publisher": { "@type": "Organization", "name": settings.site_name },
    });
    if !insight.tags.is_empty() {
        article["keywords"] = json!(insight.tags.join(", "));
    }
    if let Some(image) = &insight.seo.og_image {
        article["image"] = json!(absolute_url(base_url, image));
    }
    article
}
