//! Built-in default content.
//!
//! Every content type has a complete, always-valid default that the site
//! falls back to when the CMS copy is missing, malformed, or fails
//! validation. Visitors see plausible content instead of a broken page;
//! editors see the reason in the build log.
//!
//! Collection types also have a per-slug provider. It returns the built-in
//! item with that slug if there is one. Otherwise it re-keys the first
//! default to the requested slug, so links to `/services/<slug>` still
//! resolve to a page.
//!
//! The validator tests in [`crate::validate`] check every provider here.

use crate::types::{
    About, CaseStudy, CompanyValue, GeneralSettings, Hero, Homepage, Insight, Persona, Resource,
    SectionIntro, Seo, Service, SocialLink, Statistic, Storytelling, Testimonial,
};
use chrono::NaiveDate;

const SITE_NAME: &str = "Meridian Technology Partners";

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}

fn seo(title: &str, description: &str) -> Seo {
    Seo {
        meta_title: format!("{title} | {SITE_NAME}"),
        meta_description: description.to_string(),
        keywords: Vec::new(),
        og_image: None,
    }
}

/// Pick the default with `slug`, or re-key the first default to it.
fn by_slug<T: Clone>(
    defaults: Vec<T>,
    slug: &str,
    slug_of: impl Fn(&T) -> &str,
    rekey: impl FnOnce(&mut T, &str),
) -> Option<T> {
    if let Some(found) = defaults.iter().find(|item| slug_of(item) == slug) {
        return Some(found.clone());
    }
    let mut first = defaults.into_iter().next()?;
    if !slug.trim().is_empty() {
        rekey(&mut first, slug);
    }
    Some(first)
}

// =============================================================================
// Single-file content
// =============================================================================

pub fn homepage() -> Homepage {
    Homepage {
        hero: Hero {
            title: "Technology that moves your business forward".to_string(),
            subtitle: "We design, build, and run the software and infrastructure that growing companies depend on.".to_string(),
            cta_text: "Talk to an expert".to_string(),
            cta_link: "/contact".to_string(),
        },
        statistics: Some(vec![
            Statistic {
                value: "15+".to_string(),
                label: "Years in business".to_string(),
            },
            Statistic {
                value: "200+".to_string(),
                label: "Projects delivered".to_string(),
            },
            Statistic {
                value: "98%".to_string(),
                label: "Client retention".to_string(),
            },
        ]),
        services_intro: SectionIntro {
            title: "What we do".to_string(),
            description: "End-to-end consulting, from strategy to delivery and support.".to_string(),
        },
        testimonials: vec![Testimonial {
            quote: "They understood our business before they touched our systems.".to_string(),
            author: "Operations Director".to_string(),
            role: "Director".to_string(),
            company: "A regional logistics firm".to_string(),
        }],
        seo: seo(
            "IT Consulting and Software Delivery",
            "Strategy, cloud, software development and managed services for growing companies.",
        ),
    }
}

pub fn about() -> About {
    About {
        title: format!("About {SITE_NAME}"),
        subtitle: "Independent technology advisors and engineers".to_string(),
        mission: "To help organisations make better technology decisions and deliver on them.".to_string(),
        story: "We started as a small team of engineers who wanted to give honest advice and stay accountable for the results.".to_string(),
        values: Some(vec![
            CompanyValue {
                title: "Clarity".to_string(),
                description: "Plain language, transparent plans, no surprises.".to_string(),
            },
            CompanyValue {
                title: "Ownership".to_string(),
                description: "We stay until the outcome is delivered.".to_string(),
            },
            CompanyValue {
                title: "Craft".to_string(),
                description: "Well-built systems are cheaper to run.".to_string(),
            },
        ]),
        team: Vec::new(),
        seo: seo(
            "About Us",
            "Independent technology advisors and engineers helping organisations deliver.",
        ),
    }
}

pub fn settings() -> GeneralSettings {
    GeneralSettings {
        site_name: SITE_NAME.to_string(),
        tagline: "IT consulting that delivers".to_string(),
        contact_email: "hello@meridian.example".to_string(),
        phone: "+1 555 0100".to_string(),
        address: String::new(),
        social: vec![SocialLink {
            platform: "LinkedIn".to_string(),
            url: "https://www.linkedin.com/".to_string(),
        }],
        footer_text: format!("© {SITE_NAME}. All rights reserved."),
        default_meta_description:
            "Strategy, cloud, software development and managed services for growing companies."
                .to_string(),
    }
}

// =============================================================================
// Services
// =============================================================================

fn make_service(
    slug: &str,
    title: &str,
    excerpt: &str,
    icon: &str,
    order: u32,
    features: &[&str],
    technologies: &[&str],
) -> Service {
    Service {
        slug: slug.to_string(),
        title: title.to_string(),
        excerpt: excerpt.to_string(),
        icon: icon.to_string(),
        features: strings(features),
        technologies: strings(technologies),
        order,
        featured: true,
        publish_date: date(2024, 1, 1),
        body: format!("## {title}\n\n{excerpt}\n"),
        content: format!("<h2>{title}</h2>\n<p>{excerpt}</p>\n"),
        seo: seo(title, excerpt),
    }
}

pub fn services() -> Vec<Service> {
    vec![
        make_service(
            "web-development",
            "Web Development",
            "Fast, accessible web applications built to grow with your business.",
            "code",
            1,
            &["Custom web applications", "API design", "Performance tuning"],
            &["TypeScript", "Rust", "PostgreSQL"],
        ),
        make_service(
            "cloud-infrastructure",
            "Cloud Infrastructure",
            "Reliable, cost-aware cloud platforms with automation from day one.",
            "cloud",
            2,
            &["Cloud migration", "Infrastructure as code", "Cost optimisation"],
            &["AWS", "Azure", "Terraform"],
        ),
        make_service(
            "it-strategy",
            "IT Strategy",
            "Technology roadmaps that connect investment to business outcomes.",
            "compass",
            3,
            &["Technology assessments", "Roadmapping", "Vendor selection"],
            &[],
        ),
    ]
}

pub fn service(slug: &str) -> Service {
    by_slug(services(), slug, |s| s.slug.as_str(), |s, slug| s.slug = slug.to_string())
        .unwrap_or_else(|| {
            make_service(slug, "Our Services", "Consulting and delivery services.", "", 1, &[], &[])
        })
}

// =============================================================================
// Case studies
// =============================================================================

pub fn case_studies() -> Vec<CaseStudy> {
    vec![primary_case_study()]
}

fn primary_case_study() -> CaseStudy {
    let title = "Modernising a Legacy Order Platform";
    let excerpt = "How a distribution company cut order processing time by moving to a cloud-native platform.";
    CaseStudy {
        slug: "legacy-platform-modernisation".to_string(),
        title: title.to_string(),
        client: "Regional distribution company".to_string(),
        industry: "Logistics".to_string(),
        excerpt: excerpt.to_string(),
        challenge: "A fifteen-year-old order system could not keep up with online demand.".to_string(),
        solution: "An incremental migration to managed cloud services behind a new API layer.".to_string(),
        results: strings(&[
            "60% faster order processing",
            "Zero downtime during migration",
            "30% lower hosting costs",
        ]),
        technologies: strings(&["AWS", "PostgreSQL", "Rust"]),
        services: strings(&["cloud-infrastructure", "web-development"]),
        order: 1,
        featured: true,
        publish_date: date(2024, 1, 1),
        body: format!("## {title}\n\n{excerpt}\n"),
        content: format!("<h2>{title}</h2>\n<p>{excerpt}</p>\n"),
        seo: seo(title, excerpt),
    }
}

pub fn case_study(slug: &str) -> CaseStudy {
    by_slug(case_studies(), slug, |c| c.slug.as_str(), |c, slug| c.slug = slug.to_string())
        .unwrap_or_else(primary_case_study)
}

// =============================================================================
// Insights
// =============================================================================

pub fn insights() -> Vec<Insight> {
    vec![primary_insight()]
}

fn primary_insight() -> Insight {
    let title = "Five Questions to Ask Before a Cloud Migration";
    let excerpt = "A short checklist for leaders planning their first move to the cloud.";
    Insight {
        slug: "cloud-migration-questions".to_string(),
        title: title.to_string(),
        excerpt: excerpt.to_string(),
        author: format!("The {SITE_NAME} team"),
        category: "Cloud".to_string(),
        tags: strings(&["cloud", "strategy"]),
        read_time_minutes: 4,
        order: 1,
        featured: true,
        publish_date: date(2024, 1, 1),
        body: format!("## {title}\n\n{excerpt}\n"),
        content: format!("<h2>{title}</h2>\n<p>{excerpt}</p>\n"),
        seo: seo(title, excerpt),
    }
}

pub fn insight(slug: &str) -> Insight {
    by_slug(insights(), slug, |i| i.slug.as_str(), |i, slug| i.slug = slug.to_string())
        .unwrap_or_else(primary_insight)
}

// =============================================================================
// Personas
// =============================================================================

pub fn personas() -> Vec<Persona> {
    vec![primary_persona()]
}

fn primary_persona() -> Persona {
    Persona {
        slug: "cto".to_string(),
        title: "For Technology Leaders".to_string(),
        role: "Chief Technology Officer".to_string(),
        excerpt: "Deliver the roadmap without growing the headcount.".to_string(),
        pain_points: strings(&[
            "Too many priorities for the team size",
            "Legacy systems slowing delivery",
        ]),
        storytelling: Some(Storytelling {
            hook: "Your roadmap is ambitious. Your team is stretched.".to_string(),
            challenge: "Every new initiative competes with keeping the lights on.".to_string(),
            resolution: "We add senior capacity exactly where it unblocks delivery.".to_string(),
        }),
        order: 1,
        featured: true,
        publish_date: date(2024, 1, 1),
        body: String::new(),
        content: String::new(),
    }
}

pub fn persona(slug: &str) -> Persona {
    by_slug(personas(), slug, |p| p.slug.as_str(), |p, slug| p.slug = slug.to_string())
        .unwrap_or_else(primary_persona)
}

// =============================================================================
// Resources
// =============================================================================

pub fn resources() -> Vec<Resource> {
    vec![primary_resource()]
}

fn primary_resource() -> Resource {
    Resource {
        slug: "cloud-readiness-checklist".to_string(),
        title: "Cloud Readiness Checklist".to_string(),
        excerpt: "Twenty questions to assess whether your systems are ready for the cloud.".to_string(),
        resource_type: "checklist".to_string(),
        download_url: "/downloads/cloud-readiness-checklist.pdf".to_string(),
        order: 1,
        featured: true,
        publish_date: date(2024, 1, 1),
        body: String::new(),
        content: String::new(),
    }
}

pub fn resource(slug: &str) -> Resource {
    by_slug(resources(), slug, |r| r.slug.as_str(), |r, slug| r.slug = slug.to_string())
        .unwrap_or_else(primary_resource)
}
