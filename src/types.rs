//! Strongly-typed content records.
//!
//! These are what consumers receive from the assemblers. Every field holds
//! a value: either what the CMS supplied or a built-in default. The two
//! `Option` collections (`Homepage::statistics`, `About::values`) and
//! `Persona::storytelling` exist so validation can tell "absent" from
//! "empty"; records handed out by a [`ContentStore`](crate::assemble::ContentStore)
//! always have them populated.

use chrono::NaiveDate;
use serde::Serialize;
use std::fmt;

/// Which kind of content a record, log line, or report entry refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ContentKind {
    Homepage,
    About,
    Settings,
    Service,
    CaseStudy,
    Insight,
    Persona,
    Resource,
}

impl ContentKind {
    pub const ALL: [ContentKind; 8] = [
        ContentKind::Settings,
        ContentKind::Homepage,
        ContentKind::About,
        ContentKind::Service,
        ContentKind::CaseStudy,
        ContentKind::Insight,
        ContentKind::Persona,
        ContentKind::Resource,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Homepage => "homepage",
            Self::About => "about",
            Self::Settings => "settings",
            Self::Service => "service",
            Self::CaseStudy => "case-study",
            Self::Insight => "insight",
            Self::Persona => "persona",
            Self::Resource => "resource",
        }
    }

    /// Parse a CLI-style name. Plural forms are accepted.
    pub fn parse(name: &str) -> Option<Self> {
        let normalized = name.trim().to_ascii_lowercase().replace('_', "-");
        let kind = match normalized.as_str() {
            "homepage" | "home" => Self::Homepage,
            "about" => Self::About,
            "settings" => Self::Settings,
            "service" | "services" => Self::Service,
            "case-study" | "case-studies" => Self::CaseStudy,
            "insight" | "insights" => Self::Insight,
            "persona" | "personas" => Self::Persona,
            "resource" | "resources" => Self::Resource,
            _ => return None,
        };
        Some(kind)
    }

    /// Whether content of this kind lives one-file-per-item in a directory.
    pub fn is_collection(self) -> bool {
        matches!(
            self,
            Self::Service | Self::CaseStudy | Self::Insight | Self::Persona | Self::Resource
        )
    }
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Page-level SEO metadata.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Seo {
    pub meta_title: String,
    pub meta_description: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub keywords: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub og_image: Option<String>,
}

// =============================================================================
// Collection records (one file per item)
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Service {
    pub slug: String,
    pub title: String,
    pub excerpt: String,
    pub icon: String,
    pub features: Vec<String>,
    pub technologies: Vec<String>,
    pub order: u32,
    pub featured: bool,
    pub publish_date: NaiveDate,
    /// Raw markdown body
    pub body: String,
    /// Rendered HTML body
    pub content: String,
    pub seo: Seo,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CaseStudy {
    pub slug: String,
    pub title: String,
    pub client: String,
    pub industry: String,
    pub excerpt: String,
    pub challenge: String,
    pub solution: String,
    pub results: Vec<String>,
    pub technologies: Vec<String>,
    /// Slugs of the services this engagement used
    pub services: Vec<String>,
    pub order: u32,
    pub featured: bool,
    pub publish_date: NaiveDate,
    pub body: String,
    pub content: String,
    pub seo: Seo,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Insight {
    pub slug: String,
    pub title: String,
    pub excerpt: String,
    pub author: String,
    pub category: String,
    pub tags: Vec<String>,
    pub read_time_minutes: u32,
    pub order: u32,
    pub featured: bool,
    pub publish_date: NaiveDate,
    pub body: String,
    pub content: String,
    pub seo: Seo,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Storytelling {
    pub hook: String,
    pub challenge: String,
    pub resolution: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Persona {
    pub slug: String,
    pub title: String,
    pub role: String,
    pub excerpt: String,
    pub pain_points: Vec<String>,
    pub storytelling: Option<Storytelling>,
    pub order: u32,
    pub featured: bool,
    pub publish_date: NaiveDate,
    pub body: String,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Resource {
    pub slug: String,
    pub title: String,
    pub excerpt: String,
    /// e.g. "whitepaper", "guide", "checklist"
    pub resource_type: String,
    pub download_url: String,
    pub order: u32,
    pub featured: bool,
    pub publish_date: NaiveDate,
    pub body: String,
    pub content: String,
}

// =============================================================================
// Single-file records
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Hero {
    pub title: String,
    pub subtitle: String,
    pub cta_text: String,
    pub cta_link: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Statistic {
    pub value: String,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SectionIntro {
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Testimonial {
    pub quote: String,
    pub author: String,
    pub role: String,
    pub company: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Homepage {
    pub hero: Hero,
    pub statistics: Option<Vec<Statistic>>,
    pub services_intro: SectionIntro,
    pub testimonials: Vec<Testimonial>,
    pub seo: Seo,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompanyValue {
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamMember {
    pub name: String,
    pub role: String,
    pub bio: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct About {
    pub title: String,
    pub subtitle: String,
    pub mission: String,
    pub story: String,
    pub values: Option<Vec<CompanyValue>>,
    pub team: Vec<TeamMember>,
    pub seo: Seo,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SocialLink {
    pub platform: String,
    pub url: String,
}

/// Process-wide site settings (contact details, footer, SEO defaults).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeneralSettings {
    pub site_name: String,
    pub tagline: String,
    pub contact_email: String,
    pub phone: String,
    pub address: String,
    pub social: Vec<SocialLink>,
    pub footer_text: String,
    pub default_meta_description: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_parse_accepts_plurals_and_underscores() {
        assert_eq!(ContentKind::parse("services"), Some(ContentKind::Service));
        assert_eq!(ContentKind::parse("case_studies"), Some(ContentKind::CaseStudy));
        assert_eq!(ContentKind::parse("Home"), Some(ContentKind::Homepage));
        assert_eq!(ContentKind::parse("blog"), None);
    }

    #[test]
    fn kind_display_round_trips_through_parse() {
        for kind in ContentKind::ALL {
            assert_eq!(ContentKind::parse(&kind.to_string()), Some(kind));
        }
    }

    #[test]
    fn only_directory_kinds_are_collections() {
        assert!(ContentKind::Insight.is_collection());
        assert!(!ContentKind::Homepage.is_collection());
        assert!(!ContentKind::Settings.is_collection());
    }
}
