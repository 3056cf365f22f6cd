//! Required-field validators for assembled records.
//!
//! Validators are pure: they inspect a record and report what is wrong,
//! nothing more. They never panic and never log; the assembler decides what
//! a failed result means (see [`crate::assemble`]).
//!
//! Each record type has a fixed list of required fields:
//!
//! | Type | Required |
//! |---|---|
//! | `Service` | title, slug, excerpt |
//! | `CaseStudy` | title, slug, client, excerpt |
//! | `Insight` | title, slug, excerpt, author |
//! | `Persona` | title, slug, role, storytelling (object) |
//! | `Resource` | title, slug, excerpt |
//! | `Homepage` | hero.title, hero.subtitle, statistics (non-empty) |
//! | `About` | title, mission, values (non-empty) |
//! | `GeneralSettings` | site_name, contact_email |

use crate::types::{
    About, CaseStudy, GeneralSettings, Homepage, Insight, Persona, Resource, Service,
};
use serde::Serialize;
use std::fmt;

/// A single failed check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Outcome of validating one record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationResult {
    pub success: bool,
    pub errors: Vec<FieldError>,
}

impl ValidationResult {
    pub fn ok() -> Self {
        Self {
            success: true,
            errors: Vec::new(),
        }
    }

    pub fn from_errors(errors: Vec<FieldError>) -> Self {
        Self {
            success: errors.is_empty(),
            errors,
        }
    }

    /// Comma-separated list of failing field names, for log lines.
    pub fn failed_fields(&self) -> String {
        self.errors
            .iter()
            .map(|e| e.field.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// A record type with a required-field gate.
pub trait Validate {
    fn validate(&self) -> ValidationResult;
}

// =============================================================================
// Check helpers
// =============================================================================

/// Require a non-blank string.
pub fn require_text(field: &str, value: &str) -> Option<FieldError> {
    if value.trim().is_empty() {
        Some(FieldError::new(field, "is required and must not be empty"))
    } else {
        None
    }
}

/// Require a list that is both present and non-empty.
///
/// The two failures get distinct messages: an absent key is usually a CMS
/// schema problem, an empty list is usually an editor deleting every entry.
pub fn require_list<T>(field: &str, value: Option<&[T]>) -> Option<FieldError> {
    match value {
        None => Some(FieldError::new(field, "is missing")),
        Some([]) => Some(FieldError::new(field, "must not be empty")),
        Some(_) => None,
    }
}

/// Require a nested object to exist. Its contents are not inspected.
pub fn require_object<T>(field: &str, value: Option<&T>) -> Option<FieldError> {
    match value {
        None => Some(FieldError::new(field, "is missing or not an object")),
        Some(_) => None,
    }
}

fn collect(checks: impl IntoIterator<Item = Option<FieldError>>) -> ValidationResult {
    ValidationResult::from_errors(checks.into_iter().flatten().collect())
}

// =============================================================================
// Per-type validators
// =============================================================================

impl Validate for Service {
    fn validate(&self) -> ValidationResult {
        collect([
            require_text("title", &self.title),
            require_text("slug", &self.slug),
            require_text("excerpt", &self.excerpt),
        ])
    }
}

impl Validate for CaseStudy {
    fn validate(&self) -> ValidationResult {
        collect([
            require_text("title", &self.title),
            require_text("slug", &self.slug),
            require_text("client", &self.client),
            require_text("excerpt", &self.excerpt),
        ])
    }
}

impl Validate for Insight {
    fn validate(&self) -> ValidationResult {
        collect([
            require_text("title", &self.title),
            require_text("slug", &self.slug),
            require_text("excerpt", &self.excerpt),
            require_text("author", &self.author),
        ])
    }
}

impl Validate for Persona {
    fn validate(&self) -> ValidationResult {
        collect([
            require_text("title", &self.title),
            require_text("slug", &self.slug),
            require_text("role", &self.role),
            require_object("storytelling", self.storytelling.as_ref()),
        ])
    }
}

impl Validate for Resource {
    fn validate(&self) -> ValidationResult {
        collect([
            require_text("title", &self.title),
            require_text("slug", &self.slug),
            require_text("excerpt", &self.excerpt),
        ])
    }
}

impl Validate for Homepage {
    fn validate(&self) -> ValidationResult {
        collect([
            require_text("hero.title", &self.hero.title),
            require_text("hero.subtitle", &self.hero.subtitle),
            require_list("statistics", self.statistics.as_deref()),
        ])
    }
}

impl Validate for About {
    fn validate(&self) -> ValidationResult {
        collect([
            require_text("title", &self.title),
            require_text("mission", &self.mission),
            require_list("values", self.values.as_deref()),
        ])
    }
}

impl Validate for GeneralSettings {
    fn validate(&self) -> ValidationResult {
        collect([
            require_text("site_name", &self.site_name),
            require_text("contact_email", &self.contact_email),
        ])
    }
}
