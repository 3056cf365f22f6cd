//! # Site Content
//!
//! The content core of an IT-consulting marketing site. Editors commit YAML
//! and markdown files through a file-based CMS; this crate turns them into
//! complete, validated, strongly-typed records for page renderers, a static
//! build, or a server.
//!
//! # Architecture: Load, Coalesce, Validate, Fall Back
//!
//! Every content request runs the same pipeline:
//!
//! ```text
//! 1. Load      content/services/*.md   →  RawFields      (YAML mapping, untyped)
//! 2. Coalesce  RawFields               →  Service        (inline defaults filled in)
//! 3. Validate  Service                 →  ok | field errors
//! 4. Deliver   Assembled<Service>      =  value + provenance (Cms | Fallback(reason))
//! ```
//!
//! Any failure along the way (missing file, bad YAML, empty required field)
//! swaps in a built-in default from [`fallback`] and logs the reason.
//! Consumers never see an error and never see a half-filled record.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`assemble`] | `ContentStore`: the coalesce/validate/fallback pipeline for every content type |
//! | [`settings`] | General settings and the injected, mutex-guarded `SettingsCache` |
//! | [`loader`] | Single-file and directory loaders with per-file failure isolation |
//! | [`frontmatter`] | Splits markdown documents into YAML front-matter and body |
//! | [`fields`] | `RawFields` accessors: first usable value under a list of key aliases |
//! | [`validate`] | Required-field validators per record type |
//! | [`fallback`] | Constant, always-valid default content |
//! | [`markdown`] | Markdown → HTML through a swappable renderer |
//! | [`seo`] | SEO metadata and JSON-LD structured data |
//! | [`site`] | Whole-site assembly, load reports, and the `content.json` manifest |
//! | [`search`] | Substring search and list selection over assembled content |
//! | [`config`] | `content.toml` loading, validation, and merging |
//! | [`types`] | The record types consumers receive |
//! | [`naming`] | `NNN-slug` file-name convention parser |
//! | [`error`] | The content error taxonomy |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Fail Closed, Render Anyway
//!
//! CMS content is untrusted input. A record is either fully valid or fully
//! replaced: there is no path where a page renders with an empty title
//! because one field failed. The exception is the markdown body, which has
//! its own failure domain. A body that fails to render becomes a visible
//! placeholder, and the rest of the record is kept.
//!
//! ## Partial Batches
//!
//! One broken file in `services/` must not take down the services page.
//! Unparseable files are skipped, invalid ones are replaced by their per-slug
//! fallback, and only an empty or missing directory falls back wholesale.
//! Everything that happened is recorded on the [`assemble::Collection`] so
//! `check` can report it.
//!
//! ## Lenient Library, Strict Builds
//!
//! The library never turns a parse error into a failure. The CLI can:
//! with `loading.strict_parse_errors = true`, `check` and `build` exit
//! non-zero when a file failed to parse, so a broken commit does not ship
//! silently with default content.
//!
//! ## NNN-Prefix Ordering
//!
//! Content files may carry a numeric prefix (`010-web-development.md`) that
//! becomes the item's default sort position. This is parsed by
//! [`naming::parse_file_stem`]. A front-matter `order` always wins; items
//! with neither sort last with order 999.
//!
//! ## Explicit Cache
//!
//! Settings are the only cached content. The cache is a value the caller
//! creates and passes around, not a global, so tests and servers control
//! its lifetime and can clear it on a content webhook.

pub mod assemble;
pub mod config;
pub mod error;
pub mod fallback;
pub mod fields;
pub mod frontmatter;
pub mod loader;
pub mod markdown;
pub mod naming;
pub mod output;
pub mod search;
pub mod seo;
pub mod settings;
pub mod site;
pub mod types;
pub mod validate;

#[cfg(test)]
pub(crate) mod test_helpers;
