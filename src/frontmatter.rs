//! YAML front-matter extraction.
//!
//! A content document looks like:
//!
//! ```text
//! ---
//! title: Web Development
//! slug: web-development
//! ---
//! # Hello
//! ```
//!
//! The opening delimiter must be the very first line (a UTF-8 BOM is
//! tolerated). The header ends at the next line consisting of `---` (or the
//! YAML end-of-document marker `...`). A document without an opening
//! delimiter has no front-matter and the whole text is its body.

use crate::fields::RawFields;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum FrontmatterError {
    #[error("front-matter opened with `---` but never closed")]
    Unterminated,
    #[error("invalid YAML in front-matter: {0}")]
    Yaml(String),
    #[error("front-matter must be a YAML mapping")]
    NotAMapping,
}

/// Split `text` into its front-matter fields and the remaining body.
pub fn split(text: &str) -> Result<(RawFields, &str), FrontmatterError> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);

    let Some(after_open) = strip_delimiter_line(text, "---") else {
        return Ok((RawFields::default(), text));
    };

    let mut offset = 0;
    for line in after_open.split_inclusive('\n') {
        let trimmed = line.trim_end_matches(['\n', '\r']).trim_end();
        if trimmed == "---" || trimmed == "..." {
            let header = &after_open[..offset];
            let body = &after_open[offset + line.len()..];
            return Ok((parse_header(header)?, body));
        }
        offset += line.len();
    }

    Err(FrontmatterError::Unterminated)
}

/// If `text` starts with a line that is exactly `delimiter`, return the rest.
fn strip_delimiter_line<'a>(text: &'a str, delimiter: &str) -> Option<&'a str> {
    let rest = text.strip_prefix(delimiter)?;
    let rest_trimmed = rest.trim_start_matches([' ', '\t']);
    if let Some(after) = rest_trimmed.strip_prefix("\r\n") {
        Some(after)
    } else {
        rest_trimmed.strip_prefix('\n')
    }
}

/// Parse a standalone YAML document into fields.
pub fn parse_yaml(text: &str) -> Result<RawFields, FrontmatterError> {
    let value: serde_yaml::Value =
        serde_yaml::from_str(text).map_err(|e| FrontmatterError::Yaml(e.to_string()))?;
    RawFields::from_value(value).ok_or(FrontmatterError::NotAMapping)
}

fn parse_header(header: &str) -> Result<RawFields, FrontmatterError> {
    if header.trim().is_empty() {
        return Ok(RawFields::default());
    }
    parse_yaml(header)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_header_and_body() {
        let (fields, body) =
            split("---\ntitle: Web Development\nslug: web-development\n---\n# Hello\n").unwrap();
        assert_eq!(fields.text(&["title"]).as_deref(), Some("Web Development"));
        assert_eq!(body, "# Hello\n");
    }

    #[test]
    fn no_front_matter_means_whole_body() {
        let (fields, body) = split("# Just markdown\n\nText.").unwrap();
        assert!(fields.is_empty());
        assert_eq!(body, "# Just markdown\n\nText.");
    }

    #[test]
    fn crlf_line_endings() {
        let (fields, body) = split("---\r\ntitle: Hi\r\n---\r\nBody\r\n").unwrap();
        assert_eq!(fields.text(&["title"]).as_deref(), Some("Hi"));
        assert_eq!(body, "Body\r\n");
    }

    #[test]
    fn bom_is_ignored() {
        let (fields, _) = split("\u{feff}---\ntitle: Hi\n---\n").unwrap();
        assert_eq!(fields.text(&["title"]).as_deref(), Some("Hi"));
    }

    #[test]
    fn empty_header_is_empty_mapping() {
        let (fields, body) = split("---\n---\nBody").unwrap();
        assert!(fields.is_empty());
        assert_eq!(body, "Body");
    }

    #[test]
    fn dashes_later_in_body_are_kept() {
        let (_, body) = split("---\ntitle: Hi\n---\nIntro\n\n---\n\nMore").unwrap();
        assert_eq!(body, "Intro\n\n---\n\nMore");
    }

    #[test]
    fn closing_delimiter_without_trailing_newline() {
        let (fields, body) = split("---\ntitle: Hi\n---").unwrap();
        assert_eq!(fields.text(&["title"]).as_deref(), Some("Hi"));
        assert_eq!(body, "");
    }

    #[test]
    fn unterminated_is_error() {
        assert_eq!(
            split("---\ntitle: Hi\nbody text").unwrap_err(),
            FrontmatterError::Unterminated
        );
    }

    #[test]
    fn malformed_yaml_is_error() {
        let err = split("---\ntitle: [unclosed\n---\nBody").unwrap_err();
        assert!(matches!(err, FrontmatterError::Yaml(_)));
    }

    #[test]
    fn scalar_header_is_not_a_mapping() {
        assert_eq!(
            split("---\njust a string\n---\n").unwrap_err(),
            FrontmatterError::NotAMapping
        );
    }

    #[test]
    fn four_dashes_is_not_a_delimiter() {
        let (fields, body) = split("----\ntitle: Hi\n").unwrap();
        assert!(fields.is_empty());
        assert_eq!(body, "----\ntitle: Hi\n");
    }
}
