//! The content error taxonomy.
//!
//! One enum covers every way a piece of content can fail to load. Assemblers
//! never return it to callers directly: it ends up as the reason inside
//! [`Provenance::Fallback`](crate::assemble::Provenance), inside a
//! [`SkippedFile`](crate::loader::SkippedFile), or in a log line.
//!
//! | Variant | Meaning | Log level |
//! |---|---|---|
//! | `NotFound` | file or directory absent | warn |
//! | `Unreadable` | present but could not be read (permissions, bad UTF-8) | error |
//! | `Parse` | malformed YAML or front-matter | error |
//! | `Validation` | parsed, but required fields missing or empty | error |

use crate::validate::FieldError;
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ContentError {
    #[error("not found: {}", .path.display())]
    NotFound { path: PathBuf },
    #[error("unreadable {}: {message}", .path.display())]
    Unreadable { path: PathBuf, message: String },
    #[error("parse error in {}: {message}", .path.display())]
    Parse { path: PathBuf, message: String },
    #[error("validation failed: {}", FieldList(.errors))]
    Validation { errors: Vec<FieldError> },
}

impl ContentError {
    pub fn not_found(path: impl Into<PathBuf>) -> Self {
        Self::NotFound { path: path.into() }
    }

    pub fn parse(path: &Path, message: impl fmt::Display) -> Self {
        Self::Parse {
            path: path.to_path_buf(),
            message: message.to_string(),
        }
    }

    /// Map an I/O failure on `path` to `NotFound` or `Unreadable`.
    pub fn from_io(path: &Path, err: &std::io::Error) -> Self {
        if err.kind() == std::io::ErrorKind::NotFound {
            Self::not_found(path)
        } else {
            Self::Unreadable {
                path: path.to_path_buf(),
                message: err.to_string(),
            }
        }
    }

    /// True for failures that point at a broken content commit rather than
    /// content that is legitimately absent or merely incomplete.
    pub fn is_parse_failure(&self) -> bool {
        matches!(self, Self::Parse { .. } | Self::Unreadable { .. })
    }

    /// Short machine-friendly label, used in structured log fields and reports.
    pub fn label(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "not-found",
            Self::Unreadable { .. } => "unreadable",
            Self::Parse { .. } => "parse-error",
            Self::Validation { .. } => "validation",
        }
    }
}

struct FieldList<'a>(&'a [FieldError]);

impl fmt::Display for FieldList<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, err) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{}", err)?;
        }
        Ok(())
    }
}
