//! Flat `key = value` source text: reading, parsing, provenance digests.
//!
//! A source file holds one assignment per line, `#` comments, and
//! `config-file` include directives. An unreadable file fails the whole
//! pipeline; a malformed line inside a readable file only loses that line.

use sha2::{Digest, Sha256};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

use crate::error::ConfigError;
use crate::schema::INCLUDE_KEY;

/// One `key = value` assignment, value still in text form.
#[derive(Debug, Clone)]
pub struct Assignment {
    pub key: String,
    pub text: String,
}

/// A parsed source: assignments in file order plus the includes it names.
#[derive(Debug, Clone)]
pub struct Source {
    pub path: PathBuf,
    /// SHA-256 of the raw file bytes, hex-encoded.
    pub digest: String,
    pub assignments: Vec<Assignment>,
    /// Include targets, resolved relative to this source's directory,
    /// in discovery order.
    pub includes: Vec<PathBuf>,
}

impl Source {
    /// Read and parse one source file.
    pub fn read(path: &Path) -> Result<Self, ConfigError> {
        let bytes = fs::read(path).map_err(|e| ConfigError::SourceUnavailable {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        let digest = hex::encode(Sha256::digest(&bytes));
        let text = String::from_utf8_lossy(&bytes);

        let dir = path.parent().unwrap_or_else(|| Path::new("")).to_path_buf();
        let mut assignments = Vec::new();
        let mut includes = Vec::new();

        for line in text.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let Some((key, value)) = split_assignment(line) else {
                warn!(source = %path.display(), line, "skipping malformed line");
                continue;
            };
            if key == INCLUDE_KEY {
                if value.is_empty() {
                    warn!(source = %path.display(), "empty config-file directive");
                } else {
                    includes.push(dir.join(value));
                }
            } else {
                assignments.push(Assignment {
                    key: key.to_string(),
                    text: value.to_string(),
                });
            }
        }

        Ok(Self {
            path: path.to_path_buf(),
            digest,
            assignments,
            includes,
        })
    }
}

/// Split a `key = value` line. The value may be empty (`background =`
/// clears the color); a line without `=` or with an empty key is malformed.
pub fn split_assignment(line: &str) -> Option<(&str, &str)> {
    let (key, value) = line.split_once('=')?;
    let key = key.trim_end();
    if key.is_empty() {
        return None;
    }
    Some((key, value.trim()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_source(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{contents}").unwrap();
        file
    }

    #[test]
    fn test_read_parses_assignments_in_order() {
        let file = write_source("font-size = 14\n# comment\n\nbackground = #123abc\n");
        let source = Source::read(file.path()).unwrap();

        assert_eq!(source.assignments.len(), 2);
        assert_eq!(source.assignments[0].key, "font-size");
        assert_eq!(source.assignments[0].text, "14");
        assert_eq!(source.assignments[1].key, "background");
        assert!(source.includes.is_empty());
    }

    #[test]
    fn test_empty_value_preserved() {
        let file = write_source("background =\n");
        let source = Source::read(file.path()).unwrap();
        assert_eq!(source.assignments[0].text, "");
    }

    #[test]
    fn test_includes_resolved_relative_to_source_dir() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("base.conf");
        std::fs::write(&path, "config-file = extra.conf\n").unwrap();

        let source = Source::read(&path).unwrap();
        assert_eq!(source.includes, vec![dir.path().join("extra.conf")]);
        assert!(source.assignments.is_empty());
    }

    #[test]
    fn test_malformed_lines_skipped() {
        let file = write_source("no equals here\n= orphan value\nfont-size = 12\n");
        let source = Source::read(file.path()).unwrap();
        assert_eq!(source.assignments.len(), 1);
        assert_eq!(source.assignments[0].key, "font-size");
    }

    #[test]
    fn test_missing_file_is_source_unavailable() {
        let err = Source::read(Path::new("/nonexistent/termcfg.conf")).unwrap_err();
        assert!(matches!(err, ConfigError::SourceUnavailable { .. }));
    }

    #[test]
    fn test_digest_tracks_bytes() {
        let a = write_source("font-size = 12\n");
        let b = write_source("font-size = 12\n");
        let c = write_source("font-size = 13\n");

        let da = Source::read(a.path()).unwrap().digest;
        let db = Source::read(b.path()).unwrap().digest;
        let dc = Source::read(c.path()).unwrap().digest;
        assert_eq!(da, db);
        assert_ne!(da, dc);
        assert_eq!(da.len(), 64);
    }
}
