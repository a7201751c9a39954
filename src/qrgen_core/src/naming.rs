use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use crate::constants::{
    FALLBACK_BASE_NAME, FILENAME_EXTENSION, FILENAME_TAG, MAX_BASE_NAME_CHARS, MAX_SUFFIX,
};

#[derive(Debug, Error)]
pub enum NamingError {
    #[error("no free file name left for \"{base_name}\" in {}: suffixes 1 to {max} are all taken", directory.display())]
    Exhausted {
        directory: PathBuf,
        base_name: String,
        max: u32,
    },
}

/// Derive a file-name stem from a payload.
///
/// Takes the last path segment of the payload. The extension is stripped unless the payload is
/// URL-shaped (`https://example.com` keeps `example.com`). Characters that are not valid in file
/// names are replaced with `_`.
pub fn base_name(payload: &str) -> String {
    let trimmed = payload.trim();
    let segment = trimmed
        .split(['/', '\\'])
        .filter(|s| !s.is_empty())
        .last()
        .unwrap_or("");

    let stem = if trimmed.contains("://") {
        segment
    } else {
        strip_extension(segment)
    };

    let sanitized: String = stem
        .chars()
        .map(|c| {
            if c.is_control() || matches!(c, '<' | '>' | ':' | '"' | '/' | '\\' | '|' | '?' | '*') {
                '_'
            } else {
                c
            }
        })
        .take(MAX_BASE_NAME_CHARS)
        .collect();

    let sanitized = sanitized.trim_matches(|c: char| c == ' ' || c == '.');
    if sanitized.is_empty() {
        FALLBACK_BASE_NAME.to_string()
    } else {
        sanitized.to_string()
    }
}

// Leading dots do not start an extension (".profile" has none).
fn strip_extension(segment: &str) -> &str {
    match segment.rfind('.') {
        Some(i) if !segment[..i].chars().all(|c| c == '.') => &segment[..i],
        _ => segment,
    }
}

fn candidate(directory: &Path, base_name: &str, n: u32) -> PathBuf {
    directory.join(format!("{base_name}{FILENAME_TAG}_{n}.{FILENAME_EXTENSION}"))
}

/// First `<directory>/<base>_QRCode_<n>.png` that does not exist yet, `n` starting at 1.
///
/// The check is not atomic with the later write.
pub fn unique_filename(directory: &Path, payload: &str) -> Result<PathBuf, NamingError> {
    unique_filename_within(directory, payload, MAX_SUFFIX)
}

pub fn unique_filename_within(
    directory: &Path,
    payload: &str,
    max: u32,
) -> Result<PathBuf, NamingError> {
    let base_name = base_name(payload);
    for n in 1..=max {
        let path = candidate(directory, &base_name, n);
        if !path.exists() {
            debug!(path = %path.display(), "Resolved output file name");
            return Ok(path);
        }
    }
    Err(NamingError::Exhausted {
        directory: directory.to_path_buf(),
        base_name,
        max,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn suffix_of(path: &Path) -> u32 {
        let name = path.file_name().unwrap().to_str().unwrap();
        let rest = name.rsplit_once("_QRCode_").unwrap().1;
        rest.strip_suffix(".png").unwrap().parse().unwrap()
    }

    #[test]
    fn test_base_name() {
        assert_eq!(base_name("https://example.com"), "example.com");
        assert_eq!(base_name("https://example.com/"), "example.com");
        assert_eq!(base_name("https://github.com/ICE3BR"), "ICE3BR");
        assert_eq!(base_name("docs/report.pdf"), "report");
        assert_eq!(base_name("C:\\data\\notes.txt"), "notes");
        assert_eq!(base_name(".profile"), "profile");
        assert_eq!(base_name("hello world"), "hello world");
        assert_eq!(base_name("https://x.org/search?q=a*b"), "search_q=a_b");
        assert_eq!(base_name("///"), "qrcode");
        assert_eq!(base_name(&"a".repeat(200)).len(), 64);
    }

    #[test]
    fn test_unique_filename_first_call() {
        let dir = tempfile::tempdir().unwrap();
        let path = unique_filename(dir.path(), "https://example.com").unwrap();
        assert_eq!(path, dir.path().join("example.com_QRCode_1.png"));
        assert!(!path.exists());
    }

    #[test]
    fn test_unique_filename_is_idempotent_until_written() {
        let dir = tempfile::tempdir().unwrap();
        let first = unique_filename(dir.path(), "some text").unwrap();
        let second = unique_filename(dir.path(), "some text").unwrap();
        assert_eq!(first, second);

        fs::write(&first, b"taken").unwrap();
        let third = unique_filename(dir.path(), "some text").unwrap();
        assert_eq!(suffix_of(&third), suffix_of(&first) + 1);
        assert!(!third.exists());
    }

    #[test]
    fn test_unique_filename_skips_taken_suffixes() {
        let dir = tempfile::tempdir().unwrap();
        for n in [1, 2, 4] {
            fs::write(dir.path().join(format!("report_QRCode_{n}.png")), b"").unwrap();
        }
        let path = unique_filename(dir.path(), "report.pdf").unwrap();
        assert_eq!(path, dir.path().join("report_QRCode_3.png"));
    }

    #[test]
    fn test_unique_filename_exhausted() {
        let dir = tempfile::tempdir().unwrap();
        for n in 1..=3 {
            fs::write(dir.path().join(format!("full_QRCode_{n}.png")), b"").unwrap();
        }
        match unique_filename_within(dir.path(), "full", 3) {
            Err(NamingError::Exhausted { base_name, max, .. }) => {
                assert_eq!(base_name, "full");
                assert_eq!(max, 3);
            }
            other => panic!("expected exhaustion, got {:?}", other),
        }
    }
}
