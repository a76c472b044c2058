// SPDX-License-Identifier: PMPL-1.0-or-later

//! Pack file reading and decoding.
//!
//! Pack files are authored as UTF-8, frequently by hand in editors that
//! prepend a BOM. Reading goes through `encoding_rs::UTF_8` so the BOM is
//! stripped and malformed sequences are rejected instead of silently
//! replaced.

use anyhow::{anyhow, Context, Result};
use std::fs;
use std::path::Path;

/// Where pack text comes from. The lifecycle controller only ever asks for
/// complete file contents; swapping the source out lets tests (and hosts
/// with virtual filesystems) feed packs from memory.
pub trait PackSource {
    fn read_text(&self, path: &Path) -> Result<String>;
}

/// Reads packs from the local filesystem.
#[derive(Debug, Default)]
pub struct FsSource;

impl PackSource for FsSource {
    fn read_text(&self, path: &Path) -> Result<String> {
        let raw_bytes =
            fs::read(path).with_context(|| format!("reading pack file {}", path.display()))?;

        let (text, _, had_errors) = encoding_rs::UTF_8.decode(&raw_bytes);
        if had_errors {
            return Err(anyhow!("{} is not valid UTF-8", path.display()));
        }
        Ok(text.into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn reads_plain_utf8() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("a.lang");
        fs::write(&path, "<Label>A<List>テスト").unwrap();

        let text = FsSource.read_text(&path).unwrap();
        assert_eq!(text, "<Label>A<List>テスト");
    }

    #[test]
    fn strips_utf8_bom() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bom.lang");
        let mut bytes = vec![0xEF, 0xBB, 0xBF];
        bytes.extend_from_slice("<Label>A<List>x".as_bytes());
        fs::write(&path, bytes).unwrap();

        let text = FsSource.read_text(&path).unwrap();
        assert_eq!(text, "<Label>A<List>x");
    }

    #[test]
    fn rejects_invalid_utf8() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad.lang");
        fs::write(&path, [0xFF, 0xFE, 0x41]).unwrap();

        assert!(FsSource.read_text(&path).is_err());
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        assert!(FsSource.read_text(&dir.path().join("nope.lang")).is_err());
    }
}
