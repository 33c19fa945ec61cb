/// File tree walker producing discovery records
///
/// Walks a root path without following symlinks, applies the include /
/// exclude rules, the size cap, the hidden-file policy, and the binary
/// heuristic, and yields immutable `FileRecord`s. Entries the process
/// cannot read are skipped, never fatal; a missing root is.
use crate::core::{CancelToken, FileRecord};
use crate::discovery::filter::{is_binary_file, is_hidden};
use globset::{Glob, GlobSet, GlobSetBuilder};
use ignore::WalkBuilder;
use log::{debug, warn};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DiscoveryError {
    #[error("scan root does not exist: {0}")]
    RootNotFound(PathBuf),

    #[error("scan cancelled during discovery")]
    Cancelled,

    #[error("invalid glob pattern '{pattern}': {source}")]
    InvalidGlob {
        pattern: String,
        #[source]
        source: globset::Error,
    },
}

pub struct Walker {
    root: PathBuf,
    include: Option<GlobSet>,
    exclude_globs: GlobSet,
    exclude_substrings: Vec<String>,
    max_file_size: u64,
    include_hidden: bool,
    exclude_binary: bool,
}

impl Walker {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            include: None,
            exclude_globs: GlobSet::empty(),
            exclude_substrings: Vec::new(),
            max_file_size: 10 * 1024 * 1024,
            include_hidden: false,
            exclude_binary: true,
        }
    }

    /// Restrict to the given extensions (empty = everything)
    pub fn file_types(mut self, extensions: &[String]) -> Result<Self, DiscoveryError> {
        if extensions.is_empty() {
            self.include = None;
            return Ok(self);
        }

        let mut builder = GlobSetBuilder::new();
        for ext in extensions {
            let pattern = format!("**/*.{}", ext.trim_start_matches('.'));
            builder.add(Glob::new(&pattern).map_err(|e| DiscoveryError::InvalidGlob {
                pattern: pattern.clone(),
                source: e,
            })?);
        }
        self.include = Some(builder.build().map_err(|e| DiscoveryError::InvalidGlob {
            pattern: "<include set>".to_string(),
            source: e,
        })?);
        Ok(self)
    }

    /// Exclude entries; each entry is a doublestar glob or a plain
    /// substring of the relative path
    pub fn exclude_paths(mut self, entries: &[String]) -> Result<Self, DiscoveryError> {
        let mut builder = GlobSetBuilder::new();
        let mut substrings = Vec::new();

        for entry in entries {
            if entry.contains('*') || entry.contains('?') || entry.contains('[') {
                builder.add(
                    Glob::new(entry).map_err(|e| DiscoveryError::InvalidGlob {
                        pattern: entry.clone(),
                        source: e,
                    })?,
                );
            } else {
                substrings.push(entry.clone());
            }
        }

        self.exclude_globs = builder.build().map_err(|e| DiscoveryError::InvalidGlob {
            pattern: "<exclude set>".to_string(),
            source: e,
        })?;
        self.exclude_substrings = substrings;
        Ok(self)
    }

    pub fn max_file_size(mut self, size: u64) -> Self {
        self.max_file_size = size;
        self
    }

    pub fn include_hidden(mut self, include: bool) -> Self {
        self.include_hidden = include;
        self
    }

    pub fn exclude_binary(mut self, exclude: bool) -> Self {
        self.exclude_binary = exclude;
        self
    }

    fn excluded(&self, rel: &str) -> bool {
        if self.exclude_globs.is_match(rel) {
            return true;
        }
        self.exclude_substrings.iter().any(|s| rel.contains(s))
    }

    /// Walk the tree and collect records. Aborts promptly on cancellation.
    pub fn walk(&self, cancel: &CancelToken) -> Result<Vec<FileRecord>, DiscoveryError> {
        if !self.root.exists() {
            return Err(DiscoveryError::RootNotFound(self.root.clone()));
        }

        let mut records = Vec::new();

        let walker = WalkBuilder::new(&self.root)
            .standard_filters(false)
            .hidden(!self.include_hidden)
            .follow_links(false)
            .build();

        for entry in walker {
            if cancel.is_cancelled() {
                return Err(DiscoveryError::Cancelled);
            }

            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    // Permission and IO failures skip the entry, not the scan
                    debug!("skipping unreadable entry: {}", err);
                    continue;
                }
            };

            if entry.file_type().map(|ft| !ft.is_file()).unwrap_or(true) {
                continue;
            }

            let path = entry.path();
            let rel = path
                .strip_prefix(&self.root)
                .unwrap_or(path)
                .to_string_lossy()
                .replace('\\', "/");

            if let Some(ref include) = self.include {
                if !include.is_match(&rel) {
                    continue;
                }
            }

            if self.excluded(&rel) {
                continue;
            }

            let hidden = is_hidden(path);
            if hidden && !self.include_hidden {
                continue;
            }

            let size = match entry.metadata() {
                Ok(metadata) => metadata.len(),
                Err(err) => {
                    debug!("skipping {}: metadata failed: {}", rel, err);
                    continue;
                }
            };

            if size > self.max_file_size {
                debug!("skipping {}: {} bytes over size cap", rel, size);
                continue;
            }

            let binary = match is_binary_file(path) {
                Ok(binary) => binary,
                Err(err) => {
                    warn!("skipping {}: read failed: {}", rel, err);
                    continue;
                }
            };

            if binary && self.exclude_binary {
                continue;
            }

            records.push(FileRecord {
                path: PathBuf::from(rel),
                size,
                is_binary: binary,
                is_hidden: hidden,
            });
        }

        Ok(records)
    }
}
