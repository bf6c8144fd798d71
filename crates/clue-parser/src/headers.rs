//! Header file discovery for `#include` completion.
//!
//! Headers come from three places, first path wins per file name:
//!
//! 1. every `*.h` under the workspace root (gitignore-aware, `.clueignore`
//!    supported);
//! 2. top-level `*.h` in the standard include directories;
//! 3. top-level `*.h` in the `includePath` entries of the first configuration
//!    in `.vscode/c_cpp_properties.json`.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use clue_config::IncludeConfig;
use globset::{Glob, GlobMatcher};
use ignore::WalkBuilder;
use ignore::overrides::OverrideBuilder;
use serde::Deserialize;

use crate::error::ParserError;

/// Header file name to the first path it was found at.
pub type HeaderIndex = BTreeMap<String, PathBuf>;

const HEADER_GLOB: &str = "*.h";
const IGNORE_FILENAME: &str = ".clueignore";
const WORKSPACE_FOLDER: &str = "${workspaceFolder}";

#[derive(Debug, Deserialize)]
struct CppProperties {
    #[serde(default)]
    configurations: Vec<CppConfiguration>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CppConfiguration {
    #[serde(default)]
    include_path: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct HeaderSearch {
    workspace_root: PathBuf,
    standard_dirs: Vec<PathBuf>,
}

impl HeaderSearch {
    /// Search `workspace_root` plus `/usr/include` and `/usr/local/include`.
    #[must_use]
    pub fn new(workspace_root: impl Into<PathBuf>) -> Self {
        Self {
            workspace_root: workspace_root.into(),
            standard_dirs: vec![
                PathBuf::from("/usr/include"),
                PathBuf::from("/usr/local/include"),
            ],
        }
    }

    /// Use the configured system include directories as standard dirs.
    #[must_use]
    pub fn from_config(workspace_root: impl Into<PathBuf>, config: &IncludeConfig) -> Self {
        let dirs = if config.follow_system {
            config.system_dirs.clone()
        } else {
            Vec::new()
        };
        Self::new(workspace_root).with_standard_dirs(dirs)
    }

    #[must_use]
    pub fn with_standard_dirs(mut self, dirs: Vec<PathBuf>) -> Self {
        self.standard_dirs = dirs;
        self
    }

    /// Build the header index.
    ///
    /// # Errors
    /// Fails on an invalid walk configuration or a malformed
    /// `c_cpp_properties.json`.
    pub fn collect(&self) -> Result<HeaderIndex, ParserError> {
        let matcher = Glob::new(HEADER_GLOB)?.compile_matcher();
        let mut index = HeaderIndex::new();

        for path in self.workspace_headers()? {
            insert_first(&mut index, path);
        }
        for dir in &self.standard_dirs {
            for path in top_level_headers(dir, &matcher) {
                insert_first(&mut index, path);
            }
        }
        for dir in self.configured_include_paths()? {
            for path in top_level_headers(&dir, &matcher) {
                insert_first(&mut index, path);
            }
        }

        tracing::debug!(headers = index.len(), "header index built");
        Ok(index)
    }

    fn workspace_headers(&self) -> Result<Vec<PathBuf>, ParserError> {
        let mut overrides = OverrideBuilder::new(&self.workspace_root);
        overrides.add(HEADER_GLOB)?;

        let mut builder = WalkBuilder::new(&self.workspace_root);
        builder
            .hidden(false)
            .add_custom_ignore_filename(IGNORE_FILENAME)
            .overrides(overrides.build()?)
            .sort_by_file_name(|a, b| a.cmp(b))
            .filter_entry(|entry| entry.file_name() != ".git");

        let mut headers = Vec::new();
        for entry in builder.build() {
            match entry {
                Ok(entry) if entry.file_type().is_some_and(|ft| ft.is_file()) => {
                    headers.push(entry.into_path());
                }
                Ok(_) => {}
                Err(err) => tracing::debug!(%err, "skipping unreadable workspace entry"),
            }
        }
        Ok(headers)
    }

    fn configured_include_paths(&self) -> Result<Vec<PathBuf>, ParserError> {
        let path = self
            .workspace_root
            .join(".vscode")
            .join("c_cpp_properties.json");
        if !path.is_file() {
            return Ok(Vec::new());
        }

        let properties: CppProperties = serde_json::from_str(&std::fs::read_to_string(&path)?)?;
        let root = self.workspace_root.to_string_lossy();
        Ok(properties
            .configurations
            .into_iter()
            .next()
            .map(|config| {
                config
                    .include_path
                    .iter()
                    .map(|entry| {
                        let expanded = entry.replace(WORKSPACE_FOLDER, &root);
                        PathBuf::from(expanded.trim_end_matches("/**"))
                    })
                    .collect()
            })
            .unwrap_or_default())
    }
}

fn insert_first(index: &mut HeaderIndex, path: PathBuf) {
    if let Some(name) = path.file_name().map(|n| n.to_string_lossy().into_owned()) {
        index.entry(name).or_insert(path);
    }
}

/// `*.h` files directly inside `dir`, sorted. A missing directory has none.
fn top_level_headers(dir: &Path, matcher: &GlobMatcher) -> Vec<PathBuf> {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(err) => {
            tracing::debug!(dir = %dir.display(), %err, "include directory not readable");
            return Vec::new();
        }
    };
    let mut headers: Vec<PathBuf> = entries
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_ok_and(|ft| ft.is_file()))
        .map(|e| e.path())
        .filter(|p| p.file_name().is_some_and(|n| matcher.is_match(n)))
        .collect();
    headers.sort();
    headers
}
