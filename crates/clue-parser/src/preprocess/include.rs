//! `#include` targets and how they are found.

use std::path::{Path, PathBuf};

use clue_config::IncludeConfig;

/// The operand of an `#include` directive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IncludeTarget {
    /// `#include "path"`: searched relative to the workspace.
    Quoted(String),
    /// `#include <path>`: searched in the system include directories.
    Angled(String),
}

impl IncludeTarget {
    /// Parse the text following `include`. Trailing tokens are ignored.
    #[must_use]
    pub fn parse(rest: &str) -> Option<Self> {
        let rest = rest.trim_start();
        if let Some(inner) = rest.strip_prefix('"') {
            let (path, _) = inner.split_once('"')?;
            return Some(Self::Quoted(path.to_string()));
        }
        if let Some(inner) = rest.strip_prefix('<') {
            let (path, _) = inner.split_once('>')?;
            return Some(Self::Angled(path.to_string()));
        }
        None
    }

    #[must_use]
    pub fn path(&self) -> &str {
        match self {
            Self::Quoted(path) | Self::Angled(path) => path,
        }
    }
}

/// A located include file and its raw text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedInclude {
    pub path: PathBuf,
    pub content: String,
}

/// Locates and loads included files.
pub trait IncludeResolver {
    /// Returns `None` when the target cannot be found or read.
    fn resolve(&self, target: &IncludeTarget) -> Option<ResolvedInclude>;
}

/// Resolver that never finds anything; includes contribute no text.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoIncludes;

impl IncludeResolver for NoIncludes {
    fn resolve(&self, _target: &IncludeTarget) -> Option<ResolvedInclude> {
        None
    }
}

/// Resolves includes against the filesystem, first match wins.
#[derive(Debug, Clone)]
pub struct FsIncludeResolver {
    quoted_dirs: Vec<PathBuf>,
    angled_dirs: Vec<PathBuf>,
}

impl FsIncludeResolver {
    /// Quoted includes search `root`, then `extra_dirs`. Angled includes
    /// search `system_dirs` (when `follow_system` is set), then `extra_dirs`.
    /// Relative extra directories are taken relative to `root`.
    #[must_use]
    pub fn from_config(root: &Path, config: &IncludeConfig) -> Self {
        let extra: Vec<PathBuf> = config.extra_dirs.iter().map(|d| root.join(d)).collect();

        let mut quoted_dirs = vec![root.to_path_buf()];
        quoted_dirs.extend(extra.iter().cloned());

        let mut angled_dirs = Vec::new();
        if config.follow_system {
            angled_dirs.extend(config.system_dirs.iter().cloned());
        }
        angled_dirs.extend(extra);

        Self {
            quoted_dirs,
            angled_dirs,
        }
    }

    fn search_dirs(&self, target: &IncludeTarget) -> &[PathBuf] {
        match target {
            IncludeTarget::Quoted(_) => &self.quoted_dirs,
            IncludeTarget::Angled(_) => &self.angled_dirs,
        }
    }
}

impl IncludeResolver for FsIncludeResolver {
    fn resolve(&self, target: &IncludeTarget) -> Option<ResolvedInclude> {
        let path = self
            .search_dirs(target)
            .iter()
            .map(|dir| dir.join(target.path()))
            .find(|candidate| candidate.is_file())?;

        match std::fs::read_to_string(&path) {
            Ok(content) => Some(ResolvedInclude { path, content }),
            Err(err) => {
                tracing::debug!(path = %path.display(), %err, "include not readable");
                None
            }
        }
    }
}
