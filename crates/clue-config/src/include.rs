//! `#include` resolution settings.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// System header directories searched, in order, for `#include <...>`.
fn default_system_dirs() -> Vec<PathBuf> {
    [
        "/usr/include",
        "/usr/local/include",
        "/usr/include/x86_64-linux-gnu",
        "/usr/lib/gcc/x86_64-linux-gnu/11/include",
    ]
    .into_iter()
    .map(PathBuf::from)
    .collect()
}

/// Maximum nesting of `#include` splicing.
const fn default_max_depth() -> usize {
    32
}

const fn default_follow_system() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct IncludeConfig {
    /// Directories tried in order for angled includes.
    #[serde(default = "default_system_dirs")]
    pub system_dirs: Vec<PathBuf>,

    /// Extra directories tried after the workspace root for quoted includes.
    #[serde(default)]
    pub extra_dirs: Vec<PathBuf>,

    /// Include nesting limit; deeper directives are skipped.
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,

    /// Whether angled includes are followed at all.
    #[serde(default = "default_follow_system")]
    pub follow_system: bool,
}

impl Default for IncludeConfig {
    fn default() -> Self {
        Self {
            system_dirs: default_system_dirs(),
            extra_dirs: Vec::new(),
            max_depth: default_max_depth(),
            follow_system: default_follow_system(),
        }
    }
}
