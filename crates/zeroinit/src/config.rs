//! Optional `zeroinit.toml` configuration.
//!
//! Discovered by walking parent directories from the input file, so a
//! project can pin its clang binary, default flags, and extra exclusion
//! prefixes once instead of repeating them on every invocation.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::warn;

const CONFIG_FILENAME: &str = "zeroinit.toml";

#[derive(Debug, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    pub compiler: CompilerSection,
    pub rewrite: RewriteSection,

    // Forward-compatible: unknown top-level keys are tolerated.
    #[serde(flatten)]
    extra: BTreeMap<String, toml::Value>,
}

#[derive(Debug, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct CompilerSection {
    /// Clang binary to invoke instead of `clang` from the `PATH`.
    pub clang: Option<String>,
    /// Extra flags appended to every compiler invocation.
    pub flags: Vec<String>,
    /// Extra include search paths, passed as `-I <path>`.
    pub include_paths: Vec<String>,

    #[serde(flatten)]
    extra: BTreeMap<String, toml::Value>,
}

#[derive(Debug, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct RewriteSection {
    /// Path prefixes excluded from output materialization, in addition to
    /// the built-in `/usr` and `/opt`.
    pub exclude_prefixes: Vec<String>,

    #[serde(flatten)]
    extra: BTreeMap<String, toml::Value>,
}

/// Walks parent directories from `start` looking for `zeroinit.toml`.
/// Returns the path to the first one found, or `None`.
pub fn find_config(start: &Path) -> Option<PathBuf> {
    let mut dir = if start.is_file() {
        start.parent()?
    } else {
        start
    };
    loop {
        let candidate = dir.join(CONFIG_FILENAME);
        if candidate.is_file() {
            return Some(candidate);
        }
        dir = dir.parent()?;
    }
}

/// Reads and parses a `zeroinit.toml` file.
///
/// Returns `None` (with a warning) if the file cannot be read or parsed.
pub fn load_config(path: &Path) -> Option<Config> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            warn!("failed to read {}: {e}", path.display());
            return None;
        }
    };
    match toml::from_str(&content) {
        Ok(config) => Some(config),
        Err(e) => {
            warn!("failed to parse {}: {e}", path.display());
            None
        }
    }
}

/// Resolve the configuration that applies to `source_path`, falling back to
/// defaults when no config file exists.
pub fn resolve_config(source_path: &Path) -> Config {
    find_config(source_path)
        .and_then(|path| load_config(&path))
        .unwrap_or_default()
}

#[cfg(test)]
#[path = "../tests/src/config_tests.rs"]
mod tests;
