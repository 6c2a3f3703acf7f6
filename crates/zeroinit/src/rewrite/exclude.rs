use std::path::{Path, PathBuf};

/// Output paths under these trees are never rewritten, independent of any
/// configuration.
pub const BUILTIN_EXCLUDE_PREFIXES: [&str; 2] = ["/usr", "/opt"];

/// Both exclusion filters in one place.
///
/// The system-header predicate gates file tracking during traversal; the
/// path-prefix policy gates materialization. The two rule sets are
/// independent on purpose: a header can live outside the discovered system
/// include directories and still sit in a library install tree.
#[derive(Debug, Clone, Default)]
pub struct ExcludePolicy {
    /// `#include <...>` search directories discovered from the toolchain.
    system_dirs: Vec<PathBuf>,
    /// Prefixes excluded from output materialization.
    output_prefixes: Vec<String>,
}

impl ExcludePolicy {
    /// Build a policy from discovered system include dirs plus configured
    /// extra output prefixes. The built-in prefixes are always in force.
    pub fn new(system_dirs: Vec<PathBuf>, extra_prefixes: &[String]) -> Self {
        let mut output_prefixes: Vec<String> =
            BUILTIN_EXCLUDE_PREFIXES.map(str::to_string).to_vec();
        for prefix in extra_prefixes {
            if !output_prefixes.iter().any(|p| p == prefix) {
                output_prefixes.push(prefix.clone());
            }
        }

        Self {
            system_dirs,
            output_prefixes,
        }
    }

    /// Returns `true` if a file path looks like a system / SDK header.
    pub fn is_system_header(&self, path: &str) -> bool {
        if path.is_empty() {
            return true;
        }
        let p = Path::new(path);
        if self.system_dirs.iter().any(|dir| p.starts_with(dir)) {
            return true;
        }
        path.contains("/usr/include/")
            || path.contains("/lib/clang/")
            || path.contains("/Toolchains/")
            || path.contains("/SDKs/")
    }

    /// Returns `true` if an output path falls under an excluded install tree.
    pub fn is_excluded_output(&self, path: &str) -> bool {
        self.output_prefixes.iter().any(|prefix| path.starts_with(prefix))
    }
}
