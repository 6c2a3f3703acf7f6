use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, info, warn};

static DIAGNOSTIC_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(.*?):(\d+):(\d+):\s*(error|warning|note):\s*(.*)$").unwrap());

/// Diagnostic severity as printed by Clang.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
    Note,
}

/// A parsed diagnostic line from the Clang stderr stream.
#[derive(Debug, Clone)]
pub struct ClangDiagnostic {
    pub file: Option<String>,
    pub line: u32,
    pub column: u32,
    pub severity: Severity,
    pub message: String,
}

/// Manages invocation of the Clang front end (`clang -Xclang -ast-dump=json`)
/// and parsing of its diagnostic output.
///
/// Supports configurable include paths and extra compiler flags so that
/// projects with non-trivial include hierarchies work without editing the
/// command line on every run.
pub struct ClangCompiler {
    /// Resolved compiler binary (env override > config > `clang`).
    binary: String,
    /// Extra compiler flags forwarded verbatim (e.g. `-std=c99`, `-DFOO`).
    extra_flags: Vec<String>,
    /// Extra include search paths registered via configuration.
    extra_include_paths: Vec<PathBuf>,
    /// System include paths discovered from the toolchain.
    system_include_paths: Vec<PathBuf>,
}

impl ClangCompiler {
    /// Create a new `ClangCompiler`.
    ///
    /// The binary is taken from the `ZEROINIT_CLANG` environment variable if
    /// set, then from `binary_override` (usually the config file), and falls
    /// back to `clang` on the `PATH`.
    pub fn new(binary_override: Option<String>) -> Self {
        let binary = std::env::var("ZEROINIT_CLANG")
            .ok()
            .filter(|b| !b.trim().is_empty())
            .or(binary_override)
            .unwrap_or_else(|| "clang".to_string());

        Self {
            binary,
            extra_flags: Vec::new(),
            extra_include_paths: Vec::new(),
            system_include_paths: Vec::new(),
        }
    }

    /// Register additional compiler flags (e.g. `-std=c11`, `-DFOO=1`).
    pub fn add_flags(&mut self, flags: impl IntoIterator<Item = String>) {
        self.extra_flags.extend(flags);
    }

    /// Register additional include search paths, passed as `-I <path>`.
    pub fn add_include_paths(&mut self, paths: impl IntoIterator<Item = PathBuf>) {
        self.extra_include_paths.extend(paths);
    }

    /// Return the discovered system include paths.
    pub fn system_include_paths(&self) -> &[PathBuf] {
        &self.system_include_paths
    }

    /// Check whether the compiler binary is runnable on this system.
    pub fn is_available(&self) -> bool {
        Command::new(&self.binary)
            .arg("--version")
            .stdin(Stdio::null())
            .output()
            .map(|o| o.status.success())
            .unwrap_or(false)
    }

    /// Run `clang -v -E -` to parse the default header search paths.
    ///
    /// These are what classify a declaration's file as a system header, so
    /// the classification tracks the installed toolchain instead of a
    /// hardcoded prefix list alone.
    pub fn discover_system_includes(&mut self) {
        let output = match Command::new(&self.binary)
            .args(["-x", "c", "-v", "-E", "-"]) // -E to preprocess, - to read from stdin
            .stdin(Stdio::null())
            .output()
        {
            Ok(o) => o,
            Err(e) => {
                warn!("Failed to run {} -v: {e}", self.binary);
                return;
            }
        };

        // Different Clang versions can print include search details to either
        // stderr or stdout, so we parse both streams.
        let discovery_output = format!(
            "{}\n{}",
            String::from_utf8_lossy(&output.stderr),
            String::from_utf8_lossy(&output.stdout)
        );
        let paths = parse_include_search_paths(&discovery_output);

        if paths.is_empty() {
            warn!("No system include paths found in `{} -v` output", self.binary);
        } else {
            debug!("Discovered system include paths: {:?}", paths);
        }

        self.system_include_paths = paths;
    }

    /// Run the Clang AST dump over `input` and return the raw JSON string.
    ///
    /// `user_flags` are forwarded verbatim ahead of our own flags, matching
    /// the command-line contract. Diagnostics on stderr are parsed and
    /// relayed to the log; a non-zero exit does not discard the dump, since a
    /// partial AST for a file with errors is still usable.
    pub fn ast_dump(&self, input: &Path, user_flags: &[String]) -> Option<String> {
        let mut args: Vec<String> = user_flags.to_vec();
        args.extend(
            [
                "-x",
                "c",
                "-fsyntax-only",
                "-fno-color-diagnostics",
                "-Xclang",
                "-ast-dump=json",
            ]
            .map(str::to_string),
        );

        let mut seen_includes = HashSet::with_capacity(self.extra_include_paths.len());
        for p in &self.extra_include_paths {
            let p = p.display().to_string();
            if seen_includes.insert(p.clone()) {
                args.push("-I".to_string());
                args.push(p);
            }
        }
        args.extend(self.extra_flags.iter().cloned());
        args.push(input.display().to_string());

        debug!("AST dump: {} {}", self.binary, args.join(" "));

        let output = match Command::new(&self.binary).args(&args).output() {
            Ok(o) => o,
            Err(e) => {
                warn!("Failed to run AST dump: {e}");
                return None;
            }
        };

        let stderr = String::from_utf8_lossy(&output.stderr);
        for diag in parse_diagnostics(&stderr) {
            relay_diagnostic(&diag);
        }

        if !output.status.success() {
            debug!("[ast-dump] exited with non-zero status (partial AST may still be usable)");
        }

        let stdout = String::from_utf8(output.stdout).ok()?;
        if stdout.is_empty() || !stdout.starts_with('{') {
            warn!("[ast-dump] produced no usable JSON for {}", input.display());
            return None;
        }

        debug!("[ast-dump] produced {} bytes of JSON for {}", stdout.len(), input.display());

        Some(stdout)
    }
}

/// Parse the compiler's stderr output into a list of diagnostics.
pub fn parse_diagnostics(output: &str) -> Vec<ClangDiagnostic> {
    output.lines().filter_map(parse_diagnostic_line).collect()
}

/// Attempt to parse a single line of compiler output.
///
/// Expected format: `filename:line:column: severity: message`
pub fn parse_diagnostic_line(line: &str) -> Option<ClangDiagnostic> {
    let caps = DIAGNOSTIC_RE.captures(line)?;

    let file = caps.get(1).map(|m| m.as_str().to_owned());
    let line_num: u32 = caps.get(2)?.as_str().parse().ok()?;
    let column: u32 = caps.get(3)?.as_str().parse().ok()?;
    let severity = match caps.get(4)?.as_str() {
        "error" => Severity::Error,
        "warning" => Severity::Warning,
        _ => Severity::Note,
    };
    let message = caps.get(5)?.as_str().to_string();

    Some(ClangDiagnostic {
        file,
        line: line_num,
        column,
        severity,
        message,
    })
}

fn relay_diagnostic(diag: &ClangDiagnostic) {
    let file = diag.file.as_deref().unwrap_or("<unknown>");
    match diag.severity {
        Severity::Error => {
            warn!("[clang] {file}:{}:{}: error: {}", diag.line, diag.column, diag.message);
        }
        Severity::Warning => {
            info!("[clang] {file}:{}:{}: warning: {}", diag.line, diag.column, diag.message);
        }
        Severity::Note => {
            debug!("[clang] {file}:{}:{}: note: {}", diag.line, diag.column, diag.message);
        }
    }
}

/// Extract the `#include <...>` search directories from `clang -v` output.
pub fn parse_include_search_paths(raw_output: &str) -> Vec<PathBuf> {
    let mut parsing_includes = false;
    let mut discovered_paths = Vec::new();

    for line in raw_output.lines() {
        let trimmed = line.trim();
        if trimmed.starts_with("#include <...> search starts here:") {
            parsing_includes = true;
            continue;
        }
        if !parsing_includes {
            continue;
        }
        if trimmed.starts_with("End of search list.") {
            break;
        }
        if trimmed.is_empty() {
            continue;
        }

        // Clang may annotate framework roots as " (framework directory)".
        let path_text = trimmed
            .trim_end_matches(" (framework directory)")
            .trim_matches('"');
        discovered_paths.push(PathBuf::from(path_text));
    }

    dedupe_paths(discovered_paths)
}

fn dedupe_paths(paths: Vec<PathBuf>) -> Vec<PathBuf> {
    let mut seen = HashSet::new();
    let mut deduped = Vec::new();
    for path in paths {
        if seen.insert(path.clone()) {
            deduped.push(path);
        }
    }
    deduped
}

#[cfg(test)]
#[path = "../../tests/src/clang/compiler_tests.rs"]
mod tests;
