//! Configuration types for dirstream
//!
//! This module defines:
//! - CLI argument parsing using clap derive macros
//! - The immutable listing request submitted to the lister
//! - Shell-style name pattern compilation

use crate::error::ConfigError;
use clap::Parser;
use regex::Regex;
use std::fmt;
use std::path::PathBuf;

/// Which kind of direct children a listing reports
///
/// There is no "both" mode and no recursion; a listing only ever looks at
/// the direct children of the requested directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListMode {
    /// Report non-directory entries (regular files, symlinks, ...)
    Files,
    /// Report directories only
    Directories,
}

impl ListMode {
    /// Check whether an entry of the given type belongs in this mode
    pub fn matches(self, file_type: std::fs::FileType) -> bool {
        match self {
            ListMode::Files => !file_type.is_dir(),
            ListMode::Directories => file_type.is_dir(),
        }
    }
}

/// Compiled shell-style name pattern
///
/// Supports `*` (any run of characters) and `?` (exactly one character).
/// Patterns apply to entry names only, never to full paths, so path
/// separators are rejected at compile time. Everything else matches
/// literally.
#[derive(Debug, Clone)]
pub struct NamePattern {
    glob: String,
    regex: Regex,
}

impl NamePattern {
    /// Compile a glob into a name matcher
    pub fn new(glob: &str) -> Result<Self, ConfigError> {
        if glob.is_empty() {
            return Err(ConfigError::InvalidPattern {
                pattern: glob.to_string(),
                reason: "pattern must not be empty".into(),
            });
        }
        if glob.contains('/') || glob.contains('\\') {
            return Err(ConfigError::InvalidPattern {
                pattern: glob.to_string(),
                reason: "pattern applies to entry names and cannot contain path separators"
                    .into(),
            });
        }

        let mut translated = String::with_capacity(glob.len() + 8);
        translated.push('^');
        for ch in glob.chars() {
            match ch {
                '*' => translated.push_str("[^/\\\\]*"),
                '?' => translated.push_str("[^/\\\\]"),
                other => translated.push_str(&regex::escape(other.encode_utf8(&mut [0u8; 4]))),
            }
        }
        translated.push('$');

        let regex = Regex::new(&translated).map_err(|e| ConfigError::InvalidPattern {
            pattern: glob.to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            glob: glob.to_string(),
            regex,
        })
    }

    /// Check an entry name against the pattern
    pub fn matches(&self, name: &str) -> bool {
        self.regex.is_match(name)
    }

    /// The original glob text
    pub fn as_str(&self) -> &str {
        &self.glob
    }
}

impl fmt::Display for NamePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.glob)
    }
}

/// One listing request, immutable once submitted
#[derive(Debug, Clone)]
pub struct ListRequest {
    /// Directory whose direct children are listed
    pub dir: PathBuf,

    /// Files-only or directories-only
    pub mode: ListMode,

    /// Optional name filter
    pub pattern: Option<NamePattern>,
}

impl ListRequest {
    /// Request the files directly inside `dir`
    pub fn files(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            mode: ListMode::Files,
            pattern: None,
        }
    }

    /// Request the subdirectories directly inside `dir`
    pub fn directories(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            mode: ListMode::Directories,
            pattern: None,
        }
    }

    /// Restrict the listing to names matching `pattern`
    pub fn with_pattern(mut self, pattern: NamePattern) -> Self {
        self.pattern = Some(pattern);
        self
    }
}

/// Asynchronous directory listing with streaming output
#[derive(Parser, Debug, Clone)]
#[command(
    name = "dirstream",
    version,
    about = "Asynchronous directory listing with streaming output",
    long_about = "Lists the direct children of a directory on a background task,\n\
                  printing each name as it is discovered and the collected result\n\
                  once the listing finishes. Ctrl-C cancels the listing and prints\n\
                  the partial result gathered so far.",
    after_help = "EXAMPLES:\n    \
        dirstream /var/log\n    \
        dirstream /var/log -p '*.log'\n    \
        dirstream /srv --dirs\n    \
        dirstream /massive/dir --cancel-after 50"
)]
pub struct CliArgs {
    /// Directory to list
    #[arg(value_name = "DIR")]
    pub dir: PathBuf,

    /// Shell-style name pattern, e.g. '*.txt'
    #[arg(short = 'p', long, value_name = "GLOB")]
    pub pattern: Option<String>,

    /// List subdirectories instead of files
    #[arg(long)]
    pub dirs: bool,

    /// Cancel the listing after this many milliseconds (partial result demo)
    #[arg(long, value_name = "MS")]
    pub cancel_after: Option<u64>,

    /// Quiet mode - suppress per-entry output
    #[arg(short = 'q', long)]
    pub quiet: bool,

    /// Verbose output
    #[arg(short = 'v', long)]
    pub verbose: bool,
}

impl CliArgs {
    /// Build the listing request these arguments describe
    pub fn to_request(&self) -> Result<ListRequest, ConfigError> {
        let mut request = if self.dirs {
            ListRequest::directories(&self.dir)
        } else {
            ListRequest::files(&self.dir)
        };

        if let Some(glob) = &self.pattern {
            request = request.with_pattern(NamePattern::new(glob)?);
        }

        Ok(request)
    }
}
