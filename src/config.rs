//! Tunable limits and thresholds

use serde::{Deserialize, Serialize};

/// Default cap on multipart / `message/rfc822` nesting
pub const DEFAULT_MAX_DEPTH: usize = 20;

/// Default preview length in characters
pub const DEFAULT_PREVIEW_CHARS: usize = 120;

/// Options shared by parsing and extraction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Options {
    /// Deepest nesting level that is still descended into
    pub max_depth: usize,

    /// Keyword proximity windows for the verification code search
    pub code_windows: CodeWindows,

    /// Maximum preview length in characters
    pub preview_chars: usize,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            code_windows: CodeWindows::default(),
            preview_chars: DEFAULT_PREVIEW_CHARS,
        }
    }
}

/// Maximum number of non-digit characters allowed between a keyword and a
/// code, per search pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodeWindows {
    /// Subject line pass
    pub subject: usize,

    /// Strict body pass
    pub body: usize,

    /// Loose body pass, false-positive filtered
    pub loose: usize,
}

impl Default for CodeWindows {
    fn default() -> Self {
        Self {
            subject: 20,
            body: 30,
            loose: 80,
        }
    }
}
