//! ANSI escape sequence stripping for captured tool output.
//!
//! Terraform and Ansible both emit color/control sequences even with color
//! nominally disabled in some subcommands; responses relay plain text only.

use regex_lite::Regex;
use std::sync::LazyLock;

// ESC '[' parameter bytes, then a final byte of 'm' (SGR) or 'K' (erase line).
static ANSI_ESCAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\x1B\[[0-?9;]*[mK]").unwrap());

/// Remove all ANSI escape sequences, leaving every other character in place.
pub fn strip_ansi(text: &str) -> String {
    ANSI_ESCAPE.replace_all(text, "").into_owned()
}

/// Strip escapes, trim surrounding whitespace, and split into ordered lines.
pub fn sanitize_lines(text: &str) -> Vec<String> {
    strip_ansi(text)
        .trim()
        .split('\n')
        .map(|line| line.to_string())
        .collect()
}
