//! Console text shared by the check and the probes.
//!
//! Everything writes to a caller-supplied writer so the binary can pass
//! stdout and tests can pass a `Vec<u8>`.

use colored::Colorize;
use std::io::{self, Write};

const RULE_WIDTH: usize = 50;

/// Number of key characters shown before the ellipsis
const KEY_PREVIEW_BYTES: usize = 10;

/// Longest prefix of at most `max_bytes` that ends on a char boundary
pub fn safe_truncate(s: &str, max_bytes: usize) -> &str {
    if s.len() <= max_bytes {
        return s;
    }

    let mut boundary = max_bytes;
    while boundary > 0 && !s.is_char_boundary(boundary) {
        boundary -= 1;
    }

    &s[..boundary]
}

/// First few characters of the key, enough to tell keys apart without leaking one
pub fn key_preview(key: &str) -> String {
    format!("{}...", safe_truncate(key, KEY_PREVIEW_BYTES))
}

pub fn rule() -> String {
    "=".repeat(RULE_WIDTH)
}

pub fn banner(out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "{}", "🌱 CROPCARE 360 - Model Test Script".bright_green())?;
    writeln!(out, "{}", rule())
}

/// Shown when the primary check passed (including the transient cases)
pub fn next_steps(out: &mut impl Write) -> io::Result<()> {
    writeln!(
        out,
        "\n{}",
        "🎉 Setup looks good! You can now run the diagnostic system.".bright_green()
    )?;
    writeln!(out, "\n{}", "Next steps:".bright_yellow())?;
    writeln!(out, "1. Start the Flask server: python server/app.py")?;
    writeln!(out, "2. Start the frontend: npm run dev")?;
    writeln!(
        out,
        "3. Visit http://localhost:5173 to test the diagnostic feature"
    )
}

pub fn fix_hint(out: &mut impl Write) -> io::Result<()> {
    writeln!(
        out,
        "\n{}",
        "🔧 Please fix the issues above before running the diagnostic system.".bright_yellow()
    )
}

pub fn footer(out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "\n{}", rule())?;
    writeln!(out, "{}", "Developed by S³V • CROPCARE 360".bright_black())
}
