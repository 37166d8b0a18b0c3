//! Renders scan output into the line-oriented text records printed by the
//! command line tool.
//!
//! Token records go to standard output, diagnostic records to standard error.

use std::fmt::Write as _;

use crate::scanner::Diagnostic;
use crate::token::Token;

/// Format tokens as one `<KIND> <lexeme> <literal>` record per line.
///
/// Records are separated by `\n`; the final record (normally `EOF  null`)
/// carries no trailing newline.
#[must_use]
pub fn format_tokens(tokens: &[Token]) -> String {
    let mut out = String::new();
    for (i, token) in tokens.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        let _ = write!(out, "{token}");
    }
    out
}

/// Format diagnostics as one `[line N] Error: <message>` record per line,
/// each terminated by `\n`.
#[must_use]
pub fn format_diagnostics(diagnostics: &[Diagnostic]) -> String {
    let mut out = String::new();
    for diagnostic in diagnostics {
        let _ = writeln!(out, "{diagnostic}");
    }
    out
}
