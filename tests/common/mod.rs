#![allow(dead_code)]

use lox_scanner::{TokenKind, format_diagnostics, format_tokens, tokenize};

/// Token kinds of a scan, `EOF` included.
pub fn kinds(source: &str) -> Vec<TokenKind> {
    tokenize(source).tokens.iter().map(|t| t.kind).collect()
}

/// Printed token records of a scan, one per line.
pub fn records(source: &str) -> Vec<String> {
    tokenize(source).tokens.iter().map(ToString::to_string).collect()
}

/// Helper: scan, render both channels, and compare against expected text.
pub fn assert_output(source: &str, stdout: &str, stderr: &str, status: u8) {
    let result = tokenize(source);
    pretty_assertions::assert_eq!(
        format_tokens(&result.tokens),
        stdout,
        "stdout mismatch for input:\n{source}"
    );
    pretty_assertions::assert_eq!(
        format_diagnostics(&result.diagnostics),
        stderr,
        "stderr mismatch for input:\n{source}"
    );
    assert_eq!(result.exit_code(), status, "exit status for input:\n{source}");
}
