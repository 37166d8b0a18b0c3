//! Scanner for the Lox scripting language.
//!
//! Turns raw source text into a flat sequence of classified tokens,
//! collecting recoverable diagnostics along the way. Output can be
//! rendered to the line-oriented record format used by the `lox` tool.
//!
//! # Quick start
//!
//! ## Scan a source string
//!
//! ```
//! use lox_scanner::{tokenize, TokenKind};
//!
//! let result = tokenize("var answer = 42;");
//! let kinds: Vec<_> = result.tokens.iter().map(|t| t.kind).collect();
//! assert_eq!(
//!     kinds,
//!     [
//!         TokenKind::Var,
//!         TokenKind::Identifier,
//!         TokenKind::Equal,
//!         TokenKind::Number,
//!         TokenKind::Semicolon,
//!         TokenKind::Eof,
//!     ]
//! );
//! assert_eq!(result.exit_code(), 0);
//! ```
//!
//! ## Render records
//!
//! ```
//! use lox_scanner::{format_diagnostics, format_tokens, tokenize};
//!
//! let result = tokenize("1 @");
//! assert_eq!(format_tokens(&result.tokens), "NUMBER 1 1.0\nEOF  null");
//! assert_eq!(
//!     format_diagnostics(&result.diagnostics),
//!     "[line 1] Error: Unexpected character: @\n"
//! );
//! assert_eq!(result.exit_code(), 65);
//! ```

// Allow noisy pedantic lints that don't add value for
// a library crate.
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions
)]

pub mod formatter;
pub mod scanner;
pub mod token;

pub use formatter::{format_diagnostics, format_tokens};
pub use scanner::{
    Diagnostic, DiagnosticKind, EXIT_DATA_ERR, EXIT_OK, ScanResult, canonical_number, scan,
    tokenize,
};
pub use token::{Literal, Span, Token, TokenKind};
