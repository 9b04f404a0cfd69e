use std::fmt::{Display, Formatter, Result};

use thiserror::Error;

use crate::resolve::{ResolveError, ResolverFault};

/// Top-level resolution error: either a reported diagnostic or a fatal
/// internal fault. Diagnostics never escalate into faults, and a fault is
/// never rendered as a user-facing diagnostic.
#[derive(Clone, Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Diagnostic(#[from] ResolveError),

    #[error(transparent)]
    Fault(#[from] ResolverFault),
}

impl Error {
    pub fn diagnostic(&self) -> Option<&ResolveError> {
        match self {
            Error::Diagnostic(diag) => Some(diag),
            Error::Fault(_) => None,
        }
    }

    pub fn fault(&self) -> Option<&ResolverFault> {
        match self {
            Error::Diagnostic(_) => None,
            Error::Fault(fault) => Some(fault),
        }
    }

    pub fn span(&self) -> Span {
        match self {
            Error::Diagnostic(diag) => diag.span(),
            Error::Fault(fault) => fault.span(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub offset: usize,
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn new(offset: usize, line: usize, column: usize) -> Self {
        Self {
            offset,
            line,
            column,
        }
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

impl Span {
    pub fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }
}

impl Default for Span {
    fn default() -> Self {
        // A harmless zero-length 1:1 span for synthesized nodes.
        Self {
            start: Position::new(0, 1, 1),
            end: Position::new(0, 1, 1),
        }
    }
}

impl Display for Span {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// Formats an error message against the source text, with a marker row under
/// each line covered by the span.
///
/// Single-character spans get a caret, everything else dashes:
/// ```text
/// (2:9) Unexpected token
/// │ 2 │ let a = @;
/// │   │         ^
/// ```
pub fn format_error(source: &str, span: Span, error: impl Display) -> String {
    let lines: Vec<&str> = source.lines().collect();
    let start_line = span.start.line.max(1);
    let end_line = span.end.line.max(start_line);
    let number_width = end_line.to_string().len();
    let single_line = start_line == end_line;

    let mut out = format!("({}:{}) {}\n", span.start.line, span.start.column, error);

    for line_no in start_line..=end_line {
        let content = lines.get(line_no - 1).copied().unwrap_or("");
        out.push_str(&format!("│ {line_no:>number_width$} │ {content}\n"));

        let start_col = if line_no == span.start.line {
            span.start.column.max(1)
        } else {
            1
        };
        let end_col_excl = if line_no == span.end.line {
            span.end.column.max(start_col)
        } else {
            content.chars().count() + 1
        };
        if end_col_excl <= start_col {
            continue;
        }

        let len = end_col_excl - start_col;
        let marker = if single_line && len == 1 {
            "^".to_string()
        } else {
            "-".repeat(len)
        };
        let indent = " ".repeat(start_col - 1);
        out.push_str(&format!("│ {:>number_width$} │ {indent}{marker}\n", ""));
    }
    out
}

#[cfg(test)]
#[path = "tests/t_diag.rs"]
mod tests;
