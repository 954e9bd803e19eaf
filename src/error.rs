//! Error types for loading layout descriptions

use ariadne::{Color, Label, Report, ReportKind, Source};
use thiserror::Error;

/// Byte range in source text
pub type Span = std::ops::Range<usize>;

/// Errors raised while reading a layout description.
///
/// Only syntactically broken JSON ends up here. Missing layouts, missing
/// element lists and wrongly typed fields are not errors.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Layout error at line {line}, column {column}: {message}")]
    Json {
        line: usize,
        column: usize,
        message: String,
    },
}

impl LoadError {
    /// Line and column (both 1-based) the error points at
    pub fn position(&self) -> (usize, usize) {
        match self {
            LoadError::Json { line, column, .. } => (*line, *column),
        }
    }

    /// Character range of the error within `source`, as ariadne counts it.
    /// serde_json columns count bytes, so multibyte text shifts the two apart.
    pub fn span(&self, source: &str) -> Span {
        let (line, column) = self.position();
        let offset = byte_offset(source, line, column);
        let start = source
            .char_indices()
            .take_while(|(i, _)| *i < offset)
            .count();
        let len = source.chars().count();
        start..(start + 1).min(len).max(start)
    }

    /// Format the error with source context using ariadne
    pub fn format(&self, source: &str, filename: &str) -> String {
        let mut buf = Vec::new();
        match self {
            LoadError::Json { message, .. } => {
                let span = self.span(source);
                let written = Report::build(ReportKind::Error, filename, span.start)
                    .with_message("invalid store layout")
                    .with_label(
                        Label::new((filename, span))
                            .with_message(message)
                            .with_color(Color::Red),
                    )
                    .finish()
                    .write((filename, Source::from(source)), &mut buf);
                if written.is_err() {
                    return self.to_string();
                }
            }
        }
        String::from_utf8_lossy(&buf).into_owned()
    }
}

impl From<serde_json::Error> for LoadError {
    fn from(err: serde_json::Error) -> Self {
        // serde_json appends " at line L column C" to its Display output
        let message = err.to_string();
        let message = match message.rfind(" at line ") {
            Some(idx) => message[..idx].to_string(),
            None => message,
        };
        LoadError::Json {
            line: err.line(),
            column: err.column(),
            message,
        }
    }
}

/// Convert a 1-based line/column pair into a byte offset, clamped to the source
fn byte_offset(source: &str, line: usize, column: usize) -> usize {
    let line_start: usize = source
        .split_inclusive('\n')
        .take(line.saturating_sub(1))
        .map(str::len)
        .sum();
    (line_start + column.saturating_sub(1)).min(source.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn json_error(source: &str) -> LoadError {
        serde_json::from_str::<serde_json::Value>(source)
            .unwrap_err()
            .into()
    }

    #[test]
    fn test_position_from_serde_json() {
        let err = json_error("{\n  \"storeName\": ,\n}");
        assert_eq!(err.position().0, 2);
    }

    #[test]
    fn test_message_strips_position_suffix() {
        let err = json_error("{ \"a\": }");
        assert!(!err.to_string().contains(" at line 1 column"));
        assert!(err.to_string().starts_with("Layout error at line 1"));
    }

    #[test]
    fn test_byte_offset() {
        let source = "ab\ncd\nef";
        assert_eq!(byte_offset(source, 1, 1), 0);
        assert_eq!(byte_offset(source, 2, 2), 4);
        assert_eq!(byte_offset(source, 3, 1), 6);
        assert_eq!(byte_offset(source, 9, 9), source.len());
    }

    #[test]
    fn test_span_counts_characters() {
        let source = r#"{"storeName": "Épicerie ÉÉÉÉÉÉ", "elements": [,]}"#;
        let err = json_error(source);
        let span = err.span(source);
        assert!(span.end <= source.chars().count());
        assert_eq!(source.chars().nth(span.start), Some(','));

        let report = err.format(source, "store.json");
        assert!(report.contains("Épicerie"));
        assert!(report.contains("expected value"));
    }

    #[test]
    fn test_format_includes_filename() {
        let source = "{ \"storeName\": }";
        let err = json_error(source);
        let report = err.format(source, "store.json");
        assert!(report.contains("store.json"));
        assert!(report.contains("invalid store layout"));
    }
}
