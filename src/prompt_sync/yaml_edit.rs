//! In-place replacement of a single scalar in a block-style YAML document.
//!
//! `serde_yaml` cannot round-trip comments, quoting, or key order, so writes
//! to `run.yaml` splice new text into the original instead of re-serializing.
//! Navigation is indentation based and understands block mappings and block
//! sequences (including the compact `key:\n- item` form). Flow collections
//! along the path are rejected.

use crate::error::{MaintError, Result};
use serde_yaml::Value;

/// One step of a path into the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathSegment<'a> {
    /// Mapping key.
    Key(&'a str),
    /// Zero-based position in a block sequence.
    Index(usize),
}

/// Presentation style of a scalar as found in the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarStyle {
    Plain,
    SingleQuoted,
    DoubleQuoted,
    Literal,
}

/// A range of lines holding a block node, optionally starting mid-line
/// (the first line of a sequence item after `- `).
#[derive(Debug, Clone, Copy)]
struct Scope {
    start: usize,
    end: usize,
    head_col: Option<usize>,
}

/// A `key: value` node: the key line plus all value lines below it.
#[derive(Debug, Clone, Copy)]
struct Span {
    start: usize,
    end: usize,
    /// Column of the key, which is also the indentation of its mapping.
    col: usize,
    /// Byte offset in the key line just past the `:`.
    rest: usize,
}

struct Document<'a> {
    /// Lines including their terminators.
    raw: Vec<&'a str>,
    /// Lines without terminators.
    lines: Vec<&'a str>,
}

/// Replace the scalar at `path` with `value`, keeping every other byte.
pub fn replace_scalar(text: &str, path: &[PathSegment<'_>], value: &str) -> Result<String> {
    let doc = Document::new(text);
    let target = doc.resolve(path)?;
    let rendered = render_node(&doc, &target, value);

    let eol = if doc.raw[target.start].ends_with("\r\n") {
        "\r\n"
    } else {
        "\n"
    };
    let last_has_eol = doc.raw[target.end - 1].ends_with('\n');

    let mut out = String::with_capacity(text.len() + value.len());
    for raw in &doc.raw[..target.start] {
        out.push_str(raw);
    }
    let count = rendered.len();
    for (i, line) in rendered.iter().enumerate() {
        out.push_str(line);
        if i + 1 < count || last_has_eol {
            out.push_str(eol);
        }
    }
    for raw in &doc.raw[target.end..] {
        out.push_str(raw);
    }

    Ok(out)
}

fn unsupported(path: &[PathSegment<'_>], what: &str) -> MaintError {
    MaintError::ConfigError(format!("cannot edit {}: {}", display_path(path), what))
}

fn display_path(path: &[PathSegment<'_>]) -> String {
    let mut out = String::new();
    for segment in path {
        match segment {
            PathSegment::Key(key) => {
                if !out.is_empty() {
                    out.push('.');
                }
                out.push_str(key);
            }
            PathSegment::Index(index) => out.push_str(&format!("[{}]", index)),
        }
    }
    out
}

impl<'a> Document<'a> {
    fn new(text: &'a str) -> Self {
        let raw: Vec<&str> = text.split_inclusive('\n').collect();
        let lines = raw
            .iter()
            .map(|line| line.trim_end_matches('\n').trim_end_matches('\r'))
            .collect();
        Self { raw, lines }
    }

    fn resolve(&self, path: &[PathSegment<'_>]) -> Result<Span> {
        let mut scope = Scope {
            start: 0,
            end: self.lines.len(),
            head_col: None,
        };
        let mut last_key: Option<Span> = None;

        for segment in path {
            match *segment {
                PathSegment::Key(key) => {
                    if let Some(parent) = last_key {
                        scope = self.mapping_body(&parent, path)?;
                    }
                    let span = self
                        .find_key(&scope, key)
                        .ok_or_else(|| unsupported(path, &format!("key '{}' not found", key)))?;
                    last_key = Some(span);
                }
                PathSegment::Index(index) => {
                    let parent = last_key
                        .take()
                        .ok_or_else(|| unsupported(path, "an index must follow a key"))?;
                    scope = self.sequence_item(&parent, index, path)?;
                }
            }
        }

        last_key.ok_or_else(|| unsupported(path, "path must end with a key"))
    }

    /// Column and text of line `i` as seen from inside `scope`.
    fn view(&self, scope: &Scope, i: usize) -> (usize, &'a str) {
        let line = self.lines[i];
        match scope.head_col {
            Some(col) if i == scope.start => (col, &line[col.min(line.len())..]),
            _ => {
                let col = indent(line);
                (col, &line[col..])
            }
        }
    }

    fn find_key(&self, scope: &Scope, key: &str) -> Option<Span> {
        let mut level = None;

        for i in scope.start..scope.end {
            let (col, text) = self.view(scope, i);
            if !is_content(text) {
                continue;
            }
            let level = *level.get_or_insert(col);
            if col < level {
                break;
            }
            if col != level {
                continue;
            }
            if let Some(after) = match_key(text, key) {
                let rest = self.lines[i].len() - text.len() + after;
                let compact_seq = is_blank_value(&self.lines[i][rest..]);
                let end = self.value_end(i + 1, scope.end, col, compact_seq);
                return Some(Span {
                    start: i,
                    end,
                    col,
                    rest,
                });
            }
        }

        None
    }

    /// First line after the value that starts at `from`, trailing blank lines excluded.
    fn value_end(&self, from: usize, limit: usize, level: usize, compact_seq: bool) -> usize {
        let mut last = from - 1;

        for j in from..limit {
            let line = self.lines[j];
            if line.trim().is_empty() {
                continue;
            }
            let col = indent(line);
            let text = &line[col..];
            if col < level {
                break;
            }
            if col == level && !(compact_seq && is_dash(text)) {
                break;
            }
            last = j;
        }

        last + 1
    }

    fn mapping_body(&self, span: &Span, path: &[PathSegment<'_>]) -> Result<Scope> {
        let rest = self.lines[span.start][span.rest..].trim();
        if !is_blank_value(rest) {
            return Err(unsupported(
                path,
                &format!("expected a block mapping, found '{}'", rest),
            ));
        }
        Ok(Scope {
            start: span.start + 1,
            end: span.end,
            head_col: None,
        })
    }

    fn sequence_item(&self, span: &Span, index: usize, path: &[PathSegment<'_>]) -> Result<Scope> {
        let rest = self.lines[span.start][span.rest..].trim();
        if !is_blank_value(rest) {
            return Err(unsupported(
                path,
                &format!("expected a block sequence, found '{}'", rest),
            ));
        }

        let mut dash_col = None;
        let mut items = Vec::new();
        for i in span.start + 1..span.end {
            let line = self.lines[i];
            let col = indent(line);
            let text = &line[col..];
            if !is_content(text) {
                continue;
            }
            let dash = *dash_col.get_or_insert(col);
            if col == dash {
                if !is_dash(text) {
                    return Err(unsupported(path, "expected a block sequence"));
                }
                items.push(i);
            }
        }

        let Some(&start) = items.get(index) else {
            return Err(unsupported(
                path,
                &format!("sequence has {} item(s), wanted index {}", items.len(), index),
            ));
        };
        let end = items.get(index + 1).copied().unwrap_or(span.end);

        let line = self.lines[start];
        let dash = indent(line);
        let after_dash = &line[dash + 1..];
        let gap = after_dash.len() - after_dash.trim_start_matches(' ').len();

        if is_content(after_dash.trim_start()) {
            Ok(Scope {
                start,
                end,
                head_col: Some(dash + 1 + gap),
            })
        } else {
            Ok(Scope {
                start: start + 1,
                end,
                head_col: None,
            })
        }
    }
}

fn indent(line: &str) -> usize {
    line.len() - line.trim_start_matches(' ').len()
}

fn is_content(text: &str) -> bool {
    let trimmed = text.trim();
    !trimmed.is_empty() && !trimmed.starts_with('#')
}

fn is_blank_value(rest: &str) -> bool {
    let trimmed = rest.trim();
    trimmed.is_empty() || trimmed.starts_with('#')
}

fn is_dash(text: &str) -> bool {
    text == "-" || text.starts_with("- ")
}

/// If `text` starts with `key:` (optionally quoted), return the offset past the colon.
fn match_key(text: &str, key: &str) -> Option<usize> {
    let quoted_double = format!("\"{}\"", key);
    let quoted_single = format!("'{}'", key);

    for candidate in [key, quoted_double.as_str(), quoted_single.as_str()] {
        if let Some(after) = text.strip_prefix(candidate) {
            let trimmed = after.trim_start_matches(' ');
            if let Some(value) = trimmed.strip_prefix(':')
                && (value.is_empty() || value.starts_with(' '))
            {
                return Some(text.len() - value.len());
            }
        }
    }

    None
}

/// Style of the scalar whose text begins at `rest`. Folded blocks count as
/// literal ones since they are rewritten as `|-`.
pub fn detect_style(rest: &str) -> ScalarStyle {
    match rest.trim_start().chars().next() {
        Some('|' | '>') => ScalarStyle::Literal,
        Some('"') => ScalarStyle::DoubleQuoted,
        Some('\'') => ScalarStyle::SingleQuoted,
        _ => ScalarStyle::Plain,
    }
}

/// The ` # comment` following the value (or block header) on a key line,
/// including the whitespace in front of it.
fn trailing_comment(rest: &str, style: ScalarStyle) -> Option<&str> {
    let body_start = rest.len() - rest.trim_start().len();
    let body = &rest[body_start..];
    let value_len = match style {
        ScalarStyle::Plain => 0,
        ScalarStyle::Literal => body.find(char::is_whitespace).unwrap_or(body.len()),
        ScalarStyle::DoubleQuoted => closing_quote(body, b'"')?,
        ScalarStyle::SingleQuoted => closing_quote(body, b'\'')?,
    };

    let from = body_start + value_len;
    let bytes = rest.as_bytes();
    let hash = (from..bytes.len())
        .find(|&i| bytes[i] == b'#' && i > 0 && matches!(bytes[i - 1], b' ' | b'\t'))?;
    let comment_start = rest[..hash].trim_end_matches([' ', '\t']).len();
    Some(&rest[comment_start..])
}

/// Byte length of a quoted scalar that closes on this line.
fn closing_quote(body: &str, quote: u8) -> Option<usize> {
    let bytes = body.as_bytes();
    let mut i = 1;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' if quote == b'"' => i += 2,
            b if b == quote => {
                // '' is an escaped quote inside single quotes.
                if quote == b'\'' && bytes.get(i + 1) == Some(&b'\'') {
                    i += 2;
                } else {
                    return Some(i + 1);
                }
            }
            _ => i += 1,
        }
    }
    None
}

/// Render the replacement lines for `target`, keeping its key prefix and
/// any trailing comment on the key line.
fn render_node(doc: &Document<'_>, target: &Span, value: &str) -> Vec<String> {
    let key_line = doc.lines[target.start];
    let prefix = &key_line[..target.rest];
    let rest = &key_line[target.rest..];
    let original = detect_style(rest);
    let comment = trailing_comment(rest, original).unwrap_or("");

    match choose_style(original, value) {
        ScalarStyle::Literal => {
            let content_indent = existing_block_indent(doc, target, original)
                .unwrap_or(target.col + 2);
            render_literal(&format!("{} |-{}", prefix, comment), value, content_indent)
        }
        ScalarStyle::SingleQuoted => {
            vec![format!("{} {}{}", prefix, single_quote(value), comment)]
        }
        ScalarStyle::Plain => vec![format!("{} {}{}", prefix, value, comment)],
        ScalarStyle::DoubleQuoted => {
            vec![format!("{} {}{}", prefix, double_quote(value), comment)]
        }
    }
}

/// Keep the original style when it can hold `value` exactly.
pub fn choose_style(original: ScalarStyle, value: &str) -> ScalarStyle {
    let multiline = value.contains('\n');
    let fallback = if multiline && literal_safe(value) {
        ScalarStyle::Literal
    } else {
        ScalarStyle::DoubleQuoted
    };

    match original {
        ScalarStyle::DoubleQuoted => ScalarStyle::DoubleQuoted,
        ScalarStyle::Literal if literal_safe(value) => ScalarStyle::Literal,
        ScalarStyle::Literal => ScalarStyle::DoubleQuoted,
        ScalarStyle::SingleQuoted if !multiline && printable(value) => ScalarStyle::SingleQuoted,
        ScalarStyle::Plain if !multiline && plain_safe(value) => ScalarStyle::Plain,
        ScalarStyle::SingleQuoted | ScalarStyle::Plain => fallback,
    }
}

fn printable(value: &str) -> bool {
    value.chars().all(|c| c == '\t' || !c.is_control())
}

/// A `|-` block without an indentation indicator reads `value` back exactly.
fn literal_safe(value: &str) -> bool {
    !value.is_empty()
        && !value.starts_with([' ', '\n'])
        && value.chars().all(|c| c == '\n' || c == '\t' || !c.is_control())
}

fn plain_safe(value: &str) -> bool {
    if value.is_empty() || !printable(value) {
        return false;
    }
    // Whatever the YAML parser reads back must be the same string.
    match serde_yaml::from_str::<Value>(&format!("k: {}\n", value)) {
        Ok(doc) => doc.get("k").and_then(Value::as_str) == Some(value),
        Err(_) => false,
    }
}

fn existing_block_indent(
    doc: &Document<'_>,
    target: &Span,
    original: ScalarStyle,
) -> Option<usize> {
    if original != ScalarStyle::Literal {
        return None;
    }
    doc.lines[target.start + 1..target.end]
        .iter()
        .find(|line| !line.trim().is_empty())
        .map(|line| indent(line))
        .filter(|&col| col > target.col)
}

fn render_literal(header: &str, value: &str, content_indent: usize) -> Vec<String> {
    let pad = " ".repeat(content_indent);
    let mut out = vec![header.to_string()];
    for line in value.split('\n') {
        if line.is_empty() {
            out.push(String::new());
        } else {
            out.push(format!("{}{}", pad, line));
        }
    }
    out
}

fn single_quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

fn double_quote(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            c if c.is_control() => out.push_str(&format!("\\u{:04X}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}
