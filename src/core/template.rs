/// Prompt template parsing and rendering.

use serde_json::Value;
use thiserror::Error;

use crate::core::context::RenderContext;

#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("template parse error: {0}")]
    Parse(String),
    #[error("template references unbound path '{0}'")]
    UnboundPath(String),
}

/// A segment of a parsed template.
#[derive(Debug, Clone, PartialEq)]
pub enum TemplateSegment {
    /// Literal text, emitted as-is.
    Literal(String),
    /// Variable interpolation of a dotted path: `{{ static.persona }}`.
    Var(String),
}

/// A parsed template — a sequence of segments.
#[derive(Debug, Clone, PartialEq)]
pub struct Template {
    pub segments: Vec<TemplateSegment>,
}

impl Template {
    /// Parse a template string into a sequence of segments.
    ///
    /// Syntax:
    /// - `{{ dotted.path }}` → `Var` (inner whitespace trimmed)
    /// - everything else → `Literal`
    ///
    /// Single braces and a stray `}}` pass through as literal text. An
    /// opening `{{` with no closing `}}` is a parse error, as is a
    /// variable path that is empty, contains whitespace or braces, or
    /// has an empty dotted segment.
    pub fn parse(input: &str) -> Result<Template, TemplateError> {
        let mut segments = Vec::new();
        let mut literal_buf = String::new();
        let chars: Vec<char> = input.chars().collect();
        let len = chars.len();
        let mut i = 0;

        while i < len {
            if chars[i] == '{' && i + 1 < len && chars[i + 1] == '{' {
                // Flush any accumulated literal
                if !literal_buf.is_empty() {
                    segments.push(TemplateSegment::Literal(literal_buf.clone()));
                    literal_buf.clear();
                }

                // Find the closing delimiter
                let start = i + 2;
                let mut end = start;
                while end + 1 < len && !(chars[end] == '}' && chars[end + 1] == '}') {
                    end += 1;
                }
                if end + 1 >= len {
                    return Err(TemplateError::Parse("unclosed '{{'".to_string()));
                }

                let raw: String = chars[start..end].iter().collect();
                let path = raw.trim();
                validate_path(path)?;
                segments.push(TemplateSegment::Var(path.to_string()));
                i = end + 2;
            } else {
                literal_buf.push(chars[i]);
                i += 1;
            }
        }

        if !literal_buf.is_empty() {
            segments.push(TemplateSegment::Literal(literal_buf));
        }

        Ok(Template { segments })
    }

    /// Render this template against a context.
    ///
    /// String values are emitted raw; any other JSON value is emitted
    /// in its compact JSON form. A path with no binding in the context
    /// fails with `UnboundPath` naming the path; it is never silently
    /// replaced by empty text or echoed back.
    pub fn render(&self, ctx: &RenderContext<'_>) -> Result<String, TemplateError> {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                TemplateSegment::Literal(text) => out.push_str(text),
                TemplateSegment::Var(path) => {
                    let value = ctx
                        .resolve(path)
                        .ok_or_else(|| TemplateError::UnboundPath(path.clone()))?;
                    match value {
                        Value::String(text) => out.push_str(text),
                        other => out.push_str(&other.to_string()),
                    }
                }
            }
        }
        Ok(out)
    }

    /// The paths referenced by this template, in order of appearance.
    pub fn variables(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|segment| match segment {
            TemplateSegment::Var(path) => Some(path.as_str()),
            TemplateSegment::Literal(_) => None,
        })
    }
}

fn validate_path(path: &str) -> Result<(), TemplateError> {
    if path.is_empty() {
        return Err(TemplateError::Parse("empty variable reference".to_string()));
    }
    if path.chars().any(char::is_whitespace) {
        return Err(TemplateError::Parse(format!(
            "variable path '{}' contains whitespace",
            path
        )));
    }
    if path.contains('{') || path.contains('}') {
        return Err(TemplateError::Parse(format!(
            "variable path '{}' contains braces",
            path
        )));
    }
    if path.split('.').any(str::is_empty) {
        return Err(TemplateError::Parse(format!(
            "variable path '{}' has an empty segment",
            path
        )));
    }
    Ok(())
}
