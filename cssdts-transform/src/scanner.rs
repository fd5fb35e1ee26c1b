//! Structural scan of stylesheet text.
//!
//! Splits the source into block preludes (text before `{`) and declarations
//! (text before `;` or `}`), with comments and string literals removed. This
//! is not a CSS parser: it only tracks enough structure to tell selectors
//! apart from property values.

use crate::error::TransformError;

/// One structural piece of the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Segment {
    /// Selector or at-rule text that opens a block.
    Prelude(String),
    /// `name: value` text inside a block.
    Declaration { text: String, in_export: bool },
}

struct OpenBlock {
    line: usize,
    is_export: bool,
}

pub(crate) fn scan(source: &str) -> Result<Vec<Segment>, TransformError> {
    let mut segments = Vec::new();
    let mut stack: Vec<OpenBlock> = Vec::new();
    let mut buf = String::new();
    let mut paren_depth = 0usize;
    let mut line = 1usize;

    let mut chars = source.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\n' => {
                line += 1;
                buf.push(c);
            }
            '/' if chars.peek() == Some(&'*') => {
                chars.next();
                let opened_at = line;
                let mut closed = false;
                while let Some(inner) = chars.next() {
                    if inner == '\n' {
                        line += 1;
                    } else if inner == '*' && chars.peek() == Some(&'/') {
                        chars.next();
                        closed = true;
                        break;
                    }
                }
                if !closed {
                    return Err(TransformError::UnterminatedComment { line: opened_at });
                }
                buf.push(' ');
            }
            '"' | '\'' => {
                let opened_at = line;
                let mut closed = false;
                while let Some(inner) = chars.next() {
                    match inner {
                        '\\' => {
                            if chars.next() == Some('\n') {
                                line += 1;
                            }
                        }
                        '\n' => return Err(TransformError::UnterminatedString { line: opened_at }),
                        q if q == c => {
                            closed = true;
                            break;
                        }
                        _ => {}
                    }
                }
                if !closed {
                    return Err(TransformError::UnterminatedString { line: opened_at });
                }
                // Keep a placeholder so `[attr="x"]` stays one token.
                buf.push_str("\"\"");
            }
            '(' => {
                paren_depth += 1;
                buf.push(c);
            }
            ')' => {
                paren_depth = paren_depth.saturating_sub(1);
                buf.push(c);
            }
            '{' if paren_depth == 0 => {
                let prelude = buf.trim().to_string();
                let is_export = prelude == ":export";
                segments.push(Segment::Prelude(prelude));
                stack.push(OpenBlock { line, is_export });
                buf.clear();
            }
            ';' if paren_depth == 0 => {
                push_declaration(&mut segments, &stack, &buf);
                buf.clear();
            }
            '}' if paren_depth == 0 => {
                push_declaration(&mut segments, &stack, &buf);
                buf.clear();
                if stack.pop().is_none() {
                    return Err(TransformError::UnexpectedCloseBrace { line });
                }
            }
            _ => buf.push(c),
        }
    }

    if let Some(open) = stack.first() {
        return Err(TransformError::UnclosedBlock { line: open.line });
    }
    Ok(segments)
}

fn push_declaration(segments: &mut Vec<Segment>, stack: &[OpenBlock], buf: &str) {
    let text = buf.trim();
    if text.is_empty() {
        return;
    }
    segments.push(Segment::Declaration {
        text: text.to_string(),
        in_export: stack.last().map(|b| b.is_export).unwrap_or(false),
    });
}
