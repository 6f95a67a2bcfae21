//! Bracket-aware splitting of an expression into top-level segments.

use crate::errors::{SyntaxError, separator_error};

/// Split `text` on `separator` wherever it is not enclosed in `[...]`.
///
/// Rejects leading, trailing and consecutive separators, and any bracket
/// without its partner. Either every segment is returned or none is.
pub(crate) fn split_top_level(text: &str, separator: char) -> Result<Vec<&str>, SyntaxError> {
    if text.is_empty() {
        return Err(separator_error("empty expression", separator, 0));
    }

    let mut segments = Vec::new();
    let mut open_brackets = Vec::new();
    let mut start = 0;

    for (index, ch) in text.char_indices() {
        match ch {
            '[' => open_brackets.push(index),
            ']' => {
                if open_brackets.pop().is_none() {
                    return Err(unbalanced(text, index));
                }
            }
            c if c == separator && open_brackets.is_empty() => {
                if index == start {
                    let message = if start == 0 {
                        "leading separator"
                    } else {
                        "consecutive separators"
                    };
                    return Err(separator_error(message, separator, index));
                }
                segments.push(text.get(start..index).unwrap_or_default());
                start = index + c.len_utf8();
            }
            _ => {}
        }
    }

    if let Some(&position) = open_brackets.first() {
        return Err(unbalanced(text, position));
    }
    if start == text.len() {
        let position = text.len().saturating_sub(separator.len_utf8());
        return Err(separator_error("trailing separator", separator, position));
    }
    segments.push(text.get(start..).unwrap_or_default());
    Ok(segments)
}

fn unbalanced(text: &str, position: usize) -> SyntaxError {
    SyntaxError::UnbalancedBrackets {
        text: text.to_string(),
        position,
    }
}
