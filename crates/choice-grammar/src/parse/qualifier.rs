//! Bracketed qualifier invocations.

use super::{ChoiceParser, Mode, Scope};
use crate::errors::SyntaxError;
use crate::tree::QualifierNode;

impl<'a> ChoiceParser<'a> {
    /// Parse `Name[body]`; `item` is the text as written, `text` the same
    /// without any leading `!`.
    pub(super) fn qualifier(
        &self,
        item: &str,
        negated: bool,
        text: &str,
        scope: Scope<'a>,
        mode: Mode,
    ) -> Result<QualifierNode, SyntaxError> {
        let Some(open) = text.find('[') else {
            return Err(SyntaxError::UnknownQualifier(text.to_string()));
        };
        let name = text.get(..open).unwrap_or_default();
        if !self.config.policy.allows_qualifier {
            return Err(SyntaxError::QualifierForbidden(name.to_string()));
        }
        let Some(spec) = self.config.qualifiers.get(name) else {
            return Err(SyntaxError::UnknownQualifier(name.to_string()));
        };
        let Some(close) = matching_close(text, open) else {
            return Err(SyntaxError::UnbalancedBrackets {
                text: item.to_string(),
                position: open + usize::from(negated),
            });
        };
        let trailing = text.get(close + 1..).unwrap_or_default();
        if !trailing.is_empty() {
            return Err(SyntaxError::DanglingText {
                name: name.to_string(),
                trailing: trailing.to_string(),
            });
        }
        let interior = text.get(open + 1..close).unwrap_or_default();
        if interior.is_empty() {
            return Err(SyntaxError::EmptyQualifierBody(name.to_string()));
        }
        let body = self.expression(interior, scope.for_qualifier(spec)?, mode)?;
        if negated && !spec.allow_negation {
            return Err(SyntaxError::NegationForbidden(name.to_string()));
        }
        Ok(QualifierNode::new(name, negated, Some(body)))
    }
}

/// Byte offset of the `]` closing the `[` at `open`.
fn matching_close(text: &str, open: usize) -> Option<usize> {
    let mut depth = 0_usize;
    for (index, ch) in text.get(open..)?.char_indices() {
        match ch {
            '[' => depth += 1,
            ']' => {
                depth = depth.checked_sub(1)?;
                if depth == 0 {
                    return Some(open + index);
                }
            }
            _ => {}
        }
    }
    None
}
