//! Classification of a single comma-free item.

use super::type_filter::{parse_type_filter, strip_type_prefix};
use super::{ChoiceParser, Mode, Scope};
use crate::config::BodyRule;
use crate::errors::SyntaxError;
use crate::tree::{Primitive, QualifierNode, Reference};

const ALL: &str = "ALL";

impl<'a> ChoiceParser<'a> {
    /// Parse one item into a primitive.
    ///
    /// The order of checks matters: `ALL` first, then type filters, then
    /// bracketed qualifiers, then bare optional-body qualifiers. Whatever is
    /// left is a reference.
    pub(super) fn primitive(
        &self,
        item: &str,
        scope: Scope<'a>,
        mode: Mode,
    ) -> Result<Primitive, SyntaxError> {
        if item == ALL {
            return Ok(Primitive::All);
        }
        let (negated, body) = item
            .strip_prefix('!')
            .map_or((false, item), |rest| (true, rest));
        if let Some(list) = strip_type_prefix(body) {
            return parse_type_filter(item, negated, list).map(Primitive::TypeFilter);
        }
        if body.contains('[') {
            return self
                .qualifier(item, negated, body, scope, mode)
                .map(Primitive::Qualifier);
        }
        if let Some(node) = self.bare_qualifier(negated, body)? {
            return Ok(Primitive::Qualifier(node));
        }
        if negated {
            return Err(SyntaxError::NegatedReference(item.to_string()));
        }
        self.reference(body, scope).map(Primitive::Reference)
    }

    fn bare_qualifier(
        &self,
        negated: bool,
        name: &str,
    ) -> Result<Option<QualifierNode>, SyntaxError> {
        if !self.config.policy.allows_qualifier {
            return Ok(None);
        }
        let Some(spec) = self.config.qualifiers.get(name) else {
            return Ok(None);
        };
        if spec.body != BodyRule::Optional {
            return Ok(None);
        }
        if negated && !spec.allow_negation {
            return Err(SyntaxError::NegationForbidden(name.to_string()));
        }
        Ok(Some(QualifierNode::new(name, negated, None)))
    }

    fn reference(&self, name: &str, scope: Scope<'_>) -> Result<Reference, SyntaxError> {
        if self.config.policy.requires_literal {
            let known = self
                .references
                .is_some_and(|references| references.exists(scope.class, name));
            if !known {
                return Err(SyntaxError::UnresolvedLiteral {
                    class: scope.class.to_string(),
                    name: name.to_string(),
                });
            }
        }
        Ok(Reference::new(scope.class, name))
    }
}
