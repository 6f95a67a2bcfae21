//! Recursive parser from choice-value text to a [`ChoiceSet`].
//!
//! # Grammar
//!
//! ```text
//! value       ::= subToken '|' expr
//! expr        ::= andGroup ( '|' andGroup )*
//! andGroup    ::= primitive ( ',' primitive )*
//! primitive   ::= "ALL" | typeFilter | qualifier | referenceName
//! typeFilter  ::= ['!'] "TYPE" ('=' | '.') typeName ('.' typeName)*
//! qualifier   ::= ['!'] qualifierName [ '[' expr ']' ]
//! ```
//!
//! `,` binds tighter than `|` at every level. The expression is split on `|`
//! first, each segment on `,`, and every item is handed to the primitive
//! parser, which recurses into qualifier bodies. Nothing outside the parser is
//! touched until the whole tree is built, so a rejection anywhere (however
//! deeply nested) leaves the caller's state exactly as it was.
//!
//! Recursion follows bracket nesting and stops at [`MAX_NESTING`] levels of
//! qualifier bodies. Each level rescans its own interior, so parsing costs
//! at most `O(len * MAX_NESTING)`.
//!
//! # Example
//!
//! ```
//! use choice_grammar::{ChoiceConfig, ChoiceParser, QualifierRegistry, QualifierSpec};
//!
//! let qualifiers = QualifierRegistry::new()
//!     .with(QualifierSpec::new("QUALIFIED"))
//!     .expect("valid qualifier");
//! let config = ChoiceConfig::new("WEAPONPROFS", "WeaponProf").with_qualifiers(qualifiers);
//! let parser = ChoiceParser::new(&config);
//!
//! let choice = parser.parse("WEAPONPROFS|Longsword|QUALIFIED[TYPE=Martial,!TYPE=Exotic]")
//!     .expect("valid expression");
//! assert_eq!(choice.root().terms().len(), 2);
//! assert!(parser.parse("WEAPONPROFS|ALL|Longsword").is_err());
//! ```

mod primitive;
mod qualifier;
mod type_filter;

#[cfg(test)]
mod tests;

use crate::choice_set::ChoiceSet;
use crate::config::{ChoiceConfig, QualifierSpec};
use crate::errors::SyntaxError;
use crate::grouping::{GroupingNode, GroupingRules, Operator, assemble};
use crate::split::split_top_level;
use crate::tree::Term;
use crate::validate::ReferenceOracle;

/// Deepest nesting of qualifier bodies the parser accepts.
///
/// `Q[Q[X]]` nests two levels. Anything deeper is rejected with
/// [`SyntaxError::NestingTooDeep`] before the parser recurses into it.
pub const MAX_NESTING: usize = 64;

/// How grouping violations are treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    /// Reject the expression.
    Strict,
    /// Keep the node and record the violation in its state.
    Lenient,
}

/// Permissions in force at one nesting level.
#[derive(Debug, Clone, Copy)]
struct Scope<'s> {
    class: &'s str,
    rules: GroupingRules,
    /// Qualifier bodies enclosing this level.
    depth: usize,
}

impl<'s> Scope<'s> {
    fn for_qualifier(self, spec: &'s QualifierSpec) -> Result<Self, SyntaxError> {
        if self.depth >= MAX_NESTING {
            return Err(SyntaxError::NestingTooDeep { limit: MAX_NESTING });
        }
        Ok(Self {
            class: spec.target_class.as_deref().unwrap_or(self.class),
            rules: GroupingRules {
                all_legal: spec.all_legal,
                type_legal: spec.type_legal,
            },
            depth: self.depth + 1,
        })
    }
}

/// Parser bound to one configuration.
///
/// The parser holds no state of its own between calls; parsing the same text
/// with equal configurations always yields equal trees.
pub struct ChoiceParser<'a> {
    config: &'a ChoiceConfig,
    references: Option<&'a dyn ReferenceOracle>,
}

impl<'a> ChoiceParser<'a> {
    /// Create a parser for `config`.
    #[must_use]
    pub fn new(config: &'a ChoiceConfig) -> Self {
        Self {
            config,
            references: None,
        }
    }

    /// Supply the oracle consulted when the policy requires references to
    /// resolve at parse time. Without one, every reference is unresolved under
    /// such a policy.
    #[must_use]
    pub fn with_references(mut self, references: &'a dyn ReferenceOracle) -> Self {
        self.references = Some(references);
        self
    }

    /// Parse a full `"<SubToken>|<expression>"` value.
    ///
    /// # Errors
    ///
    /// Returns [`SyntaxError`] when the value is malformed, uses a grammar
    /// form the policy forbids, or combines `ALL` with anything else.
    pub fn parse(&self, value: &str) -> Result<ChoiceSet, SyntaxError> {
        let result = self.parse_value(value);
        match &result {
            Ok(_) => log::trace!("parsed choice value `{value}`"),
            Err(err) => log::debug!("rejected choice value `{value}`: {err}"),
        }
        result
    }

    /// Parse an expression without the sub-token prefix.
    ///
    /// # Errors
    ///
    /// As for [`Self::parse`].
    pub fn parse_expression(&self, expression: &str) -> Result<GroupingNode, SyntaxError> {
        self.expression(expression, self.top_scope(), Mode::Strict)
    }

    /// Parse an expression, keeping grouping violations in the returned
    /// node's [`crate::GroupingState`] instead of rejecting them.
    ///
    /// Malformed text is still rejected; only `ALL` and type-filter legality
    /// is deferred to the state.
    ///
    /// # Errors
    ///
    /// Returns [`SyntaxError`] for malformed text.
    ///
    /// # Examples
    ///
    /// ```
    /// use choice_grammar::{ChoiceConfig, ChoiceParser};
    ///
    /// let config = ChoiceConfig::new("SKILL", "Skill");
    /// let parser = ChoiceParser::new(&config);
    /// let node = parser.grouping("ALL|Climb").expect("well-formed text");
    /// assert!(!node.state().is_valid());
    /// ```
    pub fn grouping(&self, expression: &str) -> Result<GroupingNode, SyntaxError> {
        self.expression(expression, self.top_scope(), Mode::Lenient)
    }

    fn parse_value(&self, value: &str) -> Result<ChoiceSet, SyntaxError> {
        if value.is_empty() {
            return Err(SyntaxError::EmptyInput);
        }
        let Some((sub_token, expression)) = value.split_once('|') else {
            return Err(SyntaxError::MissingExpression(value.to_string()));
        };
        if sub_token != self.config.sub_token {
            return Err(SyntaxError::UnknownSubToken {
                expected: self.config.sub_token.clone(),
                found: sub_token.to_string(),
            });
        }
        if expression.is_empty() {
            return Err(SyntaxError::MissingExpression(value.to_string()));
        }
        let root = self.parse_expression(expression)?;
        Ok(ChoiceSet::new(
            self.config.sub_token.clone(),
            self.config.title.clone(),
            root,
        ))
    }

    fn top_scope(&self) -> Scope<'a> {
        Scope {
            class: &self.config.target_class,
            rules: GroupingRules {
                all_legal: self.config.policy.all_legal,
                type_legal: self.config.policy.type_legal,
            },
            depth: 0,
        }
    }

    fn expression(
        &self,
        text: &str,
        scope: Scope<'a>,
        mode: Mode,
    ) -> Result<GroupingNode, SyntaxError> {
        let mut terms = Vec::new();
        for segment in split_top_level(text, Operator::Or.separator())? {
            let items = split_top_level(segment, Operator::And.separator())?;
            let primitives = items
                .into_iter()
                .map(|item| self.primitive(item, scope, mode).map(Term::Primitive))
                .collect::<Result<Vec<_>, _>>()?;
            let term = match <[Term; 1]>::try_from(primitives) {
                Ok([only]) => only,
                Err(primitives) => {
                    Term::Group(Self::group(Operator::And, primitives, scope, mode)?)
                }
            };
            terms.push(term);
        }
        Self::group(Operator::Or, terms, scope, mode)
    }

    fn group(
        operator: Operator,
        terms: Vec<Term>,
        scope: Scope<'_>,
        mode: Mode,
    ) -> Result<GroupingNode, SyntaxError> {
        let (node, violation) = assemble(operator, terms, scope.rules);
        match (mode, violation) {
            (Mode::Strict, Some(err)) => Err(err),
            _ => Ok(node),
        }
    }
}
