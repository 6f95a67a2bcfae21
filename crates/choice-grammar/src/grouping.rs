//! AND/OR grouping nodes and the legality state derived for them.
//!
//! A node's [`GroupingState`] is computed once, when the node is assembled
//! from already-built terms, and never changes. The strict builder used by
//! [`crate::ChoiceParser::parse`] turns an invalid state into a
//! [`SyntaxError`]; the lenient builder keeps the node so its state can be
//! inspected.

use crate::errors::SyntaxError;
use crate::tree::{Primitive, Term};

#[cfg(feature = "diagnostics")]
use serde::Serialize;

/// How the terms of a node combine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "diagnostics", derive(Serialize))]
#[cfg_attr(feature = "diagnostics", serde(rename_all = "snake_case"))]
pub enum Operator {
    /// Every term must hold; written with `,`.
    And,
    /// Any term may hold; written with `|`.
    Or,
}

impl Operator {
    /// Separator character the operator is written with.
    ///
    /// # Examples
    ///
    /// ```
    /// use choice_grammar::Operator;
    ///
    /// assert_eq!(Operator::And.separator(), ',');
    /// assert_eq!(Operator::Or.separator(), '|');
    /// ```
    #[must_use]
    pub const fn separator(self) -> char {
        match self {
            Self::And => ',',
            Self::Or => '|',
        }
    }
}

/// Derived legality flags for one grouping node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "diagnostics", derive(Serialize))]
pub struct GroupingState {
    allows_all: bool,
    allows_type: bool,
    allows_list: bool,
    is_valid: bool,
}

impl GroupingState {
    /// The node is exactly the `ALL` wildcard in a scope permitting it.
    #[must_use]
    pub const fn allows_all(self) -> bool {
        self.allows_all
    }

    /// Every type filter in the node is permitted by its scope.
    #[must_use]
    pub const fn allows_type(self) -> bool {
        self.allows_type
    }

    /// The node holds no `ALL`, so it is a plain list of selections.
    #[must_use]
    pub const fn allows_list(self) -> bool {
        self.allows_list
    }

    /// The node and everything beneath it can be used as written.
    #[must_use]
    pub const fn is_valid(self) -> bool {
        self.is_valid
    }
}

/// A combination of terms under one operator.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "diagnostics", derive(Serialize))]
pub struct GroupingNode {
    operator: Operator,
    terms: Vec<Term>,
    state: GroupingState,
}

impl GroupingNode {
    /// Operator joining the terms.
    #[must_use]
    pub fn operator(&self) -> Operator {
        self.operator
    }

    /// Terms in the order they were written.
    #[must_use]
    pub fn terms(&self) -> &[Term] {
        &self.terms
    }

    /// Legality state computed when the node was built.
    #[must_use]
    pub fn state(&self) -> GroupingState {
        self.state
    }
}

/// Scope-dependent permissions the builder checks terms against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct GroupingRules {
    pub(crate) all_legal: bool,
    pub(crate) type_legal: bool,
}

/// Assemble a node and report the first rule it breaks, if any.
///
/// Nested groups and qualifier bodies must already be built; their states
/// are folded into the new node's state.
pub(crate) fn assemble(
    operator: Operator,
    terms: Vec<Term>,
    rules: GroupingRules,
) -> (GroupingNode, Option<SyntaxError>) {
    let mut has_all = false;
    let mut forbidden_type = None;
    let mut nested_types_ok = true;
    let mut nested_valid = true;

    for term in &terms {
        match term {
            Term::Primitive(Primitive::All) => has_all = true,
            Term::Primitive(Primitive::TypeFilter(filter)) => {
                if !rules.type_legal && forbidden_type.is_none() {
                    forbidden_type = Some(filter.to_string());
                }
            }
            Term::Primitive(Primitive::Qualifier(qualifier)) => {
                if let Some(body) = qualifier.body() {
                    nested_valid &= body.state.is_valid;
                }
            }
            Term::Primitive(Primitive::Reference(_)) => {}
            Term::Group(group) => {
                has_all |= !group.state.allows_list;
                nested_types_ok &= group.state.allows_type;
                nested_valid &= group.state.is_valid;
            }
        }
    }

    let sole_all = matches!(terms.as_slice(), [Term::Primitive(Primitive::All)]);
    let allows_all = sole_all && rules.all_legal;
    let allows_type = forbidden_type.is_none() && nested_types_ok;
    let allows_list = !has_all;
    let is_valid = nested_valid && allows_type && (allows_list || allows_all);

    let violation = if has_all && !sole_all {
        Some(SyntaxError::AllCombined)
    } else if sole_all && !rules.all_legal {
        Some(SyntaxError::AllForbidden)
    } else {
        forbidden_type.map(SyntaxError::TypeForbidden)
    };

    let node = GroupingNode {
        operator,
        terms,
        state: GroupingState {
            allows_all,
            allows_type,
            allows_list,
            is_valid,
        },
    };
    (node, violation)
}
