//! Parsed choice-expression tree: primitives and qualifier invocations.
//!
//! Every node exclusively owns its children. The tree is built once by the
//! parser and never mutated afterwards, so the only accessors are read-only.

use derive_more::Deref;

use crate::grouping::GroupingNode;

#[cfg(feature = "diagnostics")]
use serde::Serialize;

/// A named reference to an object of some class.
///
/// Existence is not checked when the reference is parsed; see
/// [`crate::ChoiceSet::validate`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "diagnostics", derive(Serialize))]
pub struct Reference {
    class: String,
    name: String,
}

impl Reference {
    /// Create a reference to `name` resolved against `class`.
    #[must_use]
    pub fn new(class: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            class: class.into(),
            name: name.into(),
        }
    }

    /// Object class the reference resolves against.
    #[must_use]
    pub fn class(&self) -> &str {
        &self.class
    }

    /// Reference name exactly as written.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Ordered set of type names: insertion order is kept, repeats are dropped.
///
/// # Examples
///
/// ```
/// use choice_grammar::TypeNames;
///
/// let names = TypeNames::from_names(["Martial", "Simple", "Martial"]);
/// assert_eq!(names.as_slice(), ["Martial", "Simple"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Deref)]
#[cfg_attr(feature = "diagnostics", derive(Serialize))]
pub struct TypeNames(Vec<String>);

impl TypeNames {
    /// Collect names, skipping any already present.
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut set = Vec::new();
        for name in names {
            let name = name.into();
            if !set.contains(&name) {
                set.push(name);
            }
        }
        Self(set)
    }
}

/// `TYPE=a.b.c` or its negation `!TYPE=a.b.c`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "diagnostics", derive(Serialize))]
pub struct TypeFilter {
    negated: bool,
    types: TypeNames,
}

impl TypeFilter {
    /// Create a filter over a non-empty set of type names.
    #[must_use]
    pub fn new(negated: bool, types: TypeNames) -> Self {
        Self { negated, types }
    }

    /// Whether the filter excludes the named types.
    #[must_use]
    pub fn is_negated(&self) -> bool {
        self.negated
    }

    /// Type names, all of which an object must carry to match.
    #[must_use]
    pub fn types(&self) -> &TypeNames {
        &self.types
    }
}

/// `Name[...]`, `!Name[...]`, or a bare `Name` for qualifiers whose body is
/// optional.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "diagnostics", derive(Serialize))]
pub struct QualifierNode {
    name: String,
    negated: bool,
    body: Option<GroupingNode>,
}

impl QualifierNode {
    /// Create a qualifier node.
    #[must_use]
    pub fn new(name: impl Into<String>, negated: bool, body: Option<GroupingNode>) -> Self {
        Self {
            name: name.into(),
            negated,
            body,
        }
    }

    /// Registered qualifier name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether the whole qualifier is negated.
    #[must_use]
    pub fn is_negated(&self) -> bool {
        self.negated
    }

    /// Bracketed body, absent for a bare optional-body qualifier.
    #[must_use]
    pub fn body(&self) -> Option<&GroupingNode> {
        self.body.as_ref()
    }
}

/// An atomic parsed unit.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "diagnostics", derive(Serialize))]
#[cfg_attr(feature = "diagnostics", serde(tag = "kind", rename_all = "snake_case"))]
pub enum Primitive {
    /// A named object.
    Reference(Reference),
    /// A positive or negative type filter.
    TypeFilter(TypeFilter),
    /// The `ALL` wildcard.
    All,
    /// A qualifier invocation.
    Qualifier(QualifierNode),
}

impl Primitive {
    /// Whether this is the `ALL` wildcard.
    #[must_use]
    pub fn is_all(&self) -> bool {
        matches!(self, Self::All)
    }
}

/// One member of a grouping node.
///
/// OR nodes hold AND groups as nested [`GroupingNode`]s; a single primitive
/// between two `|` separators is held directly.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "diagnostics", derive(Serialize))]
#[cfg_attr(feature = "diagnostics", serde(untagged))]
pub enum Term {
    /// A primitive.
    Primitive(Primitive),
    /// A nested group.
    Group(GroupingNode),
}

impl From<Primitive> for Term {
    fn from(primitive: Primitive) -> Self {
        Self::Primitive(primitive)
    }
}

impl From<GroupingNode> for Term {
    fn from(group: GroupingNode) -> Self {
        Self::Group(group)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn type_names_keep_first_occurrence_order() {
        let names = TypeNames::from_names(["TestType", "OtherTestType", "TestType"]);
        assert_eq!(names.len(), 2);
        assert_eq!(names.first().map(String::as_str), Some("TestType"));
    }

    #[test]
    fn references_compare_by_class_and_name() {
        assert_eq!(Reference::new("Skill", "Climb"), Reference::new("Skill", "Climb"));
        assert_ne!(Reference::new("Skill", "Climb"), Reference::new("Feat", "Climb"));
    }

    #[test]
    fn only_all_reports_wildcard() {
        assert!(Primitive::All.is_all());
        assert!(!Primitive::Reference(Reference::new("Skill", "ALL Skills")).is_all());
    }
}
