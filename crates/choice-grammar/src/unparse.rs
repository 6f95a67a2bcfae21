//! Canonical text form of a parsed tree.
//!
//! Every node implements [`fmt::Display`]; printing a tree built by the
//! parser yields text that parses back into an equal tree. `TYPE.` prefixes
//! are normalised to `TYPE=`.

use std::fmt;

use crate::choice_set::ChoiceSet;
use crate::errors::UnparseError;
use crate::grouping::GroupingNode;
use crate::tree::{Primitive, QualifierNode, Reference, Term, TypeFilter};

fn negation(negated: bool) -> &'static str {
    if negated { "!" } else { "" }
}

impl fmt::Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl fmt::Display for TypeFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}TYPE={}", negation(self.is_negated()), self.types().join("."))
    }
}

impl fmt::Display for QualifierNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", negation(self.is_negated()), self.name())?;
        if let Some(body) = self.body() {
            write!(f, "[{body}]")?;
        }
        Ok(())
    }
}

impl fmt::Display for Primitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Reference(reference) => fmt::Display::fmt(reference, f),
            Self::TypeFilter(filter) => fmt::Display::fmt(filter, f),
            Self::All => f.write_str("ALL"),
            Self::Qualifier(qualifier) => fmt::Display::fmt(qualifier, f),
        }
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Primitive(primitive) => fmt::Display::fmt(primitive, f),
            Self::Group(group) => fmt::Display::fmt(group, f),
        }
    }
}

impl fmt::Display for GroupingNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let separator = self.operator().separator();
        for (index, term) in self.terms().iter().enumerate() {
            if index > 0 {
                write!(f, "{separator}")?;
            }
            fmt::Display::fmt(term, f)?;
        }
        Ok(())
    }
}

/// `SubToken|expression`, regardless of grouping validity.
impl fmt::Display for ChoiceSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}|{}", self.sub_token(), self.root())
    }
}

impl ChoiceSet {
    /// Canonical text for a tree whose grouping state is valid.
    ///
    /// # Errors
    ///
    /// Returns [`UnparseError::InvalidGrouping`] when the tree was assembled
    /// leniently and combines `ALL` with other choices or uses a forbidden
    /// type filter.
    ///
    /// # Examples
    ///
    /// ```
    /// use choice_grammar::{ChoiceConfig, ChoiceParser, ChoiceSet};
    ///
    /// let config = ChoiceConfig::new("SUB", "WeaponProf");
    /// let parser = ChoiceParser::new(&config);
    /// let choice = parser.parse("SUB|TestWP1|TYPE.Foo").expect("valid expression");
    /// assert_eq!(choice.unparse().as_deref(), Ok("SUB|TestWP1|TYPE=Foo"));
    ///
    /// let broken = ChoiceSet::new("SUB", "SUB", parser.grouping("ALL|TestWP1").expect("well-formed"));
    /// assert!(broken.unparse().is_err());
    /// ```
    pub fn unparse(&self) -> Result<String, UnparseError> {
        if !self.root().state().is_valid() {
            return Err(UnparseError::InvalidGrouping(self.to_string()));
        }
        Ok(self.to_string())
    }
}
