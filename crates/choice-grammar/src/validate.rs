//! Deferred reference resolution.
//!
//! Parsing never looks references up (unless the policy requires literal
//! resolution); objects may be defined after the expression that names them.
//! Once loading has finished, the collaborator validates each stored choice
//! set against whatever now exists.

use std::fmt;

use crate::choice_set::ChoiceSet;
use crate::tree::Reference;

/// Answers whether an object of a class exists under a name.
///
/// Implemented for [`crate::ReferenceRegistry`] and for any
/// `Fn(&str, &str) -> bool` taking class then name.
///
/// # Examples
///
/// ```
/// use choice_grammar::ReferenceOracle;
///
/// let only_longsword = |_: &str, name: &str| name == "Longsword";
/// assert!(only_longsword.exists("WeaponProf", "Longsword"));
/// assert!(!only_longsword.exists("WeaponProf", "Dagger"));
/// ```
pub trait ReferenceOracle {
    /// Whether `name` denotes an existing object of `class`.
    fn exists(&self, class: &str, name: &str) -> bool;
}

impl<F> ReferenceOracle for F
where
    F: Fn(&str, &str) -> bool,
{
    fn exists(&self, class: &str, name: &str) -> bool {
        self(class, name)
    }
}

/// References that failed to resolve.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    unresolved: Vec<Reference>,
}

impl ValidationReport {
    /// Whether every reference resolved.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.unresolved.is_empty()
    }

    /// Unresolved references in the order written.
    #[must_use]
    pub fn unresolved(&self) -> &[Reference] {
        &self.unresolved
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for reference in &self.unresolved {
            if !first {
                f.write_str(", ")?;
            }
            first = false;
            write!(f, "{}:{}", reference.class(), reference.name())?;
        }
        Ok(())
    }
}

impl ChoiceSet {
    /// Whether every reference in the tree resolves.
    ///
    /// Stops at the first reference the oracle does not know.
    #[must_use]
    pub fn validate(&self, references: &dyn ReferenceOracle) -> bool {
        self.references()
            .into_iter()
            .all(|reference| references.exists(reference.class(), reference.name()))
    }

    /// Resolve every reference and report the ones that failed.
    #[must_use]
    pub fn unresolved(&self, references: &dyn ReferenceOracle) -> ValidationReport {
        let unresolved = self
            .references()
            .into_iter()
            .filter(|reference| !references.exists(reference.class(), reference.name()))
            .cloned()
            .collect();
        ValidationReport { unresolved }
    }
}
