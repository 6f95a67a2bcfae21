//! In-memory reference registry for one loading context.

use hashbrown::{HashMap, HashSet};

use crate::validate::ReferenceOracle;

/// Objects known to a loading context, grouped by class.
///
/// Each context owns its own registry, so objects constructed in one context
/// are never visible from another.
///
/// # Examples
///
/// ```
/// use choice_grammar::{ReferenceOracle, ReferenceRegistry};
///
/// let mut registry = ReferenceRegistry::new();
/// registry.construct("WeaponProf", "Longsword");
/// assert!(registry.exists("WeaponProf", "Longsword"));
/// assert!(!registry.exists("Skill", "Longsword"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReferenceRegistry {
    classes: HashMap<String, HashSet<String>>,
}

impl ReferenceRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that an object called `name` of `class` now exists.
    ///
    /// Returns `false` when it was already recorded.
    pub fn construct(&mut self, class: impl Into<String>, name: impl Into<String>) -> bool {
        self.classes
            .entry(class.into())
            .or_default()
            .insert(name.into())
    }

    /// Number of objects of `class`.
    #[must_use]
    pub fn count(&self, class: &str) -> usize {
        self.classes.get(class).map_or(0, HashSet::len)
    }

    /// Total number of objects across all classes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.classes.values().map(HashSet::len).sum()
    }

    /// Whether no object has been constructed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ReferenceOracle for ReferenceRegistry {
    fn exists(&self, class: &str, name: &str) -> bool {
        self.classes
            .get(class)
            .is_some_and(|names| names.contains(name))
    }
}
