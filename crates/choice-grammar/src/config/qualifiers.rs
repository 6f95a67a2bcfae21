//! Explicit qualifier registry: qualifier name to capability descriptor.

use std::sync::LazyLock;

use hashbrown::HashMap;
use regex::Regex;

use crate::errors::RegistryError;

#[cfg(feature = "diagnostics")]
use serde::{Deserialize, Serialize};

static QUALIFIER_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z][A-Za-z0-9_]*$")
        .unwrap_or_else(|e| panic!("qualifier name regex should compile: {e}"))
});

const RESERVED_NAMES: [&str; 2] = ["ALL", "TYPE"];

/// Whether a qualifier must be written with a bracketed body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "diagnostics", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "diagnostics", serde(rename_all = "snake_case"))]
pub enum BodyRule {
    /// `Name[...]` only; a bare `Name` is an ordinary reference.
    #[default]
    Required,
    /// `Name` alone is also accepted and means the qualifier with no
    /// restriction.
    Optional,
}

#[cfg(feature = "diagnostics")]
const fn enabled() -> bool {
    true
}

/// Capability descriptor for one qualifier name.
///
/// # Examples
///
/// ```
/// use choice_grammar::{BodyRule, QualifierSpec};
///
/// let spec = QualifierSpec::new("ANY").with_optional_body().negatable();
/// assert_eq!(spec.body, BodyRule::Optional);
/// assert!(spec.allow_negation);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "diagnostics", derive(Serialize, Deserialize))]
pub struct QualifierSpec {
    /// Name written in front of the bracket.
    pub name: String,
    /// `!Name[...]` is accepted.
    #[cfg_attr(feature = "diagnostics", serde(default))]
    pub allow_negation: bool,
    /// Whether the bracketed body may be omitted.
    #[cfg_attr(feature = "diagnostics", serde(default))]
    pub body: BodyRule,
    /// `ALL` is accepted as the sole element of the body.
    #[cfg_attr(feature = "diagnostics", serde(default = "enabled"))]
    pub all_legal: bool,
    /// Type filters are accepted inside the body.
    #[cfg_attr(feature = "diagnostics", serde(default = "enabled"))]
    pub type_legal: bool,
    /// Object class references in the body resolve against. `None` keeps the
    /// enclosing class.
    #[cfg_attr(feature = "diagnostics", serde(default))]
    pub target_class: Option<String>,
}

impl QualifierSpec {
    /// A qualifier that requires a body, forbids negation and accepts both
    /// `ALL` and type filters inside its body.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            allow_negation: false,
            body: BodyRule::Required,
            all_legal: true,
            type_legal: true,
            target_class: None,
        }
    }

    /// Accept `!Name[...]`.
    #[must_use]
    pub fn negatable(mut self) -> Self {
        self.allow_negation = true;
        self
    }

    /// Accept the bare name without a body.
    #[must_use]
    pub fn with_optional_body(mut self) -> Self {
        self.body = BodyRule::Optional;
        self
    }

    /// Resolve references in the body against another object class.
    #[must_use]
    pub fn with_target_class(mut self, class: impl Into<String>) -> Self {
        self.target_class = Some(class.into());
        self
    }

    /// Reject type filters inside the body.
    #[must_use]
    pub fn without_type_filters(mut self) -> Self {
        self.type_legal = false;
        self
    }

    /// Reject `ALL` inside the body.
    #[must_use]
    pub fn without_all(mut self) -> Self {
        self.all_legal = false;
        self
    }
}

/// Qualifier names known to one configuration, in registration order.
///
/// # Examples
///
/// ```
/// use choice_grammar::{QualifierRegistry, QualifierSpec};
///
/// let mut registry = QualifierRegistry::new();
/// registry.register(QualifierSpec::new("PC").negatable()).expect("valid name");
/// assert!(registry.register(QualifierSpec::new("PC")).is_err());
/// assert!(registry.register(QualifierSpec::new("PC.QUALIFIED")).is_err());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "diagnostics", derive(Serialize, Deserialize))]
#[cfg_attr(
    feature = "diagnostics",
    serde(try_from = "Vec<QualifierSpec>", into = "Vec<QualifierSpec>")
)]
pub struct QualifierRegistry {
    specs: Vec<QualifierSpec>,
    by_name: HashMap<String, usize>,
}

impl QualifierRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a qualifier descriptor.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError`] when the name is not an identifier, is one of
    /// the reserved words `ALL` / `TYPE`, or is already registered.
    pub fn register(&mut self, spec: QualifierSpec) -> Result<(), RegistryError> {
        if !QUALIFIER_NAME.is_match(&spec.name) {
            return Err(RegistryError::InvalidName(spec.name));
        }
        if RESERVED_NAMES.contains(&spec.name.as_str()) {
            return Err(RegistryError::ReservedName(spec.name));
        }
        if self.by_name.contains_key(&spec.name) {
            return Err(RegistryError::Duplicate(spec.name));
        }
        self.by_name.insert(spec.name.clone(), self.specs.len());
        self.specs.push(spec);
        Ok(())
    }

    /// Builder form of [`Self::register`].
    ///
    /// # Errors
    ///
    /// See [`Self::register`].
    pub fn with(mut self, spec: QualifierSpec) -> Result<Self, RegistryError> {
        self.register(spec)?;
        Ok(self)
    }

    /// Look up a descriptor by qualifier name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&QualifierSpec> {
        self.by_name.get(name).and_then(|&index| self.specs.get(index))
    }

    /// Iterate descriptors in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &QualifierSpec> {
        self.specs.iter()
    }

    /// Number of registered qualifiers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.specs.len()
    }

    /// Whether no qualifier is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }
}

impl TryFrom<Vec<QualifierSpec>> for QualifierRegistry {
    type Error = RegistryError;

    fn try_from(specs: Vec<QualifierSpec>) -> Result<Self, Self::Error> {
        specs.into_iter().try_fold(Self::new(), Self::with)
    }
}

impl From<QualifierRegistry> for Vec<QualifierSpec> {
    fn from(registry: QualifierRegistry) -> Self {
        registry.specs
    }
}
