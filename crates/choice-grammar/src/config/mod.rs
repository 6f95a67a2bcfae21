//! Policy and configuration threaded into the parser.
//!
//! Nothing here is global: the collaborator builds a [`ChoiceConfig`] and hands
//! it to [`crate::ChoiceParser`] or [`crate::ChooseToken`]. Two tokens with
//! different configurations never observe each other.

mod qualifiers;

pub use qualifiers::{BodyRule, QualifierRegistry, QualifierSpec};

#[cfg(feature = "diagnostics")]
use serde::{Deserialize, Serialize};

/// Grammar features the collaborator permits at the top level of an
/// expression.
///
/// # Examples
///
/// ```
/// use choice_grammar::ChoicePolicy;
///
/// let policy = ChoicePolicy::default().with_type_legal(false);
/// assert!(!policy.type_legal);
/// assert!(policy.all_legal);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "diagnostics", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "diagnostics", serde(default))]
pub struct ChoicePolicy {
    /// `TYPE=` filters are accepted.
    pub type_legal: bool,
    /// The `ALL` wildcard is accepted.
    pub all_legal: bool,
    /// Bracketed qualifier forms are accepted at all.
    pub allows_qualifier: bool,
    /// References must resolve while parsing instead of being deferred to
    /// validation.
    pub requires_literal: bool,
}

impl Default for ChoicePolicy {
    fn default() -> Self {
        Self {
            type_legal: true,
            all_legal: true,
            allows_qualifier: true,
            requires_literal: false,
        }
    }
}

impl ChoicePolicy {
    /// Toggle acceptance of type filters.
    #[must_use]
    pub const fn with_type_legal(mut self, legal: bool) -> Self {
        self.type_legal = legal;
        self
    }

    /// Toggle acceptance of the `ALL` wildcard.
    #[must_use]
    pub const fn with_all_legal(mut self, legal: bool) -> Self {
        self.all_legal = legal;
        self
    }

    /// Toggle acceptance of bracketed qualifiers.
    #[must_use]
    pub const fn with_qualifiers(mut self, allowed: bool) -> Self {
        self.allows_qualifier = allowed;
        self
    }

    /// Toggle parse-time resolution of references.
    #[must_use]
    pub const fn with_requires_literal(mut self, required: bool) -> Self {
        self.requires_literal = required;
        self
    }
}

/// Everything a choose token needs to parse one sub-token's expressions.
///
/// # Examples
///
/// ```
/// use choice_grammar::{ChoiceConfig, QualifierRegistry, QualifierSpec};
///
/// let mut qualifiers = QualifierRegistry::new();
/// qualifiers.register(QualifierSpec::new("QUALIFIED")).expect("valid name");
/// let config = ChoiceConfig::new("WEAPONPROFICIENCY", "WeaponProf")
///     .with_title("Weapon Proficiency choice")
///     .with_qualifiers(qualifiers);
/// assert_eq!(config.title, "Weapon Proficiency choice");
/// assert!(config.qualifiers.get("QUALIFIED").is_some());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "diagnostics", derive(Serialize, Deserialize))]
pub struct ChoiceConfig {
    /// Sub-token name every accepted value must start with.
    pub sub_token: String,
    /// Title stored on every built choice set.
    pub title: String,
    /// Object class top-level references resolve against.
    pub target_class: String,
    /// Top-level grammar policy.
    #[cfg_attr(feature = "diagnostics", serde(default))]
    pub policy: ChoicePolicy,
    /// Recognised qualifier names and their descriptors.
    #[cfg_attr(feature = "diagnostics", serde(default))]
    pub qualifiers: QualifierRegistry,
}

impl ChoiceConfig {
    /// Create a configuration with the default policy and no qualifiers. The
    /// title defaults to the sub-token name.
    #[must_use]
    pub fn new(sub_token: impl Into<String>, target_class: impl Into<String>) -> Self {
        let sub_token = sub_token.into();
        Self {
            title: sub_token.clone(),
            sub_token,
            target_class: target_class.into(),
            policy: ChoicePolicy::default(),
            qualifiers: QualifierRegistry::new(),
        }
    }

    /// Replace the title stored on built choice sets.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Replace the top-level policy.
    #[must_use]
    pub fn with_policy(mut self, policy: ChoicePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Replace the qualifier registry.
    #[must_use]
    pub fn with_qualifiers(mut self, qualifiers: QualifierRegistry) -> Self {
        self.qualifiers = qualifiers;
        self
    }
}
