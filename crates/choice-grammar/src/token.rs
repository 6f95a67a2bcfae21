//! The choose token: parse into an owning object, unparse back out of it.

use crate::choice_set::ChoiceSet;
use crate::config::ChoiceConfig;
use crate::errors::{SyntaxError, UnparseError};
use crate::owner::{ObjectKey, ObjectRecord};
use crate::parse::ChoiceParser;
use crate::validate::ReferenceOracle;

/// Binds a [`ChoiceConfig`] to the owning-object store.
///
/// # Examples
///
/// ```
/// use choice_grammar::{ChoiceConfig, ChooseToken, ObjectRecord, ReferenceRegistry};
///
/// let token = ChooseToken::new(ChoiceConfig::new("WEAPONPROFICIENCY", "WeaponProf"));
/// let mut record = ObjectRecord::new("Fighter");
/// let references = ReferenceRegistry::new();
///
/// token
///     .parse(&mut record, &references, "WEAPONPROFICIENCY|Longsword|TYPE=Martial")
///     .expect("valid value");
/// assert_eq!(
///     token.unparse(&record).expect("stored choice set").as_deref(),
///     Some("WEAPONPROFICIENCY|Longsword|TYPE=Martial")
/// );
///
/// assert!(token.parse(&mut record, &references, "WEAPONPROFICIENCY|ALL|Dagger").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChooseToken {
    config: ChoiceConfig,
}

impl ChooseToken {
    /// Create a token for `config`.
    #[must_use]
    pub fn new(config: ChoiceConfig) -> Self {
        Self { config }
    }

    /// Configuration the token parses with.
    #[must_use]
    pub fn config(&self) -> &ChoiceConfig {
        &self.config
    }

    /// Parse `value` and store the result on `record`.
    ///
    /// `record` is written only after the whole value has parsed, so a
    /// rejected value leaves it untouched.
    ///
    /// # Errors
    ///
    /// Returns the [`SyntaxError`] that rejected the value.
    pub fn parse(
        &self,
        record: &mut ObjectRecord,
        references: &dyn ReferenceOracle,
        value: &str,
    ) -> Result<(), SyntaxError> {
        let choice = ChoiceParser::new(&self.config)
            .with_references(references)
            .parse(value)?;
        record.put(ObjectKey::CHOOSE_INFO, choice);
        Ok(())
    }

    /// The choice set stored on `record`, if any.
    ///
    /// # Errors
    ///
    /// Returns [`UnparseError::ContractViolation`] when the slot holds
    /// something other than a [`ChoiceSet`].
    pub fn stored<'r>(&self, record: &'r ObjectRecord) -> Result<Option<&'r ChoiceSet>, UnparseError> {
        record
            .get::<ChoiceSet>(ObjectKey::CHOOSE_INFO)
            .map_err(|mismatch| {
                log::warn!(
                    "`{}` on object `{}` violates the choice contract: {mismatch}",
                    self.config.sub_token,
                    record.name()
                );
                UnparseError::ContractViolation {
                    key: mismatch.key.name(),
                    found: mismatch.found,
                }
            })
    }

    /// Text for the choice set stored on `record`; `None` when nothing is
    /// stored.
    ///
    /// # Errors
    ///
    /// Returns [`UnparseError::InvalidGrouping`] for a stored tree with an
    /// invalid grouping state, and [`UnparseError::ContractViolation`] when
    /// the slot holds the wrong type.
    pub fn unparse(&self, record: &ObjectRecord) -> Result<Option<String>, UnparseError> {
        self.stored(record)?.map(ChoiceSet::unparse).transpose()
    }
}
