//! Type-erased property bag standing in for the object a token writes to.

use std::any::{Any, type_name};
use std::fmt;

use hashbrown::HashMap;
use thiserror::Error;

/// Key under which a value is stored on an [`ObjectRecord`].
///
/// # Examples
///
/// ```
/// use choice_grammar::ObjectKey;
///
/// assert_eq!(ObjectKey::CHOOSE_INFO.name(), "CHOOSE_INFO");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObjectKey(&'static str);

impl ObjectKey {
    /// Slot holding the parsed choice set.
    pub const CHOOSE_INFO: Self = Self("CHOOSE_INFO");

    /// Create a key with the given name.
    #[must_use]
    pub const fn new(name: &'static str) -> Self {
        Self(name)
    }

    /// Key name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        self.0
    }
}

/// A stored value did not have the requested type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("`{}` holds a value of type `{found}`", .key.name())]
pub struct TypeMismatch {
    /// Key that was read.
    pub key: ObjectKey,
    /// Type name of the stored value.
    pub found: &'static str,
}

struct Slot {
    type_name: &'static str,
    value: Box<dyn Any>,
}

/// Named object whose properties are written by tokens.
///
/// Values of any type can be stored; reading them back names the expected
/// type and reports a [`TypeMismatch`] when something else is there.
#[derive(Default)]
pub struct ObjectRecord {
    name: String,
    slots: HashMap<ObjectKey, Slot>,
}

impl ObjectRecord {
    /// Create a record with no properties.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            slots: HashMap::new(),
        }
    }

    /// Name of the object.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Store `value` under `key`, replacing whatever was there.
    pub fn put<T: Any>(&mut self, key: ObjectKey, value: T) {
        self.slots.insert(
            key,
            Slot {
                type_name: type_name::<T>(),
                value: Box::new(value),
            },
        );
    }

    /// Clear `key`. Returns whether anything was stored.
    pub fn remove(&mut self, key: ObjectKey) -> bool {
        self.slots.remove(&key).is_some()
    }

    /// Whether anything is stored under `key`.
    #[must_use]
    pub fn contains(&self, key: ObjectKey) -> bool {
        self.slots.contains_key(&key)
    }

    /// Number of stored properties.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether no property is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Read the value under `key` as a `T`.
    ///
    /// # Errors
    ///
    /// Returns [`TypeMismatch`] when the stored value is not a `T`.
    pub fn get<T: Any>(&self, key: ObjectKey) -> Result<Option<&T>, TypeMismatch> {
        let Some(slot) = self.slots.get(&key) else {
            return Ok(None);
        };
        slot.value
            .downcast_ref::<T>()
            .map(Some)
            .ok_or(TypeMismatch {
                key,
                found: slot.type_name,
            })
    }
}

impl fmt::Debug for ObjectRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut slots: Vec<_> = self
            .slots
            .iter()
            .map(|(key, slot)| (key.name(), slot.type_name))
            .collect();
        slots.sort_unstable();
        f.debug_struct("ObjectRecord")
            .field("name", &self.name)
            .field("slots", &slots)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const COUNT: ObjectKey = ObjectKey::new("COUNT");

    #[test]
    fn reads_back_stored_values() {
        let mut record = ObjectRecord::new("Longsword");
        record.put(COUNT, 3_u32);
        assert_eq!(record.get::<u32>(COUNT), Ok(Some(&3)));
        assert_eq!(record.get::<u32>(ObjectKey::CHOOSE_INFO), Ok(None));
        assert_eq!(record.len(), 1);
    }

    #[test]
    fn reports_the_stored_type_on_mismatch() {
        let mut record = ObjectRecord::new("Longsword");
        record.put(COUNT, String::from("three"));
        assert_eq!(
            record.get::<u32>(COUNT),
            Err(TypeMismatch {
                key: COUNT,
                found: "alloc::string::String",
            })
        );
    }

    #[test]
    fn remove_clears_the_slot() {
        let mut record = ObjectRecord::new("Longsword");
        record.put(COUNT, 1_u8);
        assert!(record.remove(COUNT));
        assert!(!record.remove(COUNT));
        assert!(!record.contains(COUNT));
        assert!(record.is_empty());
    }
}
