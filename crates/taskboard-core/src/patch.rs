use serde::{Deserialize, Deserializer};

use crate::error::AppError;

/// A field in a partial update.
///
/// JSON distinguishes a missing key from an explicit `null`; both collapse
/// into `None` with a plain `Option`. Fields of this type must be declared
/// with `#[serde(default)]` so that an absent key becomes [`Patch::Missing`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Patch<T> {
    /// Key absent: keep the current value.
    #[default]
    Missing,
    /// Explicit `null`.
    Null,
    /// New value.
    Value(T),
}

impl<T> Patch<T> {
    pub fn is_missing(&self) -> bool {
        matches!(self, Patch::Missing)
    }

    /// `Null` and `Missing` both map to `None`.
    pub fn into_option(self) -> Option<T> {
        match self {
            Patch::Value(v) => Some(v),
            Patch::Null | Patch::Missing => None,
        }
    }

    /// Overwrite a nullable field. `Null` clears it.
    pub fn apply_nullable(self, target: &mut Option<T>) {
        match self {
            Patch::Missing => {}
            Patch::Null => *target = None,
            Patch::Value(v) => *target = Some(v),
        }
    }

    /// Overwrite a required field. `Null` is rejected.
    ///
    /// Returns true when a value was supplied.
    pub fn apply_required(self, field: &str, target: &mut T) -> Result<bool, AppError> {
        match self {
            Patch::Missing => Ok(false),
            Patch::Null => Err(AppError::ValidationError(format!(
                "{field} may not be null"
            ))),
            Patch::Value(v) => {
                *target = v;
                Ok(true)
            }
        }
    }

    pub fn as_ref(&self) -> Patch<&T> {
        match self {
            Patch::Missing => Patch::Missing,
            Patch::Null => Patch::Null,
            Patch::Value(v) => Patch::Value(v),
        }
    }
}

impl<T> From<Option<T>> for Patch<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => Patch::Value(v),
            None => Patch::Null,
        }
    }
}

impl<'de, T> Deserialize<'de> for Patch<T>
where
    T: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<T>::deserialize(deserializer).map(Into::into)
    }
}
