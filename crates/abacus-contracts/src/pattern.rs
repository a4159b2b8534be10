//! Wildcard-aware patterns used by policy conditions.
//!
//! Policy documents write the wildcard as the string `"*"`.  Inside the
//! engine it is the dedicated [`Any`] marker, so a mistyped role or resource
//! kind fails to deserialize instead of quietly becoming a pattern that never
//! matches.

use std::fmt;

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

/// The literal used for wildcards in serialized policies.
pub const WILDCARD: &str = "*";

/// Marker for "any value".  Serializes as `"*"` and accepts nothing else.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Any;

impl Serialize for Any {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(WILDCARD)
    }
}

impl<'de> Deserialize<'de> for Any {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct AnyVisitor;

        impl de::Visitor<'_> for AnyVisitor {
            type Value = Any;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("the wildcard \"*\"")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Any, E> {
                if v == WILDCARD {
                    Ok(Any)
                } else {
                    Err(E::invalid_value(de::Unexpected::Str(v), &self))
                }
            }
        }

        deserializer.deserialize_str(AnyVisitor)
    }
}

impl fmt::Display for Any {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(WILDCARD)
    }
}

/// Either the wildcard or one concrete value.
///
/// ```toml
/// roles = ["*"]                 # Pattern::Any
/// roles = ["owner", "admin"]    # Pattern::Is(..)
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Pattern<T> {
    /// Matches every value.
    Any(Any),
    /// Matches exactly this value.
    Is(T),
}

impl<T> Pattern<T> {
    /// The wildcard pattern.
    pub fn any() -> Self {
        Pattern::Any(Any)
    }

    pub fn is_any(&self) -> bool {
        matches!(self, Pattern::Any(_))
    }
}

impl<T: PartialEq> Pattern<T> {
    /// Return true if `value` is admitted by this pattern.
    pub fn admits(&self, value: &T) -> bool {
        match self {
            Pattern::Any(_) => true,
            Pattern::Is(expected) => expected == value,
        }
    }
}

impl<T> Default for Pattern<T> {
    fn default() -> Self {
        Pattern::any()
    }
}

impl<T> From<T> for Pattern<T> {
    fn from(value: T) -> Self {
        Pattern::Is(value)
    }
}

impl<T: fmt::Display> fmt::Display for Pattern<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Pattern::Any(any) => any.fmt(f),
            Pattern::Is(value) => value.fmt(f),
        }
    }
}
