//! Strongly-typed identifiers used across the catalog.
//!
//! The store keys every table with a `BIGINT`. On the wire the keys are opaque
//! strings, so each identifier parses from a string and displays as one.

use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Identifier of a product.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(i64);

/// Identifier of a product category.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryId(i64);

/// Identifier of a modifier group (e.g. "Size", "Toppings").
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModifierGroupId(i64);

/// Identifier of a single modifier inside a group.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModifierId(i64);

/// Identifier of a product price row.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PriceId(i64);

macro_rules! impl_row_key_newtype {
    ($t:ty, $name:literal) => {
        impl $t {
            pub const fn new(key: i64) -> Self {
                Self(key)
            }

            /// Raw store key, for binding into queries.
            pub const fn get(self) -> i64 {
                self.0
            }
        }

        impl core::fmt::Display for $t {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                core::fmt::Display::fmt(&self.0, f)
            }
        }

        impl From<i64> for $t {
            fn from(value: i64) -> Self {
                Self(value)
            }
        }

        impl From<$t> for i64 {
            fn from(value: $t) -> Self {
                value.0
            }
        }

        impl FromStr for $t {
            type Err = DomainError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let key = s
                    .trim()
                    .parse::<i64>()
                    .map_err(|e| DomainError::invalid_id(format!("{}: {}", $name, e)))?;
                Ok(Self(key))
            }
        }
    };
}

impl_row_key_newtype!(ProductId, "ProductId");
impl_row_key_newtype!(CategoryId, "CategoryId");
impl_row_key_newtype!(ModifierGroupId, "ModifierGroupId");
impl_row_key_newtype!(ModifierId, "ModifierId");
impl_row_key_newtype!(PriceId, "PriceId");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_decimal_keys() {
        let id: ProductId = "42".parse().unwrap();
        assert_eq!(id, ProductId::new(42));
        assert_eq!(id.to_string(), "42");
    }

    #[test]
    fn tolerates_surrounding_whitespace() {
        let id: CategoryId = " 7 ".parse().unwrap();
        assert_eq!(id.get(), 7);
    }

    #[test]
    fn rejects_non_numeric_keys() {
        let DomainError::InvalidId(msg) = "abc".parse::<ProductId>().unwrap_err();
        assert!(msg.starts_with("ProductId"));
    }

    #[test]
    fn large_keys_survive_string_round_trip() {
        let id = ModifierGroupId::new(9_007_199_254_740_993);
        let parsed: ModifierGroupId = id.to_string().parse().unwrap();
        assert_eq!(parsed, id);
    }
}
