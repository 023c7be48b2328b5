//! Strongly-typed ID wrappers for all entity types
//!
//! Records arrive from the bookkeeping API keyed by integer ids. Wrapping each
//! one in its own newtype prevents mixing a category id with an account id at
//! compile time while still serializing as a bare number.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

/// Macro to generate ID newtype wrappers
macro_rules! define_id {
    ($name:ident, $display_prefix:literal) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Wrap a raw integer id
            pub const fn new(value: i64) -> Self {
                Self(value)
            }

            /// Get the raw integer value
            pub const fn value(&self) -> i64 {
                self.0
            }

            /// Parse an ID from a string, with or without its display prefix
            pub fn parse(s: &str) -> Result<Self, ParseIntError> {
                s.parse()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}{}", $display_prefix, self.0)
            }
        }

        impl From<i64> for $name {
            fn from(value: i64) -> Self {
                Self(value)
            }
        }

        impl FromStr for $name {
            type Err = ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let s = s.trim();
                let s = s.strip_prefix($display_prefix).unwrap_or(s);
                Ok(Self(s.parse()?))
            }
        }
    };
}

define_id!(BusinessId, "biz-");
define_id!(AccountId, "acc-");
define_id!(CategoryId, "cat-");
define_id!(TransactionId, "txn-");
define_id!(VendorId, "ven-");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_display() {
        let id = CategoryId::new(12);
        assert_eq!(id.to_string(), "cat-12");
        assert_eq!(AccountId::new(3).to_string(), "acc-3");
    }

    #[test]
    fn test_id_parse_with_and_without_prefix() {
        assert_eq!(CategoryId::parse("12").unwrap(), CategoryId::new(12));
        assert_eq!(CategoryId::parse("cat-12").unwrap(), CategoryId::new(12));
        assert_eq!(" 4 ".parse::<BusinessId>().unwrap(), BusinessId::new(4));
        assert!(CategoryId::parse("acc-12").is_err());
        assert!(CategoryId::parse("rent").is_err());
    }

    #[test]
    fn test_id_serializes_as_number() {
        let id = TransactionId::new(42);
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "42");

        let back: TransactionId = serde_json::from_str("42").unwrap();
        assert_eq!(back, id);
    }
}
