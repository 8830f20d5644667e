//! Typed IDs for type-safe entity references.
//!
//! Using typed IDs prevents accidentally passing an `ExpenseId` where a `GeneralTaxId` is expected.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Macro to generate typed ID wrappers.
macro_rules! typed_id {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub Uuid);

        impl $name {
            /// Creates a new random ID using UUID v7 (time-ordered).
            #[must_use]
            pub fn new() -> Self {
                Self(Uuid::now_v7())
            }

            /// Creates an ID from an existing UUID.
            #[must_use]
            pub const fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Returns the inner UUID.
            #[must_use]
            pub const fn into_inner(self) -> Uuid {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl std::str::FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(Uuid::parse_str(s)?))
            }
        }
    };
}

typed_id!(WorkspaceId, "Unique identifier for a workspace.");
typed_id!(ExpenseId, "Unique identifier for an expense.");
typed_id!(IncomeId, "Unique identifier for an income.");
typed_id!(GeneralTaxId, "Unique identifier for a general tax.");
typed_id!(CategoryId, "Unique identifier for an expense or income category.");
typed_id!(DocumentId, "Unique identifier for an attached document.");
typed_id!(InvoiceId, "Unique identifier for an invoice.");

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_ids_are_unique() {
        assert_ne!(ExpenseId::new(), ExpenseId::new());
    }

    #[test]
    fn test_round_trip_through_string() {
        let id = GeneralTaxId::new();
        let parsed = GeneralTaxId::from_str(&id.to_string()).unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn test_serializes_transparently() {
        let uuid = Uuid::nil();
        let json = serde_json::to_string(&WorkspaceId::from_uuid(uuid)).unwrap();
        assert_eq!(json, format!("\"{uuid}\""));
    }

    #[test]
    fn test_rejects_malformed_uuid() {
        assert!(IncomeId::from_str("not-a-uuid").is_err());
    }
}
