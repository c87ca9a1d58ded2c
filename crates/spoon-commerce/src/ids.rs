//! Newtype IDs for type-safe identifiers.
//!
//! Using newtypes prevents accidentally mixing up different ID types,
//! e.g., passing a MenuItemId where a LineId is expected. Neither ID is
//! ever minted here: menu item IDs come from the catalog, and line IDs
//! are derived fingerprints.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Macro to generate newtype ID structs.
macro_rules! define_id {
    ($name:ident) => {
        /// A unique identifier.
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub struct $name(String);

        impl $name {
            /// Create a new ID from a string.
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Get the ID as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume and return the inner string.
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

define_id!(MenuItemId);
define_id!(LineId);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_creation() {
        let id = MenuItemId::new("dish-123");
        assert_eq!(id.as_str(), "dish-123");
    }

    #[test]
    fn test_id_from_string() {
        let id: MenuItemId = "dish-456".into();
        assert_eq!(id.as_str(), "dish-456");
    }

    #[test]
    fn test_id_display() {
        let id = LineId::new("dish-789-Size:Large");
        assert_eq!(format!("{}", id), "dish-789-Size:Large");
    }

    #[test]
    fn test_id_equality() {
        let id1 = LineId::new("same");
        let id2 = LineId::new("same");
        let id3 = LineId::new("different");

        assert_eq!(id1, id2);
        assert_ne!(id1, id3);
    }
}
