//! Identifier types for records, shopping entries and sessions.
//!
//! Identifiers are opaque tokens: newly generated ones come from UUIDs, but any
//! string read back from disk is accepted as-is, so files written by earlier
//! versions (short random tokens) still load.
//!
//! With feature `uuid_v7` enabled, new tokens are time-ordered.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[inline]
#[must_use]
fn fresh_token() -> String {
    #[cfg(feature = "uuid_v7")]
    {
        Uuid::now_v7().simple().to_string()
    }
    #[cfg(not(feature = "uuid_v7"))]
    {
        Uuid::new_v4().simple().to_string()
    }
}

/// Declare an opaque token newtype with a consistent API.
macro_rules! define_token_id {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl Default for $name {
            #[inline]
            fn default() -> Self {
                Self::new()
            }
        }

        impl $name {
            /// Generate a new unique identifier.
            #[inline]
            #[must_use]
            pub fn new() -> Self {
                Self(fresh_token())
            }

            /// Borrow the token text.
            #[inline]
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl FromStr for $name {
            type Err = core::convert::Infallible;

            #[inline]
            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(s.to_string()))
            }
        }

        impl From<&str> for $name {
            #[inline]
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }

        impl PartialEq<str> for $name {
            fn eq(&self, other: &str) -> bool {
                self.0 == other
            }
        }
    };
}

define_token_id!(
    /// Identifier of a stored conversation record.
    RecordId
);

define_token_id!(
    /// Identifier of a shopping-list entry.
    ItemId
);

define_token_id!(
    /// Token grouping the records created between two clears.
    SessionId
);
