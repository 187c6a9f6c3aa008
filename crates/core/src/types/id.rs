//! Newtype IDs for type-safe entity references.
//!
//! The REST API issues opaque string identifiers (document IDs). Use the
//! `define_id!` macro to create wrappers that prevent accidentally mixing IDs
//! from different entity types.

/// Macro to define a type-safe string ID wrapper.
///
/// Creates a newtype wrapper around `String` with:
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]`
/// - `Debug`, `Clone`, `PartialEq`, `Eq`, `Hash`
/// - Conversion methods: `new()`, `as_str()`, `into_inner()`
/// - `From<String>`, `From<&str>` and `Display` implementations
///
/// # Example
///
/// ```rust
/// # use shopfront_core::define_id;
/// define_id!(UserId);
/// define_id!(OrderId);
///
/// let user_id = UserId::new("64f0c0ffee");
/// let order_id = OrderId::new("64f0c0ffee");
///
/// // These are different types, so this won't compile:
/// // let _: UserId = order_id;
/// ```
#[macro_export]
macro_rules! define_id {
    ($name:ident) => {
        #[derive(
            Debug,
            Clone,
            PartialEq,
            Eq,
            Hash,
            PartialOrd,
            Ord,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create a new ID from any string-like value.
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Get the underlying string value.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume the ID and return the inner string.
            #[must_use]
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_owned())
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

define_id!(UserId);
define_id!(ProductId);
define_id!(OrderId);

impl OrderId {
    /// Number of trailing characters shown in order listings.
    pub const SHORT_LEN: usize = 6;

    /// The last six characters of the ID, used as a human-facing order number.
    ///
    /// IDs shorter than six characters are returned whole.
    #[must_use]
    pub fn short(&self) -> &str {
        let count = self.0.chars().count();
        if count <= Self::SHORT_LEN {
            return &self.0;
        }
        let skip = count - Self::SHORT_LEN;
        self.0
            .char_indices()
            .nth(skip)
            .map_or(self.0.as_str(), |(idx, _)| &self.0[idx..])
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_short_order_id() {
        let id = OrderId::new("650a1b2c3d4e5f6a7b8c9d0e");
        assert_eq!(id.short(), "8c9d0e");
    }

    #[test]
    fn test_short_order_id_keeps_short_ids() {
        assert_eq!(OrderId::new("abc").short(), "abc");
        assert_eq!(OrderId::new("abcdef").short(), "abcdef");
    }

    #[test]
    fn test_ids_serialize_transparently() {
        let id = ProductId::new("p-1");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"p-1\"");

        let parsed: ProductId = serde_json::from_str("\"p-1\"").unwrap();
        assert_eq!(parsed, id);
    }
}
