//! Newtype IDs for type-safe entity references.
//!
//! Spreadsheet rows identify products with free-form strings (`"3"`,
//! `"le-001"`), so IDs wrap a `String` rather than a number. Use the
//! `define_id!` macro to create wrappers that cannot be mixed up.

/// Macro to define a type-safe string ID wrapper.
///
/// Creates a newtype wrapper around `String` with:
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]`
/// - `Debug`, `Clone`, `PartialEq`, `Eq`, `Hash`, `PartialOrd`, `Ord`
/// - Conversion methods: `new()`, `as_str()`, `into_inner()`
/// - `From<String>`, `From<&str>` and `Display` implementations
///
/// # Example
///
/// ```rust
/// # use wildlife_prints_core::define_id;
/// define_id!(PrintId);
/// define_id!(EditionId);
///
/// let print = PrintId::new("1");
/// let edition = EditionId::new("le-001");
///
/// // These are different types, so this won't compile:
/// // let _: PrintId = edition;
/// assert_eq!(print.as_str(), "1");
/// ```
#[macro_export]
macro_rules! define_id {
    ($name:ident) => {
        #[derive(
            Debug,
            Clone,
            Default,
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
            /// Create a new ID from anything string-like.
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Borrow the underlying string.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume the ID, returning the underlying string.
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

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

define_id!(ProductId);
define_id!(OrderId);

impl OrderId {
    /// Build the order reference sent to the order sheet: `ORDER-<unix millis>`.
    #[must_use]
    pub fn from_unix_millis(millis: i64) -> Self {
        Self(format!("ORDER-{millis}"))
    }
}
