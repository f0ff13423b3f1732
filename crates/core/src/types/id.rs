//! Newtype IDs for type-safe entity references.
//!
//! Use the `define_id!` macro to create type-safe ID wrappers that prevent
//! accidentally mixing IDs from different entity types. IDs are `i64` because
//! freshly created entities take their ID from the epoch-millisecond clock.

/// Macro to define a type-safe ID wrapper.
///
/// Creates a newtype wrapper around `i64` with:
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]`
/// - `Debug`, `Clone`, `Copy`, `PartialEq`, `Eq`, `PartialOrd`, `Ord`, `Hash`
/// - Conversion methods: `new()`, `as_i64()`
/// - `From<i64>` and `Into<i64>` implementations
/// - `FromStr` so IDs can be taken from paths and query strings
///
/// # Example
///
/// ```rust
/// # use delicious_bites_core::define_id;
/// define_id!(TableId);
/// define_id!(ReservationId);
///
/// let table_id = TableId::new(1);
/// let reservation_id = ReservationId::new(1);
///
/// // These are different types, so this won't compile:
/// // let _: TableId = reservation_id;
/// ```
#[macro_export]
macro_rules! define_id {
    ($name:ident) => {
        #[derive(
            Debug,
            Clone,
            Copy,
            PartialEq,
            Eq,
            PartialOrd,
            Ord,
            Hash,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Create a new ID from an i64 value.
            #[must_use]
            pub const fn new(id: i64) -> Self {
                Self(id)
            }

            /// Get the underlying i64 value.
            #[must_use]
            pub const fn as_i64(&self) -> i64 {
                self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl ::core::str::FromStr for $name {
            type Err = ::core::num::ParseIntError;

            fn from_str(s: &str) -> ::core::result::Result<Self, Self::Err> {
                s.trim().parse::<i64>().map(Self)
            }
        }

        impl From<i64> for $name {
            fn from(id: i64) -> Self {
                Self(id)
            }
        }

        impl From<$name> for i64 {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

// Define standard entity IDs
define_id!(UserId);
define_id!(MenuItemId);
define_id!(OrderId);
define_id!(BlogPostId);

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_id_roundtrip_conversions() {
        let id = OrderId::new(1_700_000_000_000);
        assert_eq!(id.as_i64(), 1_700_000_000_000);
        assert_eq!(i64::from(id), 1_700_000_000_000);
        assert_eq!(OrderId::from(7), OrderId::new(7));
    }

    #[test]
    fn test_id_parses_from_path_segment() {
        let id: MenuItemId = "42".parse().unwrap();
        assert_eq!(id, MenuItemId::new(42));
        assert!("forty-two".parse::<MenuItemId>().is_err());
    }

    #[test]
    fn test_id_serializes_transparently() {
        let json = serde_json::to_string(&UserId::new(2)).unwrap();
        assert_eq!(json, "2");
    }

    #[test]
    fn test_ids_order_numerically() {
        assert!(OrderId::new(2) > OrderId::new(1));
    }
}
