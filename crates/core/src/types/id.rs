//! Newtype IDs for type-safe entity references.
//!
//! Catalog ids are opaque strings: records minted by the admin carry UUIDs,
//! seeded records carry whatever the seed file says. The wrappers keep those
//! from being mixed up with cart line ids, which live in a different keyspace.

/// Macro to define a type-safe string ID wrapper.
///
/// Creates a newtype wrapper around `String` with:
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]`
/// - `Debug`, `Clone`, `PartialEq`, `Eq`, `PartialOrd`, `Ord`, `Hash`
/// - Conversion methods: `new()`, `as_str()`, `into_inner()`
/// - `From<String>` and `From<&str>` implementations
/// - `sqlx` `Type`, `Encode`, and `Decode` as Postgres `TEXT` (with the
///   `postgres` feature)
///
/// # Example
///
/// ```rust
/// # use marigold_core::define_str_id;
/// define_str_id!(OrderId);
/// define_str_id!(CustomerId);
///
/// let order_id = OrderId::new("a1b2");
/// let customer_id = CustomerId::new("a1b2");
///
/// // These are different types, so this won't compile:
/// // let _: OrderId = customer_id;
/// ```
#[macro_export]
macro_rules! define_str_id {
    ($name:ident) => {
        #[derive(
            Debug,
            Clone,
            PartialEq,
            Eq,
            PartialOrd,
            Ord,
            Hash,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create a new ID from a string value.
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Borrow the underlying string.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Unwrap into the underlying string.
            #[must_use]
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                write!(f, "{}", self.0)
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

        #[cfg(feature = "postgres")]
        impl ::sqlx::Type<::sqlx::Postgres> for $name {
            fn type_info() -> ::sqlx::postgres::PgTypeInfo {
                <String as ::sqlx::Type<::sqlx::Postgres>>::type_info()
            }

            fn compatible(ty: &::sqlx::postgres::PgTypeInfo) -> bool {
                <String as ::sqlx::Type<::sqlx::Postgres>>::compatible(ty)
            }
        }

        #[cfg(feature = "postgres")]
        impl<'r> ::sqlx::Decode<'r, ::sqlx::Postgres> for $name {
            fn decode(
                value: ::sqlx::postgres::PgValueRef<'r>,
            ) -> ::core::result::Result<Self, ::sqlx::error::BoxDynError> {
                let id = <String as ::sqlx::Decode<::sqlx::Postgres>>::decode(value)?;
                Ok(Self(id))
            }
        }

        #[cfg(feature = "postgres")]
        impl ::sqlx::Encode<'_, ::sqlx::Postgres> for $name {
            fn encode_by_ref(
                &self,
                buf: &mut ::sqlx::postgres::PgArgumentBuffer,
            ) -> ::std::result::Result<::sqlx::encode::IsNull, ::sqlx::error::BoxDynError> {
                <String as ::sqlx::Encode<::sqlx::Postgres>>::encode_by_ref(&self.0, buf)
            }
        }
    };
}

define_str_id!(ProductId);
define_str_id!(LineId);

impl LineId {
    /// Derive the cart line id for a product variant selection.
    ///
    /// The id is the dash-joined `product-size-color` triple, which is also
    /// what the persisted cart payload carries. Line ids are compared whole
    /// and never split back apart, so dashes inside the components are fine.
    #[must_use]
    pub fn for_variant(product: &ProductId, size: &str, color: &str) -> Self {
        Self(format!("{}-{size}-{color}", product.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_id_joins_product_size_and_color() {
        let id = LineId::for_variant(&ProductId::new("p1"), "M", "Rose");
        assert_eq!(id.as_str(), "p1-M-Rose");
    }

    #[test]
    fn same_selection_derives_same_line_id() {
        let product = ProductId::new("p1");
        assert_eq!(
            LineId::for_variant(&product, "M", "Rose"),
            LineId::for_variant(&product, "M", "Rose"),
        );
        assert_ne!(
            LineId::for_variant(&product, "M", "Rose"),
            LineId::for_variant(&product, "L", "Rose"),
        );
    }

    #[test]
    fn product_id_serializes_transparently() {
        let id = ProductId::new("abc-123");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"abc-123\"");
        let back: ProductId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn product_ids_order_lexicographically() {
        assert!(ProductId::new("b") > ProductId::new("a"));
        assert!(ProductId::new("10") < ProductId::new("9"));
    }
}
