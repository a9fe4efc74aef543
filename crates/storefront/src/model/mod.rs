//! Pure data types for every aggregate. No actor plumbing lives here.

/// Declares a `u32` newtype id that serializes as a bare number and displays
/// with a readable prefix (`product_3`).
macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(
            Debug,
            Clone,
            Copy,
            PartialEq,
            Eq,
            PartialOrd,
            Ord,
            Hash,
            serde::Serialize,
            serde::Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub u32);

        impl From<u32> for $name {
            fn from(id: u32) -> Self {
                Self(id)
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, concat!($prefix, "_{}"), self.0)
            }
        }
    };
}

pub mod address;
pub mod cart;
pub mod feature;
pub mod money;
pub mod order;
pub mod order_status;
pub mod product;
pub mod review;
pub mod timestamp;
pub mod user;
pub mod wishlist;

pub use address::*;
pub use cart::*;
pub use feature::*;
pub use money::Money;
pub use order::*;
pub use order_status::*;
pub use product::*;
pub use review::*;
pub use user::*;
pub use wishlist::*;
