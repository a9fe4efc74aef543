//! # Clients
//!
//! Typed facades over each actor's [`ResourceClient`](entity_actor::ResourceClient).
//! They translate domain calls into requests, recover the aggregate's own
//! error type, and hold the small amount of cross-actor orchestration that does
//! not belong inside any single entity (email uniqueness, the product delete
//! guard, owner checks on reads).

mod address_client;
mod cart_client;
mod feature_client;
mod order_client;
mod product_client;
mod review_client;
mod user_client;
mod wishlist_client;

pub use address_client::AddressClient;
pub use cart_client::CartClient;
pub use feature_client::FeatureClient;
pub use order_client::OrderClient;
pub use product_client::ProductClient;
pub use review_client::ReviewClient;
pub use user_client::UserClient;
pub use wishlist_client::WishlistClient;
