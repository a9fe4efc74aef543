//! # Storefront
//!
//! The order lifecycle and cart/checkout engine of an online store, built
//! on [`entity_actor`]. Each aggregate lives in its own actor:
//!
//! - **[model]**: plain data ([`model::Product`], [`model::Cart`], [`model::Order`], ...)
//! - **`*_actor`**: the [`ActorEntity`](entity_actor::ActorEntity) impl, actions and
//!   error enum of each aggregate
//! - **[clients]**: typed wrappers that hide the message passing
//! - **[lifecycle]**: starts, wires and stops the actors
//! - **[http]**: the JSON API
//!
//! Checkout runs inside the order actor: stock for every line is reserved
//! in one product transaction, prices are frozen into the order, and the
//! cart is drained, with the reservation released again if a later step
//! fails.

pub mod address_actor;
pub mod cart_actor;
pub mod clients;
pub mod config;
pub mod error;
pub mod feature_actor;
pub mod http;
pub mod lifecycle;
pub mod model;
pub mod order_actor;
pub mod product_actor;
pub mod review_actor;
pub mod user_actor;
pub mod wishlist_actor;
