//! # Entity Actor
//!
//! A small runtime for owning stateful aggregates inside Tokio tasks. Each
//! entity type gets one [`ResourceActor`], which holds every instance of that
//! type and processes requests sequentially; callers talk to it through a
//! cloneable [`ResourceClient`].
//!
//! ## Layers
//!
//! 1. **Entity** ([`ActorEntity`]): domain data plus async hooks.
//! 2. **Runtime** ([`ResourceActor`]): the request loop and the store.
//! 3. **Interface** ([`ResourceClient`], [`ActorClient`]): typed requests.
//!
//! ## Requests
//!
//! CRUD plus `Action` cover single-entity work. `List` filters a snapshot,
//! `Ensure` creates an owner-keyed entity on first use, and `Transaction`
//! applies a batch of actions all-or-nothing. Because one actor serializes all
//! requests for its type, a `Transaction` that checks and decrements several
//! counters cannot interleave with any other writer of those counters.
//!
//! ## Context Injection
//!
//! Dependencies are passed to [`ResourceActor::run`], not to `new`, so every
//! actor and client can be created before any of them starts:
//!
//! ```rust,ignore
//! let (product_actor, products) = ResourceActor::<Product>::new(32);
//! let (order_actor, orders) = ResourceActor::<Order>::new(32);
//! tokio::spawn(product_actor.run(()));
//! tokio::spawn(order_actor.run(OrderContext { products: products.clone() }));
//! ```
//!
//! Shutdown is channel closure: once every client of an actor is dropped its
//! loop ends. This terminates cleanly as long as the context graph is acyclic.
//!
//! ## Testing
//!
//! [`mock::MockClient`] answers requests from scripted expectations, so an
//! actor can be exercised with its dependencies replaced.

pub mod actor;
pub mod client;
pub mod client_trait;
pub mod entity;
pub mod error;
mod macros;
pub mod message;
pub mod mock;
pub mod tracing;

pub use actor::ResourceActor;
pub use client::ResourceClient;
pub use client_trait::ActorClient;
pub use entity::ActorEntity;
pub use error::FrameworkError;
pub use message::{Filter, ResourceRequest, Response};

#[doc(hidden)]
pub use paste::paste as __paste;
