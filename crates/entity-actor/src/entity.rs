//! # ActorEntity Trait
//!
//! The contract every aggregate (product, cart, order, ...) implements so a generic
//! [`ResourceActor`](crate::ResourceActor) can own it. Associated types pin down the
//! id, the create/update payloads, the custom action vocabulary, the injected
//! context, and the per-aggregate error type.
//!
//! # Provided Methods (Hooks)
//! - [`ActorEntity::on_create`]
//! - [`ActorEntity::on_delete`]
//!
//! Both default to `Ok(())`. `on_update` and `handle_action` must be written by
//! every entity.

use async_trait::async_trait;
use std::fmt::{Debug, Display};
use std::hash::Hash;

/// Trait that any resource entity must implement to be managed by `ResourceActor`.
///
/// Hooks run inside the owning actor task, one request at a time, so an entity
/// may freely mutate `self` without locks. Hooks may also await other actors
/// through clients carried in [`ActorEntity::Context`]; while a hook awaits, the
/// owning actor does not process other requests.
#[async_trait]
pub trait ActorEntity: Clone + Send + Sync + 'static {
    /// Unique identifier. Ordered so listings come back in a stable order, and
    /// convertible from `u32` for counter-based id generation.
    type Id: Eq + Ord + Hash + Clone + Send + Sync + Display + Debug + From<u32>;

    /// Payload required to create a new instance.
    type Create: Send + Sync + Debug;

    /// Payload required to update an existing instance.
    type Update: Send + Sync + Debug;

    /// Resource-specific operations (e.g. `Reserve`).
    type Action: Send + Sync + Debug;

    /// The result type returned by custom actions.
    type ActionResult: Send + Sync + Debug;

    /// Dependencies injected into the actor at `run()` time.
    /// Use `()` if none are needed.
    type Context: Send + Sync;

    /// One error enum per aggregate.
    ///
    /// The runtime boxes it into [`FrameworkError::EntityError`](crate::FrameworkError::EntityError);
    /// clients recover the concrete type with [`FrameworkError::downcast`](crate::FrameworkError::downcast).
    type Error: std::error::Error + Send + Sync + 'static;

    /// Construct the entity from its id and payload.
    /// Called synchronously before `on_create`, so pure validation belongs here.
    fn from_create_params(id: Self::Id, params: Self::Create) -> Result<Self, Self::Error>;

    // --- Lifecycle Hooks (Async) ---

    /// Runs after construction and before the entity is stored.
    /// An error here discards the entity; nothing is persisted.
    async fn on_create(&mut self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Applies an update in place.
    async fn on_update(
        &mut self,
        update: Self::Update,
        _ctx: &Self::Context,
    ) -> Result<(), Self::Error>;

    /// Runs before the entity is removed. An error vetoes the removal.
    async fn on_delete(&self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    // --- Action Handler (Async) ---

    /// Handle a resource-specific action.
    ///
    /// Inside a [`Transaction`](crate::ResourceRequest::Transaction) this runs
    /// against a working copy, so a failing action must not rely on having
    /// left `self` untouched; the copy is simply discarded.
    async fn handle_action(
        &mut self,
        action: Self::Action,
        _ctx: &Self::Context,
    ) -> Result<Self::ActionResult, Self::Error>;
}
