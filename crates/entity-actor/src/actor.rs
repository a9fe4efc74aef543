//! # Generic Actor Server
//!
//! The `ResourceActor` owns the store for one entity type and processes
//! requests strictly one at a time, which is what makes every read-check-write
//! inside an entity hook atomic with respect to other callers.

use crate::client::ResourceClient;
use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use crate::message::ResourceRequest;
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

fn entity_error<E: std::error::Error + Send + Sync + 'static>(e: E) -> FrameworkError {
    FrameworkError::EntityError(Box::new(e))
}

/// The generic actor that manages a collection of entities.
///
/// # Usage Pattern
///
/// 1. **Create**: `ResourceActor::new()` returns the actor (server) and its client.
/// 2. **Wire**: pass dependencies (other clients) into `actor.run(context)`.
/// 3. **Run**: spawn the run loop in a background task.
///
/// ```rust
/// use entity_actor::{ActorEntity, ResourceActor};
/// use async_trait::async_trait;
///
/// #[derive(Clone, Debug)] struct Banner { id: u32, image: String }
/// #[derive(Debug)] struct BannerCreate { image: String }
/// #[derive(Debug)] struct BannerUpdate;
/// #[derive(Debug)] enum BannerAction {}
/// #[derive(Debug, thiserror::Error)] #[error("banner error")] struct BannerError;
///
/// #[async_trait]
/// impl ActorEntity for Banner {
///     type Id = u32;
///     type Create = BannerCreate;
///     type Update = BannerUpdate;
///     type Action = BannerAction;
///     type ActionResult = ();
///     type Context = ();
///     type Error = BannerError;
///
///     fn from_create_params(id: u32, params: BannerCreate) -> Result<Self, Self::Error> {
///         Ok(Self { id, image: params.image })
///     }
///     async fn on_update(&mut self, _: BannerUpdate, _: &()) -> Result<(), Self::Error> { Ok(()) }
///     async fn handle_action(&mut self, action: BannerAction, _: &()) -> Result<(), Self::Error> {
///         match action {}
///     }
/// }
///
/// #[tokio::main]
/// async fn main() {
///     let (actor, client) = ResourceActor::<Banner>::new(10);
///     tokio::spawn(actor.run(()));
///
///     let id = client.create(BannerCreate { image: "sale.png".into() }).await.unwrap();
///     assert_eq!(client.get(id).await.unwrap().unwrap().image, "sale.png");
/// }
/// ```
///
/// # Implementation Details
///
/// Entities live in a `BTreeMap` keyed by id; new ids come from a `u32` counter.
/// `Update`, `Action`, `Ensure` and `Transaction` all run their hooks against a
/// working copy and write it back only on success, so a failing hook never
/// leaves a half-applied change in the store.
pub struct ResourceActor<T: ActorEntity> {
    receiver: mpsc::Receiver<ResourceRequest<T>>,
    store: BTreeMap<T::Id, T>,
    next_id: u32,
}

impl<T: ActorEntity> ResourceActor<T> {
    /// Creates a new `ResourceActor` and its associated `ResourceClient`.
    ///
    /// `buffer_size` is the request channel capacity; senders wait when it is full.
    pub fn new(buffer_size: usize) -> (Self, ResourceClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            store: BTreeMap::new(),
            next_id: 1,
        };
        let client = ResourceClient::new(sender);
        (actor, client)
    }

    /// Runs the event loop until every client has been dropped.
    ///
    /// `context` is handed to every hook, which lets dependencies be wired
    /// after all actors and clients exist.
    pub async fn run(mut self, context: T::Context) {
        let entity_type = std::any::type_name::<T>()
            .split("::")
            .last()
            .unwrap_or("Unknown");
        info!(entity_type, "Actor started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                ResourceRequest::Create { params, respond_to } => {
                    debug!(entity_type, ?params, "Create");
                    let id = T::Id::from(self.next_id);
                    self.next_id += 1;

                    let result = self.insert_new(id.clone(), params, &context).await;
                    match &result {
                        Ok(()) => info!(entity_type, %id, size = self.store.len(), "Created"),
                        Err(e) => warn!(entity_type, error = %e, "Create failed"),
                    }
                    let _ = respond_to.send(result.map(|()| id));
                }
                ResourceRequest::Get { id, respond_to } => {
                    let item = self.store.get(&id).cloned();
                    let found = item.is_some();
                    debug!(entity_type, %id, found, "Get");
                    let _ = respond_to.send(Ok(item));
                }
                ResourceRequest::List { filter, respond_to } => {
                    let items: Vec<T> = self
                        .store
                        .values()
                        .filter(|item| filter.matches(item))
                        .cloned()
                        .collect();
                    debug!(entity_type, matched = items.len(), "List");
                    let _ = respond_to.send(Ok(items));
                }
                ResourceRequest::Update {
                    id,
                    update,
                    respond_to,
                } => {
                    debug!(entity_type, %id, ?update, "Update");
                    let Some(mut item) = self.store.get(&id).cloned() else {
                        warn!(entity_type, %id, "Not found");
                        let _ = respond_to.send(Err(FrameworkError::NotFound(id.to_string())));
                        continue;
                    };
                    if let Err(e) = item.on_update(update, &context).await {
                        warn!(entity_type, %id, error = %e, "Update failed");
                        let _ = respond_to.send(Err(entity_error(e)));
                        continue;
                    }
                    self.store.insert(id.clone(), item.clone());
                    info!(entity_type, %id, "Updated");
                    let _ = respond_to.send(Ok(item));
                }
                ResourceRequest::Delete { id, respond_to } => {
                    debug!(entity_type, %id, "Delete");
                    let Some(item) = self.store.get(&id) else {
                        warn!(entity_type, %id, "Not found");
                        let _ = respond_to.send(Err(FrameworkError::NotFound(id.to_string())));
                        continue;
                    };
                    if let Err(e) = item.on_delete(&context).await {
                        warn!(entity_type, %id, error = %e, "on_delete failed");
                        let _ = respond_to.send(Err(entity_error(e)));
                        continue;
                    }
                    self.store.remove(&id);
                    info!(entity_type, %id, size = self.store.len(), "Deleted");
                    let _ = respond_to.send(Ok(()));
                }
                ResourceRequest::Action {
                    id,
                    action,
                    respond_to,
                } => {
                    debug!(entity_type, %id, ?action, "Action");
                    let Some(mut item) = self.store.get(&id).cloned() else {
                        warn!(entity_type, %id, "Not found");
                        let _ = respond_to.send(Err(FrameworkError::NotFound(id.to_string())));
                        continue;
                    };
                    let result = item.handle_action(action, &context).await;
                    match result {
                        Ok(value) => {
                            self.store.insert(id.clone(), item);
                            info!(entity_type, %id, "Action ok");
                            let _ = respond_to.send(Ok(value));
                        }
                        Err(e) => {
                            warn!(entity_type, %id, error = %e, "Action failed");
                            let _ = respond_to.send(Err(entity_error(e)));
                        }
                    }
                }
                ResourceRequest::Ensure {
                    id,
                    seed,
                    action,
                    respond_to,
                } => {
                    debug!(entity_type, %id, ?action, "Ensure");
                    let result = self.ensure_then_act(id.clone(), seed, action, &context).await;
                    match &result {
                        Ok(_) => info!(entity_type, %id, size = self.store.len(), "Ensure ok"),
                        Err(e) => warn!(entity_type, %id, error = %e, "Ensure failed"),
                    }
                    let _ = respond_to.send(result);
                }
                ResourceRequest::Transaction { ops, respond_to } => {
                    let ops_len = ops.len();
                    debug!(entity_type, ops = ops_len, "Transaction");
                    let result = self.apply_all(ops, &context).await;
                    match &result {
                        Ok(_) => info!(entity_type, ops = ops_len, "Transaction committed"),
                        Err(e) => warn!(entity_type, error = %e, "Transaction rolled back"),
                    }
                    let _ = respond_to.send(result);
                }
            }
        }

        info!(entity_type, size = self.store.len(), "Shutdown");
    }

    async fn insert_new(
        &mut self,
        id: T::Id,
        params: T::Create,
        context: &T::Context,
    ) -> Result<(), FrameworkError> {
        let mut item = T::from_create_params(id.clone(), params).map_err(entity_error)?;
        item.on_create(context).await.map_err(entity_error)?;
        self.store.insert(id, item);
        Ok(())
    }

    async fn ensure_then_act(
        &mut self,
        id: T::Id,
        seed: T::Create,
        action: T::Action,
        context: &T::Context,
    ) -> Result<T::ActionResult, FrameworkError> {
        let mut item = match self.store.get(&id) {
            Some(existing) => existing.clone(),
            None => {
                let mut fresh = T::from_create_params(id.clone(), seed).map_err(entity_error)?;
                fresh.on_create(context).await.map_err(entity_error)?;
                fresh
            }
        };
        let result = item
            .handle_action(action, context)
            .await
            .map_err(entity_error)?;
        self.store.insert(id, item);
        Ok(result)
    }

    /// Applies every op to working copies; commits them only if all succeed.
    async fn apply_all(
        &mut self,
        ops: Vec<(T::Id, T::Action)>,
        context: &T::Context,
    ) -> Result<Vec<T::ActionResult>, FrameworkError> {
        let mut staged: BTreeMap<T::Id, T> = BTreeMap::new();
        let mut results = Vec::with_capacity(ops.len());

        for (id, action) in ops {
            let item = match staged.entry(id.clone()) {
                Entry::Occupied(slot) => slot.into_mut(),
                Entry::Vacant(slot) => {
                    let current = self
                        .store
                        .get(&id)
                        .cloned()
                        .ok_or_else(|| FrameworkError::NotFound(id.to_string()))?;
                    slot.insert(current)
                }
            };
            let result = item
                .handle_action(action, context)
                .await
                .map_err(entity_error)?;
            results.push(result);
        }

        self.store.extend(staged);
        Ok(results)
    }
}
