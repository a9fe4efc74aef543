//! # Mock Framework & Testing Guide
//!
//! `MockClient<T>` hands out a real [`ResourceClient<T>`] whose requests are
//! answered from a queue of expectations instead of by an actor. Code under
//! test cannot tell the difference, which makes it the tool of choice for
//! testing an actor whose hooks call other actors.
//!
//! | | MockClient | Real Actor |
//! |---|---|---|
//! | **State** | Scripted replies | Real state |
//! | **Error injection** | `return_err(..)` | Requires setting up the failing state |
//! | **Use case** | Isolating an actor from its dependencies | Full-system tests |
//!
//! Expectations are consumed in order. A request that does not match the next
//! expectation (different kind or different id) panics inside the mock task,
//! which drops the reply channel; the caller then sees
//! [`FrameworkError::ActorDropped`].
//!
//! ```rust
//! use entity_actor::mock::MockClient;
//! use entity_actor::{ActorEntity, FrameworkError};
//! use async_trait::async_trait;
//!
//! #[derive(Clone, Debug)] struct Shelf { id: u32, stock: u32 }
//! #[derive(Debug)] struct ShelfCreate;
//! #[derive(Debug)] struct ShelfUpdate;
//! #[derive(Debug)] enum ShelfAction { Take(u32) }
//! #[derive(Debug, thiserror::Error)] #[error("shelf error")] struct ShelfError;
//!
//! #[async_trait]
//! impl ActorEntity for Shelf {
//!     type Id = u32; type Create = ShelfCreate; type Update = ShelfUpdate;
//!     type Action = ShelfAction; type ActionResult = u32; type Context = (); type Error = ShelfError;
//!     fn from_create_params(id: u32, _: ShelfCreate) -> Result<Self, Self::Error> { Ok(Self { id, stock: 0 }) }
//!     async fn on_update(&mut self, _: ShelfUpdate, _: &()) -> Result<(), Self::Error> { Ok(()) }
//!     async fn handle_action(&mut self, _: ShelfAction, _: &()) -> Result<u32, Self::Error> { Ok(self.stock) }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let mut mock = MockClient::<Shelf>::new();
//!     mock.expect_transaction().return_ok(vec![3, 1]);
//!     mock.expect_get(7).return_err(FrameworkError::ActorClosed);
//!
//!     let client = mock.client();
//!     let left = client
//!         .transaction(vec![(1, ShelfAction::Take(2)), (2, ShelfAction::Take(4))])
//!         .await
//!         .unwrap();
//!     assert_eq!(left, vec![3, 1]);
//!     assert!(matches!(client.get(7).await, Err(FrameworkError::ActorClosed)));
//!     mock.verify();
//! }
//! ```
//!
//! For lower-level control, [`create_mock_client`] returns the raw request
//! receiver so a test can inspect each payload and answer it by hand.

use crate::client::ResourceClient;
use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use crate::message::ResourceRequest;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::{mpsc, oneshot};

// =============================================================================
// EXPECTATION BUILDER API
// =============================================================================

enum Expectation<T: ActorEntity> {
    Get {
        id: T::Id,
        response: Result<Option<T>, FrameworkError>,
    },
    List {
        response: Result<Vec<T>, FrameworkError>,
    },
    Create {
        response: Result<T::Id, FrameworkError>,
    },
    Update {
        id: T::Id,
        response: Result<T, FrameworkError>,
    },
    Delete {
        id: T::Id,
        response: Result<(), FrameworkError>,
    },
    Action {
        id: T::Id,
        response: Result<T::ActionResult, FrameworkError>,
    },
    Ensure {
        id: T::Id,
        response: Result<T::ActionResult, FrameworkError>,
    },
    Transaction {
        response: Result<Vec<T::ActionResult>, FrameworkError>,
    },
}

impl<T: ActorEntity> Expectation<T> {
    fn kind(&self) -> &'static str {
        match self {
            Expectation::Get { .. } => "Get",
            Expectation::List { .. } => "List",
            Expectation::Create { .. } => "Create",
            Expectation::Update { .. } => "Update",
            Expectation::Delete { .. } => "Delete",
            Expectation::Action { .. } => "Action",
            Expectation::Ensure { .. } => "Ensure",
            Expectation::Transaction { .. } => "Transaction",
        }
    }
}

type Queue<T> = Arc<Mutex<VecDeque<Expectation<T>>>>;

fn lock<T: ActorEntity>(queue: &Queue<T>) -> MutexGuard<'_, VecDeque<Expectation<T>>> {
    queue.lock().unwrap_or_else(PoisonError::into_inner)
}

fn reply<R>(respond_to: oneshot::Sender<Result<R, FrameworkError>>, response: Result<R, FrameworkError>) {
    let _ = respond_to.send(response);
}

fn check_id<I: PartialEq + std::fmt::Debug>(kind: &str, expected: &I, actual: &I) {
    assert_eq!(expected, actual, "{kind} called with an unexpected id");
}

/// A mock client with ordered expectations.
pub struct MockClient<T: ActorEntity> {
    client: ResourceClient<T>,
    expectations: Queue<T>,
    _handle: tokio::task::JoinHandle<()>,
}

impl<T: ActorEntity> Default for MockClient<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ActorEntity> MockClient<T> {
    /// Creates a mock with no expectations. Must be called inside a Tokio runtime.
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<ResourceRequest<T>>(100);
        let expectations: Queue<T> = Arc::new(Mutex::new(VecDeque::new()));
        let queue = expectations.clone();

        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                let expectation = lock(&queue).pop_front();

                match (request, expectation) {
                    (ResourceRequest::Get { id, respond_to }, Some(Expectation::Get { id: want, response })) => {
                        check_id("Get", &want, &id);
                        reply(respond_to, response);
                    }
                    (ResourceRequest::List { respond_to, .. }, Some(Expectation::List { response })) => {
                        reply(respond_to, response);
                    }
                    (ResourceRequest::Create { respond_to, .. }, Some(Expectation::Create { response })) => {
                        reply(respond_to, response);
                    }
                    (
                        ResourceRequest::Update { id, respond_to, .. },
                        Some(Expectation::Update { id: want, response }),
                    ) => {
                        check_id("Update", &want, &id);
                        reply(respond_to, response);
                    }
                    (
                        ResourceRequest::Delete { id, respond_to },
                        Some(Expectation::Delete { id: want, response }),
                    ) => {
                        check_id("Delete", &want, &id);
                        reply(respond_to, response);
                    }
                    (
                        ResourceRequest::Action { id, respond_to, .. },
                        Some(Expectation::Action { id: want, response }),
                    ) => {
                        check_id("Action", &want, &id);
                        reply(respond_to, response);
                    }
                    (
                        ResourceRequest::Ensure { id, respond_to, .. },
                        Some(Expectation::Ensure { id: want, response }),
                    ) => {
                        check_id("Ensure", &want, &id);
                        reply(respond_to, response);
                    }
                    (
                        ResourceRequest::Transaction { respond_to, .. },
                        Some(Expectation::Transaction { response }),
                    ) => {
                        reply(respond_to, response);
                    }
                    (request, Some(other)) => {
                        panic!("Expected {} request, got {:?}", other.kind(), request_kind(&request));
                    }
                    (request, None) => {
                        panic!("Unexpected {:?} request: no expectations left", request_kind(&request));
                    }
                }
            }
        });

        Self {
            client: ResourceClient::new(sender),
            expectations,
            _handle: handle,
        }
    }

    /// Returns the client for use in tests.
    pub fn client(&self) -> ResourceClient<T> {
        self.client.clone()
    }

    fn push(&self, expectation: Expectation<T>) {
        lock(&self.expectations).push_back(expectation);
    }

    pub fn expect_get(&mut self, id: T::Id) -> ExpectationBuilder<'_, T, Option<T>> {
        ExpectationBuilder::new(self, move |response| Expectation::Get { id, response })
    }

    pub fn expect_list(&mut self) -> ExpectationBuilder<'_, T, Vec<T>> {
        ExpectationBuilder::new(self, |response| Expectation::List { response })
    }

    pub fn expect_create(&mut self) -> ExpectationBuilder<'_, T, T::Id> {
        ExpectationBuilder::new(self, |response| Expectation::Create { response })
    }

    pub fn expect_update(&mut self, id: T::Id) -> ExpectationBuilder<'_, T, T> {
        ExpectationBuilder::new(self, move |response| Expectation::Update { id, response })
    }

    pub fn expect_delete(&mut self, id: T::Id) -> ExpectationBuilder<'_, T, ()> {
        ExpectationBuilder::new(self, move |response| Expectation::Delete { id, response })
    }

    pub fn expect_action(&mut self, id: T::Id) -> ExpectationBuilder<'_, T, T::ActionResult> {
        ExpectationBuilder::new(self, move |response| Expectation::Action { id, response })
    }

    pub fn expect_ensure(&mut self, id: T::Id) -> ExpectationBuilder<'_, T, T::ActionResult> {
        ExpectationBuilder::new(self, move |response| Expectation::Ensure { id, response })
    }

    pub fn expect_transaction(&mut self) -> ExpectationBuilder<'_, T, Vec<T::ActionResult>> {
        ExpectationBuilder::new(self, |response| Expectation::Transaction { response })
    }

    /// Panics if any expectation was not consumed.
    pub fn verify(&self) {
        let remaining = lock(&self.expectations);
        if !remaining.is_empty() {
            let kinds: Vec<&str> = remaining.iter().map(Expectation::kind).collect();
            panic!("Not all expectations were met. Remaining: {kinds:?}");
        }
    }
}

fn request_kind<T: ActorEntity>(request: &ResourceRequest<T>) -> &'static str {
    match request {
        ResourceRequest::Create { .. } => "Create",
        ResourceRequest::Get { .. } => "Get",
        ResourceRequest::List { .. } => "List",
        ResourceRequest::Update { .. } => "Update",
        ResourceRequest::Delete { .. } => "Delete",
        ResourceRequest::Action { .. } => "Action",
        ResourceRequest::Ensure { .. } => "Ensure",
        ResourceRequest::Transaction { .. } => "Transaction",
    }
}

/// Finishes an expectation with the value (or error) the mock should reply with.
pub struct ExpectationBuilder<'a, T: ActorEntity, R> {
    mock: &'a MockClient<T>,
    build: Box<dyn FnOnce(Result<R, FrameworkError>) -> Expectation<T> + 'a>,
}

impl<'a, T: ActorEntity, R> ExpectationBuilder<'a, T, R> {
    fn new(
        mock: &'a MockClient<T>,
        build: impl FnOnce(Result<R, FrameworkError>) -> Expectation<T> + 'a,
    ) -> Self {
        Self {
            mock,
            build: Box::new(build),
        }
    }

    pub fn return_ok(self, value: R) {
        self.mock.push((self.build)(Ok(value)));
    }

    pub fn return_err(self, error: FrameworkError) {
        self.mock.push((self.build)(Err(error)));
    }
}

// =============================================================================
// RAW RECEIVER HELPERS
// =============================================================================

/// Creates a client plus the receiving end of its channel, for tests that
/// want to inspect request payloads and answer by hand.
pub fn create_mock_client<T: ActorEntity>(
    buffer_size: usize,
) -> (ResourceClient<T>, mpsc::Receiver<ResourceRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (ResourceClient::new(sender), receiver)
}

/// Next request, if it is a Create.
pub async fn expect_create<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Create, oneshot::Sender<Result<T::Id, FrameworkError>>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Create { params, respond_to }) => Some((params, respond_to)),
        _ => None,
    }
}

/// Next request, if it is a Get.
pub async fn expect_get<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Id, oneshot::Sender<Result<Option<T>, FrameworkError>>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Get { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

/// Next request, if it is an Action.
pub async fn expect_action<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(
    T::Id,
    T::Action,
    oneshot::Sender<Result<T::ActionResult, FrameworkError>>,
)> {
    match receiver.recv().await {
        Some(ResourceRequest::Action {
            id,
            action,
            respond_to,
        }) => Some((id, action, respond_to)),
        _ => None,
    }
}

/// Next request, if it is an Ensure.
pub async fn expect_ensure<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(
    T::Id,
    T::Create,
    T::Action,
    oneshot::Sender<Result<T::ActionResult, FrameworkError>>,
)> {
    match receiver.recv().await {
        Some(ResourceRequest::Ensure {
            id,
            seed,
            action,
            respond_to,
        }) => Some((id, seed, action, respond_to)),
        _ => None,
    }
}

/// Next request, if it is a Transaction.
pub async fn expect_transaction<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(
    Vec<(T::Id, T::Action)>,
    oneshot::Sender<Result<Vec<T::ActionResult>, FrameworkError>>,
)> {
    match receiver.recv().await {
        Some(ResourceRequest::Transaction { ops, respond_to }) => Some((ops, respond_to)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    #[derive(Clone, Debug, PartialEq)]
    struct Voucher {
        id: u32,
        code: String,
        remaining: u32,
    }

    #[derive(Debug)]
    struct VoucherCreate {
        code: String,
    }

    #[derive(Debug)]
    struct VoucherUpdate;

    #[derive(Debug)]
    enum VoucherAction {
        Redeem,
    }

    #[derive(Debug, thiserror::Error)]
    #[error("voucher exhausted")]
    struct VoucherError;

    #[async_trait]
    impl ActorEntity for Voucher {
        type Id = u32;
        type Create = VoucherCreate;
        type Update = VoucherUpdate;
        type Action = VoucherAction;
        type ActionResult = u32;
        type Context = ();
        type Error = VoucherError;

        fn from_create_params(id: u32, params: VoucherCreate) -> Result<Self, Self::Error> {
            Ok(Self {
                id,
                code: params.code,
                remaining: 1,
            })
        }

        async fn on_update(&mut self, _: VoucherUpdate, _: &()) -> Result<(), Self::Error> {
            Ok(())
        }

        async fn handle_action(&mut self, _: VoucherAction, _: &()) -> Result<u32, Self::Error> {
            Ok(self.remaining)
        }
    }

    #[tokio::test]
    async fn raw_receiver_sees_create_payload() {
        let (client, mut receiver) = create_mock_client::<Voucher>(10);

        let task = tokio::spawn(async move {
            client
                .create(VoucherCreate {
                    code: "WELCOME".to_string(),
                })
                .await
        });

        let (payload, responder) = expect_create(&mut receiver)
            .await
            .expect("Expected Create request");
        assert_eq!(payload.code, "WELCOME");
        responder.send(Ok(9)).unwrap();

        assert_eq!(task.await.unwrap().unwrap(), 9);
    }

    #[tokio::test]
    async fn scripted_replies_in_order() {
        let mut mock = MockClient::<Voucher>::new();
        mock.expect_create().return_ok(1);
        mock.expect_get(1).return_ok(Some(Voucher {
            id: 1,
            code: "WELCOME".to_string(),
            remaining: 1,
        }));
        mock.expect_ensure(2).return_ok(0);
        mock.expect_action(1)
            .return_err(FrameworkError::EntityError(Box::new(VoucherError)));

        let client = mock.client();
        let id = client
            .create(VoucherCreate {
                code: "WELCOME".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(id, 1);
        assert_eq!(client.get(1).await.unwrap().unwrap().code, "WELCOME");

        let seed = VoucherCreate {
            code: "SPRING".to_string(),
        };
        let left = client
            .ensure_and_perform(2, seed, VoucherAction::Redeem)
            .await
            .unwrap();
        assert_eq!(left, 0);

        let err = client.perform_action(1, VoucherAction::Redeem).await.unwrap_err();
        assert!(err.downcast::<VoucherError>().is_ok());

        mock.verify();
    }

    #[tokio::test]
    async fn mismatched_request_drops_reply() {
        let mut mock = MockClient::<Voucher>::new();
        mock.expect_list().return_ok(vec![]);

        let result = mock.client().get(1).await;
        assert!(matches!(result, Err(FrameworkError::ActorDropped)));
    }
}
