//! # Mock Collections
//!
//! `MockCollection<T>` hands out a real `CollectionClient<T>` whose requests
//! are answered from a queue of expectations instead of a running actor. Use
//! it to test code that sits *around* a collection (page state machines,
//! domain clients) deterministically, including failures that a live actor
//! never produces, such as `StoreError::Unavailable`.
//!
//! | | MockCollection | Real actor |
//! |---|---|---|
//! | **State** | none, replies are scripted | real records |
//! | **Error injection** | `return_err` | only hook rejections |
//! | **Live feeds** | driven by hand through [`MockFeed`] | driven by writes |
//!
//! ```rust
//! use live_collections::mock::MockCollection;
//! use live_collections::{PushKey, Record, StoreError};
//!
//! #[derive(Clone, Debug, PartialEq)]
//! struct Note { key: PushKey, text: String }
//! #[derive(Debug, thiserror::Error)] #[error("note error")] struct NoteError;
//!
//! impl Record for Note {
//!     type Draft = String; type Context = (); type Error = NoteError;
//!     fn from_draft(key: PushKey, text: String) -> Result<Self, NoteError> { Ok(Self { key, text }) }
//!     fn key(&self) -> &PushKey { &self.key }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let mut mock = MockCollection::<Note>::new("notes");
//!     mock.expect_push().return_err(StoreError::Unavailable("offline".into()));
//!
//!     let client = mock.client();
//!     let result = client.push("hello".to_string()).await;
//!     assert!(matches!(result, Err(StoreError::Unavailable(_))));
//!     mock.verify();
//! }
//! ```
//!
//! For lower-level control, [`create_mock_client`] returns a client plus the
//! raw request receiver, and the `expect_*` functions pull typed requests off it.

use crate::client::CollectionClient;
use crate::error::StoreError;
use crate::feed::{Snapshot, Subscription};
use crate::key::PushKey;
use crate::message::{CollectionRequest, Response};
use crate::record::Record;
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::Arc;
use tokio::sync::{mpsc, watch};

enum Expectation<T: Record> {
    Push(Result<PushKey, StoreError>),
    ReserveKey(Result<PushKey, StoreError>),
    Set(Result<(), StoreError>),
    Get(Result<Option<T>, StoreError>),
    Snapshot(Result<Snapshot<T>, StoreError>),
    Subscribe(Result<Subscription<T>, StoreError>),
}

type Expectations<T> = Arc<Mutex<VecDeque<Expectation<T>>>>;

/// A scripted stand-in for a collection actor.
pub struct MockCollection<T: Record> {
    client: CollectionClient<T>,
    expectations: Expectations<T>,
    received: Arc<Mutex<Vec<T>>>,
    _handle: tokio::task::JoinHandle<()>,
}

impl<T: Record> MockCollection<T> {
    /// Creates a mock with no expectations. Must be called inside a runtime.
    pub fn new(name: &str) -> Self {
        let (sender, mut receiver) = mpsc::channel::<CollectionRequest<T>>(100);
        let expectations: Expectations<T> = Arc::new(Mutex::new(VecDeque::new()));
        let received = Arc::new(Mutex::new(Vec::new()));
        let queue = Arc::clone(&expectations);
        let sets = Arc::clone(&received);

        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                let expectation = queue.lock().pop_front();

                match (request, expectation) {
                    (CollectionRequest::Push { respond_to, .. }, Some(Expectation::Push(r))) => {
                        let _ = respond_to.send(r);
                    }
                    (
                        CollectionRequest::ReserveKey { respond_to },
                        Some(Expectation::ReserveKey(r)),
                    ) => {
                        let _ = respond_to.send(r);
                    }
                    (
                        CollectionRequest::Set {
                            record, respond_to, ..
                        },
                        Some(Expectation::Set(r)),
                    ) => {
                        if r.is_ok() {
                            sets.lock().push(record);
                        }
                        let _ = respond_to.send(r);
                    }
                    (CollectionRequest::Get { respond_to, .. }, Some(Expectation::Get(r))) => {
                        let _ = respond_to.send(r);
                    }
                    (
                        CollectionRequest::Snapshot { respond_to },
                        Some(Expectation::Snapshot(r)),
                    ) => {
                        let _ = respond_to.send(r);
                    }
                    (
                        CollectionRequest::Subscribe { respond_to },
                        Some(Expectation::Subscribe(r)),
                    ) => {
                        let _ = respond_to.send(r);
                    }
                    _ => {
                        panic!("Unexpected request or expectation mismatch");
                    }
                }
            }
        });

        Self {
            client: CollectionClient::new(name, sender),
            expectations,
            received,
            _handle: handle,
        }
    }

    pub fn client(&self) -> CollectionClient<T> {
        self.client.clone()
    }

    pub fn expect_push(&mut self) -> ExpectationBuilder<T, PushKey> {
        self.builder(Expectation::Push)
    }

    pub fn expect_reserve_key(&mut self) -> ExpectationBuilder<T, PushKey> {
        self.builder(Expectation::ReserveKey)
    }

    /// Records passed to successful `set` calls are kept; see [`MockCollection::written`].
    pub fn expect_set(&mut self) -> ExpectationBuilder<T, ()> {
        self.builder(Expectation::Set)
    }

    pub fn expect_get(&mut self) -> ExpectationBuilder<T, Option<T>> {
        self.builder(Expectation::Get)
    }

    pub fn expect_snapshot(&mut self) -> ExpectationBuilder<T, Snapshot<T>> {
        self.builder(Expectation::Snapshot)
    }

    pub fn expect_subscribe(&mut self) -> SubscribeExpectationBuilder<T> {
        SubscribeExpectationBuilder {
            expectations: Arc::clone(&self.expectations),
        }
    }

    /// Records accepted by `set`, in arrival order.
    pub fn written(&self) -> Vec<T> {
        self.received.lock().clone()
    }

    /// Panics if any expectation was not consumed.
    pub fn verify(&self) {
        let remaining = self.expectations.lock().len();
        if remaining != 0 {
            panic!("Not all expectations were met. {} remaining", remaining);
        }
    }

    fn builder<R>(&self, wrap: fn(Result<R, StoreError>) -> Expectation<T>) -> ExpectationBuilder<T, R> {
        ExpectationBuilder {
            wrap,
            expectations: Arc::clone(&self.expectations),
        }
    }
}

/// Queues the reply for one expected request.
pub struct ExpectationBuilder<T: Record, R> {
    wrap: fn(Result<R, StoreError>) -> Expectation<T>,
    expectations: Expectations<T>,
}

impl<T: Record, R> ExpectationBuilder<T, R> {
    pub fn return_ok(self, value: R) {
        self.expectations.lock().push_back((self.wrap)(Ok(value)));
    }

    pub fn return_err(self, error: StoreError) {
        self.expectations.lock().push_back((self.wrap)(Err(error)));
    }
}

/// Queues the reply for an expected `subscribe`.
pub struct SubscribeExpectationBuilder<T: Record> {
    expectations: Expectations<T>,
}

impl<T: Record> SubscribeExpectationBuilder<T> {
    /// Replies with a subscription driven by the returned [`MockFeed`].
    pub fn return_feed(self) -> MockFeed<T> {
        let (sender, receiver) = watch::channel(Snapshot::empty());
        self.expectations
            .lock()
            .push_back(Expectation::Subscribe(Ok(Subscription::new(receiver))));
        MockFeed { sender, version: 0 }
    }

    pub fn return_err(self, error: StoreError) {
        self.expectations
            .lock()
            .push_back(Expectation::Subscribe(Err(error)));
    }
}

/// The publishing side of a mocked subscription.
pub struct MockFeed<T: Record> {
    sender: watch::Sender<Snapshot<T>>,
    version: u64,
}

impl<T: Record> MockFeed<T> {
    /// Publishes `records` as the collection's new contents.
    pub fn publish(&mut self, records: Vec<T>) {
        self.version += 1;
        self.sender
            .send_replace(Snapshot::from_records(self.version, records));
    }

    /// Ends the feed, as if the collection had shut down.
    pub fn close(self) {
        drop(self.sender);
    }
}

/// Creates a client and the receiver its requests land on.
///
/// Pair with the `expect_*` helpers to answer each request by hand.
pub fn create_mock_client<T: Record>(
    buffer_size: usize,
) -> (CollectionClient<T>, mpsc::Receiver<CollectionRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (CollectionClient::new("mock", sender), receiver)
}

/// Helper to verify that the next message is a Push request
pub async fn expect_push<T: Record>(
    receiver: &mut mpsc::Receiver<CollectionRequest<T>>,
) -> Option<(T::Draft, Response<PushKey>)> {
    match receiver.recv().await {
        Some(CollectionRequest::Push { draft, respond_to }) => Some((draft, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a ReserveKey request
pub async fn expect_reserve_key<T: Record>(
    receiver: &mut mpsc::Receiver<CollectionRequest<T>>,
) -> Option<Response<PushKey>> {
    match receiver.recv().await {
        Some(CollectionRequest::ReserveKey { respond_to }) => Some(respond_to),
        _ => None,
    }
}

/// Helper to verify that the next message is a Set request
pub async fn expect_set<T: Record>(
    receiver: &mut mpsc::Receiver<CollectionRequest<T>>,
) -> Option<(PushKey, T, Response<()>)> {
    match receiver.recv().await {
        Some(CollectionRequest::Set {
            key,
            record,
            respond_to,
        }) => Some((key, record, respond_to)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug, PartialEq)]
    struct Note {
        key: PushKey,
        text: String,
    }

    #[derive(Debug, thiserror::Error)]
    #[error("note error")]
    struct NoteError;

    impl Record for Note {
        type Draft = String;
        type Context = ();
        type Error = NoteError;

        fn from_draft(key: PushKey, text: String) -> Result<Self, Self::Error> {
            Ok(Self { key, text })
        }

        fn key(&self) -> &PushKey {
            &self.key
        }
    }

    fn note(key: &str, text: &str) -> Note {
        Note {
            key: PushKey::from(key),
            text: text.to_string(),
        }
    }

    #[tokio::test]
    async fn test_mock_client() {
        let (client, mut receiver) = create_mock_client::<Note>(10);

        let push_task = tokio::spawn(async move { client.push("hello".to_string()).await });

        let (draft, responder) = expect_push(&mut receiver)
            .await
            .expect("Expected Push request");
        assert_eq!(draft, "hello");
        responder.send(Ok(PushKey::from("k1"))).unwrap();

        let result = push_task.await.unwrap();
        assert_eq!(result.unwrap(), PushKey::from("k1"));
    }

    #[tokio::test]
    async fn test_mock_collection_with_expectations() {
        let mut mock = MockCollection::<Note>::new("notes");
        mock.expect_reserve_key().return_ok(PushKey::from("k1"));
        mock.expect_set().return_ok(());
        mock.expect_get().return_ok(Some(note("k1", "hello")));

        let client = mock.client();
        let key = client.reserve_key().await.unwrap();
        client.set(key.clone(), note("k1", "hello")).await.unwrap();
        let fetched = client.get(key).await.unwrap();

        assert_eq!(fetched, Some(note("k1", "hello")));
        assert_eq!(mock.written(), vec![note("k1", "hello")]);
        mock.verify();
    }

    #[tokio::test]
    async fn test_mock_feed_drives_subscription() {
        let mut mock = MockCollection::<Note>::new("notes");
        let mut feed = mock.expect_subscribe().return_feed();

        let mut subscription = mock.client().subscribe().await.unwrap();
        assert!(subscription.next().await.unwrap().is_empty());

        feed.publish(vec![note("a", "first"), note("b", "second")]);
        let snapshot = subscription.next().await.unwrap();
        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot.version(), 1);

        feed.close();
        assert!(matches!(
            subscription.next().await,
            Err(StoreError::ActorClosed)
        ));
    }

    #[tokio::test]
    async fn test_failed_set_is_not_recorded() {
        let mut mock = MockCollection::<Note>::new("notes");
        mock.expect_set()
            .return_err(StoreError::Unavailable("offline".into()));

        let result = mock.client().set(PushKey::from("k1"), note("k1", "x")).await;
        assert!(matches!(result, Err(StoreError::Unavailable(_))));
        assert!(mock.written().is_empty());
    }
}
