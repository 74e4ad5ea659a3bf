//! # Collection Messages
//!
//! Message types exchanged between a `CollectionClient` and its `CollectionActor`.

use crate::error::StoreError;
use crate::feed::{Snapshot, Subscription};
use crate::key::PushKey;
use crate::record::Record;
use tokio::sync::oneshot;

/// Type alias for the one-shot response channel used by actors.
pub type Response<T> = oneshot::Sender<Result<T, StoreError>>;

/// Point-in-time counters for one collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollectionStats {
    pub records: usize,
    pub subscribers: usize,
    pub version: u64,
}

/// Requests understood by a collection actor.
///
/// The store is append-only from the client's point of view: records are
/// pushed or set, read back, and observed, but never updated in place or
/// deleted through this API.
///
/// - **Push**: allocate a key and store a record built from a draft.
/// - **ReserveKey**: allocate a key without writing anything.
/// - **Set**: store a complete record under a given key.
/// - **Get** / **Snapshot**: read one record or the whole collection.
/// - **Subscribe**: open a live feed of snapshots.
/// - **Stats**: counters used for logging and tests.
#[derive(Debug)]
pub enum CollectionRequest<T: Record> {
    Push {
        draft: T::Draft,
        respond_to: Response<PushKey>,
    },
    ReserveKey {
        respond_to: Response<PushKey>,
    },
    Set {
        key: PushKey,
        record: T,
        respond_to: Response<()>,
    },
    Get {
        key: PushKey,
        respond_to: Response<Option<T>>,
    },
    Snapshot {
        respond_to: Response<Snapshot<T>>,
    },
    Subscribe {
        respond_to: Response<Subscription<T>>,
    },
    Stats {
        respond_to: Response<CollectionStats>,
    },
}
