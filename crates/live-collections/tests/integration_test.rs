use async_trait::async_trait;
use live_collections::key::PUSH_KEY_LEN;
use live_collections::{CollectionActor, PushKey, Record, StoreError};

// --- Test Record ---

#[derive(Clone, Debug, PartialEq)]
struct Note {
    key: PushKey,
    text: String,
}

#[derive(Debug, thiserror::Error)]
enum NoteError {
    #[error("Note text is empty")]
    Empty,
    #[error("Note contains banned word: {0}")]
    Banned(String),
}

#[async_trait]
impl Record for Note {
    type Draft = String;
    type Context = Vec<String>;
    type Error = NoteError;

    fn from_draft(key: PushKey, text: String) -> Result<Self, Self::Error> {
        if text.trim().is_empty() {
            return Err(NoteError::Empty);
        }
        Ok(Self { key, text })
    }

    fn key(&self) -> &PushKey {
        &self.key
    }

    async fn on_write(&mut self, banned: &Vec<String>) -> Result<(), Self::Error> {
        match banned.iter().find(|word| self.text.contains(word.as_str())) {
            Some(word) => Err(NoteError::Banned(word.clone())),
            None => Ok(()),
        }
    }
}

fn start() -> live_collections::CollectionClient<Note> {
    let (actor, client) = CollectionActor::<Note>::new("notes", 10);
    tokio::spawn(actor.run(vec!["spam".to_string()]));
    client
}

// --- Tests ---

#[tokio::test]
async fn test_push_get_and_snapshot_order() {
    let notes = start();

    let first = notes.push("first".into()).await.unwrap();
    let second = notes.push("second".into()).await.unwrap();
    let third = notes.push("third".into()).await.unwrap();

    assert_eq!(first.as_str().len(), PUSH_KEY_LEN);
    assert!(first < second && second < third);

    let fetched = notes.get(second.clone()).await.unwrap().unwrap();
    assert_eq!(fetched.text, "second");
    assert_eq!(fetched.key, second);

    let snapshot = notes.snapshot().await.unwrap();
    let texts: Vec<_> = snapshot.values().map(|n| n.text.as_str()).collect();
    assert_eq!(texts, vec!["first", "second", "third"]);
    assert_eq!(snapshot.version(), 3);

    assert!(notes.get(PushKey::from("missing")).await.unwrap().is_none());
}

#[tokio::test]
async fn test_rejected_writes_leave_collection_untouched() {
    let notes = start();
    notes.push("keep me".into()).await.unwrap();

    let empty = notes.push("   ".into()).await;
    assert!(matches!(empty, Err(StoreError::Rejected(_))));

    let banned = notes.push("buy spam now".into()).await;
    match banned {
        Err(StoreError::Rejected(e)) => assert!(e.to_string().contains("spam")),
        other => panic!("expected rejection, got {:?}", other),
    }

    let stats = notes.stats().await.unwrap();
    assert_eq!(stats.records, 1);
    assert_eq!(stats.version, 1);
}

#[tokio::test]
async fn test_reserve_key_then_set() {
    let notes = start();

    let key = notes.reserve_key().await.unwrap();
    assert!(notes.get(key.clone()).await.unwrap().is_none());

    let note = Note {
        key: key.clone(),
        text: "embedded".into(),
    };
    notes.set(key.clone(), note.clone()).await.unwrap();
    assert_eq!(notes.get(key).await.unwrap(), Some(note));

    // set runs the write hook too
    let bad_key = notes.reserve_key().await.unwrap();
    let bad = Note {
        key: bad_key.clone(),
        text: "spam".into(),
    };
    assert!(notes.set(bad_key, bad).await.is_err());
    assert_eq!(notes.snapshot().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_set_rejects_record_under_foreign_key() {
    let notes = start();
    let key = notes.reserve_key().await.unwrap();
    let other = notes.reserve_key().await.unwrap();

    let note = Note {
        key: other,
        text: "misfiled".into(),
    };
    let result = notes.set(key.clone(), note).await;

    assert!(matches!(result, Err(StoreError::KeyMismatch { .. })));
    assert!(notes.get(key).await.unwrap().is_none());
}

#[tokio::test]
async fn test_subscription_delivers_current_then_each_write() {
    let notes = start();
    notes.push("before".into()).await.unwrap();

    let mut feed = notes.subscribe().await.unwrap();
    let initial = feed.next().await.unwrap();
    assert_eq!(initial.len(), 1);

    notes.push("after".into()).await.unwrap();
    let updated = feed.next().await.unwrap();
    let texts: Vec<_> = updated.values().map(|n| n.text.clone()).collect();
    assert_eq!(texts, vec!["before", "after"]);

    // A rejected write publishes nothing.
    let _ = notes.push("spam".into()).await;
    notes.push("last".into()).await.unwrap();
    let latest = feed.next().await.unwrap();
    assert_eq!(latest.len(), 3);
    assert_eq!(latest.version(), initial.version() + 2);
}

#[tokio::test]
async fn test_lagging_subscriber_sees_only_latest() {
    let notes = start();
    let mut feed = notes.subscribe().await.unwrap();
    feed.next().await.unwrap();

    for i in 0..5 {
        notes.push(format!("note {}", i)).await.unwrap();
    }

    let snapshot = feed.next().await.unwrap();
    assert_eq!(snapshot.len(), 5);
    assert_eq!(snapshot.version(), 5);
}

#[tokio::test]
async fn test_dropping_subscription_unsubscribes() {
    let notes = start();
    let first = notes.subscribe().await.unwrap();
    let second = notes.subscribe().await.unwrap();
    assert_eq!(notes.stats().await.unwrap().subscribers, 2);

    drop(first);
    assert_eq!(notes.stats().await.unwrap().subscribers, 1);

    drop(second);
    assert_eq!(notes.stats().await.unwrap().subscribers, 0);
}

#[tokio::test]
async fn test_subscription_ends_when_collection_shuts_down() {
    let (actor, notes) = CollectionActor::<Note>::new("notes", 10);
    let handle = tokio::spawn(actor.run(Vec::new()));

    let mut feed = notes.subscribe().await.unwrap();
    feed.next().await.unwrap();

    drop(notes);
    handle.await.unwrap();

    assert!(matches!(feed.next().await, Err(StoreError::ActorClosed)));
}

#[tokio::test]
async fn test_concurrent_pushes_get_distinct_ordered_keys() {
    let notes = start();

    let mut handles = Vec::new();
    for i in 0..20 {
        let notes = notes.clone();
        handles.push(tokio::spawn(
            async move { notes.push(format!("note {}", i)).await },
        ));
    }

    let mut keys = Vec::new();
    for handle in handles {
        keys.push(handle.await.unwrap().unwrap());
    }

    let snapshot = notes.snapshot().await.unwrap();
    assert_eq!(snapshot.len(), 20);

    keys.sort();
    keys.dedup();
    assert_eq!(keys.len(), 20);
    let stored: Vec<_> = snapshot.iter().map(|(k, _)| k.clone()).collect();
    assert_eq!(stored, keys);
}
