//! # Push Keys
//!
//! Every record written to a collection is stored under a [`PushKey`]: a
//! 20-character string whose first 8 characters encode the write time in
//! milliseconds and whose last 12 characters are random.
//!
//! The alphabet is listed in ASCII order, so comparing two keys as strings
//! compares their timestamps first. A [`PushKeyGenerator`] additionally
//! guarantees that the keys it hands out are strictly increasing, even when
//! several keys are generated within the same millisecond or the wall clock
//! steps backwards.

use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// The 64 symbols used by push keys, in ASCII order.
const PUSH_CHARS: &[u8; 64] = b"-0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ_abcdefghijklmnopqrstuvwxyz";

const TIME_CHARS: usize = 8;
const RANDOM_CHARS: usize = 12;

/// Length of every generated key.
pub const PUSH_KEY_LEN: usize = TIME_CHARS + RANDOM_CHARS;

/// Store-assigned record key.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PushKey(String);

impl PushKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Decodes the write time embedded in the key.
    ///
    /// Returns `None` for keys that were not produced by a [`PushKeyGenerator`].
    pub fn timestamp_millis(&self) -> Option<u64> {
        if self.0.len() != PUSH_KEY_LEN {
            return None;
        }
        self.0.as_bytes()[..TIME_CHARS]
            .iter()
            .try_fold(0u64, |acc, byte| {
                let digit = PUSH_CHARS.iter().position(|c| c == byte)? as u64;
                Some(acc * 64 + digit)
            })
    }
}

impl From<String> for PushKey {
    fn from(raw: String) -> Self {
        Self(raw)
    }
}

impl From<&str> for PushKey {
    fn from(raw: &str) -> Self {
        Self(raw.to_string())
    }
}

impl Display for PushKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Generates strictly increasing [`PushKey`]s.
///
/// One generator is owned by each collection actor, so every key issued by a
/// collection sorts after the keys it issued before.
#[derive(Debug, Default)]
pub struct PushKeyGenerator {
    last_millis: Option<u64>,
    last_random: [u8; RANDOM_CHARS],
}

impl PushKeyGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Generates a key stamped with the current wall-clock time.
    pub fn next_key(&mut self) -> PushKey {
        let now = chrono::Utc::now().timestamp_millis().max(0) as u64;
        self.next_at(now)
    }

    /// Generates a key stamped with `millis`.
    ///
    /// A timestamp earlier than the previous one is clamped to the previous
    /// one so ordering survives clock adjustments.
    pub fn next_at(&mut self, millis: u64) -> PushKey {
        let mut millis = match self.last_millis {
            Some(last) => millis.max(last),
            None => millis,
        };

        if self.last_millis == Some(millis) {
            if !increment(&mut self.last_random) {
                // Suffix space for this millisecond is exhausted.
                millis += 1;
                self.last_random = random_suffix();
            }
        } else {
            self.last_random = random_suffix();
        }
        self.last_millis = Some(millis);

        let mut key = [0u8; PUSH_KEY_LEN];
        let mut remaining = millis;
        for slot in key[..TIME_CHARS].iter_mut().rev() {
            *slot = PUSH_CHARS[(remaining % 64) as usize];
            remaining /= 64;
        }
        for (slot, digit) in key[TIME_CHARS..].iter_mut().zip(self.last_random) {
            *slot = PUSH_CHARS[digit as usize];
        }

        PushKey(key.iter().map(|&b| b as char).collect())
    }
}

/// Adds one to the base-64 suffix. Returns `false` on overflow.
fn increment(suffix: &mut [u8; RANDOM_CHARS]) -> bool {
    for digit in suffix.iter_mut().rev() {
        if *digit == 63 {
            *digit = 0;
        } else {
            *digit += 1;
            return true;
        }
    }
    false
}

fn random_suffix() -> [u8; RANDOM_CHARS] {
    let bytes = uuid::Uuid::new_v4().into_bytes();
    let mut suffix = [0u8; RANDOM_CHARS];
    for (digit, byte) in suffix.iter_mut().zip(bytes) {
        *digit = byte % 64;
    }
    suffix
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys_have_fixed_length_and_alphabet() {
        let mut keys = PushKeyGenerator::new();
        let key = keys.next_key();
        assert_eq!(key.as_str().len(), PUSH_KEY_LEN);
        assert!(key.as_str().bytes().all(|b| PUSH_CHARS.contains(&b)));
    }

    #[test]
    fn test_same_millisecond_keys_are_strictly_increasing() {
        let mut keys = PushKeyGenerator::new();
        let mut previous = keys.next_at(1_700_000_000_000);
        for _ in 0..500 {
            let next = keys.next_at(1_700_000_000_000);
            assert!(next > previous, "{next} should sort after {previous}");
            previous = next;
        }
    }

    #[test]
    fn test_clock_going_backwards_keeps_order() {
        let mut keys = PushKeyGenerator::new();
        let first = keys.next_at(2_000);
        let second = keys.next_at(1_000);
        assert!(second > first);
        assert_eq!(second.timestamp_millis(), Some(2_000));
    }

    #[test]
    fn test_timestamp_round_trips_through_key() {
        let mut keys = PushKeyGenerator::new();
        let key = keys.next_at(1_718_000_123_456);
        assert_eq!(key.timestamp_millis(), Some(1_718_000_123_456));
    }

    #[test]
    fn test_later_millisecond_sorts_later() {
        let mut a = PushKeyGenerator::new();
        let mut b = PushKeyGenerator::new();
        assert!(b.next_at(1_001) > a.next_at(1_000));
    }

    #[test]
    fn test_foreign_keys_have_no_timestamp() {
        assert_eq!(PushKey::from("sale_1").timestamp_millis(), None);
    }

    #[test]
    fn test_suffix_overflow_moves_to_next_millisecond() {
        let mut keys = PushKeyGenerator::new();
        let first = keys.next_at(5_000);
        keys.last_random = [63; RANDOM_CHARS];
        let second = keys.next_at(5_000);
        assert!(second > first);
        assert_eq!(second.timestamp_millis(), Some(5_001));
    }
}
