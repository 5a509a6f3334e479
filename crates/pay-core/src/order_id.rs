//! # Order-ID Sequencer
//!
//! Human-readable, date-scoped order identifiers of the form
//! `<PREFIX>-<YYYYMMDD>-<NNN>`.
//!
//! The counter is owned by a single `OrderIdSequencer` behind a mutex and is
//! injected into the gateway rather than living in a global. Uniqueness holds
//! only within one running process: two instances sharing a prefix will hand
//! out the same identifiers.

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Mutex;

/// Default order id prefix
pub const DEFAULT_ORDER_PREFIX: &str = "CUBE";

/// A generated or caller-supplied order identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(String);

impl OrderId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for OrderId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

#[derive(Debug, Default)]
struct SequenceState {
    last_date: Option<NaiveDate>,
    counter: u64,
}

/// Source of "today" for the sequencer
pub type DateSource = Box<dyn Fn() -> NaiveDate + Send + Sync>;

/// Process-wide order id counter, reset on calendar day rollover.
pub struct OrderIdSequencer {
    prefix: String,
    today: DateSource,
    state: Mutex<SequenceState>,
}

impl OrderIdSequencer {
    /// Create a sequencer with the given prefix, dated by the server-local clock
    pub fn new(prefix: impl Into<String>) -> Self {
        Self::with_clock(prefix, || Local::now().date_naive())
    }

    /// Create a sequencer with an explicit date source
    pub fn with_clock(
        prefix: impl Into<String>,
        today: impl Fn() -> NaiveDate + Send + Sync + 'static,
    ) -> Self {
        Self {
            prefix: prefix.into(),
            today: Box::new(today),
            state: Mutex::new(SequenceState::default()),
        }
    }

    /// Next identifier for today.
    ///
    /// The date is read and the counter compared and incremented under one
    /// lock, so two concurrent callers never observe the same pre-increment
    /// counter. The recorded day never moves backwards: a clock that steps
    /// back keeps counting on the later day instead of restarting at 001.
    pub fn next(&self) -> OrderId {
        let (date, seq) = {
            // Poisoning only means another caller panicked mid-format; the
            // counter itself is always consistent.
            let mut state = self
                .state
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner());

            let today = (self.today)();
            match state.last_date {
                Some(last) if today <= last => state.counter += 1,
                _ => {
                    state.last_date = Some(today);
                    state.counter = 1;
                }
            }
            (state.last_date.unwrap_or(today), state.counter)
        };

        OrderId(format!("{}-{}-{:03}", self.prefix, date.format("%Y%m%d"), seq))
    }
}

impl Default for OrderIdSequencer {
    fn default() -> Self {
        Self::new(DEFAULT_ORDER_PREFIX)
    }
}

impl fmt::Debug for OrderIdSequencer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OrderIdSequencer")
            .field("prefix", &self.prefix)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::Arc;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    /// Sequencer whose date is controlled by the returned handle
    fn sequencer_on(prefix: &str, start: NaiveDate) -> (OrderIdSequencer, Arc<Mutex<NaiveDate>>) {
        let day = Arc::new(Mutex::new(start));
        let clock = Arc::clone(&day);
        let seq = OrderIdSequencer::with_clock(prefix, move || *clock.lock().unwrap());
        (seq, day)
    }

    #[test]
    fn test_same_day_sequence() {
        let (seq, _) = sequencer_on("CUBE", date(2026, 10, 18));

        assert_eq!(seq.next().as_str(), "CUBE-20261018-001");
        assert_eq!(seq.next().as_str(), "CUBE-20261018-002");
        assert_eq!(seq.next().as_str(), "CUBE-20261018-003");
    }

    #[test]
    fn test_day_rollover_resets_counter() {
        let (seq, day) = sequencer_on("SHOP", date(2026, 10, 18));

        seq.next();
        seq.next();
        *day.lock().unwrap() = date(2026, 10, 19);

        assert_eq!(seq.next().as_str(), "SHOP-20261019-001");
    }

    #[test]
    fn test_stale_date_does_not_reset_counter() {
        let (seq, day) = sequencer_on("CUBE", date(2026, 10, 18));

        let first = seq.next();
        seq.next();
        *day.lock().unwrap() = date(2026, 10, 17);
        let stale = seq.next();
        *day.lock().unwrap() = date(2026, 10, 18);
        let after = seq.next();

        assert_eq!(stale.as_str(), "CUBE-20261018-003");
        assert_eq!(after.as_str(), "CUBE-20261018-004");
        assert_ne!(after, first);
    }

    #[test]
    fn test_counter_grows_past_three_digits() {
        let (seq, _) = sequencer_on("CUBE", date(2026, 1, 2));

        let last = (0..1000).map(|_| seq.next()).last().unwrap();
        assert_eq!(last.as_str(), "CUBE-20260102-1000");
    }

    #[test]
    fn test_concurrent_ids_are_unique() {
        let seq = Arc::new(sequencer_on("CUBE", date(2026, 10, 18)).0);

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let seq = Arc::clone(&seq);
                std::thread::spawn(move || (0..250).map(|_| seq.next()).collect::<Vec<_>>())
            })
            .collect();

        let mut seen = HashSet::new();
        for handle in handles {
            for id in handle.join().unwrap() {
                assert!(seen.insert(id), "duplicate order id issued");
            }
        }
        assert_eq!(seen.len(), 2000);
    }

    #[test]
    fn test_default_uses_local_date() {
        let seq = OrderIdSequencer::default();
        let today = Local::now().date_naive().format("%Y%m%d").to_string();

        assert!(seq.next().as_str().starts_with(&format!("CUBE-{}-", today)));
    }
}
