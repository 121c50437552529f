//! Session-scoped tier caches.
//!
//! Each session gets its own [`TierCache`], so memoized tiers never cross
//! session boundaries. Requests without a session id resolve through a
//! throwaway cache.
//!
//! Session ids come from a client header, so the registry is bounded: a
//! session idle for a full TTL holds only expired entries and is dropped when
//! a new session arrives, and past `max_sessions` the least recently used
//! session is evicted.

use crate::domain::{Order, SellerId, TierName, TimeMs};
use crate::engine::{Clock, TierCache};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

pub const DEFAULT_MAX_SESSIONS: usize = 10_000;

struct SessionSlot {
    cache: TierCache<Arc<dyn Clock>>,
    last_used: TimeMs,
}

pub struct SessionCaches {
    caches: Mutex<HashMap<String, SessionSlot>>,
    ttl: Duration,
    max_sessions: usize,
    clock: Arc<dyn Clock>,
}

impl SessionCaches {
    pub fn new(ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            caches: Mutex::new(HashMap::new()),
            ttl,
            max_sessions: DEFAULT_MAX_SESSIONS,
            clock,
        }
    }

    /// Caps the number of live sessions. At least one is always allowed.
    pub fn with_max_sessions(mut self, max_sessions: usize) -> Self {
        self.max_sessions = max_sessions.max(1);
        self
    }

    pub fn resolve(&self, session: Option<&str>, seller: &SellerId, orders: &[Order]) -> TierName {
        match session {
            Some(session_id) => {
                let now = self.clock.now();
                let mut caches = self.caches.lock();
                if !caches.contains_key(session_id) {
                    self.make_room(&mut caches, now);
                }
                let slot = caches
                    .entry(session_id.to_string())
                    .or_insert_with(|| SessionSlot {
                        cache: TierCache::with_clock(self.ttl, self.clock.clone()),
                        last_used: now,
                    });
                slot.last_used = now;
                slot.cache.resolve(Some(seller), orders)
            }
            None => {
                let mut scratch = TierCache::with_clock(self.ttl, self.clock.clone());
                scratch.resolve(Some(seller), orders)
            }
        }
    }

    /// Drops idle sessions, then evicts least recently used ones until a new
    /// session fits under the cap.
    fn make_room(&self, caches: &mut HashMap<String, SessionSlot>, now: TimeMs) {
        let ttl_ms = i64::try_from(self.ttl.as_millis()).unwrap_or(i64::MAX);
        let before = caches.len();
        caches.retain(|_, slot| now.millis_since(slot.last_used) < ttl_ms);

        while caches.len() >= self.max_sessions {
            let oldest = caches
                .iter()
                .min_by_key(|(_, slot)| slot.last_used)
                .map(|(id, _)| id.clone());
            match oldest {
                Some(id) => {
                    caches.remove(&id);
                }
                None => break,
            }
        }

        let dropped = before - caches.len();
        if dropped > 0 {
            tracing::debug!(dropped, remaining = caches.len(), "pruned session caches");
        }
    }

    pub fn session_count(&self) -> usize {
        self.caches.lock().len()
    }

    /// Entries held by one session's cache.
    pub fn entries_in(&self, session_id: &str) -> usize {
        self.caches
            .lock()
            .get(session_id)
            .map(|slot| slot.cache.len())
            .unwrap_or(0)
    }
}

impl std::fmt::Debug for SessionCaches {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionCaches")
            .field("sessions", &self.session_count())
            .field("ttl", &self.ttl)
            .field("max_sessions", &self.max_sessions)
            .finish()
    }
}
