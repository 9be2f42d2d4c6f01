//! Per-client game state keyed by the session cookie.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::MutexGuard;
use std::sync::PoisonError;
use std::time::Duration;
use std::time::Instant;

use lexapprox_core::Session;
use tracing::debug;
use tracing::warn;
use uuid::Uuid;

/// Everything the server remembers about one client.
#[derive(Debug, Default)]
pub struct SessionSlot {
    pub model_id: Option<u32>,
    pub game: Option<Session>,
    /// Trajectory chart of the revealed game, kept for export.
    pub result_plot: Option<Vec<u8>>,
}

impl SessionSlot {
    /// Drop the current game and anything derived from it.
    pub fn reset_game(&mut self) {
        self.game = None;
        self.result_plot = None;
    }
}

#[derive(Debug)]
struct Entry {
    slot: Arc<Mutex<SessionSlot>>,
    last_seen: Instant,
}

#[derive(Debug)]
pub struct SessionStore {
    entries: Mutex<HashMap<Uuid, Entry>>,
    ttl: Duration,
    capacity: usize,
}

impl SessionStore {
    pub fn new(ttl: Duration, capacity: usize) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            ttl,
            capacity: capacity.max(1),
        }
    }

    /// Look up the slot for `id`, or create a fresh one under a new id when
    /// `id` is absent, unknown or expired. Returns the id the client should
    /// use from now on.
    pub fn checkout(&self, id: Option<Uuid>, now: Instant) -> (Uuid, Arc<Mutex<SessionSlot>>) {
        let mut entries = self.lock_entries();
        self.purge_expired(&mut entries, now);

        if let Some(id) = id
            && let Some(entry) = entries.get_mut(&id)
        {
            entry.last_seen = now;
            return (id, Arc::clone(&entry.slot));
        }

        if entries.len() >= self.capacity {
            let oldest = entries
                .iter()
                .min_by_key(|(_, entry)| entry.last_seen)
                .map(|(id, _)| *id);
            if let Some(oldest) = oldest {
                entries.remove(&oldest);
                warn!(session = %oldest, "session store full, evicted least recently used");
            }
        }

        let id = Uuid::new_v4();
        let slot = Arc::new(Mutex::new(SessionSlot::default()));
        entries.insert(
            id,
            Entry {
                slot: Arc::clone(&slot),
                last_seen: now,
            },
        );
        debug!(session = %id, live = entries.len(), "session created");
        (id, slot)
    }

    pub fn len(&self) -> usize {
        self.lock_entries().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn purge_expired(&self, entries: &mut HashMap<Uuid, Entry>, now: Instant) {
        let before = entries.len();
        entries.retain(|_, entry| now.saturating_duration_since(entry.last_seen) <= self.ttl);
        let expired = before - entries.len();
        if expired > 0 {
            debug!(expired, "expired sessions dropped");
        }
    }

    fn lock_entries(&self) -> MutexGuard<'_, HashMap<Uuid, Entry>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Lock a slot, recovering it if a previous holder panicked.
pub fn lock_slot(slot: &Mutex<SessionSlot>) -> MutexGuard<'_, SessionSlot> {
    slot.lock().unwrap_or_else(PoisonError::into_inner)
}
