//! In-process single-key cooldown gate.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

/// Tracks per-(resource, id) cooldowns.
#[derive(Default)]
pub struct Cooldowns {
    entries: Mutex<HashMap<String, Instant>>,
}

impl Cooldowns {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if the key was not on cooldown, arming it for
    /// `duration`. Expired entries are dropped on the way through.
    pub fn try_acquire(&self, resource: &str, id: &str, duration: Duration) -> bool {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        let now = Instant::now();
        entries.retain(|_, expiry| *expiry > now);

        let key = format!("{}:{}", resource, id);
        if entries.contains_key(&key) {
            return false;
        }
        entries.insert(key, now + duration);
        true
    }
}
