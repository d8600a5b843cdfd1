//! Session registry
//!
//! Maps opaque session ids to owned values (discussions, in practice) and
//! their last-activity time. Each value sits behind its own async mutex so
//! that requests for one session are serialized while unrelated sessions
//! proceed independently.

use crate::ports::clock::Clock;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("session not found or expired: {0}")]
    NotFound(String),
}

/// Shared, exclusively-lockable handle to a registered value
pub type SessionHandle<T> = Arc<tokio::sync::Mutex<T>>;

struct Entry<T> {
    value: SessionHandle<T>,
    created_at: DateTime<Utc>,
    last_active: DateTime<Utc>,
}

pub struct SessionRegistry<T> {
    entries: Mutex<HashMap<String, Entry<T>>>,
    clock: Arc<dyn Clock>,
    idle_timeout: chrono::Duration,
}

impl<T> SessionRegistry<T> {
    pub fn new(clock: Arc<dyn Clock>, idle_timeout: Duration) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            clock,
            idle_timeout: chrono::Duration::from_std(idle_timeout)
                .unwrap_or_else(|_| chrono::Duration::days(36_500)),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, Entry<T>>> {
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Register `value` under a fresh id.
    pub fn create(&self, value: T) -> (String, SessionHandle<T>) {
        let id = uuid::Uuid::new_v4().to_string();
        let now = self.clock.now();
        let handle = Arc::new(tokio::sync::Mutex::new(value));
        self.lock().insert(
            id.clone(),
            Entry {
                value: Arc::clone(&handle),
                created_at: now,
                last_active: now,
            },
        );
        debug!("Session created: {}", id);
        (id, handle)
    }

    /// Look up a session without refreshing its activity time.
    pub fn get(&self, id: &str) -> Option<SessionHandle<T>> {
        self.lock().get(id).map(|e| Arc::clone(&e.value))
    }

    /// Refresh a session's last-activity time.
    pub fn touch(&self, id: &str) -> Result<(), RegistryError> {
        let now = self.clock.now();
        match self.lock().get_mut(id) {
            Some(entry) => {
                entry.last_active = now;
                Ok(())
            }
            None => Err(RegistryError::NotFound(id.to_string())),
        }
    }

    /// Look up and refresh in one call.
    pub fn checkout(&self, id: &str) -> Result<SessionHandle<T>, RegistryError> {
        let now = self.clock.now();
        let mut entries = self.lock();
        let entry = entries
            .get_mut(id)
            .ok_or_else(|| RegistryError::NotFound(id.to_string()))?;
        entry.last_active = now;
        Ok(Arc::clone(&entry.value))
    }

    /// Remove a session. Outstanding handles stay usable until dropped.
    pub fn expire(&self, id: &str) -> Result<(), RegistryError> {
        match self.lock().remove(id) {
            Some(entry) => {
                debug!(
                    "Session expired: {} (lived {}s)",
                    id,
                    (self.clock.now() - entry.created_at).num_seconds()
                );
                Ok(())
            }
            None => Err(RegistryError::NotFound(id.to_string())),
        }
    }

    /// Drop every session idle for longer than the timeout; returns their ids.
    pub fn reap(&self) -> Vec<String> {
        let now = self.clock.now();
        let mut entries = self.lock();
        let expired: Vec<String> = entries
            .iter()
            .filter(|(_, e)| now - e.last_active > self.idle_timeout)
            .map(|(id, _)| id.clone())
            .collect();
        for id in &expired {
            entries.remove(id);
        }
        if !expired.is_empty() {
            info!("Reaped {} idle session(s)", expired.len());
        }
        expired
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::clock::ManualClock;

    fn registry() -> (SessionRegistry<u32>, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::default());
        let registry = SessionRegistry::new(clock.clone(), Duration::from_secs(7200));
        (registry, clock)
    }

    #[tokio::test]
    async fn test_create_and_get() {
        let (registry, _) = registry();
        let (id, handle) = registry.create(7);
        assert_eq!(registry.len(), 1);

        *handle.lock().await += 1;
        let again = registry.get(&id).unwrap();
        assert_eq!(*again.lock().await, 8);
    }

    #[test]
    fn test_ids_are_unique() {
        let (registry, _) = registry();
        let (a, _) = registry.create(1);
        let (b, _) = registry.create(2);
        assert_ne!(a, b);
    }

    #[test]
    fn test_unknown_ids_are_not_found() {
        let (registry, _) = registry();
        assert!(registry.get("nope").is_none());
        assert_eq!(
            registry.touch("nope"),
            Err(RegistryError::NotFound("nope".into()))
        );
        assert!(registry.checkout("nope").is_err());
        assert!(registry.expire("nope").is_err());
    }

    #[test]
    fn test_expire_removes_session() {
        let (registry, _) = registry();
        let (id, _) = registry.create(1);
        registry.expire(&id).unwrap();
        assert!(registry.get(&id).is_none());
        assert!(registry.is_empty());
    }

    #[test]
    fn test_reap_drops_only_idle_sessions() {
        let (registry, clock) = registry();
        let (stale, _) = registry.create(1);
        clock.advance(chrono::Duration::minutes(90));
        let (fresh, _) = registry.create(2);
        clock.advance(chrono::Duration::minutes(40));

        let reaped = registry.reap();
        assert_eq!(reaped, vec![stale.clone()]);
        assert!(registry.get(&stale).is_none());
        assert!(registry.get(&fresh).is_some());
    }

    #[test]
    fn test_touch_keeps_session_alive() {
        let (registry, clock) = registry();
        let (id, _) = registry.create(1);
        clock.advance(chrono::Duration::minutes(100));
        registry.touch(&id).unwrap();
        clock.advance(chrono::Duration::minutes(100));
        assert!(registry.reap().is_empty());

        clock.advance(chrono::Duration::minutes(21));
        assert_eq!(registry.reap(), vec![id]);
    }

    #[test]
    fn test_checkout_refreshes_activity() {
        let (registry, clock) = registry();
        let (id, _) = registry.create(1);
        clock.advance(chrono::Duration::minutes(119));
        registry.checkout(&id).unwrap();
        clock.advance(chrono::Duration::minutes(119));
        assert!(registry.reap().is_empty());
    }

    #[test]
    fn test_idle_exactly_at_threshold_is_kept() {
        let (registry, clock) = registry();
        registry.create(1);
        clock.advance(chrono::Duration::hours(2));
        assert!(registry.reap().is_empty());
        clock.advance(chrono::Duration::seconds(1));
        assert_eq!(registry.reap().len(), 1);
    }
}
