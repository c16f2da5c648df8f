//! In-process store

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use super::{StateStore, StoreError, StoreKey};

/// Keeps values in memory. Writes can be made to fail to exercise
/// best-effort persistence paths.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: Mutex<HashMap<StoreKey, String>>,
    fail_writes: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every following write (and remove) fail until reset
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    fn check_writable(&self) -> Result<(), StoreError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("writes disabled".to_string()));
        }
        Ok(())
    }
}

impl StateStore for MemoryStore {
    fn read(&self, key: StoreKey) -> Result<Option<String>, StoreError> {
        let values = self.values.lock().map_err(|_| StoreError::Poisoned)?;
        Ok(values.get(&key).cloned())
    }

    fn write(&self, key: StoreKey, value: &str) -> Result<(), StoreError> {
        self.check_writable()?;
        let mut values = self.values.lock().map_err(|_| StoreError::Poisoned)?;
        values.insert(key, value.to_string());
        Ok(())
    }

    fn remove(&self, key: StoreKey) -> Result<(), StoreError> {
        self.check_writable()?;
        let mut values = self.values.lock().map_err(|_| StoreError::Poisoned)?;
        values.remove(&key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failed_write_keeps_previous_value() {
        let store = MemoryStore::new();
        store.write(StoreKey::ChallengeData, "one").unwrap();

        store.set_fail_writes(true);
        assert!(matches!(
            store.write(StoreKey::ChallengeData, "two"),
            Err(StoreError::Unavailable(_))
        ));
        assert_eq!(store.read(StoreKey::ChallengeData).unwrap().as_deref(), Some("one"));

        store.set_fail_writes(false);
        store.remove(StoreKey::ChallengeData).unwrap();
        assert!(store.read(StoreKey::ChallengeData).unwrap().is_none());
    }
}
