use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use super::domain::{UserKey, VerificationRecord};

/// Storage abstraction so the attestation service can run against isolated
/// instances.
pub trait VerificationRepository: Send + Sync {
    /// Insert or replace the record stored under `record.user_key`, returning
    /// the record it displaced.
    fn upsert(&self, record: VerificationRecord)
        -> Result<Option<VerificationRecord>, RepositoryError>;
    fn fetch(&self, key: &UserKey) -> Result<Option<VerificationRecord>, RepositoryError>;
    fn count(&self) -> Result<usize, RepositoryError>;
}

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("verification store unavailable: {0}")]
    Unavailable(String),
}

/// Process-lifetime map from user key to record. Unbounded, no expiry.
#[derive(Debug, Default, Clone)]
pub struct InMemoryVerificationRepository {
    records: Arc<Mutex<HashMap<UserKey, VerificationRecord>>>,
}

impl InMemoryVerificationRepository {
    fn lock(&self) -> Result<MutexGuard<'_, HashMap<UserKey, VerificationRecord>>, RepositoryError> {
        self.records
            .lock()
            .map_err(|_| RepositoryError::Unavailable("verification map lock poisoned".to_string()))
    }
}

impl VerificationRepository for InMemoryVerificationRepository {
    fn upsert(
        &self,
        record: VerificationRecord,
    ) -> Result<Option<VerificationRecord>, RepositoryError> {
        let mut guard = self.lock()?;
        Ok(guard.insert(record.user_key.clone(), record))
    }

    fn fetch(&self, key: &UserKey) -> Result<Option<VerificationRecord>, RepositoryError> {
        let guard = self.lock()?;
        Ok(guard.get(key).cloned())
    }

    fn count(&self) -> Result<usize, RepositoryError> {
        Ok(self.lock()?.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(key: &str, nationality: &str) -> VerificationRecord {
        VerificationRecord {
            user_key: UserKey::normalize(key),
            verified: true,
            nationality: nationality.to_string(),
            is_local_resident: nationality == "TWN",
            age: 30,
            risk_score: 10,
            timestamp: 1_700_000_000_000,
        }
    }

    #[test]
    fn upsert_replaces_prior_record() {
        let repository = InMemoryVerificationRepository::default();
        assert!(repository
            .upsert(record("0xabc", "TWN"))
            .expect("insert")
            .is_none());

        let displaced = repository
            .upsert(record("0xabc", "JPN"))
            .expect("replace")
            .expect("previous record returned");
        assert_eq!(displaced.nationality, "TWN");

        let stored = repository
            .fetch(&UserKey::normalize("0xABC"))
            .expect("fetch")
            .expect("present");
        assert_eq!(stored.nationality, "JPN");
        assert!(!stored.is_local_resident);
        assert_eq!(repository.count().expect("count"), 1);
    }

    #[test]
    fn clones_share_the_same_map() {
        let repository = InMemoryVerificationRepository::default();
        let handle = repository.clone();
        handle.upsert(record("0x1", "TWN")).expect("insert");
        assert_eq!(repository.count().expect("count"), 1);
        assert!(InMemoryVerificationRepository::default()
            .fetch(&UserKey::normalize("0x1"))
            .expect("fetch")
            .is_none());
    }

    #[test]
    fn poisoned_lock_reports_unavailable() {
        let repository = InMemoryVerificationRepository::default();
        let poisoner = repository.clone();
        let _ = std::thread::spawn(move || {
            let _guard = poisoner.records.lock().expect("first lock");
            panic!("poison the map");
        })
        .join();

        assert!(matches!(
            repository.count(),
            Err(RepositoryError::Unavailable(_))
        ));
    }
}
