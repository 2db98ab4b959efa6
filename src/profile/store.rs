//! Profile store interface
//!
//! The profile/stats store is an external collaborator. `ProfileStore` is the
//! contract a live backend implements; `MemoryStore` is the in-process stand-in.

use parking_lot::Mutex;
use std::collections::HashMap;
use thiserror::Error;

use crate::error::ProgressionError;
use crate::progression::{ActivityType, ProgressionEngine};
use super::career::{AwardOutcome, CareerProfile};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("no profile stored for user {0:?}")]
    UnknownUser(String),

    #[error(transparent)]
    Progression(#[from] ProgressionError),
}

/// Storage for career profiles keyed by user id
pub trait ProfileStore: Send + Sync {
    fn load(&self, user_id: &str) -> Result<Option<CareerProfile>, StoreError>;

    fn save(&self, user_id: &str, profile: &CareerProfile) -> Result<(), StoreError>;

    /// Apply an award as one atomic read-modify-write on the user's profile
    fn record_activity(
        &self,
        engine: &ProgressionEngine,
        user_id: &str,
        activity: ActivityType,
        bonus_xp: u64,
    ) -> Result<AwardOutcome, StoreError>;
}

/// Store that keeps profiles in process memory
#[derive(Debug, Default)]
pub struct MemoryStore {
    profiles: Mutex<HashMap<String, CareerProfile>>,
    /// Create an empty profile on the first award for an unknown user
    create_missing: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store that creates profiles for unseen users on their first award
    pub fn auto_create() -> Self {
        Self { create_missing: true, ..Self::default() }
    }

    pub fn len(&self) -> usize {
        self.profiles.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.lock().is_empty()
    }
}

impl ProfileStore for MemoryStore {
    fn load(&self, user_id: &str) -> Result<Option<CareerProfile>, StoreError> {
        Ok(self.profiles.lock().get(user_id).cloned())
    }

    fn save(&self, user_id: &str, profile: &CareerProfile) -> Result<(), StoreError> {
        self.profiles.lock().insert(user_id.to_string(), profile.clone());
        log::debug!("Profile saved for {}", user_id);
        Ok(())
    }

    fn record_activity(
        &self,
        engine: &ProgressionEngine,
        user_id: &str,
        activity: ActivityType,
        bonus_xp: u64,
    ) -> Result<AwardOutcome, StoreError> {
        let mut profiles = self.profiles.lock();

        let outcome = match profiles.get_mut(user_id) {
            Some(profile) => profile.apply(engine, activity, bonus_xp)?,
            None if self.create_missing => {
                // A new profile is only stored once its first award succeeds
                let mut profile = CareerProfile::default();
                let outcome = profile.apply(engine, activity, bonus_xp)?;
                log::info!("Creating profile for {}", user_id);
                profiles.insert(user_id.to_string(), profile);
                outcome
            }
            None => return Err(StoreError::UnknownUser(user_id.to_string())),
        };

        log::debug!(
            "{} earned {} XP for {} (now level {})",
            user_id,
            outcome.gain.xp_earned,
            activity,
            outcome.level_after.level
        );
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_save_and_load() {
        let store = MemoryStore::new();
        assert_eq!(store.load("ada").unwrap(), None);

        let profile = CareerProfile { total_xp: 420, ..CareerProfile::default() };
        store.save("ada", &profile).unwrap();
        assert_eq!(store.load("ada").unwrap(), Some(profile));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_unknown_user_is_rejected() {
        let store = MemoryStore::new();
        let engine = ProgressionEngine::standard();
        let err = store.record_activity(&engine, "ghost", ActivityType::Project, 0).unwrap_err();
        assert!(matches!(err, StoreError::UnknownUser(_)));
        assert!(store.is_empty());
    }

    #[test]
    fn test_failed_first_award_creates_nothing() {
        let store = MemoryStore::auto_create();
        let engine = ProgressionEngine::standard();

        let err = store.record_activity(&engine, "ghost", ActivityType::Project, u64::MAX).unwrap_err();
        assert!(matches!(err, StoreError::Progression(_)));
        assert!(store.is_empty());
        assert_eq!(store.load("ghost").unwrap(), None);
    }

    #[test]
    fn test_failed_award_keeps_existing_profile() {
        let store = MemoryStore::new();
        let engine = ProgressionEngine::standard();
        let profile = CareerProfile { total_xp: u64::MAX - 1, ..CareerProfile::default() };
        store.save("ada", &profile).unwrap();

        assert!(store.record_activity(&engine, "ada", ActivityType::Learning, 0).is_err());
        assert_eq!(store.load("ada").unwrap(), Some(profile));
    }

    #[test]
    fn test_record_activity_persists() {
        let store = MemoryStore::auto_create();
        let engine = ProgressionEngine::standard();

        let outcome = store.record_activity(&engine, "ada", ActivityType::Project, 0).unwrap();
        assert!(outcome.gain.level_up);
        let outcome = store.record_activity(&engine, "ada", ActivityType::Learning, 5).unwrap();
        assert_eq!(outcome.level_before.level, 2);

        let profile = store.load("ada").unwrap().unwrap();
        assert_eq!(profile.total_xp, 155);
    }

    #[test]
    fn test_concurrent_awards_are_not_lost() {
        let store = Arc::new(MemoryStore::auto_create());
        let engine = Arc::new(ProgressionEngine::standard());

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let store = Arc::clone(&store);
                let engine = Arc::clone(&engine);
                thread::spawn(move || {
                    for _ in 0..50 {
                        store
                            .record_activity(&engine, "shared", ActivityType::ProblemSolving, 0)
                            .unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let profile = store.load("shared").unwrap().unwrap();
        assert_eq!(profile.total_xp, 8 * 50 * 25);
        assert_eq!(profile.activity_counts.get(&ActivityType::ProblemSolving), Some(&400));
    }
}
