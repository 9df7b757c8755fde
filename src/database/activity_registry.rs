use std::sync::{Mutex, MutexGuard, PoisonError};

use indexmap::IndexMap;

use crate::error::SignupError;
use crate::models::{Activity, ActivityCatalog};

/// In-memory activity store.
///
/// The set of names is fixed at construction, so the map itself is never
/// mutated; each activity carries its own lock and every check-then-mutate
/// runs under it.
#[derive(Debug)]
pub struct ActivityRegistry {
    activities: IndexMap<String, Mutex<Activity>>,
}

impl ActivityRegistry {
    pub fn new(catalog: ActivityCatalog) -> Self {
        let activities = catalog
            .into_iter()
            .map(|(name, activity)| (name, Mutex::new(activity)))
            .collect();
        Self { activities }
    }

    pub fn len(&self) -> usize {
        self.activities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.activities.is_empty()
    }

    /// Owned snapshot of every activity, in seed order.
    pub fn list_activities(&self) -> ActivityCatalog {
        let mut catalog = ActivityCatalog::new();
        for (name, slot) in &self.activities {
            catalog.push(name.clone(), lock(slot).clone());
        }
        catalog
    }

    pub fn get(&self, name: &str) -> Option<Activity> {
        self.activities.get(name).map(|slot| lock(slot).clone())
    }

    /// Adds `email` to the activity. Returns the new participant count.
    ///
    /// `max_participants` is not checked here.
    pub fn sign_up(&self, name: &str, email: &str) -> Result<usize, SignupError> {
        let slot = self
            .activities
            .get(name)
            .ok_or(SignupError::ActivityNotFound)?;
        let mut activity = lock(slot);
        if activity.has_participant(email) {
            return Err(SignupError::AlreadySignedUp);
        }
        activity.participants.push(email.to_string());
        Ok(activity.participant_count())
    }

    /// Removes `email` from the activity. Returns the new participant count.
    pub fn unregister(&self, name: &str, email: &str) -> Result<usize, SignupError> {
        let slot = self
            .activities
            .get(name)
            .ok_or(SignupError::ActivityNotFound)?;
        let mut activity = lock(slot);
        let Some(pos) = activity.participants.iter().position(|p| p == email) else {
            return Err(SignupError::NotRegistered);
        };
        activity.participants.remove(pos);
        Ok(activity.participant_count())
    }
}

// A panicking holder can't leave a participant list half-edited, so the data
// behind a poisoned lock is still valid.
fn lock(slot: &Mutex<Activity>) -> MutexGuard<'_, Activity> {
    slot.lock().unwrap_or_else(PoisonError::into_inner)
}
