//! In-memory `UserStore` + `RevocationStore` used by unit and router tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use forms::ProfileUpdate;
use time::OffsetDateTime;
use uuid::Uuid;

use super::store::{NewUser, RevocationStore, StoreError, UserRecord, UserStore};

#[derive(Default)]
pub struct MemoryStore {
    users: Mutex<HashMap<Uuid, UserRecord>>,
    revoked: Mutex<HashMap<String, OffsetDateTime>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove a user outright, simulating a record deleted out of band.
    pub fn remove_user(&self, id: Uuid) {
        self.users.lock().expect("users mutex should lock").remove(&id);
    }

    #[must_use]
    pub fn revoked_count(&self) -> usize {
        self.revoked.lock().expect("revoked mutex should lock").len()
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>, StoreError> {
        let users = self.users.lock().expect("users mutex should lock");
        Ok(users.values().find(|u| u.email == email).cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<UserRecord>, StoreError> {
        Ok(self.users.lock().expect("users mutex should lock").get(&id).cloned())
    }

    async fn insert(&self, user: NewUser) -> Result<UserRecord, StoreError> {
        let mut users = self.users.lock().expect("users mutex should lock");
        if users.values().any(|u| u.email == user.email) {
            return Err(StoreError::DuplicateEmail);
        }
        let record = UserRecord {
            id: Uuid::new_v4(),
            email: user.email,
            password_hash: user.password_hash,
            name: user.name,
            role: user.role,
            phone: None,
            bio: None,
            created_at: OffsetDateTime::now_utc(),
        };
        users.insert(record.id, record.clone());
        Ok(record)
    }

    async fn update_profile(&self, id: Uuid, update: &ProfileUpdate) -> Result<UserRecord, StoreError> {
        let mut users = self.users.lock().expect("users mutex should lock");
        let user = users.get_mut(&id).ok_or(StoreError::NotFound)?;
        if let Some(name) = &update.name {
            user.name.clone_from(name);
        }
        if let Some(phone) = &update.phone {
            user.phone = Some(phone.clone()).filter(|p| !p.is_empty());
        }
        if let Some(bio) = &update.bio {
            user.bio = Some(bio.clone()).filter(|b| !b.is_empty());
        }
        Ok(user.clone())
    }

    async fn update_password(&self, id: Uuid, password_hash: &str) -> Result<(), StoreError> {
        let mut users = self.users.lock().expect("users mutex should lock");
        let user = users.get_mut(&id).ok_or(StoreError::NotFound)?;
        password_hash.clone_into(&mut user.password_hash);
        Ok(())
    }

    async fn list(&self) -> Result<Vec<UserRecord>, StoreError> {
        let users = self.users.lock().expect("users mutex should lock");
        let mut all: Vec<UserRecord> = users.values().cloned().collect();
        all.sort_by_key(|u| u.created_at);
        Ok(all)
    }
}

#[async_trait]
impl RevocationStore for MemoryStore {
    async fn revoke(&self, token_id: &str, expires_at: OffsetDateTime) -> Result<(), StoreError> {
        self.revoked
            .lock()
            .expect("revoked mutex should lock")
            .entry(token_id.to_owned())
            .or_insert(expires_at);
        Ok(())
    }

    async fn is_revoked(&self, token_id: &str) -> Result<bool, StoreError> {
        Ok(self.revoked.lock().expect("revoked mutex should lock").contains_key(token_id))
    }

    async fn purge_expired(&self, now: OffsetDateTime) -> Result<u64, StoreError> {
        let mut revoked = self.revoked.lock().expect("revoked mutex should lock");
        let before = revoked.len();
        revoked.retain(|_, expires_at| *expires_at > now);
        Ok((before - revoked.len()) as u64)
    }
}
