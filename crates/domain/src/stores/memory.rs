//! In-process implementations of the store traits.
//!
//! Locks are scoped per trip (memberships) and per code (invites). Lock
//! order is always code, then trip shard.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use tokio::sync::{Mutex, RwLock};
use uuid::Uuid;

use super::{InviteRegistry, MembershipStore, TripDirectory};
use crate::errors::DomainError;
use crate::models::invite::{generate_invite_code, MAX_CODE_GENERATION_ATTEMPTS};
use crate::models::{InviteCode, Membership, NewInvite, Redemption, TripOwnership, TripRole};

type Shard = Arc<Mutex<HashMap<Uuid, Membership>>>;

/// Membership rows sharded by trip.
#[derive(Debug, Default)]
pub struct InMemoryMembershipStore {
    shards: RwLock<HashMap<Uuid, Shard>>,
}

impl InMemoryMembershipStore {
    pub fn new() -> Self {
        Self::default()
    }

    async fn shard(&self, trip_id: Uuid) -> Shard {
        if let Some(shard) = self.shards.read().await.get(&trip_id) {
            return shard.clone();
        }
        self.shards
            .write()
            .await
            .entry(trip_id)
            .or_default()
            .clone()
    }

    async fn existing_shard(&self, trip_id: Uuid) -> Option<Shard> {
        self.shards.read().await.get(&trip_id).cloned()
    }
}

#[async_trait::async_trait]
impl MembershipStore for InMemoryMembershipStore {
    async fn upsert(
        &self,
        trip_id: Uuid,
        user_id: Uuid,
        role: TripRole,
    ) -> Result<Membership, DomainError> {
        let shard = self.shard(trip_id).await;
        let mut rows = shard.lock().await;
        let now = Utc::now();

        let row = rows
            .entry(user_id)
            .and_modify(|m| {
                m.role = role;
                m.updated_at = now;
            })
            .or_insert_with(|| Membership {
                id: Uuid::new_v4(),
                trip_id,
                user_id,
                role,
                joined_at: now,
                updated_at: now,
            });

        Ok(row.clone())
    }

    async fn find(&self, trip_id: Uuid, user_id: Uuid) -> Result<Option<Membership>, DomainError> {
        match self.existing_shard(trip_id).await {
            Some(shard) => Ok(shard.lock().await.get(&user_id).cloned()),
            None => Ok(None),
        }
    }

    async fn list_by_trip(&self, trip_id: Uuid) -> Result<Vec<Membership>, DomainError> {
        match self.existing_shard(trip_id).await {
            Some(shard) => Ok(shard.lock().await.values().cloned().collect()),
            None => Ok(Vec::new()),
        }
    }

    async fn delete_by_trip(&self, trip_id: Uuid) -> Result<u64, DomainError> {
        let shard = self.shards.write().await.remove(&trip_id);
        match shard {
            Some(shard) => {
                let mut rows = shard.lock().await;
                let removed = rows.len() as u64;
                rows.clear();
                Ok(removed)
            }
            None => Ok(0),
        }
    }

    async fn remove(&self, trip_id: Uuid, user_id: Uuid) -> Result<bool, DomainError> {
        match self.existing_shard(trip_id).await {
            Some(shard) => Ok(shard.lock().await.remove(&user_id).is_some()),
            None => Ok(false),
        }
    }
}

/// Invite codes, each behind its own lock.
pub struct InMemoryInviteRegistry {
    codes: RwLock<HashMap<String, Arc<Mutex<InviteCode>>>>,
    memberships: Arc<dyn MembershipStore>,
    generator: fn() -> String,
}

impl InMemoryInviteRegistry {
    pub fn new(memberships: Arc<dyn MembershipStore>) -> Self {
        Self::with_generator(memberships, generate_invite_code)
    }

    /// Uses `generator` instead of random codes.
    pub fn with_generator(memberships: Arc<dyn MembershipStore>, generator: fn() -> String) -> Self {
        Self {
            codes: RwLock::new(HashMap::new()),
            memberships,
            generator,
        }
    }

    async fn entry(&self, code: &str) -> Option<Arc<Mutex<InviteCode>>> {
        self.codes.read().await.get(code).cloned()
    }
}

#[async_trait::async_trait]
impl InviteRegistry for InMemoryInviteRegistry {
    async fn issue(&self, invite: NewInvite) -> Result<InviteCode, DomainError> {
        let mut codes = self.codes.write().await;

        for _ in 0..MAX_CODE_GENERATION_ATTEMPTS {
            let code = (self.generator)();
            if codes.contains_key(&code) {
                continue;
            }

            let record = InviteCode {
                id: Uuid::new_v4(),
                trip_id: invite.trip_id,
                code: code.clone(),
                role: invite.role,
                max_uses: invite.usage.max_uses(),
                used_count: 0,
                expires_at: invite.expires_at,
                created_by: invite.created_by,
                created_at: Utc::now(),
            };
            codes.insert(code, Arc::new(Mutex::new(record.clone())));
            return Ok(record);
        }

        Err(DomainError::StorageUnavailable(
            "Failed to generate unique invite code".to_string(),
        ))
    }

    async fn redeem(&self, code: &str, user_id: Uuid) -> Result<Redemption, DomainError> {
        let entry = self.entry(code).await.ok_or(DomainError::InviteNotFound)?;
        let mut invite = entry.lock().await;

        invite.ensure_redeemable_at(Utc::now())?;

        let membership = self
            .memberships
            .upsert(invite.trip_id, user_id, invite.role)
            .await?;

        if invite.max_uses.is_some() {
            invite.used_count += 1;
        }

        Ok(Redemption {
            trip_id: invite.trip_id,
            role: invite.role,
            used_count: invite.used_count,
            membership,
        })
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<InviteCode>, DomainError> {
        match self.entry(code).await {
            Some(entry) => Ok(Some(entry.lock().await.clone())),
            None => Ok(None),
        }
    }

    async fn list_by_trip(&self, trip_id: Uuid) -> Result<Vec<InviteCode>, DomainError> {
        let entries: Vec<_> = self.codes.read().await.values().cloned().collect();

        let mut invites = Vec::new();
        for entry in entries {
            let invite = entry.lock().await;
            if invite.trip_id == trip_id {
                invites.push(invite.clone());
            }
        }
        invites.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(invites)
    }
}

/// Trip ownership records.
#[derive(Debug, Default)]
pub struct InMemoryTripDirectory {
    trips: RwLock<HashMap<Uuid, TripOwnership>>,
}

impl InMemoryTripDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert(&self, ownership: TripOwnership) {
        self.trips.write().await.insert(ownership.trip_id, ownership);
    }

    pub async fn remove(&self, trip_id: Uuid) -> bool {
        self.trips.write().await.remove(&trip_id).is_some()
    }
}

#[async_trait::async_trait]
impl TripDirectory for InMemoryTripDirectory {
    async fn find_ownership(&self, trip_id: Uuid) -> Result<Option<TripOwnership>, DomainError> {
        Ok(self.trips.read().await.get(&trip_id).copied())
    }
}
