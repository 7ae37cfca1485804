//! In-process implementation of every repository trait
//!
//! Used when no database URL is configured and by the service and HTTP test
//! suites. Enforces the same uniqueness rules as the SQL schema.

use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;

use nearby_core::entities::{Interaction, LocationRecord, Notification, Place, User};
use nearby_core::error::DomainError;
use nearby_core::traits::{
    FollowRepository, InteractionRepository, LocationRepository, NotificationRepository,
    PlaceRepository, RepoResult, UserRepository,
};
use nearby_core::value_objects::{Coordinate, Snowflake};

#[derive(Default)]
struct Tables {
    users: HashMap<Snowflake, User>,
    /// (follower, followed) in insertion order
    follows: Vec<(Snowflake, Snowflake)>,
    follow_set: BTreeSet<(Snowflake, Snowflake)>,
    locations: Vec<LocationRecord>,
    interactions: Vec<Interaction>,
    notifications: Vec<Notification>,
    places: HashMap<Snowflake, Place>,
}

impl Tables {
    fn latest_location(&self, user_id: Snowflake) -> Option<&LocationRecord> {
        self.locations
            .iter()
            .filter(|l| l.user_id == user_id)
            .max_by(|a, b| a.updated_at.cmp(&b.updated_at).then(a.id.cmp(&b.id)))
    }
}

/// Shared in-memory store; clones see the same data
#[derive(Clone, Default)]
pub struct MemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl std::fmt::Debug for MemoryStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let t = self.tables.read();
        f.debug_struct("MemoryStore")
            .field("users", &t.users.len())
            .field("locations", &t.locations.len())
            .field("interactions", &t.interactions.len())
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Users
// ============================================================================

#[async_trait]
impl UserRepository for MemoryStore {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<User>> {
        Ok(self.tables.read().users.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>> {
        Ok(self
            .tables
            .read()
            .users
            .values()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn find_by_phone(&self, phone: &str) -> RepoResult<Option<User>> {
        Ok(self
            .tables
            .read()
            .users
            .values()
            .find(|u| u.phone == phone)
            .cloned())
    }

    async fn email_exists(&self, email: &str) -> RepoResult<bool> {
        Ok(self.tables.read().users.values().any(|u| u.email == email))
    }

    async fn phone_exists(&self, phone: &str) -> RepoResult<bool> {
        Ok(self.tables.read().users.values().any(|u| u.phone == phone))
    }

    async fn create(&self, user: &User) -> RepoResult<()> {
        let mut t = self.tables.write();
        if t.users.values().any(|u| u.email == user.email) {
            return Err(DomainError::EmailAlreadyExists);
        }
        if t.users.values().any(|u| u.phone == user.phone) {
            return Err(DomainError::PhoneAlreadyExists);
        }
        t.users.insert(user.id, user.clone());
        Ok(())
    }

    async fn find_suggestions(&self, user_id: Snowflake, limit: i64) -> RepoResult<Vec<User>> {
        let t = self.tables.read();
        let mut users: Vec<User> = t
            .users
            .values()
            .filter(|u| u.id != user_id && u.has_image())
            .filter(|u| !t.follow_set.contains(&(user_id, u.id)))
            .cloned()
            .collect();
        users.sort_by_key(|u| u.id);
        users.truncate(usize::try_from(limit.clamp(1, 100)).unwrap_or(100));
        Ok(users)
    }
}

// ============================================================================
// Follows
// ============================================================================

#[async_trait]
impl FollowRepository for MemoryStore {
    async fn follow(&self, follower_id: Snowflake, followed_id: Snowflake) -> RepoResult<bool> {
        if follower_id == followed_id {
            return Err(DomainError::CannotFollowSelf);
        }
        let mut t = self.tables.write();
        for id in [follower_id, followed_id] {
            if !t.users.contains_key(&id) {
                return Err(DomainError::UserNotFound(id));
            }
        }
        if !t.follow_set.insert((follower_id, followed_id)) {
            return Ok(false);
        }
        t.follows.push((follower_id, followed_id));
        Ok(true)
    }

    async fn is_following(&self, follower_id: Snowflake, followed_id: Snowflake) -> RepoResult<bool> {
        Ok(self.tables.read().follow_set.contains(&(follower_id, followed_id)))
    }

    async fn find_followed(&self, user_id: Snowflake) -> RepoResult<Vec<User>> {
        let t = self.tables.read();
        Ok(t.follows
            .iter()
            .filter(|(follower, _)| *follower == user_id)
            .filter_map(|(_, followed)| t.users.get(followed).cloned())
            .collect())
    }

    async fn find_followers(&self, user_id: Snowflake) -> RepoResult<Vec<User>> {
        let t = self.tables.read();
        Ok(t.follows
            .iter()
            .filter(|(_, followed)| *followed == user_id)
            .filter_map(|(follower, _)| t.users.get(follower).cloned())
            .collect())
    }
}

// ============================================================================
// Locations
// ============================================================================

#[async_trait]
impl LocationRepository for MemoryStore {
    async fn create(&self, record: &LocationRecord) -> RepoResult<()> {
        self.tables.write().locations.push(record.clone());
        Ok(())
    }

    async fn find_latest(&self, user_id: Snowflake) -> RepoResult<Option<LocationRecord>> {
        Ok(self.tables.read().latest_location(user_id).cloned())
    }

    async fn find_by_user(
        &self,
        user_id: Snowflake,
        limit: Option<i64>,
    ) -> RepoResult<Vec<LocationRecord>> {
        let t = self.tables.read();
        let mut records: Vec<LocationRecord> = t
            .locations
            .iter()
            .filter(|l| l.user_id == user_id)
            .cloned()
            .collect();
        records.sort_by(|a, b| b.updated_at.cmp(&a.updated_at).then(b.id.cmp(&a.id)));
        if let Some(limit) = limit {
            records.truncate(usize::try_from(limit.max(0)).unwrap_or(0));
        }
        Ok(records)
    }

    async fn touch(&self, id: Snowflake, at: DateTime<Utc>) -> RepoResult<()> {
        let mut t = self.tables.write();
        let record = t
            .locations
            .iter_mut()
            .find(|l| l.id == id)
            .ok_or(DomainError::LocationNotFound(id))?;
        record.updated_at = at;
        Ok(())
    }
}

// ============================================================================
// Interactions
// ============================================================================

#[async_trait]
impl InteractionRepository for MemoryStore {
    async fn find_open_physical(
        &self,
        initiator_id: Snowflake,
        partner_id: Snowflake,
    ) -> RepoResult<Option<Interaction>> {
        Ok(self
            .tables
            .read()
            .interactions
            .iter()
            .find(|i| i.initiator_id == initiator_id && i.partner_id == partner_id && i.is_open())
            .cloned())
    }

    async fn create(&self, interaction: &Interaction) -> RepoResult<()> {
        let mut t = self.tables.write();
        if interaction.is_open()
            && t.interactions.iter().any(|i| {
                i.is_open()
                    && i.initiator_id == interaction.initiator_id
                    && i.partner_id == interaction.partner_id
            })
        {
            return Err(DomainError::InteractionAlreadyOpen);
        }
        t.interactions.push(interaction.clone());
        Ok(())
    }

    async fn update_location(&self, id: Snowflake, coordinate: Coordinate) -> RepoResult<()> {
        let mut t = self.tables.write();
        let interaction = t
            .interactions
            .iter_mut()
            .find(|i| i.id == id)
            .ok_or(DomainError::InteractionNotFound(id))?;
        interaction.refresh_location(coordinate);
        Ok(())
    }

    async fn close(&self, id: Snowflake, ended_at: DateTime<Utc>) -> RepoResult<()> {
        let mut t = self.tables.write();
        let closed = t
            .interactions
            .iter_mut()
            .find(|i| i.id == id)
            .is_some_and(|i| i.close(ended_at));
        if closed {
            Ok(())
        } else {
            Err(DomainError::InteractionNotFound(id))
        }
    }

    async fn find_involving(&self, user_id: Snowflake) -> RepoResult<Vec<Interaction>> {
        let t = self.tables.read();
        let mut found: Vec<Interaction> = t
            .interactions
            .iter()
            .filter(|i| i.involves(user_id))
            .cloned()
            .collect();
        found.sort_by(|a, b| b.started_at.cmp(&a.started_at).then(b.id.cmp(&a.id)));
        Ok(found)
    }
}

// ============================================================================
// Notifications
// ============================================================================

#[async_trait]
impl NotificationRepository for MemoryStore {
    async fn find_recent(
        &self,
        notifier_id: Snowflake,
        notified_id: Snowflake,
        since: DateTime<Utc>,
    ) -> RepoResult<Option<Notification>> {
        Ok(self
            .tables
            .read()
            .notifications
            .iter()
            .filter(|n| {
                n.notifier_id == notifier_id && n.notified_id == notified_id && n.created_at >= since
            })
            .max_by_key(|n| n.created_at)
            .cloned())
    }

    async fn create(&self, notification: &Notification) -> RepoResult<()> {
        self.tables.write().notifications.push(notification.clone());
        Ok(())
    }

    async fn find_by_notified(&self, user_id: Snowflake, limit: i64) -> RepoResult<Vec<Notification>> {
        let t = self.tables.read();
        let mut found: Vec<Notification> = t
            .notifications
            .iter()
            .filter(|n| n.notified_id == user_id)
            .cloned()
            .collect();
        found.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        found.truncate(usize::try_from(limit.clamp(1, 100)).unwrap_or(100));
        Ok(found)
    }
}

// ============================================================================
// Places
// ============================================================================

#[async_trait]
impl PlaceRepository for MemoryStore {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Place>> {
        Ok(self.tables.read().places.get(&id).cloned())
    }

    async fn find_by_owner(&self, owner_id: Snowflake) -> RepoResult<Vec<Place>> {
        self.find_by_owners(&[owner_id]).await
    }

    async fn find_by_owners(&self, owner_ids: &[Snowflake]) -> RepoResult<Vec<Place>> {
        let t = self.tables.read();
        let mut found: Vec<Place> = t
            .places
            .values()
            .filter(|p| owner_ids.contains(&p.owner_id))
            .cloned()
            .collect();
        found.sort_by(|a, b| b.updated_at.cmp(&a.updated_at).then(b.id.cmp(&a.id)));
        Ok(found)
    }

    async fn create(&self, place: &Place) -> RepoResult<()> {
        self.tables.write().places.insert(place.id, place.clone());
        Ok(())
    }

    async fn update(&self, place: &Place) -> RepoResult<()> {
        let mut t = self.tables.write();
        let stored = t
            .places
            .get_mut(&place.id)
            .ok_or(DomainError::PlaceNotFound(place.id))?;
        *stored = place.clone();
        Ok(())
    }
}
