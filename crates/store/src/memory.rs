//! An in-memory [`UserStore`] used by tests, the root integration suite,
//! and the demo binary.

use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use dashmap::DashMap;
use rand::seq::SliceRandom;
use rankboard_core::{Error, PlayerRecord, Rating, Result, UserStore};
use uuid::Uuid;

/// An in-memory reference implementation of [`UserStore`].
///
/// Not a performance-oriented store — every read sorts a full snapshot of
/// the user table, which is fine for tests and the demo binary but not
/// meant to stand in for a real database's query planner. What it does
/// provide faithfully is the *contract*: ordering, case-insensitivity, and
/// a fault-injection hook ([`InMemoryUserStore::fail_next_write`]) for
/// exercising the facade's store-failure compensation path.
pub struct InMemoryUserStore {
    users: DashMap<Uuid, PlayerRecord>,
    by_username: DashMap<String, Uuid>,
    fail_next_write: AtomicBool,
}

impl Default for InMemoryUserStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryUserStore {
    /// Create an empty store.
    pub fn new() -> Self {
        InMemoryUserStore {
            users: DashMap::new(),
            by_username: DashMap::new(),
            fail_next_write: AtomicBool::new(false),
        }
    }

    /// Create a store pre-populated with `(username, rating)` pairs,
    /// generating a fresh identifier for each user.
    ///
    /// # Errors
    ///
    /// Returns [`Error::BadRequest`] if a rating is outside `[R_MIN,
    /// R_MAX]`, or [`Error::Internal`] if two entries share a
    /// case-insensitive username.
    pub fn seeded<'a, I>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (&'a str, i32)>,
    {
        let store = InMemoryUserStore::new();
        for (username, rating) in pairs {
            store.insert(username, Rating::new(rating)?)?;
        }
        Ok(store)
    }

    /// Insert a new user, rejecting a case-insensitive username collision.
    pub fn insert(&self, username: &str, rating: Rating) -> Result<PlayerRecord> {
        let key = username.to_lowercase();
        if self.by_username.contains_key(&key) {
            return Err(Error::Internal(format!(
                "username {username:?} already exists"
            )));
        }
        let record = PlayerRecord {
            id: Uuid::new_v4(),
            username: username.to_string(),
            rating,
        };
        self.by_username.insert(key, record.id);
        self.users.insert(record.id, record.clone());
        Ok(record)
    }

    /// Arrange for the *next* call to [`UserStore::update_user_rating`] to
    /// fail with [`Error::Internal`], regardless of its arguments. Used to
    /// exercise the facade's compensating-rollback path. Consumes itself
    /// after firing once.
    pub fn fail_next_write(&self) {
        self.fail_next_write.store(true, Ordering::SeqCst);
    }

    fn snapshot(&self) -> Vec<PlayerRecord> {
        self.users.iter().map(|entry| entry.value().clone()).collect()
    }

    fn sort_for_listing(records: &mut [PlayerRecord]) {
        records.sort_by(|a, b| {
            b.rating
                .value()
                .cmp(&a.rating.value())
                .then_with(|| a.username.cmp(&b.username))
        });
    }

    fn page(records: Vec<PlayerRecord>, limit: u32, offset: u64) -> Vec<PlayerRecord> {
        records
            .into_iter()
            .skip(offset as usize)
            .take(limit as usize)
            .collect()
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn top_users(&self, limit: u32, offset: u64) -> Result<Vec<PlayerRecord>> {
        let mut records = self.snapshot();
        Self::sort_for_listing(&mut records);
        Ok(Self::page(records, limit, offset))
    }

    async fn search_users(
        &self,
        pattern: &str,
        limit: u32,
        offset: u64,
    ) -> Result<Vec<PlayerRecord>> {
        let needle = pattern.to_lowercase();
        let mut records: Vec<PlayerRecord> = self
            .snapshot()
            .into_iter()
            .filter(|record| record.username.to_lowercase().contains(&needle))
            .collect();
        Self::sort_for_listing(&mut records);
        Ok(Self::page(records, limit, offset))
    }

    async fn user_by_username(&self, name: &str) -> Result<PlayerRecord> {
        let key = name.to_lowercase();
        let id = self
            .by_username
            .get(&key)
            .map(|entry| *entry.value())
            .ok_or_else(|| Error::NotFound(name.to_string()))?;
        self.users
            .get(&id)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| Error::NotFound(name.to_string()))
    }

    async fn update_user_rating(&self, id: Uuid, new_rating: Rating) -> Result<()> {
        if self.fail_next_write.swap(false, Ordering::SeqCst) {
            return Err(Error::Internal("simulated store write failure".to_string()));
        }
        let mut entry = self
            .users
            .get_mut(&id)
            .ok_or_else(|| Error::NotFound(id.to_string()))?;
        entry.rating = new_rating;
        Ok(())
    }

    async fn all_rating_counts(&self) -> Result<Vec<(Rating, u64)>> {
        let mut counts = std::collections::HashMap::<i32, u64>::new();
        for entry in self.users.iter() {
            *counts.entry(entry.value().rating.value()).or_insert(0) += 1;
        }
        counts
            .into_iter()
            .map(|(value, count)| Ok((Rating::new(value)?, count)))
            .collect()
    }

    async fn random_users(&self, k: usize) -> Result<Vec<PlayerRecord>> {
        let mut records = self.snapshot();
        let mut rng = rand::thread_rng();
        records.shuffle(&mut rng);
        records.truncate(k);
        Ok(records)
    }
}
