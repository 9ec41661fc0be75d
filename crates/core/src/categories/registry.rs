//! Category registry service
//!
//! The whitelist is persisted as one JSON list under
//! [`OPTION_CATEGORIES`]. Every mutation is a read-modify-write of the whole
//! list, serialized through a local lock, so a failed call leaves the stored
//! list untouched.

use std::collections::BTreeSet;
use std::sync::Arc;

use calembed_domain::constants::{DEFAULT_CATEGORIES, OPTION_CATEGORIES, OPTION_CATEGORIES_SEEDED};
use calembed_domain::{CalEmbedError, CategoryEntry, CategoryId, Result};
use serde_json::Value;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use super::ports::ConfigStore;
use super::validator::TagValidator;

/// CRUD over the category whitelist
pub struct CategoryRegistry {
    store: Arc<dyn ConfigStore>,
    write_lock: Mutex<()>,
}

impl CategoryRegistry {
    pub fn new(store: Arc<dyn ConfigStore>) -> Self {
        Self { store, write_lock: Mutex::new(()) }
    }

    /// All entries in insertion order
    ///
    /// A store that never held a list is seeded with the default categories
    /// once; deleting every entry later does not bring them back.
    pub async fn list(&self) -> Result<Vec<CategoryEntry>> {
        if let Some(entries) = self.load().await? {
            return Ok(entries);
        }

        let _guard = self.write_lock.lock().await;
        // Another caller may have seeded while we waited
        if let Some(entries) = self.load().await? {
            return Ok(entries);
        }
        if self.is_seeded().await? {
            return Ok(Vec::new());
        }

        let defaults = default_entries()?;
        self.save(&defaults).await?;
        self.store.set(OPTION_CATEGORIES_SEEDED, Value::Bool(true)).await?;
        info!(count = defaults.len(), "seeded default categories");
        Ok(defaults)
    }

    /// Case-insensitive lookup; malformed ids simply do not match
    pub async fn get(&self, id: &str) -> Result<Option<CategoryEntry>> {
        let Ok(id) = CategoryId::parse(id) else {
            return Ok(None);
        };
        Ok(self.list().await?.into_iter().find(|entry| entry.id == id))
    }

    pub async fn exists(&self, id: &str) -> Result<bool> {
        Ok(self.get(id).await?.is_some())
    }

    /// Snapshot of the current id set
    pub async fn ids(&self) -> Result<BTreeSet<CategoryId>> {
        Ok(self.list().await?.into_iter().map(|entry| entry.id).collect())
    }

    /// Validator over the current id set
    pub async fn validator(&self) -> Result<TagValidator> {
        Ok(TagValidator::new(self.ids().await?))
    }

    /// Add a new category.
    ///
    /// # Errors
    /// `InvalidFormat` for a malformed id, `AlreadyExists` for a
    /// case-insensitive duplicate.
    pub async fn add(&self, id: &str, display_name: &str, color: &str) -> Result<CategoryEntry> {
        let id = CategoryId::parse(id)?;
        let mut entries = self.list().await?;

        let _guard = self.write_lock.lock().await;
        entries = self.load().await?.unwrap_or(entries);
        if entries.iter().any(|entry| entry.id == id) {
            return Err(CalEmbedError::AlreadyExists(id.to_string()));
        }

        let entry = CategoryEntry::new(id, display_name, color);
        entries.push(entry.clone());
        self.save(&entries).await?;
        info!(category = %entry.id, "category added");
        Ok(entry)
    }

    /// Replace display name and color of an existing category
    pub async fn update(&self, id: &str, display_name: &str, color: &str) -> Result<CategoryEntry> {
        let id = CategoryId::parse(id).map_err(|_| CalEmbedError::NotFound(id.to_string()))?;
        let mut entries = self.list().await?;

        let _guard = self.write_lock.lock().await;
        entries = self.load().await?.unwrap_or(entries);
        let slot = entries
            .iter_mut()
            .find(|entry| entry.id == id)
            .ok_or_else(|| CalEmbedError::NotFound(id.to_string()))?;

        *slot = CategoryEntry::new(id, display_name, color);
        let updated = slot.clone();
        self.save(&entries).await?;
        info!(category = %updated.id, "category updated");
        Ok(updated)
    }

    /// Remove a category
    pub async fn delete(&self, id: &str) -> Result<()> {
        let id = CategoryId::parse(id).map_err(|_| CalEmbedError::NotFound(id.to_string()))?;
        let mut entries = self.list().await?;

        let _guard = self.write_lock.lock().await;
        entries = self.load().await?.unwrap_or(entries);
        let before = entries.len();
        entries.retain(|entry| entry.id != id);
        if entries.len() == before {
            return Err(CalEmbedError::NotFound(id.to_string()));
        }

        self.save(&entries).await?;
        info!(category = %id, "category deleted");
        Ok(())
    }

    async fn load(&self) -> Result<Option<Vec<CategoryEntry>>> {
        let Some(value) = self.store.get(OPTION_CATEGORIES).await? else {
            return Ok(None);
        };
        let stored: Vec<CategoryEntry> = serde_json::from_value(value)
            .map_err(|e| CalEmbedError::Storage(format!("corrupt category list: {e}")))?;
        Ok(Some(normalize_entries(stored)))
    }

    async fn save(&self, entries: &[CategoryEntry]) -> Result<()> {
        let value = serde_json::to_value(entries)
            .map_err(|e| CalEmbedError::Internal(format!("failed to encode categories: {e}")))?;
        self.store.set(OPTION_CATEGORIES, value).await?;
        debug!(count = entries.len(), "category list persisted");
        Ok(())
    }

    async fn is_seeded(&self) -> Result<bool> {
        let flag = self.store.get(OPTION_CATEGORIES_SEEDED).await?;
        Ok(flag.and_then(|value| value.as_bool()).unwrap_or(false))
    }
}

/// Sanitize stored entries the way `add` would and drop later duplicates
///
/// The stored list may have been edited outside the registry.
fn normalize_entries(stored: Vec<CategoryEntry>) -> Vec<CategoryEntry> {
    let mut seen = BTreeSet::new();
    let mut entries = Vec::with_capacity(stored.len());
    for entry in stored {
        if !seen.insert(entry.id.clone()) {
            warn!(category = %entry.id, "duplicate stored category ignored");
            continue;
        }
        let normalized = CategoryEntry::new(entry.id, &entry.display_name, &entry.color);
        if normalized.color != entry.color || normalized.display_name != entry.display_name {
            warn!(category = %normalized.id, "stored category normalized");
        }
        entries.push(normalized);
    }
    entries
}

fn default_entries() -> Result<Vec<CategoryEntry>> {
    DEFAULT_CATEGORIES
        .iter()
        .map(|(id, name, color)| Ok(CategoryEntry::new(CategoryId::parse(id)?, name, color)))
        .collect()
}
