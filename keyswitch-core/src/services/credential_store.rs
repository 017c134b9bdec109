//! Credential store service
//!
//! Ordered API key list plus active index, persisted as two records in a
//! [`KeyValueStore`]. Storage failures never leave this type: reads fall back to an
//! empty list / index 0, writes are logged and dropped, so callers must not assume
//! durability.

use std::sync::Arc;

use chrono::Utc;
use keyswitch_provider::mask_secret;

use crate::config::StoreConfig;
use crate::traits::{CredentialValidator, KeyValueStore};
use crate::types::{retain_committed, CredentialEntry, CredentialUpdate};

/// Credential store service.
///
/// Create one per process and share it by `Arc`.
pub struct CredentialStore {
    storage: Arc<dyn KeyValueStore>,
    validator: Arc<dyn CredentialValidator>,
    config: StoreConfig,
    environment_secret: Option<String>,
}

impl CredentialStore {
    #[must_use]
    pub fn new(
        storage: Arc<dyn KeyValueStore>,
        validator: Arc<dyn CredentialValidator>,
        config: StoreConfig,
        environment_secret: Option<String>,
    ) -> Self {
        Self {
            storage,
            validator,
            config,
            environment_secret: environment_secret.filter(|s| !s.is_empty()),
        }
    }

    /// Load every stored entry.
    ///
    /// Missing, unreadable or unparseable data yields an empty list.
    pub fn get_all(&self) -> Vec<CredentialEntry> {
        let raw = match self.storage.get(&self.config.collection_key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                log::error!("Failed to read API keys from storage: {e}");
                return Vec::new();
            }
        };

        match serde_json::from_str(&raw) {
            Ok(entries) => entries,
            Err(e) => {
                log::error!("Failed to parse API keys from storage: {e}");
                Vec::new()
            }
        }
    }

    /// 覆盖保存所有凭证
    pub fn save_all(&self, entries: &[CredentialEntry]) {
        let json = match serde_json::to_string(entries) {
            Ok(json) => json,
            Err(e) => {
                log::error!("Failed to serialize API keys: {e}");
                return;
            }
        };

        match self.storage.set(&self.config.collection_key, &json) {
            Ok(()) => log::debug!("Saved {} API keys", entries.len()),
            Err(e) => log::error!("Failed to save API keys to storage: {e}"),
        }
    }

    /// 保存表单提交的列表，先丢弃空白草稿。返回实际保存的条目。
    pub fn commit(&self, entries: Vec<CredentialEntry>) -> Vec<CredentialEntry> {
        let committed = retain_committed(entries);
        self.save_all(&committed);
        committed
    }

    /// 当前活动索引，未设置或无法解析时为 0
    pub fn active_index(&self) -> usize {
        match self.storage.get(&self.config.active_index_key) {
            Ok(Some(raw)) => raw.trim().parse().unwrap_or_else(|e| {
                log::error!("Failed to parse active key index {raw:?}: {e}");
                0
            }),
            Ok(None) => 0,
            Err(e) => {
                log::error!("Failed to read active key index from storage: {e}");
                0
            }
        }
    }

    /// Persist `index` verbatim. Bounds are the caller's business.
    pub fn set_active_index(&self, index: usize) {
        if let Err(e) = self
            .storage
            .set(&self.config.active_index_key, &index.to_string())
        {
            log::error!("Failed to save active key index to storage: {e}");
        }
    }

    /// Secret at the active index, if that entry exists and has one.
    pub fn active_secret(&self) -> Option<String> {
        self.get_all()
            .into_iter()
            .nth(self.active_index())
            .filter(CredentialEntry::has_secret)
            .map(|e| e.secret)
    }

    /// 追加条目
    pub fn add(&self, entry: CredentialEntry) {
        let mut entries = self.get_all();
        log::info!("Adding API key: {}", entry.display_name);
        entries.push(entry);
        self.save_all(&entries);
    }

    /// 合并更新到 `id` 对应的条目；不存在时什么也不做
    pub fn update(&self, id: &str, update: &CredentialUpdate) {
        let mut entries = self.get_all();
        let Some(entry) = entries.iter_mut().find(|e| e.id == id) else {
            log::debug!("Update skipped, no API key with id {id}");
            return;
        };
        update.apply_to(entry);
        self.save_all(&entries);
    }

    /// 删除条目；若活动索引越界则重置为 0
    pub fn remove(&self, id: &str) {
        let mut entries = self.get_all();
        entries.retain(|e| e.id != id);
        self.save_all(&entries);

        if self.active_index() >= entries.len() {
            self.set_active_index(0);
        }
        log::info!("Removed API key {id}, {} remaining", entries.len());
    }

    /// Check one secret against the provider. Never fails.
    pub async fn test_one(&self, secret: &str) -> bool {
        self.validator.validate(secret).await
    }

    /// Check every non-blank entry, one at a time, stamp the results and persist.
    ///
    /// Blank entries pass through unchanged. Checks are not run concurrently so a
    /// rate-limited validation endpoint sees one request at a time.
    pub async fn test_all(&self) -> Vec<CredentialEntry> {
        let mut entries = self.get_all();
        for entry in &mut entries {
            if entry.is_blank() {
                continue;
            }
            let valid = self.test_one(&entry.secret).await;
            log::info!(
                "API key {} ({}) is {}",
                entry.display_name,
                mask_secret(&entry.secret),
                if valid { "valid" } else { "invalid" }
            );
            entry.mark_validated(valid, Utc::now());
        }
        self.save_all(&entries);
        entries
    }

    /// Round-robin lookup starting at the active index.
    ///
    /// Returns the first entry, scanning circularly, that has a secret and was not
    /// explicitly marked invalid; untested entries count. Moves the active index there
    /// when it differs.
    pub fn next_valid(&self) -> Option<String> {
        let entries = self.get_all();
        if entries.is_empty() {
            return None;
        }
        let active = self.active_index();
        self.select_from(&entries, active % entries.len(), active)
    }

    /// Like [`Self::next_valid`], but starts one past the active index, so repeated
    /// calls walk through every eligible entry before repeating one.
    pub fn rotate(&self) -> Option<String> {
        let entries = self.get_all();
        if entries.is_empty() {
            return None;
        }
        let active = self.active_index();
        self.select_from(&entries, (active % entries.len() + 1) % entries.len(), active)
    }

    fn select_from(&self, entries: &[CredentialEntry], start: usize, active: usize) -> Option<String> {
        let len = entries.len();
        let index = (0..len)
            .map(|offset| (start + offset) % len)
            .find(|&index| entries[index].is_eligible())?;

        if index != active {
            self.set_active_index(index);
        }
        Some(entries[index].secret.clone())
    }

    /// Process-level fallback key, if configured.
    pub fn environment_secret(&self) -> Option<&str> {
        self.environment_secret.as_deref()
    }
}
