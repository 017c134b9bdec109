//! 测试辅助模块
//!
//! 提供 mock 实现和便捷的测试工厂方法。

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, RwLock};

use async_trait::async_trait;

use crate::config::StoreConfig;
use crate::error::{CoreError, CoreResult};
use crate::services::{CredentialStore, FailoverInvoker};
use crate::traits::{CredentialValidator, KeyValueStore};
use crate::types::CredentialEntry;

// ===== MockKeyValueStore =====

pub struct MockKeyValueStore {
    records: RwLock<HashMap<String, String>>,
    /// 为 true 时 get 返回错误
    fail_reads: AtomicBool,
    /// 为 true 时 set 返回错误（模拟配额超限）
    fail_writes: AtomicBool,
    writes: AtomicUsize,
}

impl MockKeyValueStore {
    pub fn new() -> Self {
        Self {
            records: RwLock::new(HashMap::new()),
            fail_reads: AtomicBool::new(false),
            fail_writes: AtomicBool::new(false),
            writes: AtomicUsize::new(0),
        }
    }

    pub fn set_fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    /// 直接写入原始值（绕过 Store，用于构造损坏数据）
    pub fn put_raw(&self, key: &str, value: &str) {
        self.records
            .write()
            .unwrap()
            .insert(key.to_string(), value.to_string());
    }

    pub fn raw(&self, key: &str) -> Option<String> {
        self.records.read().unwrap().get(key).cloned()
    }
}

impl KeyValueStore for MockKeyValueStore {
    fn get(&self, key: &str) -> CoreResult<Option<String>> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(CoreError::StorageError("read failed".to_string()));
        }
        Ok(self.records.read().unwrap().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> CoreResult<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(CoreError::StorageError("quota exceeded".to_string()));
        }
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.records
            .write()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

// ===== MockValidator =====

/// Accepts exactly the secrets it was built with and records every secret it checks.
pub struct MockValidator {
    accepted: Vec<String>,
    calls: Mutex<Vec<String>>,
}

impl MockValidator {
    pub fn accepting(accepted: &[&str]) -> Self {
        Self {
            accepted: accepted.iter().map(|s| (*s).to_string()).collect(),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl CredentialValidator for MockValidator {
    async fn validate(&self, secret: &str) -> bool {
        self.calls.lock().unwrap().push(secret.to_string());
        // Yield so that any accidental concurrency would interleave.
        tokio::task::yield_now().await;
        self.accepted.iter().any(|s| s == secret)
    }
}

// ===== 工厂方法 =====

/// 创建测试用 `CredentialStore`
pub fn create_test_store(
    environment_secret: Option<&str>,
    accepted: &[&str],
) -> (
    Arc<CredentialStore>,
    Arc<MockKeyValueStore>,
    Arc<MockValidator>,
) {
    let storage = Arc::new(MockKeyValueStore::new());
    let validator = Arc::new(MockValidator::accepting(accepted));
    let store = Arc::new(CredentialStore::new(
        storage.clone(),
        validator.clone(),
        StoreConfig::default(),
        environment_secret.map(str::to_string),
    ));
    (store, storage, validator)
}

/// 创建测试用 `FailoverInvoker`
pub fn create_test_invoker(
    environment_secret: Option<&str>,
) -> (FailoverInvoker, Arc<CredentialStore>, Arc<MockKeyValueStore>) {
    let (store, storage, _) = create_test_store(environment_secret, &[]);
    (FailoverInvoker::new(store.clone()), store, storage)
}

/// `(id, secret, name)` 列表转为条目
pub fn entries(items: &[(&str, &str, &str)]) -> Vec<CredentialEntry> {
    items
        .iter()
        .map(|(id, secret, name)| CredentialEntry::new(*id, *secret, *name))
        .collect()
}
