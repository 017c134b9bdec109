//! 本地键值存储抽象 Trait

use crate::error::CoreResult;

/// Local key-value storage.
///
/// The credential store keeps two records in here: the serialized key list and the
/// active index. No transactions and no versioning: concurrent writers race and the
/// last write wins.
///
/// Implementations:
/// - `MemoryKeyValueStore` (tests, ephemeral sessions)
/// - `JsonFileKeyValueStore` (CLI; one JSON object file)
/// - `KeyringKeyValueStore` (desktop keychain, feature `keyring-store`)
pub trait KeyValueStore: Send + Sync {
    /// 读取记录
    ///
    /// # Returns
    /// * `Ok(Some(value))` - 记录存在
    /// * `Ok(None)` - 记录不存在
    fn get(&self, key: &str) -> CoreResult<Option<String>>;

    /// 写入记录（覆盖）
    fn set(&self, key: &str, value: &str) -> CoreResult<()>;
}
