//! 签名库加载器
//! 负责从JSON文本或本地文件加载自定义签名库

use std::path::Path;
use tracing::debug;

use super::model::{SignatureEntry, SignatureRegistry};
use crate::error::{AdResult, AgencyDetectorError};

/// 签名库加载器
///
/// JSON格式为按顺序排列的条目数组：
/// `[{"vendor": "Scorpion", "signatures": ["scorpion", "scorpioncms"]}]`
pub struct RegistryLoader;

impl RegistryLoader {
    /// 从JSON字符串加载
    pub fn from_json_str(json: &str) -> AdResult<SignatureRegistry> {
        let entries: Vec<SignatureEntry> = serde_json::from_str(json)?;
        if entries.is_empty() {
            return Err(AgencyDetectorError::RegistryLoadError(
                "签名库为空".to_string(),
            ));
        }
        SignatureRegistry::new(entries)
    }

    /// 从本地JSON文件加载
    pub async fn from_file(path: impl AsRef<Path>) -> AdResult<SignatureRegistry> {
        let path = path.as_ref();
        let content = tokio::fs::read_to_string(path).await.map_err(|e| {
            AgencyDetectorError::RegistryLoadError(format!("读取 {} 失败：{}", path.display(), e))
        })?;

        let registry = Self::from_json_str(&content)?;
        debug!("从 {} 加载签名库成功，厂商数：{}", path.display(), registry.len());
        Ok(registry)
    }
}
