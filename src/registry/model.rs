//! 签名库数据模型定义
//! 仅存储签名数据，无检测逻辑，支持序列化/反序列化

use std::collections::HashSet;
use serde::{Deserialize, Serialize};

use crate::error::{AdResult, AgencyDetectorError};

/// 单个厂商的签名条目
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignatureEntry {
    #[serde(rename = "vendor")]
    pub vendor_name: String,
    pub signatures: Vec<String>,
}

impl SignatureEntry {
    pub fn new<I, S>(vendor_name: impl Into<String>, signatures: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            vendor_name: vendor_name.into(),
            signatures: signatures.into_iter().map(Into::into).collect(),
        }
    }
}

/// 签名库（构建后不可变）
/// 条目顺序即检测结果的输出顺序
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureRegistry {
    entries: Vec<SignatureEntry>,
}

impl SignatureRegistry {
    /// 校验并构建签名库，签名统一转为小写
    pub fn new(entries: Vec<SignatureEntry>) -> AdResult<Self> {
        let mut seen = HashSet::with_capacity(entries.len());
        let mut normalized = Vec::with_capacity(entries.len());

        for entry in entries {
            let vendor_name = entry.vendor_name.trim().to_string();
            if vendor_name.is_empty() {
                return Err(AgencyDetectorError::InvalidRegistry(
                    "厂商名称不能为空".to_string(),
                ));
            }
            if !seen.insert(vendor_name.clone()) {
                return Err(AgencyDetectorError::InvalidRegistry(format!(
                    "厂商名称重复：{}",
                    vendor_name
                )));
            }

            let signatures: Vec<String> = entry
                .signatures
                .iter()
                .filter(|sig| !sig.trim().is_empty())
                .map(|sig| sig.to_lowercase())
                .collect();
            if signatures.is_empty() {
                return Err(AgencyDetectorError::InvalidRegistry(format!(
                    "厂商 {} 没有有效签名",
                    vendor_name
                )));
            }

            normalized.push(SignatureEntry { vendor_name, signatures });
        }

        Ok(Self { entries: normalized })
    }

    /// 内置表专用：条目已是小写且无重复，跳过校验
    pub(crate) fn from_static(table: &[(&str, &[&str])]) -> Self {
        let entries = table
            .iter()
            .map(|(vendor, sigs)| SignatureEntry::new(*vendor, sigs.iter().copied()))
            .collect();
        Self { entries }
    }

    /// 按注册顺序返回全部条目
    pub fn entries(&self) -> &[SignatureEntry] {
        &self.entries
    }

    pub fn get(&self, vendor_name: &str) -> Option<&SignatureEntry> {
        self.entries.iter().find(|e| e.vendor_name == vendor_name)
    }

    pub fn vendor_names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.vendor_name.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signatures_lowercased() {
        let registry = SignatureRegistry::new(vec![
            SignatureEntry::new("Acme Legal", ["AcmeCMS", "  ", "acme-cdn"]),
        ])
        .unwrap();

        assert_eq!(
            registry.get("Acme Legal").unwrap().signatures,
            vec!["acmecms".to_string(), "acme-cdn".to_string()]
        );
    }

    #[test]
    fn test_duplicate_vendor_rejected() {
        let err = SignatureRegistry::new(vec![
            SignatureEntry::new("Acme", ["acme"]),
            SignatureEntry::new("Acme ", ["acme2"]),
        ])
        .unwrap_err();
        assert!(matches!(err, AgencyDetectorError::InvalidRegistry(_)));
    }

    #[test]
    fn test_entry_without_signatures_rejected() {
        let err = SignatureRegistry::new(vec![SignatureEntry::new("Empty", [""])]).unwrap_err();
        assert!(matches!(err, AgencyDetectorError::InvalidRegistry(_)));

        let err = SignatureRegistry::new(vec![SignatureEntry::new(" ", ["x"])]).unwrap_err();
        assert!(matches!(err, AgencyDetectorError::InvalidRegistry(_)));
    }

    #[test]
    fn test_order_preserved() {
        let registry = SignatureRegistry::new(vec![
            SignatureEntry::new("Zeta", ["zeta"]),
            SignatureEntry::new("Alpha", ["alpha"]),
        ])
        .unwrap();
        assert_eq!(registry.vendor_names().collect::<Vec<_>>(), vec!["Zeta", "Alpha"]);
        assert_eq!(registry.len(), 2);
        assert!(!registry.is_empty());
    }
}
