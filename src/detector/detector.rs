//! 检测器核心：提取信号文本、构建语料并按签名库匹配厂商
use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::corpus::SearchCorpus;
use crate::extractor::HtmlExtractor;
use crate::registry::SignatureRegistry;

/// 证据类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EvidenceKind {
    Asset,
    Text,
}

impl EvidenceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EvidenceKind::Asset => "asset",
            EvidenceKind::Text => "text",
        }
    }
}

impl fmt::Display for EvidenceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 单个厂商在单个URL上的证据
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Evidence {
    pub vendor_name: String,
    /// 非空，`Text` 必然存在；有序集合保证输出为 `asset, text`
    pub kinds: BTreeSet<EvidenceKind>,
}

impl Evidence {
    /// 以逗号拼接证据类型，如 `asset, text`
    pub fn kinds_label(&self) -> String {
        self.kinds.iter().map(EvidenceKind::as_str).collect::<Vec<_>>().join(", ")
    }
}

/// 单个文档的检测结果：厂商名 -> 证据，按签名库顺序排列
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Detection {
    matches: Vec<Evidence>,
}

impl Detection {
    pub fn get(&self, vendor_name: &str) -> Option<&Evidence> {
        self.matches.iter().find(|e| e.vendor_name == vendor_name)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Evidence> {
        self.matches.iter()
    }

    pub fn vendor_names(&self) -> impl Iterator<Item = &str> {
        self.matches.iter().map(|e| e.vendor_name.as_str())
    }

    pub fn len(&self) -> usize {
        self.matches.len()
    }

    /// 空结果表示未识别到厂商，并非错误
    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }
}

impl IntoIterator for Detection {
    type Item = Evidence;
    type IntoIter = std::vec::IntoIter<Evidence>;

    fn into_iter(self) -> Self::IntoIter {
        self.matches.into_iter()
    }
}

/// 厂商检测器
#[derive(Debug, Clone)]
pub struct VendorDetector {
    registry: Arc<SignatureRegistry>,
}

impl Default for VendorDetector {
    fn default() -> Self {
        Self::new(SignatureRegistry::builtin())
    }
}

impl VendorDetector {
    /// 使用指定签名库创建检测器
    pub fn new(registry: Arc<SignatureRegistry>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &SignatureRegistry {
        &self.registry
    }

    /// 检测HTML文档，任何解析异常都只会让对应来源缺失，不会失败
    pub fn detect(&self, html: &str) -> Detection {
        let signals = HtmlExtractor::extract(html);
        let corpus = SearchCorpus::from_signals(&signals);
        self.detect_corpus(&corpus)
    }

    /// 在已构建好的语料上匹配签名库
    pub fn detect_corpus(&self, corpus: &SearchCorpus) -> Detection {
        let mut matches = Vec::new();
        if corpus.is_empty() {
            return Detection { matches };
        }

        // 资源证据按整份语料判断，与命中的是哪个签名无关
        let has_asset = corpus.has_asset_marker();

        for entry in self.registry.entries() {
            // 每个厂商首个命中的签名即可，不再继续
            let Some(signature) = entry.signatures.iter().find(|sig| corpus.contains(sig)) else {
                continue;
            };
            debug!("签名匹配成功：厂商={}，签名={}", entry.vendor_name, signature);

            let mut kinds = BTreeSet::from([EvidenceKind::Text]);
            if has_asset {
                kinds.insert(EvidenceKind::Asset);
            }
            matches.push(Evidence {
                vendor_name: entry.vendor_name.clone(),
                kinds,
            });
        }

        Detection { matches }
    }
}
