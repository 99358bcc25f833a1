//! 搜索语料：由信号文本拼接并转小写，所有签名都在其上做字面子串匹配

use crate::extractor::SignalTexts;

/// 出现任意一个即视为存在资源类证据
pub const ASSET_MARKERS: [&str; 6] = [".js", ".css", "cdn", ".png", ".jpg", ".svg"];

/// 单个文档的搜索语料
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchCorpus(String);

impl SearchCorpus {
    /// 以单个空格拼接信号文本后整体转小写
    pub fn from_signals(texts: &SignalTexts) -> Self {
        let joined = texts.iter().collect::<Vec<_>>().join(" ");
        Self(joined.to_lowercase())
    }

    /// 直接由文本构建（同样转小写）
    pub fn from_text(text: &str) -> Self {
        Self(text.to_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// 签名需为小写
    pub fn contains(&self, signature: &str) -> bool {
        self.0.contains(signature)
    }

    /// 整个语料范围内是否出现资源标记（不限定在签名命中位置附近）
    pub fn has_asset_marker(&self) -> bool {
        ASSET_MARKERS.iter().any(|marker| self.0.contains(marker))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
