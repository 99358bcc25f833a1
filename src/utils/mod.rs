//! 工具模块
pub mod url_normalizer;

pub use self::url_normalizer::UrlNormalizer;

/// 规范化原始URL输入，见 [`UrlNormalizer::normalize`]
pub fn normalize_url(raw: &str) -> String {
    UrlNormalizer::normalize(raw)
}
