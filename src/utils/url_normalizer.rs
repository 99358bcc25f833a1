//! URL规范化工具
//! 将用户输入的原始字符串转为可抓取的绝对URL

/// URL规范化工具
pub struct UrlNormalizer;

impl UrlNormalizer {
    /// 去除首尾空白；空输入返回空串；无协议前缀时补 `http://`
    pub fn normalize(raw: &str) -> String {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return String::new();
        }
        if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
            return trimmed.to_string();
        }
        format!("http://{}", trimmed)
    }
}
