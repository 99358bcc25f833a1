//! 抓取结果模型：所有抓取失败都转为分类后的结果，而不是向上抛错

use std::fmt;

/// 单次抓取的结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// 状态码 200 且响应体非空
    Success { html: String },
    /// 其它状态码，或 200 但响应体为空
    HttpError { status_code: u16 },
    /// 连接、DNS、TLS、超时等传输层故障
    NetworkError { message: String },
}

impl FetchOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, FetchOutcome::Success { .. })
    }

    /// 失败原因的可读描述，成功时返回 None
    pub fn describe_failure(&self) -> Option<String> {
        match self {
            FetchOutcome::Success { .. } => None,
            FetchOutcome::HttpError { status_code } => Some(format!("HTTP {}", status_code)),
            FetchOutcome::NetworkError { message } => Some(message.clone()),
        }
    }
}

impl fmt::Display for FetchOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchOutcome::Success { html } => write!(f, "OK ({} bytes)", html.len()),
            FetchOutcome::HttpError { status_code } => write!(f, "HTTP {}", status_code),
            FetchOutcome::NetworkError { message } => write!(f, "network error: {}", message),
        }
    }
}
