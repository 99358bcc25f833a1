//! HTTP页面抓取器
//! 每个URL只发一次GET，不重试；任何故障都转成 FetchOutcome

use std::error::Error as StdError;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use tracing::debug;
use url::Url;

use super::outcome::FetchOutcome;
use crate::config::ScanConfig;
use crate::error::AdResult;

/// 页面抓取接口，便于在编排器中替换为测试桩
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// 抓取单个URL，不得向外抛错
    async fn fetch(&self, url: &str) -> FetchOutcome;
}

/// 基于 reqwest 的抓取器
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// 按配置构建（超时、User-Agent）
    pub fn new(config: &ScanConfig) -> AdResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.http_timeout))
            .user_agent(config.user_agent.as_str())
            .build()?;
        Ok(Self { client })
    }

    /// 使用外部构建好的客户端
    pub fn from_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> FetchOutcome {
        let parsed = match Url::parse(url) {
            Ok(parsed) => parsed,
            Err(e) => {
                return FetchOutcome::NetworkError {
                    message: format!("Invalid URL {}: {}", url, e),
                };
            }
        };

        let outcome = match self.client.get(parsed).send().await {
            Err(e) => FetchOutcome::NetworkError { message: error_chain(&e) },
            Ok(response) if response.status() != StatusCode::OK => FetchOutcome::HttpError {
                status_code: response.status().as_u16(),
            },
            Ok(response) => match response.text().await {
                Ok(html) if !html.is_empty() => FetchOutcome::Success { html },
                Ok(_) => FetchOutcome::HttpError {
                    status_code: StatusCode::OK.as_u16(),
                },
                Err(e) => FetchOutcome::NetworkError { message: error_chain(&e) },
            },
        };

        debug!("抓取完成：URL={}，结果={}", url, outcome);
        outcome
    }
}

/// 拼接 reqwest 错误及其底层原因，超时单独标注
fn error_chain(err: &reqwest::Error) -> String {
    let mut message = if err.is_timeout() {
        format!("Timed out: {}", err)
    } else {
        err.to_string()
    };

    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
