//! 全局错误类型定义
//! 单个URL的扫描失败不走这里，而是作为 `ScanRecord` 数据返回

use thiserror::Error;
use serde_json::Error as SerdeJsonError;
use std::io::Error as IoError;

#[derive(Error, Debug)]
pub enum AgencyDetectorError {
    // 签名库相关错误
    #[error("签名库加载失败：{0}")]
    RegistryLoadError(String),
    #[error("签名库无效：{0}")]
    InvalidRegistry(String),

    // 网络相关错误
    #[error("HTTP客户端初始化失败：{0}")]
    HttpClientError(#[from] reqwest::Error),

    // 序列化/反序列化错误
    #[error("JSON解析失败：{0}")]
    JsonError(#[from] SerdeJsonError),
    #[error("CSV读写失败：{0}")]
    CsvError(#[from] csv::Error),

    // 基础错误
    #[error("IO操作失败：{0}")]
    IoError(#[from] IoError),
    #[error("无效输入：{0}")]
    InvalidInput(String),
}

// 全局Result类型
pub type AdResult<T> = Result<T, AgencyDetectorError>;
