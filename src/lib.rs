//! agency-detector - 律所网站建站服务商识别工具
//! 抓取网站HTML，按厂商签名库匹配 footer/meta/注释/资源引用，输出逐URL的识别报告

// 导出全局错误类型
pub use self::error::{AgencyDetectorError, AdResult};

// 导出配置模块
pub use self::config::{ScanConfig, ConfigManager, CustomConfigBuilder, DEFAULT_HTTP_TIMEOUT, DEFAULT_USER_AGENT};

// 导出签名库模块核心接口
pub use self::registry::{SignatureEntry, SignatureRegistry, RegistryLoader};

// 导出提取模块核心接口
pub use self::extractor::{HtmlExtractor, SignalTexts};

// 导出工具模块核心接口
pub use self::utils::{UrlNormalizer, normalize_url};

// 导出抓取模块核心接口
pub use self::fetcher::{FetchOutcome, HttpFetcher, PageFetcher};

// 导出检测模块核心接口
pub use self::detector::{Detection, Evidence, EvidenceKind, SearchCorpus, VendorDetector};

// 导出扫描与报告模块核心接口
pub use self::scanner::{BatchScanner, NoProgress, ProgressObserver};
pub use self::report::{ExportFormat, ScanErrorKind, ScanRecord, ScanReport, ScanStatus, ScanSummary};

// 声明所有子模块
pub mod config;
pub mod error;
pub mod registry;
pub mod extractor;
pub mod utils;
pub mod fetcher;
pub mod detector;
pub mod scanner;
pub mod report;
pub mod input;
