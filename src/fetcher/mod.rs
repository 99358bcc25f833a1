//! 抓取模块：单次HTTP GET与结果分类
pub mod outcome;
pub mod http_fetcher;

pub use self::outcome::FetchOutcome;
pub use self::http_fetcher::{HttpFetcher, PageFetcher};
