//! 批量扫描编排器
//! 逐个URL执行 规范化 -> 抓取 -> 检测，单个URL失败只产生一条 Error 记录，不影响后续URL

use std::sync::Arc;

use futures::stream::{self, StreamExt};
use tracing::{debug, info, warn};

use super::progress::ProgressObserver;
use crate::config::ScanConfig;
use crate::detector::VendorDetector;
use crate::error::AdResult;
use crate::fetcher::{FetchOutcome, HttpFetcher, PageFetcher};
use crate::registry::SignatureRegistry;
use crate::report::{ScanErrorKind, ScanRecord, ScanReport};
use crate::utils::UrlNormalizer;

/// 空输入的错误描述
pub const EMPTY_URL_DETAIL: &str = "Empty URL";

/// 批量扫描器
#[derive(Clone)]
pub struct BatchScanner {
    fetcher: Arc<dyn PageFetcher>,
    detector: VendorDetector,
    concurrency: usize,
}

impl BatchScanner {
    /// 使用指定抓取器与检测器创建，默认严格顺序执行
    pub fn new(fetcher: Arc<dyn PageFetcher>, detector: VendorDetector) -> Self {
        Self {
            fetcher,
            detector,
            concurrency: 1,
        }
    }

    /// 按配置创建基于HTTP的扫描器
    pub fn from_config(config: &ScanConfig, registry: Arc<SignatureRegistry>) -> AdResult<Self> {
        let fetcher = HttpFetcher::new(config)?;
        Ok(Self::new(Arc::new(fetcher), VendorDetector::new(registry))
            .with_concurrency(config.concurrency))
    }

    /// 同时进行的URL数，结果仍按输入顺序汇总
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    pub fn detector(&self) -> &VendorDetector {
        &self.detector
    }

    /// 扫描一批URL，每个输入对应报告中的一组记录，顺序与输入一致
    pub async fn scan<S>(&self, urls: &[S], observer: &dyn ProgressObserver) -> ScanReport
    where
        S: AsRef<str> + Sync,
    {
        let total = urls.len();
        let mut report = ScanReport::new();
        debug!("开始批量扫描：URL数={}，并发={}", total, self.concurrency);

        // buffered 按提交顺序产出结果，完成计数因此严格递增
        let mut groups = stream::iter(urls.iter().map(|url| self.scan_one(url.as_ref())))
            .buffered(self.concurrency);

        let mut completed = 0;
        while let Some(group) = groups.next().await {
            report.push_group(group);
            completed += 1;
            observer.on_progress(completed, total);
        }

        let summary = report.summary();
        info!(
            "扫描完成：共{}个URL，识别{}，未识别{}，失败{}",
            summary.total_urls, summary.detected_urls, summary.no_match_urls, summary.error_urls
        );
        report
    }

    /// 扫描单个URL，返回该URL的记录组（至少一条）
    pub async fn scan_one(&self, raw_url: &str) -> Vec<ScanRecord> {
        let url = UrlNormalizer::normalize(raw_url);
        if url.is_empty() {
            warn!("跳过空URL输入");
            return vec![ScanRecord::error(raw_url, ScanErrorKind::EmptyInput, EMPTY_URL_DETAIL)];
        }

        let html = match self.fetcher.fetch(&url).await {
            FetchOutcome::Success { html } => html,
            failure => {
                let kind = match failure {
                    FetchOutcome::HttpError { .. } => ScanErrorKind::HttpFailure,
                    _ => ScanErrorKind::TransportFailure,
                };
                let detail = failure.describe_failure().unwrap_or_else(|| failure.to_string());
                warn!("抓取失败：URL={}，原因={}", url, detail);
                return vec![ScanRecord::error(raw_url, kind, detail)];
            }
        };

        let detection = self.detector.detect(&html);
        if detection.is_empty() {
            debug!("未识别到厂商：URL={}", url);
            return vec![ScanRecord::no_match(raw_url)];
        }

        info!(
            "识别到厂商：URL={}，厂商={}",
            url,
            detection.vendor_names().collect::<Vec<_>>().join(", ")
        );
        detection
            .into_iter()
            .map(|evidence| ScanRecord::detected(raw_url, evidence))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::{BTreeSet, HashMap};
    use std::sync::Mutex;
    use std::time::Duration;

    use async_trait::async_trait;

    use crate::detector::EvidenceKind;
    use crate::report::ScanStatus;
    use crate::scanner::NoProgress;

    /// 测试桩：按URL返回预设结果，并记录请求过的URL
    #[derive(Default)]
    struct StubFetcher {
        pages: HashMap<String, FetchOutcome>,
        delays_ms: HashMap<String, u64>,
        requested: Mutex<Vec<String>>,
    }

    impl StubFetcher {
        fn page(mut self, url: &str, outcome: FetchOutcome) -> Self {
            self.pages.insert(url.to_string(), outcome);
            self
        }

        fn html(self, url: &str, html: &str) -> Self {
            self.page(url, FetchOutcome::Success { html: html.to_string() })
        }

        fn delay(mut self, url: &str, ms: u64) -> Self {
            self.delays_ms.insert(url.to_string(), ms);
            self
        }
    }

    #[async_trait]
    impl PageFetcher for StubFetcher {
        async fn fetch(&self, url: &str) -> FetchOutcome {
            self.requested.lock().unwrap().push(url.to_string());
            if let Some(ms) = self.delays_ms.get(url) {
                tokio::time::sleep(Duration::from_millis(*ms)).await;
            }
            self.pages.get(url).cloned().unwrap_or(FetchOutcome::NetworkError {
                message: format!("dns error: failed to lookup address for {}", url),
            })
        }
    }

    fn scanner(fetcher: StubFetcher) -> (BatchScanner, Arc<StubFetcher>) {
        let fetcher = Arc::new(fetcher);
        let scanner = BatchScanner::new(fetcher.clone(), VendorDetector::default());
        (scanner, fetcher)
    }

    #[tokio::test]
    async fn test_end_to_end_scenario() {
        let (scanner, fetcher) = scanner(
            StubFetcher::default()
                .html("http://example.com", "<html><footer>Smith Law Group</footer></html>")
                .html("http://scorpion.co", "<footer>Powered by Scorpion</footer>"),
        );

        let report = scanner.scan(&["example.com", "scorpion.co", ""], &NoProgress).await;
        let groups: Vec<_> = report.groups().collect();
        assert_eq!(groups.len(), 3);

        assert_eq!(groups[0], &[ScanRecord::no_match("example.com")][..]);

        assert_eq!(groups[1].len(), 1);
        assert_eq!(groups[1][0].status, ScanStatus::Detected);
        assert_eq!(groups[1][0].vendor_name.as_deref(), Some("Scorpion"));
        assert_eq!(
            groups[1][0].evidence_kinds,
            Some(BTreeSet::from([EvidenceKind::Text]))
        );

        assert_eq!(groups[2].len(), 1);
        assert_eq!(groups[2][0].status, ScanStatus::Error);
        assert_eq!(groups[2][0].error_kind, Some(ScanErrorKind::EmptyInput));
        assert_eq!(groups[2][0].error_detail.as_deref(), Some("Empty URL"));

        // 空输入不发起请求
        assert_eq!(
            *fetcher.requested.lock().unwrap(),
            vec!["http://example.com".to_string(), "http://scorpion.co".to_string()]
        );
    }

    #[tokio::test]
    async fn test_failures_are_isolated() {
        let (scanner, _) = scanner(
            StubFetcher::default()
                .page("http://gone.com", FetchOutcome::HttpError { status_code: 404 })
                .page(
                    "https://slow.com",
                    FetchOutcome::NetworkError { message: "Timed out: operation timed out".to_string() },
                )
                .html("http://justia-site.com", r#"<link href="https://justia.com/theme.css">"#),
        );

        let urls = vec!["gone.com", "https://slow.com", " justia-site.com "];
        let report = scanner.scan(&urls, &NoProgress).await;
        let groups: Vec<_> = report.groups().collect();
        assert_eq!(groups.len(), 3);

        assert_eq!(groups[0].len(), 1);
        assert_eq!(groups[0][0].error_kind, Some(ScanErrorKind::HttpFailure));
        assert!(groups[0][0].error_detail.as_deref().unwrap().contains("404"));

        assert_eq!(groups[1].len(), 1);
        assert_eq!(groups[1][0].error_kind, Some(ScanErrorKind::TransportFailure));

        assert_eq!(groups[2][0].vendor_name.as_deref(), Some("Justia"));
        // 记录保留原始输入
        assert_eq!(groups[2][0].input_url, " justia-site.com ");
    }

    #[tokio::test]
    async fn test_error_detail_matches_fetch_failure_description() {
        let outcomes = [
            FetchOutcome::HttpError { status_code: 503 },
            FetchOutcome::HttpError { status_code: 200 },
            FetchOutcome::NetworkError { message: "connection refused".to_string() },
        ];
        let urls = ["http://a.com", "http://b.com", "http://c.com"];
        let stub = urls
            .iter()
            .zip(outcomes.iter())
            .fold(StubFetcher::default(), |stub, (url, outcome)| stub.page(url, outcome.clone()));
        let (scanner, _) = scanner(stub);

        let report = scanner.scan(&urls, &NoProgress).await;
        let details: Vec<_> = report.records().map(|r| r.error_detail.clone()).collect();
        let expected: Vec<_> = outcomes.iter().map(FetchOutcome::describe_failure).collect();
        assert_eq!(details, expected);
        assert_eq!(details[0].as_deref(), Some("HTTP 503"));
    }

    #[tokio::test]
    async fn test_multiple_vendors_produce_one_record_each() {
        let (scanner, _) = scanner(StubFetcher::default().html(
            "http://firm.com",
            r#"<meta content="martindale-avvo"><script src="/fwm/app.js"></script>"#,
        ));

        let group = scanner.scan_one("firm.com").await;
        let vendors: Vec<_> = group.iter().filter_map(|r| r.vendor_name.as_deref()).collect();
        assert_eq!(vendors, vec!["Martindale", "Foster Web Marketing"]);
        assert!(group.iter().all(|r| r.status == ScanStatus::Detected));
        assert!(group.iter().all(|r| {
            r.evidence_kinds == Some(BTreeSet::from([EvidenceKind::Asset, EvidenceKind::Text]))
        }));
    }

    #[tokio::test]
    async fn test_progress_reports_each_url() {
        let (scanner, _) = scanner(StubFetcher::default());
        let seen = Mutex::new(Vec::new());
        let observer = |completed: usize, total: usize| seen.lock().unwrap().push((completed, total));

        let report = scanner.scan(&["a.com", "", "b.com"], &observer).await;
        assert_eq!(report.url_count(), 3);
        assert_eq!(*seen.lock().unwrap(), vec![(1, 3), (2, 3), (3, 3)]);
    }

    #[tokio::test]
    async fn test_concurrent_scan_keeps_input_order() {
        let fetcher = StubFetcher::default()
            .html("http://one.com", "<footer>LawRank</footer>")
            .delay("http://one.com", 150)
            .html("http://two.com", "<footer>EverConvert</footer>")
            .delay("http://two.com", 10)
            .html("http://three.com", "<footer>nothing here</footer>");
        let (scanner, _) = scanner(fetcher);
        let scanner = scanner.with_concurrency(3);

        let seen = Mutex::new(Vec::new());
        let observer = |completed: usize, _total: usize| seen.lock().unwrap().push(completed);

        let report = scanner.scan(&["one.com", "two.com", "three.com"], &observer).await;
        let labels: Vec<_> = report.records().map(|r| r.agency_label().to_string()).collect();
        assert_eq!(labels, vec!["LawRank", "EverConvert", "None"]);
        assert_eq!(*seen.lock().unwrap(), vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_empty_batch() {
        let (scanner, _) = scanner(StubFetcher::default());
        let urls: Vec<String> = Vec::new();
        let report = scanner.scan(&urls, &NoProgress).await;
        assert!(report.is_empty());
    }
}
