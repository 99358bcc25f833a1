//! 扫描报告数据模型
//! 仅存储结果数据，支持序列化

use std::collections::BTreeSet;
use std::fmt;
use serde::{Deserialize, Serialize};

use crate::detector::{Evidence, EvidenceKind};

/// 单条记录的状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScanStatus {
    Detected,
    NoMatch,
    Error,
}

impl fmt::Display for ScanStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScanStatus::Detected => write!(f, "detected"),
            ScanStatus::NoMatch => write!(f, "no_match"),
            ScanStatus::Error => write!(f, "error"),
        }
    }
}

/// 错误记录的分类
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScanErrorKind {
    /// 输入为空，未发起请求
    EmptyInput,
    /// DNS/连接/TLS/超时等
    TransportFailure,
    /// 非200状态码或空响应体
    HttpFailure,
}

/// 单条扫描结果记录，追加到报告后不再修改
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanRecord {
    /// 原始输入（未规范化）
    pub input_url: String,
    pub status: ScanStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vendor_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub evidence_kinds: Option<BTreeSet<EvidenceKind>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_kind: Option<ScanErrorKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_detail: Option<String>,
}

impl ScanRecord {
    pub fn detected(input_url: impl Into<String>, evidence: Evidence) -> Self {
        Self {
            input_url: input_url.into(),
            status: ScanStatus::Detected,
            vendor_name: Some(evidence.vendor_name),
            evidence_kinds: Some(evidence.kinds),
            error_kind: None,
            error_detail: None,
        }
    }

    pub fn no_match(input_url: impl Into<String>) -> Self {
        Self {
            input_url: input_url.into(),
            status: ScanStatus::NoMatch,
            vendor_name: None,
            evidence_kinds: None,
            error_kind: None,
            error_detail: None,
        }
    }

    pub fn error(
        input_url: impl Into<String>,
        kind: ScanErrorKind,
        detail: impl Into<String>,
    ) -> Self {
        Self {
            input_url: input_url.into(),
            status: ScanStatus::Error,
            vendor_name: None,
            evidence_kinds: None,
            error_kind: Some(kind),
            error_detail: Some(detail.into()),
        }
    }

    /// 表格输出的 `Agency Detected` 列：厂商名 / `None` / `Error`
    pub fn agency_label(&self) -> &str {
        match self.status {
            ScanStatus::Detected => self.vendor_name.as_deref().unwrap_or_default(),
            ScanStatus::NoMatch => "None",
            ScanStatus::Error => "Error",
        }
    }

    /// 表格输出的 `Evidence Type` 列，仅 Detected 有值
    pub fn evidence_label(&self) -> String {
        self.evidence_kinds
            .as_ref()
            .map(|kinds| kinds.iter().map(EvidenceKind::as_str).collect::<Vec<_>>().join(", "))
            .unwrap_or_default()
    }
}

/// 报告统计（按URL计数）
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ScanSummary {
    pub total_urls: usize,
    pub detected_urls: usize,
    pub no_match_urls: usize,
    pub error_urls: usize,
}

/// 扫描报告：每个输入URL对应一组连续记录，顺序与输入一致
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ScanReport {
    groups: Vec<Vec<ScanRecord>>,
}

impl ScanReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// 追加一个URL的记录组
    pub fn push_group(&mut self, group: Vec<ScanRecord>) {
        self.groups.push(group);
    }

    /// 按输入顺序遍历记录组
    pub fn groups(&self) -> impl Iterator<Item = &[ScanRecord]> {
        self.groups.iter().map(Vec::as_slice)
    }

    /// 平铺遍历全部记录
    pub fn records(&self) -> impl Iterator<Item = &ScanRecord> {
        self.groups.iter().flatten()
    }

    /// 输入URL数量（记录组数）
    pub fn url_count(&self) -> usize {
        self.groups.len()
    }

    /// 记录总数
    pub fn len(&self) -> usize {
        self.groups.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn summary(&self) -> ScanSummary {
        let mut summary = ScanSummary {
            total_urls: self.groups.len(),
            ..ScanSummary::default()
        };
        for group in &self.groups {
            match group.first().map(|record| record.status) {
                Some(ScanStatus::Detected) => summary.detected_urls += 1,
                Some(ScanStatus::NoMatch) => summary.no_match_urls += 1,
                Some(ScanStatus::Error) => summary.error_urls += 1,
                None => {}
            }
        }
        summary
    }

    pub fn into_records(self) -> Vec<ScanRecord> {
        self.groups.into_iter().flatten().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn evidence(vendor: &str, kinds: &[EvidenceKind]) -> Evidence {
        Evidence {
            vendor_name: vendor.to_string(),
            kinds: kinds.iter().copied().collect(),
        }
    }

    #[test]
    fn test_record_labels() {
        let detected = ScanRecord::detected(
            "firm.com",
            evidence("Scorpion", &[EvidenceKind::Text, EvidenceKind::Asset]),
        );
        assert_eq!(detected.agency_label(), "Scorpion");
        assert_eq!(detected.evidence_label(), "asset, text");

        let none = ScanRecord::no_match("firm.com");
        assert_eq!(none.agency_label(), "None");
        assert_eq!(none.evidence_label(), "");

        let error = ScanRecord::error("", ScanErrorKind::EmptyInput, "Empty URL");
        assert_eq!(error.agency_label(), "Error");
        assert_eq!(error.evidence_label(), "");
        assert_eq!(error.error_detail.as_deref(), Some("Empty URL"));
    }

    #[test]
    fn test_report_grouping_and_summary() {
        let mut report = ScanReport::new();
        report.push_group(vec![
            ScanRecord::detected("a.com", evidence("FindLaw", &[EvidenceKind::Text])),
            ScanRecord::detected("a.com", evidence("Thomson Reuters", &[EvidenceKind::Text])),
        ]);
        report.push_group(vec![ScanRecord::no_match("b.com")]);
        report.push_group(vec![ScanRecord::error("c.com", ScanErrorKind::HttpFailure, "HTTP 500")]);

        assert_eq!(report.url_count(), 3);
        assert_eq!(report.len(), 4);
        assert_eq!(
            report.summary(),
            ScanSummary { total_urls: 3, detected_urls: 1, no_match_urls: 1, error_urls: 1 }
        );
        let urls: Vec<_> = report.records().map(|r| r.input_url.as_str()).collect();
        assert_eq!(urls, vec!["a.com", "a.com", "b.com", "c.com"]);
    }

    #[test]
    fn test_record_serialization() {
        let record = ScanRecord::error("x.com", ScanErrorKind::TransportFailure, "dns error");
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["status"], "error");
        assert_eq!(json["error_kind"], "transport_failure");
        assert!(json.get("vendor_name").is_none());

        let record = ScanRecord::detected("y.com", evidence("Justia", &[EvidenceKind::Text]));
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["evidence_kinds"], serde_json::json!(["text"]));
    }
}
