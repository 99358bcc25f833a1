//! 报告导出：CSV表格与JSON

use std::io::Write;

use csv::Writer;

use super::model::ScanReport;
use crate::error::{AdResult, AgencyDetectorError};

/// CSV表头
pub const CSV_HEADERS: [&str; 4] = ["URL", "Agency Detected", "Evidence Type", "Error Detail"];

/// 导出格式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    #[default]
    Csv,
    Json,
}

impl ExportFormat {
    /// 宽松解析（忽略大小写）
    pub fn from_str_lenient(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "csv" => Some(Self::Csv),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

/// 按指定格式写出报告
pub fn write_report<W: Write>(report: &ScanReport, format: ExportFormat, writer: W) -> AdResult<()> {
    match format {
        ExportFormat::Csv => write_csv(report, writer),
        ExportFormat::Json => write_json(report, writer),
    }
}

/// 写出CSV，每条记录一行
pub fn write_csv<W: Write>(report: &ScanReport, writer: W) -> AdResult<()> {
    let mut wtr = Writer::from_writer(writer);
    wtr.write_record(CSV_HEADERS)?;

    for record in report.records() {
        wtr.write_record([
            record.input_url.as_str(),
            record.agency_label(),
            record.evidence_label().as_str(),
            record.error_detail.as_deref().unwrap_or_default(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

/// 写出JSON（平铺的记录数组）
pub fn write_json<W: Write>(report: &ScanReport, mut writer: W) -> AdResult<()> {
    let records: Vec<_> = report.records().collect();
    serde_json::to_writer_pretty(&mut writer, &records)?;
    writer.write_all(b"\n")?;
    Ok(())
}

/// 导出为CSV字符串
pub fn to_csv_string(report: &ScanReport) -> AdResult<String> {
    let mut buf = Vec::new();
    write_csv(report, &mut buf)?;
    String::from_utf8(buf).map_err(|e| AgencyDetectorError::InvalidInput(e.to_string()))
}
