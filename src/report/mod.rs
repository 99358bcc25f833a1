//! 报告模块：扫描结果记录、报告容器与导出
pub mod model;
pub mod export;

pub use self::model::{ScanErrorKind, ScanRecord, ScanReport, ScanStatus, ScanSummary};
pub use self::export::{write_report, ExportFormat, CSV_HEADERS};
