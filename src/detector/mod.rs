//! 检测模块：厂商检测核心逻辑
pub mod corpus;
pub mod detector;

// 导出核心接口
pub use self::corpus::{SearchCorpus, ASSET_MARKERS};
pub use self::detector::{Detection, Evidence, EvidenceKind, VendorDetector};
