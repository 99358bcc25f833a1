//! 扫描模块：批量编排与进度通知
pub mod progress;
pub mod batch_scanner;

pub use self::progress::{NoProgress, ProgressObserver};
pub use self::batch_scanner::{BatchScanner, EMPTY_URL_DETAIL};
