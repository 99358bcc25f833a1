//! 提取模块：从HTML中提取用于厂商匹配的信号文本
pub mod html_extractor;

pub use self::html_extractor::{HtmlExtractor, SignalTexts};
