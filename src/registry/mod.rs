//! 签名库模块：负责厂商签名的数据模型、内置表与加载
pub mod model;
pub mod builtin;
pub mod loader;

// 导出核心接口
pub use self::model::{SignatureEntry, SignatureRegistry};
pub use self::loader::RegistryLoader;
