//! 内置厂商签名表（16家律所营销服务商）
//! 修改厂商或签名只需编辑此表，无需改动检测逻辑

use std::sync::Arc;
use once_cell::sync::Lazy;

use super::model::SignatureRegistry;

/// 厂商名称 -> 签名列表（均为小写字面量）
const BUILTIN_SIGNATURES: &[(&str, &[&str])] = &[
    ("Hennessey Digital", &["hennessey"]),
    ("Scorpion", &["scorpion", "scorpioncms"]),
    ("LawRank", &["lawrank"]),
    ("iLawyerMarketing", &["ilawyermarketing"]),
    ("Elite Legal Marketing", &["elitelegalmarketing"]),
    ("Juris Digital", &["jurisdigital"]),
    ("Justia", &["justia"]),
    ("Nifty Marketing", &["niftymarketing"]),
    ("On The Map Marketing", &["onthemapmarketing"]),
    ("FindLaw", &["findlaw", "powered by findlaw"]),
    ("Thomson Reuters", &["thomsonreuters", "thomson reuters"]),
    ("Martindale", &["martindale", "martindale-avvo", "martindale.com"]),
    ("Foster Web Marketing", &["fosterwebmarketing", "fwm"]),
    ("Triple Digital", &["tripledigital", "tripledigitalseo"]),
    ("EverConvert", &["everconvert"]),
    ("MeanPug", &["meanpug", "meanpug.com"]),
];

/// 全局共享的内置签名库，进程内仅构建一次
static BUILTIN_REGISTRY: Lazy<Arc<SignatureRegistry>> =
    Lazy::new(|| Arc::new(SignatureRegistry::from_static(BUILTIN_SIGNATURES)));

impl SignatureRegistry {
    /// 内置签名库
    pub fn builtin() -> Arc<SignatureRegistry> {
        Arc::clone(&BUILTIN_REGISTRY)
    }
}
