//! URL输入读取
//! CSV：优先使用表头为 url/urls/website/domain 的列，否则取第一列；纯文本：每行一个URL

use std::path::Path;

use csv::{ReaderBuilder, StringRecord};
use tracing::debug;

use crate::error::{AdResult, AgencyDetectorError};

/// 可识别为URL列的表头
const URL_COLUMN_NAMES: [&str; 4] = ["url", "urls", "website", "domain"];

/// 选出URL所在列
pub fn pick_url_column(headers: &StringRecord) -> usize {
    headers
        .iter()
        .position(|h| URL_COLUMN_NAMES.contains(&h.trim().to_lowercase().as_str()))
        .unwrap_or(0)
}

/// 解析CSV文本，跳过空单元格
pub fn parse_url_csv(content: &str) -> AdResult<Vec<String>> {
    let mut reader = ReaderBuilder::new()
        .flexible(true)
        .from_reader(content.as_bytes());

    let headers = reader.headers()?.clone();
    if headers.is_empty() {
        return Err(AgencyDetectorError::InvalidInput("CSV缺少表头".to_string()));
    }
    let column = pick_url_column(&headers);
    debug!("使用第{}列作为URL列：{:?}", column, headers.get(column));

    let mut urls = Vec::new();
    for record in reader.records() {
        let record = record?;
        match record.get(column) {
            Some(cell) if !cell.is_empty() => urls.push(cell.to_string()),
            _ => {}
        }
    }
    Ok(urls)
}

/// 解析纯文本，每个非空行一个URL
pub fn parse_url_lines(content: &str) -> Vec<String> {
    content
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(str::to_string)
        .collect()
}

/// 按扩展名读取URL文件（.csv 按CSV解析，其它按行解析）
/// 非UTF-8字节（如 Excel 导出的 Latin-1）按替换字符处理，不中断读取
pub async fn read_url_file(path: impl AsRef<Path>) -> AdResult<Vec<String>> {
    let path = path.as_ref();
    let bytes = tokio::fs::read(path).await?;
    let content = String::from_utf8_lossy(&bytes);
    let is_csv = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("csv"));

    let urls = if is_csv {
        parse_url_csv(&content)?
    } else {
        parse_url_lines(&content)
    };
    debug!("从 {} 读取URL {} 个", path.display(), urls.len());
    Ok(urls)
}
