//! 大小探测：只发 HEAD 请求读 Content-Length，不下载任何正文字节。

use reqwest::header::CONTENT_LENGTH;

use super::structs::TransferError;

/// 探测远程文件总大小（字节）。
///
/// 网络失败或非 2xx 状态码返回 [`TransferError::Unreachable`]；
/// 响应里没有可解析的 Content-Length 返回 [`TransferError::SizeUnknown`]。
pub async fn probe_size(client: &reqwest::Client, url: &str) -> Result<u64, TransferError> {
    let resp = client
        .head(url)
        .send()
        .await
        .map_err(|e| TransferError::Unreachable(e.to_string()))?;

    let status = resp.status();
    if !status.is_success() {
        return Err(TransferError::Unreachable(format!(
            "HEAD 请求状态码 {status}"
        )));
    }

    // HEAD 响应没有正文，Response::content_length() 反映的是空 body，
    // 必须直接读响应头
    resp.headers()
        .get(CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<u64>().ok())
        .ok_or(TransferError::SizeUnknown)
}
