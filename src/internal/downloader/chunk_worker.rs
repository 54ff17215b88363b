//! 分片抓取：单段 Range 请求，流式写入目标文件的对应偏移。
//!
//! 必须校验服务器确实按请求的范围应答（206 + 匹配的 Content-Range），
//! 不能拿到 2xx 就当成功；整文件应答（200）说明 Range 被忽略。

use std::path::PathBuf;
use std::sync::Arc;

use futures_util::StreamExt;
use reqwest::header::{CONTENT_RANGE, RANGE};
use reqwest::StatusCode;
use tokio::io::{AsyncSeekExt, AsyncWriteExt};
use tracing::debug;

use crate::internal::states::progress_sink::ProgressSink;

use super::structs::{CancelToken, TransferError};

/// 抓取单个分片时的参数（形参超过 3 个，用 struct 承载）。
pub(crate) struct ChunkFetchParams {
    pub client: reqwest::Client,
    pub url: String,
    pub destination: PathBuf,
    pub start: u64,
    pub end: u64,
    pub cancel: CancelToken,
    pub progress: Arc<ProgressSink>,
}

/// 抓取 `[start, end]` 并写入目标文件对应偏移。
///
/// 每写完一块就向进度聚合器上报一次；每次读流之前检查取消信号。
/// 流提前结束返回 [`TransferError::ShortRead`]，分片保持未完成。
pub(crate) async fn fetch_chunk(params: ChunkFetchParams) -> Result<(), TransferError> {
    if params.cancel.is_cancelled() {
        return Err(TransferError::Cancelled);
    }

    let expected = params.end - params.start + 1;
    let range = format!("bytes={}-{}", params.start, params.end);
    debug!("请求分片 [{}]", range);

    let resp = params
        .client
        .get(&params.url)
        .header(RANGE, &range)
        .send()
        .await
        .map_err(|e| TransferError::Unreachable(e.to_string()))?;

    let status = resp.status();
    if status == StatusCode::OK {
        // 200 = 服务器无视 Range 头返回了整个文件
        return Err(TransferError::RangeUnsupported);
    }
    if status != StatusCode::PARTIAL_CONTENT {
        return Err(TransferError::Unreachable(format!(
            "分片请求状态码 {status}"
        )));
    }

    // 206 也要核对 Content-Range 回显的范围与请求一致
    let range_echoed = resp
        .headers()
        .get(CONTENT_RANGE)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.starts_with(&format!("bytes {}-{}/", params.start, params.end)))
        .unwrap_or(false);
    if !range_echoed {
        return Err(TransferError::RangeUnsupported);
    }

    let mut file = tokio::fs::OpenOptions::new()
        .write(true)
        .open(&params.destination)
        .await
        .map_err(TransferError::OpenFile)?;
    file.seek(std::io::SeekFrom::Start(params.start))
        .await
        .map_err(TransferError::SeekFile)?;

    let mut stream = resp.bytes_stream();
    let mut written: u64 = 0;
    loop {
        // 协作式取消：写完手头一块再检查，下一次读之前退出
        if params.cancel.is_cancelled() {
            return Err(TransferError::Cancelled);
        }
        let Some(next) = stream.next().await else {
            break;
        };
        let block: bytes::Bytes = next.map_err(|e| TransferError::Unreachable(e.to_string()))?;
        if block.is_empty() {
            continue;
        }
        if written + block.len() as u64 > expected {
            return Err(TransferError::Unreachable(format!(
                "分片 [{range}] 返回的数据超出请求范围"
            )));
        }
        file.write_all(&block)
            .await
            .map_err(TransferError::WriteFile)?;
        written += block.len() as u64;
        params.progress.add_bytes(block.len() as u64);
    }

    file.flush().await.map_err(TransferError::FlushFile)?;

    if written < expected {
        return Err(TransferError::ShortRead {
            start: params.start,
            end: params.end,
            expected,
            actual: written,
        });
    }

    debug!("分片完成 [{}]，写入 {} 字节", range, written);
    Ok(())
}
