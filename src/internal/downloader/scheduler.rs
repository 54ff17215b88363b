//! 调度器：状态机 `Planning → Running → {Succeeded, Failed, Cancelled}`。
//!
//! 探测大小 → 核对断点 → 生成/复用分片计划 → 在并发上限内派发分片任务，
//! 每个分片成功后同步落盘一次元数据。分片失败不在进程内重试：
//! 首个致命错误会停止派发并等在途任务自然收尾，续传就是重试机制。

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::task::JoinSet;
use tracing::{debug, info, warn};

use crate::internal::states::progress_sink::ProgressSink;
use crate::internal::states::watch_property::WatchProperty;

use super::chunk_worker::{fetch_chunk, ChunkFetchParams};
use super::hash::file_md5;
use super::metadata_store;
use super::size_probe::probe_size;
use super::structs::{
    plan_chunks, CancelToken, DownloadConfig, DownloadMetadata, DownloadStatus, TransferError,
};

/// 执行一次下载任务所需的全部上下文（形参超过 3 个，用 struct 承载）。
pub(crate) struct SchedulerParams {
    pub client: reqwest::Client,
    pub url: String,
    pub destination: PathBuf,
    pub config: DownloadConfig,
    pub cancel: CancelToken,
    pub progress: Arc<ProgressSink>,
    pub status: WatchProperty<DownloadStatus>,
}

/// 执行下载任务直至终态，并把终态写入状态通道。
pub(crate) async fn run_download(params: SchedulerParams) -> Result<(), TransferError> {
    let status = params.status.clone();
    match drive(params).await {
        Ok(()) => {
            status.update(DownloadStatus::Succeeded);
            Ok(())
        }
        Err(TransferError::Cancelled) => {
            status.update(DownloadStatus::Cancelled);
            Err(TransferError::Cancelled)
        }
        Err(e) => {
            status.update(DownloadStatus::Failed);
            Err(e)
        }
    }
}

async fn drive(params: SchedulerParams) -> Result<(), TransferError> {
    params.status.update(DownloadStatus::Planning);

    // 探测失败时尚未产生任何本地状态，直接返回
    let total = probe_size(&params.client, &params.url).await?;
    let sidecar = metadata_store::sidecar_path(&params.destination);

    let mut metadata = reconcile(&params, total, &sidecar).await?;
    params.progress.begin(total, metadata.completed_bytes());

    let pending = metadata.pending_indices();
    if pending.is_empty() {
        // 断点显示全部完成（或文件大小为 0），无需发起任何抓取
        return finish_success(&params, &sidecar).await;
    }

    params.status.update(DownloadStatus::Running);
    info!(
        "开始下载: {} → {}，共 {} 字节，待取分片 {}/{}，并发上限 {}",
        params.url,
        params.destination.display(),
        total,
        pending.len(),
        metadata.chunks.len(),
        params.config.max_threads
    );

    let mut in_flight: JoinSet<(usize, Result<(), TransferError>)> = JoinSet::new();
    let mut next: usize = 0;
    let mut first_error: Option<TransferError> = None;

    loop {
        // 出错或取消后停止派发，只等在途任务收尾
        while first_error.is_none()
            && !params.cancel.is_cancelled()
            && next < pending.len()
            && in_flight.len() < params.config.max_threads
        {
            let index = pending[next];
            let (start, end) = (metadata.chunks[index].start, metadata.chunks[index].end);
            let fetch = ChunkFetchParams {
                client: params.client.clone(),
                url: params.url.clone(),
                destination: params.destination.clone(),
                start,
                end,
                cancel: params.cancel.clone(),
                progress: Arc::clone(&params.progress),
            };
            in_flight.spawn(async move { (index, fetch_chunk(fetch).await) });
            next += 1;
        }
        params.progress.set_active(in_flight.len());

        let Some(joined) = in_flight.join_next().await else {
            // 在途清空：要么全部派发完毕，要么已停止派发
            break;
        };

        match joined {
            Ok((index, Ok(()))) => {
                metadata.chunks[index].completed = true;
                // 每完成一个分片就整条落盘，崩溃最多丢在途分片的进度；
                // 元数据只在这里写，分片任务不碰它
                if let Err(e) = metadata_store::save(&metadata, &sidecar).await {
                    first_error.get_or_insert(e);
                }
            }
            Ok((index, Err(e))) => {
                debug!("分片 #{index} 失败: {e}");
                first_error.get_or_insert(e);
            }
            Err(join_err) => {
                first_error.get_or_insert(TransferError::TaskJoin(join_err));
            }
        }
        params.progress.set_active(in_flight.len());
    }

    // 取消信号到得太晚、所有分片都已完成时按成功处理
    if first_error.is_none() && params.cancel.is_cancelled() && !metadata.all_completed() {
        first_error = Some(TransferError::Cancelled);
    }

    if let Some(err) = first_error {
        cleanup_after_abort(&params.destination, &sidecar, &metadata).await;
        return Err(err);
    }

    finish_success(&params, &sidecar).await
}

/// 核对断点元数据：URL 与大小一致、目标文件仍按计划大小存在才允许续传；
/// 否则丢弃旧记录与旧文件内容，从头规划。
async fn reconcile(
    params: &SchedulerParams,
    total: u64,
    sidecar: &Path,
) -> Result<DownloadMetadata, TransferError> {
    if let Some(existing) = metadata_store::load(sidecar).await {
        let destination_len = tokio::fs::metadata(&params.destination)
            .await
            .map(|m| m.len())
            .ok();
        if existing.matches(&params.url, total) && destination_len == Some(total) {
            let done = existing.chunks.len() - existing.pending_indices().len();
            info!(
                "检测到可用断点: {}/{} 个分片已完成",
                done,
                existing.chunks.len()
            );
            return Ok(existing);
        }
        // 目标文件缺失或被改动时，已完成分片的数据不可信，同样整条作废
        warn!("断点元数据与当前任务不符，丢弃并重新规划");
        metadata_store::delete(sidecar).await?;
    }

    if let Some(parent) = params.destination.parent() {
        if !parent.as_os_str().is_empty() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(TransferError::OpenFile)?;
        }
    }

    // 先把目标文件预分配到全长，分片才能直接写各自的偏移
    let file = tokio::fs::File::create(&params.destination)
        .await
        .map_err(TransferError::OpenFile)?;
    file.set_len(total)
        .await
        .map_err(TransferError::PreallocateFile)?;

    let chunks = plan_chunks(total, params.config.chunk_size);
    let metadata = DownloadMetadata::new(params.url.clone(), total, chunks);
    metadata_store::save(&metadata, sidecar).await?;
    Ok(metadata)
}

/// 成功收尾：可选的整文件 MD5 校验、删除侧车、补发末次 100% 进度。
async fn finish_success(params: &SchedulerParams, sidecar: &Path) -> Result<(), TransferError> {
    if let Some(expected) = &params.config.expected_md5 {
        let actual = file_md5(&params.destination).await?;
        if !actual.eq_ignore_ascii_case(expected) {
            // 分片全部完成，续传已无意义：删掉侧车，保留文件供排查
            metadata_store::delete(sidecar).await?;
            return Err(TransferError::HashMismatch {
                expected: expected.clone(),
                actual,
            });
        }
    }

    metadata_store::delete(sidecar).await?;
    params.progress.finish();
    info!("下载完成: {}", params.destination.display());
    Ok(())
}

/// 失败/取消后的清理：没有任何分片完成时目标文件与侧车一并删除，
/// 不留任何痕迹；只要有分片完成就两者都保留，供下次续传。
async fn cleanup_after_abort(destination: &Path, sidecar: &Path, metadata: &DownloadMetadata) {
    if !metadata.none_completed() {
        return;
    }
    // 尽力清理，失败只记日志，不覆盖原始错误
    if let Err(e) = tokio::fs::remove_file(destination).await {
        if e.kind() != std::io::ErrorKind::NotFound {
            warn!("清理未完成的目标文件失败: {} ({e})", destination.display());
        }
    }
    if let Err(e) = metadata_store::delete(sidecar).await {
        warn!("清理断点元数据失败: {} ({e})", sidecar.display());
    }
}
