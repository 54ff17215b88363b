//! 下载进度快照：总大小、已下载字节数、当前活跃分片任务数。
//!
//! 所有变更都经由 [`crate::internal::states::progress_sink::ProgressSink`]
//! 串行化，调用方通过下载器的 `progress()` 读取或监听。

/// 某一时刻的进度快照。`downloaded_bytes` 对外单调不减。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DownloadProgress {
    /// 文件总大小（字节）
    pub total_bytes: u64,
    /// 已下载的字节数（含续传基线）
    pub downloaded_bytes: u64,
    /// 正在执行的分片任务数
    pub active_workers: usize,
}

impl DownloadProgress {
    /// 进度百分比（0～100）。总大小为 0 意味着没有任何要下载的内容，
    /// 视为已完成，返回 100，零字节文件下载成功时也汇报 100%。
    pub fn pct(&self) -> f64 {
        if self.total_bytes == 0 {
            100.0
        } else {
            (self.downloaded_bytes as f64 / self.total_bytes as f64) * 100.0
        }
    }
}
