//! 断点元数据：落盘到 `目标路径.part` 的续传记录。
//!
//! 磁盘格式为 JSON：`{ "url": …, "fileSize": …, "chunks": [{ "start", "end", "completed" }] }`，
//! save→load 必须无损往返。

use serde::{Deserialize, Serialize};

use super::chunk::Chunk;

/// 一次下载的完整续传记录。调度器独占持有并整条重写，分片任务不直接改它。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DownloadMetadata {
    /// 下载链接，用于校验续传目标是否还是同一个文件
    pub url: String,
    /// 文件总大小（字节）
    pub file_size: u64,
    /// 按 start 升序的分片列表，完成顺序不影响该顺序
    pub chunks: Vec<Chunk>,
}

impl DownloadMetadata {
    pub fn new(url: impl Into<String>, file_size: u64, chunks: Vec<Chunk>) -> Self {
        Self {
            url: url.into(),
            file_size,
            chunks,
        }
    }

    /// 旧记录只有在 URL 与探测到的大小都一致时才允许续传；
    /// 任何一项不符都整条作废，绝不与新数据混用。
    pub fn matches(&self, url: &str, file_size: u64) -> bool {
        self.url == url && self.file_size == file_size
    }

    /// 已完成分片的字节数之和，作为续传时的进度基线。
    pub fn completed_bytes(&self) -> u64 {
        self.chunks
            .iter()
            .filter(|c| c.completed)
            .map(|c| c.len())
            .sum()
    }

    /// 未完成分片的下标，保持规划顺序（即 start 升序）。
    pub fn pending_indices(&self) -> Vec<usize> {
        self.chunks
            .iter()
            .enumerate()
            .filter(|(_, c)| !c.completed)
            .map(|(i, _)| i)
            .collect()
    }

    pub fn all_completed(&self) -> bool {
        self.chunks.iter().all(|c| c.completed)
    }

    pub fn none_completed(&self) -> bool {
        self.chunks.iter().all(|c| !c.completed)
    }
}
