//! 分片：闭区间字节范围 `[start, end]` 加完成标记，以及确定性的分片规划。

use serde::{Deserialize, Serialize};

/// 单个分片。`start`/`end` 为含上界的字节偏移，规划后不可变，
/// 只有 `completed` 会在下载过程中翻转。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chunk {
    pub start: u64,
    pub end: u64,
    pub completed: bool,
}

impl Chunk {
    /// 分片长度（字节）。闭区间保证长度至少为 1。
    pub fn len(&self) -> u64 {
        self.end - self.start + 1
    }
}

/// 把 `[0, total_size)` 切成按 `start` 升序、首尾相接、互不重叠的分片列表。
///
/// 除最后一片外每片长度为 `chunk_size`，最后一片截断到 `total_size - 1`。
/// 对同一组入参输出恒定；`total_size == 0` 时返回空列表。
pub fn plan_chunks(total_size: u64, chunk_size: u64) -> Vec<Chunk> {
    // 配置层已保证 chunk_size >= 1，这里再兜一次底避免死循环
    let step = chunk_size.max(1);
    let mut chunks = Vec::new();
    let mut position: u64 = 0;
    while position < total_size {
        let end = (position + step - 1).min(total_size - 1);
        chunks.push(Chunk {
            start: position,
            end,
            completed: false,
        });
        position = end + 1;
    }
    chunks
}
