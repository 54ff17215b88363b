/// 下载状态（由调度器内部维护，外部只读监听）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DownloadStatus {
    /// 探测大小、核对断点元数据、生成分片计划
    Planning,
    /// 分片任务派发中
    Running,
    /// 全部分片完成，断点元数据已删除
    Succeeded,
    /// 出现致命错误，断点元数据按清理策略保留
    Failed,
    /// 调用方取消，清理策略与 Failed 相同
    Cancelled,
}
