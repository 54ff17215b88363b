//! 下载相关错误类型。
//!
//! 损坏的断点元数据不在此列：加载失败一律当作“从头开始”静默重规划，
//! 不会作为错误抛给调用方。

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TransferError {
    #[error("无效的下载地址: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// 探测或抓取阶段的网络失败、非 2xx 状态码。重新调用即可续传。
    #[error("无法访问远程地址: {0}")]
    Unreachable(String),

    /// HEAD 响应没有报告文件大小，无法规划分片。此时尚未产生任何本地状态。
    #[error("无法确定远程文件大小")]
    SizeUnknown,

    /// 服务器忽略了 Range 请求头（返回整文件），基于分片的续传无法继续。
    #[error("服务器不支持 Range 请求")]
    RangeUnsupported,

    /// 流在达到预期字节数之前结束，该分片保持未完成以便下次续传。
    #[error("分片 {start}-{end} 读取提前结束: 预期 {expected} 字节，实际 {actual} 字节")]
    ShortRead {
        start: u64,
        end: u64,
        expected: u64,
        actual: u64,
    },

    #[error("下载被取消")]
    Cancelled,

    #[error("打开或创建文件失败: {0}")]
    OpenFile(std::io::Error),

    #[error("预分配文件空间失败: {0}")]
    PreallocateFile(std::io::Error),

    #[error("文件定位失败: {0}")]
    SeekFile(std::io::Error),

    #[error("写入文件失败: {0}")]
    WriteFile(std::io::Error),

    #[error("刷新文件失败: {0}")]
    FlushFile(std::io::Error),

    #[error("读取文件失败: {0}")]
    ReadFile(std::io::Error),

    #[error("删除文件失败: {0}")]
    RemoveFile(std::io::Error),

    #[error("保存断点元数据失败: {0}")]
    MetadataSave(std::io::Error),

    #[error("分片任务失败: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),

    #[error("文件校验失败: 预期 MD5 {expected}，实际 {actual}")]
    HashMismatch { expected: String, actual: String },
}
