//! chunkdl：可断点续传的并行分片下载器。
//!
//! 给定 URL 与保存路径，先探测远程文件大小，按固定分片大小切成互不重叠的
//! 字节区间，在并发上限内并行发起 Range 请求，把每段直接写入目标文件的
//! 对应偏移；每完成一个分片就同步落盘一次断点元数据（`目标路径.part`），
//! 中断后重新调用只会补拉未完成的分片。
//!
//! 使用方式：`Downloader::new(url, path)?.max_threads(4).send().await`，
//! 或一行式入口 [`download_file`]。

/// 内部导出的模块
mod internal;


/// 导出核心入口函数
pub use internal::entrance::download::*;

/// 下载器领域类型与辅助函数，统一在此导出。
pub mod downloader {
    use crate::internal;
    pub use internal::downloader::hash::file_md5;
    pub use internal::downloader::metadata_store;
    pub use internal::downloader::size_probe::probe_size;
    pub use internal::downloader::structs::*;
}

/// 对外提供轻量的 watch 状态容器，不限制死在下载器内部，以防有人自己要用。
pub mod states {
    pub use crate::internal::states::watch_property::WatchProperty;
}
