//! 下载入口函数：一行式调用，默认配置（4 并发、1MB 分片）。
//! 需要进度监听、取消或 MD5 校验时请直接用
//! [`Downloader`](crate::downloader::Downloader) 建造者。

use std::path::PathBuf;

use crate::internal::downloader::structs::{Downloader, TransferError};

/// 把 `url` 指向的文件下载到 `destination`。
///
/// 中断后用相同参数重新调用即可续传，只会补拉未完成的分片。
pub async fn download_file(
    url: &str,
    destination: impl Into<PathBuf>,
) -> Result<(), TransferError> {
    Downloader::new(url, destination)?.send().await
}
