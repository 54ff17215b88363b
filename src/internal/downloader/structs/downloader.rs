//! 下载器结构体：建造者式配置，`send().await` 驱动到终态。
//!
//! 使用方式：`Downloader::new(url, path)?.max_threads(4).send().await`。
//! 不实现 Clone，是因为下载一旦开始，就不应该有多份下载器同时写同一个
//! 目标文件，否则文件内容会错乱。

use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::watch;
use url::Url;

use crate::internal::downloader::scheduler::{run_download, SchedulerParams};
use crate::internal::states::progress_sink::ProgressSink;
use crate::internal::states::watch_property::WatchProperty;

use super::cancel_token::CancelToken;
use super::download_config::DownloadConfig;
use super::download_error::TransferError;
use super::download_progress::DownloadProgress;
use super::download_status::DownloadStatus;

#[derive(Debug)]
pub struct Downloader {
    url: Url,
    destination: PathBuf,
    config: DownloadConfig,
    client: reqwest::Client,
    cancel: CancelToken,
    /// 进度聚合器共享引用：分片任务只往里累加字节，监听方拿 watch 读
    progress: Arc<ProgressSink>,
    status: WatchProperty<DownloadStatus>,
}

impl Downloader {
    /// 创建下载器。URL 在这里就校验，省得到 send 才发现写错。
    pub fn new(url: &str, destination: impl Into<PathBuf>) -> Result<Self, TransferError> {
        let url = Url::parse(url)?;
        Ok(Self {
            url,
            destination: destination.into(),
            config: DownloadConfig::default(),
            client: reqwest::Client::new(),
            cancel: CancelToken::new(),
            progress: Arc::new(ProgressSink::new()),
            status: WatchProperty::new(DownloadStatus::Planning),
        })
    }

    /// 设置最大并发分片数（至少 1）。
    /// 注意：必须在 send() 之前调用，send() 之后配置不可变。
    pub fn max_threads(mut self, max_threads: usize) -> Self {
        self.config.max_threads = max_threads.max(1);
        self
    }

    /// 设置分片大小（字节，至少 1）。
    pub fn chunk_size(mut self, chunk_size: u64) -> Self {
        self.config.chunk_size = chunk_size.max(1);
        self
    }

    /// 设置下载完成后校验的整文件 MD5（十六进制，大小写不敏感）。
    pub fn verify_md5(mut self, expected: impl Into<String>) -> Self {
        self.config.expected_md5 = Some(expected.into());
        self
    }

    /// 注入自定义的 HTTP 客户端（超时、代理等由调用方配置）。
    pub fn client(mut self, client: reqwest::Client) -> Self {
        self.client = client;
        self
    }

    /// 注册进度回调；每次进度变化时在同步点内依次触发，应保持轻量。
    pub fn on_progress(
        mut self,
        callback: impl Fn(&DownloadProgress) + Send + Sync + 'static,
    ) -> Self {
        Arc::get_mut(&mut self.progress)
            .expect("Cannot configure after progress sink is shared")
            .set_callback(Box::new(callback));
        self
    }

    /// 取消令牌：克隆后可在任意线程请求取消整个任务。
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    /// 订阅进度；监听方用 `changed().await` 等下一次更新。
    pub fn progress(&self) -> watch::Receiver<DownloadProgress> {
        self.progress.watch()
    }

    /// 订阅状态机的当前状态。
    pub fn status(&self) -> watch::Receiver<DownloadStatus> {
        self.status.watch()
    }

    /// 当前状态快照，不需要订阅时用这个。
    pub fn current_status(&self) -> DownloadStatus {
        self.status.get_current()
    }

    /// 当前进度快照。
    pub fn current_progress(&self) -> DownloadProgress {
        self.progress.snapshot()
    }

    /// 执行下载直至终态。失败后用相同的 URL 与保存路径重新调用即可续传。
    pub async fn send(&self) -> Result<(), TransferError> {
        run_download(SchedulerParams {
            client: self.client.clone(),
            url: self.url.as_str().to_string(),
            destination: self.destination.clone(),
            config: self.config.clone(),
            cancel: self.cancel.clone(),
            progress: Arc::clone(&self.progress),
            status: self.status.clone(),
        })
        .await
    }
}
