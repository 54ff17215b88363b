//! # ProgressSink
//!
//! 进度聚合器：互斥锁保护的累加器，镜像到 watch 通道供外部监听。
//!
//! 并发分片任务只调用 [`ProgressSink::add_bytes`]，不直接改共享计数；
//! 基线、活跃任务数与收尾由调度器设置。回调在锁内触发，保证观察到的
//! `downloaded_bytes` 序列单调不减。

use std::sync::Mutex;

use tokio::sync::watch;

use crate::internal::downloader::structs::DownloadProgress;

/// 进度回调。锁内调用，应保持轻量。
pub(crate) type ProgressCallback = Box<dyn Fn(&DownloadProgress) + Send + Sync>;

pub(crate) struct ProgressSink {
    state: Mutex<DownloadProgress>,
    sender: watch::Sender<DownloadProgress>,
    callback: Option<ProgressCallback>,
}

impl ProgressSink {
    pub(crate) fn new() -> Self {
        let (sender, _receiver) = watch::channel(DownloadProgress::default());
        Self {
            state: Mutex::new(DownloadProgress::default()),
            sender,
            callback: None,
        }
    }

    /// 设置进度回调。仅在构建阶段（sink 尚未共享时）调用。
    pub(crate) fn set_callback(&mut self, callback: ProgressCallback) {
        self.callback = Some(callback);
    }

    /// 重置基线：总大小与续传已有的字节数。
    pub(crate) fn begin(&self, total_bytes: u64, downloaded_bytes: u64) {
        self.mutate(|p| {
            p.total_bytes = total_bytes;
            p.downloaded_bytes = downloaded_bytes;
            p.active_workers = 0;
        });
    }

    /// 分片任务每写完一块数据调用一次。
    pub(crate) fn add_bytes(&self, n: u64) {
        self.mutate(|p| p.downloaded_bytes += n);
    }

    /// 调度器在派发/回收任务后更新活跃数。
    pub(crate) fn set_active(&self, n: usize) {
        self.mutate(|p| p.active_workers = n);
    }

    /// 成功收尾：把已下载字节数对齐到总大小并清零活跃数。
    /// 只有成功路径会调用，失败的任务不保证末次 100% 通知。
    pub(crate) fn finish(&self) {
        self.mutate(|p| {
            p.downloaded_bytes = p.total_bytes;
            p.active_workers = 0;
        });
    }

    pub(crate) fn snapshot(&self) -> DownloadProgress {
        self.sender.borrow().clone()
    }

    pub(crate) fn watch(&self) -> watch::Receiver<DownloadProgress> {
        self.sender.subscribe()
    }

    /// 单一同步点：锁内修改、镜像到 watch、触发回调。
    fn mutate(&self, f: impl FnOnce(&mut DownloadProgress)) {
        // 锁被毒化说明某个持锁线程 panic，这里选择继续使用内部值
        let mut guard = match self.state.lock() {
            Ok(g) => g,
            Err(poisoned) => poisoned.into_inner(),
        };
        f(&mut guard);
        let snapshot = guard.clone();
        self.sender.send_replace(snapshot.clone());
        if let Some(cb) = &self.callback {
            cb(&snapshot);
        }
    }
}

impl std::fmt::Debug for ProgressSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProgressSink")
            .field("state", &self.snapshot())
            .field("has_callback", &self.callback.is_some())
            .finish()
    }
}
