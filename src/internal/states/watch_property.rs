//! # WatchProperty
//!
//! 一个轻量级的状态容器，基于 [`tokio::sync::watch`] 实现，
//! 写端可克隆共享，读端支持异步监听。
//!
//! 纯通知机制，读写不阻塞，适合低频状态广播（如下载状态机的当前状态）。
//! 进度这类需要互斥累加的数据请用
//! [`ProgressSink`](super::progress_sink::ProgressSink)。

use std::sync::Arc;

use tokio::sync::watch;

/// 可克隆的 watch 状态容器。克隆体共享同一条通道。
#[derive(Debug, Clone)]
pub struct WatchProperty<T> {
    sender: Arc<watch::Sender<T>>,
}

impl<T: Clone + Send + Sync + 'static> WatchProperty<T> {
    pub fn new(initial: T) -> Self {
        let (sender, _receiver) = watch::channel(initial);
        Self {
            sender: Arc::new(sender),
        }
    }

    /// 覆盖当前值并通知所有监听者。没有监听者也照常更新。
    pub fn update(&self, value: T) {
        self.sender.send_replace(value);
    }

    /// 读取当前值的克隆。
    pub fn get_current(&self) -> T {
        self.sender.borrow().clone()
    }

    /// 订阅变更；返回的 receiver 可用 `changed().await` 等待下一次更新。
    pub fn watch(&self) -> watch::Receiver<T> {
        self.sender.subscribe()
    }
}
