//! 取消令牌：整个下载任务共享一个信号，传播到每个在途分片任务。
//!
//! 取消是协作式的：分片任务写完手头一块数据后、下一次读流之前检查信号。

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// 可克隆的取消令牌。克隆体共享同一个标志位。
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// 请求取消。幂等，取消后无法复位。
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }
}
