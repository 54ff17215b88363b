/// 默认最大并发分片数
pub const DEFAULT_MAX_THREADS: usize = 4;

/// 默认分片大小：1MB
pub const DEFAULT_CHUNK_SIZE: u64 = 1024 * 1024;

/// 本次下载的配置。并发数与分片大小在 setter 处钳到至少 1。
#[derive(Debug, Clone)]
pub struct DownloadConfig {
    /// 同一时刻最多执行的分片任务数
    pub max_threads: usize,
    /// 每个分片的大小（字节）
    pub chunk_size: u64,
    /// 下载完成后校验整个文件的 MD5（十六进制小写），为空则不校验
    pub expected_md5: Option<String>,
}

impl Default for DownloadConfig {
    fn default() -> Self {
        Self {
            max_threads: DEFAULT_MAX_THREADS,
            chunk_size: DEFAULT_CHUNK_SIZE,
            expected_md5: None,
        }
    }
}
