pub mod cancel_token;
pub mod chunk;
pub mod download_config;
pub mod download_error;
pub mod download_metadata;
pub mod download_progress;
pub mod download_status;
pub mod downloader;

// 重导出公共类型
pub use cancel_token::CancelToken;
pub use chunk::{plan_chunks, Chunk};
pub use download_config::{DownloadConfig, DEFAULT_CHUNK_SIZE, DEFAULT_MAX_THREADS};
pub use download_error::TransferError;
pub use download_metadata::DownloadMetadata;
pub use download_progress::DownloadProgress;
pub use download_status::DownloadStatus;
pub use downloader::Downloader;
