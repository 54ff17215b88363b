//! 断点元数据的落盘与加载。
//!
//! 侧车文件在 `目标路径.part`。save 先写临时文件再原子重命名，
//! 并发的 load 永远不会读到写了一半的记录；load 对缺失或损坏的文件
//! 一律返回 `None`（当作从头开始），绝不报错。

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use super::structs::{DownloadMetadata, TransferError};

/// 侧车文件后缀
const SIDECAR_SUFFIX: &str = ".part";

/// 临时文件后缀（写入期间使用，rename 后消失）
const TEMP_SUFFIX: &str = ".tmp";

/// 目标路径对应的侧车路径：整个路径串后直接拼 `.part`，
/// 不替换原有扩展名（`a.zip` → `a.zip.part`）。
pub fn sidecar_path(destination: &Path) -> PathBuf {
    let mut raw: OsString = destination.as_os_str().to_os_string();
    raw.push(SIDECAR_SUFFIX);
    PathBuf::from(raw)
}

/// 加载续传记录。文件不存在返回 `None`；内容解析失败同样返回 `None`，
/// 仅记一条 warn 日志。
pub async fn load(path: &Path) -> Option<DownloadMetadata> {
    let raw = match tokio::fs::read(path).await {
        Ok(raw) => raw,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return None,
        Err(e) => {
            warn!("读取断点元数据失败，按无断点处理: {} ({e})", path.display());
            return None;
        }
    };

    match serde_json::from_slice::<DownloadMetadata>(&raw) {
        Ok(metadata) => Some(metadata),
        Err(e) => {
            warn!("断点元数据损坏，按无断点处理: {} ({e})", path.display());
            None
        }
    }
}

/// 保存完整的续传记录：写 `path.tmp`，再 rename 到 `path`。
pub async fn save(metadata: &DownloadMetadata, path: &Path) -> Result<(), TransferError> {
    let json = serde_json::to_vec_pretty(metadata).map_err(|e| {
        TransferError::MetadataSave(std::io::Error::new(std::io::ErrorKind::InvalidData, e))
    })?;

    let mut raw: OsString = path.as_os_str().to_os_string();
    raw.push(TEMP_SUFFIX);
    let temp_path = PathBuf::from(raw);

    tokio::fs::write(&temp_path, &json)
        .await
        .map_err(TransferError::MetadataSave)?;
    tokio::fs::rename(&temp_path, path)
        .await
        .map_err(TransferError::MetadataSave)?;

    debug!("断点元数据已保存: {}", path.display());
    Ok(())
}

/// 删除续传记录。文件本就不存在时视为成功。
pub async fn delete(path: &Path) -> Result<(), TransferError> {
    match tokio::fs::remove_file(path).await {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(TransferError::RemoveFile(e)),
    }
}
