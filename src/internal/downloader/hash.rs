//! 整文件 MD5：下载完成后的可选完整性校验（不做分片级校验）。

use std::path::Path;

use tokio::io::AsyncReadExt;

use super::structs::TransferError;

/// 读缓冲大小（8KB）
const READ_BUF_SIZE: usize = 8 * 1024;

/// 流式计算本地文件的 MD5，返回十六进制小写字符串。
pub async fn file_md5(path: &Path) -> Result<String, TransferError> {
    let mut file = tokio::fs::File::open(path)
        .await
        .map_err(TransferError::OpenFile)?;

    let mut context = md5::Context::new();
    let mut buf = vec![0u8; READ_BUF_SIZE];
    loop {
        let n = file.read(&mut buf).await.map_err(TransferError::ReadFile)?;
        if n == 0 {
            break;
        }
        context.consume(&buf[..n]);
    }

    Ok(format!("{:x}", context.compute()))
}
