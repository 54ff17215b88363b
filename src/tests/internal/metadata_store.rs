//! 断点元数据测试：落盘格式、往返无损、损坏恢复、原子替换不留临时文件。

use std::path::Path;

use crate::downloader::{metadata_store, plan_chunks, DownloadMetadata};

fn sample_metadata() -> DownloadMetadata {
    let mut chunks = plan_chunks(2_500_000, 1_000_000);
    chunks[0].completed = true;
    DownloadMetadata::new("http://example.com/data.bin", 2_500_000, chunks)
}

#[test]
fn sidecar_path_appends_part_suffix() {
    let path = metadata_store::sidecar_path(Path::new("/tmp/dir/a.zip"));
    assert_eq!(path, Path::new("/tmp/dir/a.zip.part"));
}

#[tokio::test]
async fn save_then_load_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("a.bin.part");
    let metadata = sample_metadata();

    metadata_store::save(&metadata, &path).await.unwrap();
    let loaded = metadata_store::load(&path).await.unwrap();
    assert_eq!(loaded, metadata);
}

#[tokio::test]
async fn on_disk_format_uses_camel_case() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("a.bin.part");
    metadata_store::save(&sample_metadata(), &path).await.unwrap();

    let raw: serde_json::Value =
        serde_json::from_slice(&std::fs::read(&path).unwrap()).unwrap();
    assert!(raw.get("url").is_some());
    assert!(raw.get("fileSize").is_some());
    let chunk = &raw["chunks"][0];
    assert!(chunk.get("start").is_some());
    assert!(chunk.get("end").is_some());
    assert_eq!(chunk["completed"], serde_json::Value::Bool(true));
}

#[tokio::test]
async fn load_missing_returns_none() {
    let dir = tempfile::tempdir().unwrap();
    assert!(metadata_store::load(&dir.path().join("nope.part")).await.is_none());
}

#[tokio::test]
async fn load_corrupt_returns_none() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("a.bin.part");
    std::fs::write(&path, b"{ not json at all").unwrap();
    assert!(metadata_store::load(&path).await.is_none());
}

#[tokio::test]
async fn save_leaves_no_temp_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("a.bin.part");
    metadata_store::save(&sample_metadata(), &path).await.unwrap();

    let entries: Vec<_> = std::fs::read_dir(dir.path())
        .unwrap()
        .map(|e| e.unwrap().file_name())
        .collect();
    assert_eq!(entries, vec![std::ffi::OsString::from("a.bin.part")]);
}

#[tokio::test]
async fn delete_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("a.bin.part");
    metadata_store::save(&sample_metadata(), &path).await.unwrap();

    metadata_store::delete(&path).await.unwrap();
    assert!(!path.exists());
    // 再删一次也不报错
    metadata_store::delete(&path).await.unwrap();
}

#[test]
fn matches_requires_both_url_and_size() {
    let metadata = sample_metadata();
    assert!(metadata.matches("http://example.com/data.bin", 2_500_000));
    assert!(!metadata.matches("http://example.com/other.bin", 2_500_000));
    assert!(!metadata.matches("http://example.com/data.bin", 2_500_001));
}

#[test]
fn completed_bytes_and_pending_follow_flags() {
    let metadata = sample_metadata();
    assert_eq!(metadata.completed_bytes(), 1_000_000);
    assert_eq!(metadata.pending_indices(), vec![1, 2]);
    assert!(!metadata.all_completed());
    assert!(!metadata.none_completed());
}
