//! 分片规划测试：确定性、精确铺满 `[0, total)`、边界场景。

use crate::downloader::{plan_chunks, Chunk};

/// 对任意规划结果做结构校验：升序、首尾相接、无缝隙无重叠、末片到 total-1。
fn assert_exact_tiling(chunks: &[Chunk], total: u64) {
    if total == 0 {
        assert!(chunks.is_empty());
        return;
    }
    assert_eq!(chunks[0].start, 0);
    for pair in chunks.windows(2) {
        assert_eq!(pair[0].end + 1, pair[1].start);
    }
    assert_eq!(chunks.last().unwrap().end, total - 1);
    let sum: u64 = chunks.iter().map(|c| c.len()).sum();
    assert_eq!(sum, total);
    assert!(chunks.iter().all(|c| !c.completed));
}

#[test]
fn plan_matches_known_scenario() {
    let chunks = plan_chunks(2_500_000, 1_000_000);
    let expected = vec![
        Chunk {
            start: 0,
            end: 999_999,
            completed: false,
        },
        Chunk {
            start: 1_000_000,
            end: 1_999_999,
            completed: false,
        },
        Chunk {
            start: 2_000_000,
            end: 2_499_999,
            completed: false,
        },
    ];
    assert_eq!(chunks, expected);
}

#[test]
fn plan_is_deterministic() {
    assert_eq!(plan_chunks(2_500_000, 1_000_000), plan_chunks(2_500_000, 1_000_000));
    assert_eq!(plan_chunks(12_345, 67), plan_chunks(12_345, 67));
}

#[test]
fn plan_tiles_range_exactly() {
    for (total, chunk_size) in [
        (1u64, 1u64),
        (1, 100),
        (10, 3),
        (1024, 1024),
        (1025, 1024),
        (2_500_000, 1_000_000),
        (3_000_000, 1_000_000),
    ] {
        let chunks = plan_chunks(total, chunk_size);
        assert_exact_tiling(&chunks, total);
    }
}

#[test]
fn plan_zero_total_is_empty() {
    assert!(plan_chunks(0, 1_000_000).is_empty());
}

#[test]
fn exact_multiple_has_no_truncated_tail() {
    let chunks = plan_chunks(3_000_000, 1_000_000);
    assert_eq!(chunks.len(), 3);
    assert!(chunks.iter().all(|c| c.len() == 1_000_000));
}

#[test]
fn single_byte_file_is_one_chunk() {
    let chunks = plan_chunks(1, 1_000_000);
    assert_eq!(chunks.len(), 1);
    assert_eq!((chunks[0].start, chunks[0].end), (0, 0));
}
