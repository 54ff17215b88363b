//! 下载器领域模块：大小探测、分片规划、断点元数据、分片抓取与调度。
//!
//! 对外导出以 [`crate::downloader`] 为准，此处仅做模块划分，不重复 pub use。

pub mod chunk_worker;
pub mod hash;
pub mod metadata_store;
pub mod scheduler;
pub mod size_probe;
pub mod structs;
