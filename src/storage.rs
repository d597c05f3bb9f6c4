//! 图片输出目录管理模块
//!
//! # 设计思路
//!
//! 统一管理保存图片的输出目录与默认文件名，支持用户自定义目录，
//! 并在目录不存在时自动创建。
//!
//! # 实现思路
//!
//! - 优先使用命令行指定的目录。
//! - 未设置时回退到当前工作目录下的 `saved_images`。
//! - 默认文件名统一为 `<前缀>_<YYYYmmdd_HHMMSS>.<扩展名>`。
//! - 所有可能失败的操作均返回 `Result`，不使用 `expect()` / `unwrap()`。

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Local;

use crate::error::AppError;

/// 默认输出目录名。
pub const DEFAULT_OUTPUT_DIR: &str = "saved_images";

/// 输出目录信息
#[derive(Debug, Clone)]
pub struct StorageInfo {
    pub path: String,
    pub total_size: u64,
    pub file_count: u64,
}

/// 获取（并创建）图片输出目录
///
/// # 参数
/// * `custom_dir` - 用户自定义目录（可选，空路径视为未设置）
pub fn resolve_output_dir(custom_dir: Option<&Path>) -> Result<PathBuf, AppError> {
    let dir = match custom_dir {
        Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
        _ => PathBuf::from(DEFAULT_OUTPUT_DIR),
    };

    if !dir.exists() {
        fs::create_dir_all(&dir).map_err(|e| {
            AppError::Storage(format!("创建输出目录 '{}' 失败: {}", dir.display(), e))
        })?;
    }
    Ok(dir)
}

/// 生成带时间戳的文件名
pub fn timestamped_name(prefix: &str, extension: &str) -> String {
    format!("{}_{}.{}", prefix, timestamp(), extension.trim_start_matches('.'))
}

/// 生成带时间戳的子目录名
pub fn timestamped_dir_name(prefix: &str) -> String {
    format!("{}_{}", prefix, timestamp())
}

fn timestamp() -> String {
    Local::now().format("%Y%m%d_%H%M%S").to_string()
}

/// 统计目录下文件数量与总大小（不递归）
pub fn dir_info(dir: &Path) -> Result<StorageInfo, AppError> {
    let mut total_size: u64 = 0;
    let mut file_count: u64 = 0;

    let entries = fs::read_dir(dir)
        .map_err(|e| AppError::Storage(format!("读取目录 '{}' 失败: {}", dir.display(), e)))?;

    for entry in entries.flatten() {
        if let Ok(metadata) = entry.metadata() {
            if metadata.is_file() {
                total_size += metadata.len();
                file_count += 1;
            }
        }
    }

    Ok(StorageInfo {
        path: dir.to_string_lossy().to_string(),
        total_size,
        file_count,
    })
}
