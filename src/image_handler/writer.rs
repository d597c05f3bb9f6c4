//! # 落盘模块
//!
//! ## 设计思路
//!
//! 四种输入最终都归结为“把一段字节写到目标路径”，
//! 因此目录创建、截断写入、签名识别统一放在这里，避免各入口各写一套。
//!
//! ## 实现思路
//!
//! - `create_dirs = true` 时递归创建父目录；父目录为空（相对文件名）时跳过。
//! - 使用 `File::create` 打开，总是截断旧内容（覆盖语义，不追加）。
//! - 写入中途失败时删除半截文件，与 URL 下载路径保持一致。
//! - 通过 `infer` 读取文件签名，仅用于日志与结果报告，不做拦截。

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use super::source::SaveTarget;
use super::{ImageError, ImageSaver};

impl ImageSaver {
    /// 按需创建父目录。
    pub(super) fn prepare_parent_dir(target: &SaveTarget) -> Result<(), ImageError> {
        if !target.create_dirs {
            return Ok(());
        }

        let Some(parent) = target.path.parent() else {
            return Ok(());
        };
        if parent.as_os_str().is_empty() {
            return Ok(());
        }

        fs::create_dir_all(parent).map_err(|e| {
            ImageError::FileSystem(format!("无法创建目录 {}：{}", parent.display(), e))
        })
    }

    /// 创建（或截断）目标文件。
    pub(super) fn create_target_file(target: &SaveTarget) -> Result<File, ImageError> {
        Self::prepare_parent_dir(target)?;

        File::create(&target.path).map_err(|e| {
            ImageError::FileSystem(format!("无法创建文件 {}：{}", target.path.display(), e))
        })
    }

    /// 一次性写入完整字节。
    pub(super) fn write_bytes(target: &SaveTarget, bytes: &[u8]) -> Result<u64, ImageError> {
        let mut file = Self::create_target_file(target)?;
        Self::write_all_or_discard(&mut file, &target.path, bytes)?;

        Ok(bytes.len() as u64)
    }

    /// 写入并刷新；失败时清理 `path` 上的半截文件。
    pub(super) fn write_all_or_discard<W: Write>(
        writer: &mut W,
        path: &Path,
        bytes: &[u8],
    ) -> Result<(), ImageError> {
        if let Err(e) = writer.write_all(bytes).and_then(|_| writer.flush()) {
            Self::discard_partial(path);
            return Err(ImageError::FileSystem(format!(
                "写入文件失败 {}：{}",
                path.display(),
                e
            )));
        }
        Ok(())
    }

    /// 清理写了一半的文件（忽略清理失败）。
    pub(super) fn discard_partial(path: &Path) {
        if let Err(err) = fs::remove_file(path) {
            log::warn!("⚠️ 清理未完成文件失败 {}：{}", path.display(), err);
        }
    }
}

/// 通过文件签名（magic bytes）识别 MIME。
pub(crate) fn sniff_mime(bytes: &[u8]) -> Option<&'static str> {
    infer::get(bytes).map(|kind| kind.mime_type())
}

/// 判断字节是否为已知图片签名。
pub(crate) fn looks_like_image(bytes: &[u8]) -> bool {
    infer::get(bytes)
        .map(|kind| kind.matcher_type() == infer::MatcherType::Image)
        .unwrap_or(false)
}

/// 按签名推断图片扩展名。
pub(crate) fn image_extension(bytes: &[u8]) -> Option<&'static str> {
    infer::get(bytes)
        .filter(|kind| kind.matcher_type() == infer::MatcherType::Image)
        .map(|kind| kind.extension())
}
