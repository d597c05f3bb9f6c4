//! 剪贴板图片保存
//!
//! 读取剪贴板图片，按需缩放后以 PNG（或文件名扩展名对应格式）保存到输出目录。

use std::path::{Path, PathBuf};

use image::DynamicImage;

use super::grab_clipboard_image;
use crate::error::AppError;
use crate::image_handler::{Dimensions, ImageSaver};
use crate::storage::timestamped_name;

/// 将一张已取得的剪贴板图片写入 `output_dir`。
///
/// 未指定文件名时使用 `clipboard_<时间戳>.png`。
pub fn save_image_data(
    saver: &ImageSaver,
    image: DynamicImage,
    output_dir: &Path,
    filename: Option<&str>,
    resize: Option<Dimensions>,
) -> Result<PathBuf, AppError> {
    let image = match resize {
        Some(target) => saver.resize(&image, target),
        None => image,
    };

    let file_name = match filename {
        Some(name) => name.to_string(),
        None => timestamped_name("clipboard", "png"),
    };
    let file_path = output_dir.join(file_name);
    let target = saver.target(&file_path);

    saver.try_save_decoded_image(&image, &target, None)?;
    Ok(file_path)
}

/// 保存剪贴板中的图片
///
/// # 返回
/// - `Ok(Some(path))`：图片已保存
/// - `Ok(None)`：剪贴板中没有图片
/// - `Err(..)`：访问剪贴板或写入失败
pub fn save_clipboard_image(
    saver: &ImageSaver,
    output_dir: &Path,
    filename: Option<&str>,
    resize: Option<Dimensions>,
) -> Result<Option<PathBuf>, AppError> {
    let Some(image) = grab_clipboard_image()? else {
        log::info!("📋 剪贴板中没有图片");
        return Ok(None);
    };

    save_image_data(saver, image, output_dir, filename, resize).map(Some)
}
