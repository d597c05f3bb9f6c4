//! 剪贴板图片读取模块
//!
//! # 设计思路
//!
//! 只负责“从系统剪贴板取出一张图片”，不关心保存位置与文件名，
//! 保存统一走 `ImageSaver::save_decoded_image`。
//!
//! # 实现思路
//!
//! - 通过 `arboard` 读取 RGBA 像素，剪贴板中没有图片时返回 `Ok(None)` 而不是错误。
//! - 像素缓冲转换为 `DynamicImage` 的过程单独拆出，便于脱离系统剪贴板测试。

pub mod save;

use arboard::ImageData;
use image::{DynamicImage, RgbaImage};

use crate::image_handler::ImageError;

/// 读取剪贴板中的图片。
///
/// # 返回
/// - `Ok(Some(image))`：剪贴板中有图片
/// - `Ok(None)`：剪贴板中没有图片
/// - `Err(ImageError::Clipboard)`：无法访问剪贴板
pub fn grab_clipboard_image() -> Result<Option<DynamicImage>, ImageError> {
    let mut clipboard = arboard::Clipboard::new()
        .map_err(|e| ImageError::Clipboard(format!("无法访问剪贴板：{}", e)))?;

    match clipboard.get_image() {
        Ok(image_data) => {
            log::debug!("📋 剪贴板图片 - {}x{}", image_data.width, image_data.height);
            image_data_to_dynamic(image_data).map(Some)
        }
        Err(arboard::Error::ContentNotAvailable) => Ok(None),
        Err(e) => Err(ImageError::Clipboard(format!("读取剪贴板图片失败：{}", e))),
    }
}

/// 将剪贴板 RGBA 像素包装为 `DynamicImage`。
pub(crate) fn image_data_to_dynamic(image_data: ImageData<'_>) -> Result<DynamicImage, ImageError> {
    let width = u32::try_from(image_data.width)
        .map_err(|_| ImageError::Clipboard("图片宽度超出范围".to_string()))?;
    let height = u32::try_from(image_data.height)
        .map_err(|_| ImageError::Clipboard("图片高度超出范围".to_string()))?;

    RgbaImage::from_raw(width, height, image_data.bytes.into_owned())
        .map(DynamicImage::ImageRgba8)
        .ok_or_else(|| ImageError::Clipboard("创建图像缓冲区失败".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::borrow::Cow;

    #[test]
    fn image_data_converts_to_rgba_image() {
        let data = ImageData {
            width: 2,
            height: 1,
            bytes: Cow::Owned(vec![255, 0, 0, 255, 0, 255, 0, 128]),
        };

        let image = image_data_to_dynamic(data).expect("conversion should succeed");
        let rgba = image.to_rgba8();

        assert_eq!(rgba.dimensions(), (2, 1));
        assert_eq!(rgba.get_pixel(1, 0).0, [0, 255, 0, 128]);
    }

    #[test]
    fn image_data_with_short_buffer_is_rejected() {
        let data = ImageData {
            width: 4,
            height: 4,
            bytes: Cow::Owned(vec![0; 10]),
        };

        assert!(matches!(image_data_to_dynamic(data), Err(ImageError::Clipboard(_))));
    }
}
