//! # 编解码模块
//!
//! ## 设计思路
//!
//! 负责两类纯内存转换，不触碰文件系统：
//! - Base64 文本 → 原始字节（兼容 Data URL 前缀）
//! - 已解码图像 → 指定格式的编码字节
//!
//! ## 实现思路
//!
//! - Data URL 以第一个逗号为分隔，逗号之前的内容整体丢弃。
//! - 解码前去掉所有 ASCII 空白，兼容按行折断的 Base64。
//! - 未指定格式时按扩展名推断；JPEG 不支持透明通道，编码前转为 RGB。

use std::io::Cursor;
use std::path::Path;

use base64::{Engine as _, engine::general_purpose};
use image::{DynamicImage, ImageFormat};

use super::{ImageError, ImageSaver};

impl ImageSaver {
    /// 解析 Base64 输入（支持 Data URL / 纯 Base64）。
    pub(crate) fn parse_base64(data: &str) -> Result<Vec<u8>, ImageError> {
        let payload = match data.split_once(',') {
            Some((_header, rest)) => rest,
            None => data,
        };

        let cleaned: String = payload
            .chars()
            .filter(|c| !c.is_ascii_whitespace())
            .collect();

        general_purpose::STANDARD
            .decode(cleaned.as_bytes())
            .map_err(|e| ImageError::Decode(format!("Base64 解码失败：{}", e)))
    }

    /// 将内存图像编码为目标格式字节。
    ///
    /// `format` 为空时按 `path` 的扩展名推断。
    pub(crate) fn encode_decoded_image(
        image: &DynamicImage,
        path: &Path,
        format: Option<ImageFormat>,
    ) -> Result<(Vec<u8>, ImageFormat), ImageError> {
        let format = match format {
            Some(format) => format,
            None => ImageFormat::from_path(path).map_err(|e| {
                ImageError::Encode(format!("无法从扩展名推断图片格式 {}：{}", path.display(), e))
            })?,
        };

        if !format.can_write() {
            return Err(ImageError::Encode(format!("不支持写出该格式：{:?}", format)));
        }

        let mut buf = Vec::new();
        let result = if format == ImageFormat::Jpeg && image.color().has_alpha() {
            DynamicImage::ImageRgb8(image.to_rgb8()).write_to(&mut Cursor::new(&mut buf), format)
        } else {
            image.write_to(&mut Cursor::new(&mut buf), format)
        };
        result.map_err(|e| ImageError::Encode(format!("图片编码失败：{}", e)))?;

        Ok((buf, format))
    }

    /// 将字节解码为内存图像。
    pub(crate) fn decode_image(bytes: &[u8]) -> Result<DynamicImage, ImageError> {
        image::load_from_memory(bytes)
            .map_err(|e| ImageError::Decode(format!("图片解码失败：{}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    fn gradient(width: u32, height: u32) -> DynamicImage {
        DynamicImage::ImageRgba8(RgbaImage::from_fn(width, height, |x, y| {
            Rgba([(x % 255) as u8, (y % 255) as u8, ((x + y) % 255) as u8, 255])
        }))
    }

    #[test]
    fn parse_base64_strips_data_url_prefix() {
        let plain = ImageSaver::parse_base64("aGVsbG8=").expect("plain decode");
        let prefixed =
            ImageSaver::parse_base64("data:image/png;base64,aGVsbG8=").expect("prefixed decode");

        assert_eq!(plain, b"hello");
        assert_eq!(prefixed, plain);
    }

    #[test]
    fn parse_base64_splits_on_first_comma_only() {
        // 第二个逗号属于载荷，必然解码失败
        let result = ImageSaver::parse_base64("data:x,aGVs,bG8=");
        assert!(matches!(result, Err(ImageError::Decode(_))));
    }

    #[test]
    fn parse_base64_tolerates_line_breaks() {
        let wrapped = "aGVs\nbG8g\r\nd29y bGQ=";
        assert_eq!(ImageSaver::parse_base64(wrapped).expect("decode"), b"hello world");
    }

    #[test]
    fn parse_base64_rejects_garbage() {
        assert!(matches!(
            ImageSaver::parse_base64("not*base64!"),
            Err(ImageError::Decode(_))
        ));
    }

    #[test]
    fn encode_infers_format_from_extension() {
        let image = gradient(4, 3);
        let (bytes, format) =
            ImageSaver::encode_decoded_image(&image, Path::new("out/pic.png"), None).expect("encode");

        assert_eq!(format, ImageFormat::Png);
        let decoded = ImageSaver::decode_image(&bytes).expect("decode back");
        assert_eq!(decoded.width(), 4);
        assert_eq!(decoded.height(), 3);
    }

    #[test]
    fn explicit_format_overrides_extension() {
        let image = gradient(2, 2);
        let (bytes, format) = ImageSaver::encode_decoded_image(
            &image,
            Path::new("pic.png"),
            Some(ImageFormat::Bmp),
        )
        .expect("encode");

        assert_eq!(format, ImageFormat::Bmp);
        assert_eq!(&bytes[..2], b"BM");
    }

    #[test]
    fn jpeg_encoding_drops_alpha_channel() {
        let image = gradient(8, 8);
        let (bytes, format) =
            ImageSaver::encode_decoded_image(&image, Path::new("pic.jpg"), None).expect("encode");

        assert_eq!(format, ImageFormat::Jpeg);
        assert_eq!(&bytes[..2], &[0xFF, 0xD8]);
    }

    #[test]
    fn unknown_extension_without_format_is_encode_error() {
        let image = gradient(2, 2);
        let result = ImageSaver::encode_decoded_image(&image, Path::new("pic.unknownext"), None);
        assert!(matches!(result, Err(ImageError::Encode(_))));

        let result = ImageSaver::encode_decoded_image(&image, Path::new("no_extension"), None);
        assert!(matches!(result, Err(ImageError::Encode(_))));
    }
}
