//! # 缩放流水线模块
//!
//! ## 设计思路
//!
//! 保存前可选的缩放步骤：字节 → 图像 → 指定尺寸 → 交给 `save_decoded_image` 编码落盘。
//! 优先使用 `fast_image_resize`（SIMD 卷积），失败时回退 `image::resize_exact`。
//!
//! ## 实现思路
//!
//! 1. `Dimensions::parse` 解析 `WxH` 形式的目标尺寸
//! 2. 统一转 RGBA 后交给 `fast_image_resize`
//! 3. 输出缓冲长度校验后重新包装为 `DynamicImage`

use fast_image_resize as fr;
use image::imageops::FilterType;
use image::{DynamicImage, GenericImageView, ImageBuffer, Rgba};

use super::{ImageError, ImageSaver};

/// 目标尺寸（像素）。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    /// 解析 `300x300` / `300X200` 形式。
    pub fn parse(value: &str) -> Result<Self, ImageError> {
        let (w, h) = value
            .trim()
            .split_once(['x', 'X'])
            .ok_or_else(|| ImageError::InvalidInput(format!("尺寸格式应为 WxH：{}", value)))?;

        let width = w
            .trim()
            .parse::<u32>()
            .map_err(|e| ImageError::InvalidInput(format!("宽度无效 {}：{}", w, e)))?;
        let height = h
            .trim()
            .parse::<u32>()
            .map_err(|e| ImageError::InvalidInput(format!("高度无效 {}：{}", h, e)))?;

        if width == 0 || height == 0 {
            return Err(ImageError::InvalidInput("宽高必须大于 0".to_string()));
        }

        Ok(Self { width, height })
    }
}

impl std::str::FromStr for Dimensions {
    type Err = ImageError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::parse(value)
    }
}

impl ImageSaver {
    /// 按配置滤镜缩放到精确尺寸。
    pub fn resize(&self, image: &DynamicImage, target: Dimensions) -> DynamicImage {
        let (width, height) = image.dimensions();
        let filter = self.config.resize_filter;

        log::info!(
            "🧩 缩放：{}x{} -> {}x{}（filter={:?}）",
            width,
            height,
            target.width,
            target.height,
            filter
        );

        match Self::resize_with_fast_image_resize(image, target.width, target.height, filter) {
            Ok(resized) => resized,
            Err(err) => {
                log::warn!("⚠️ fast_image_resize 缩放失败，回退 image::resize_exact：{}", err);
                image.resize_exact(target.width, target.height, filter)
            }
        }
    }

    /// 解码字节并缩放。
    pub fn decode_and_resize(
        &self,
        bytes: &[u8],
        target: Dimensions,
    ) -> Result<DynamicImage, ImageError> {
        let decoded = Self::decode_image(bytes)?;
        Ok(self.resize(&decoded, target))
    }

    fn resize_with_fast_image_resize(
        image: &DynamicImage,
        target_width: u32,
        target_height: u32,
        filter: FilterType,
    ) -> Result<DynamicImage, ImageError> {
        let src = image.to_rgba8();
        let (src_width, src_height) = src.dimensions();

        let src_image =
            fr::images::Image::from_vec_u8(src_width, src_height, src.into_raw(), fr::PixelType::U8x4)
                .map_err(|e| ImageError::Decode(format!("构建源图像缓冲失败：{}", e)))?;

        let mut dst_image = fr::images::Image::new(target_width, target_height, fr::PixelType::U8x4);

        let mut resizer = fr::Resizer::new();
        let options = fr::ResizeOptions::new()
            .resize_alg(fr::ResizeAlg::Convolution(Self::to_fast_filter(filter)));

        resizer
            .resize(&src_image, &mut dst_image, Some(&options))
            .map_err(|e| ImageError::Decode(format!("fast_image_resize 执行失败：{}", e)))?;

        let rgba = ImageBuffer::<Rgba<u8>, Vec<u8>>::from_raw(
            target_width,
            target_height,
            dst_image.into_vec(),
        )
        .ok_or_else(|| ImageError::Decode("fast_image_resize 输出缓冲长度异常".to_string()))?;

        Ok(DynamicImage::ImageRgba8(rgba))
    }

    fn to_fast_filter(filter: FilterType) -> fr::FilterType {
        match filter {
            FilterType::Nearest => fr::FilterType::Box,
            FilterType::Triangle => fr::FilterType::Bilinear,
            FilterType::CatmullRom => fr::FilterType::CatmullRom,
            FilterType::Gaussian => fr::FilterType::Mitchell,
            FilterType::Lanczos3 => fr::FilterType::Lanczos3,
        }
    }
}
