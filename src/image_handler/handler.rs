//! # 核心编排模块
//!
//! ## 设计思路
//!
//! `ImageSaver` 只负责流程编排与配置管理，具体读写交给各子模块。
//! 每个保存入口提供两种形态：
//! 1. `try_save_*`：返回 `Result<SavedImage, ImageError>`，调用方可按错误类型决定是否重试
//! 2. `save_*`：永不向调用方传播错误，失败时记录日志并返回 `false`
//!
//! ## 实现思路
//!
//! - 构建时校验配置，并创建复用型 HTTP 客户端。
//! - `persist` 按 `ImagePayload` 类型分派到对应入口。
//! - 记录每次保存的来源、大小、签名类型与耗时，便于诊断。

use std::path::Path;
use std::time::{Duration, Instant};

use image::{DynamicImage, ImageFormat};

use super::source::{ImagePayload, PayloadKind, SaveTarget, SavedImage};
use super::writer::sniff_mime;
use super::{ImageConfig, ImageError};

/// 图片保存器。
///
/// 封装配置与 HTTP 客户端，内部无可变共享状态，可跨线程共享引用。
#[derive(Clone)]
pub struct ImageSaver {
    pub(super) config: ImageConfig,
    pub(super) http_client: reqwest::Client,
}

impl ImageSaver {
    /// 根据配置创建保存器。
    ///
    /// # 示例
    /// ```rust,no_run
    /// use image_saver::image_handler::{ImageConfig, ImageSaver};
    ///
    /// let saver = ImageSaver::new(ImageConfig::default())?;
    /// assert!(saver.save_from_bytes(b"raw", "saved_images/raw.bin", true));
    /// # Ok::<(), image_saver::image_handler::ImageError>(())
    /// ```
    pub fn new(config: ImageConfig) -> Result<Self, ImageError> {
        config.validate()?;

        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.download_timeout))
            .connect_timeout(Duration::from_secs(config.connect_timeout))
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| ImageError::Network(format!("无法创建 HTTP 客户端：{}", e)))?;

        Ok(Self { config, http_client })
    }

    pub fn config(&self) -> &ImageConfig {
        &self.config
    }

    /// 以配置中的 `create_dirs` 默认值构造保存目标。
    pub fn target(&self, path: impl AsRef<Path>) -> SaveTarget {
        SaveTarget::new(path.as_ref()).create_dirs(self.config.create_dirs)
    }

    // ------------------------------------------------------------------------
    // 类型化入口
    // ------------------------------------------------------------------------

    /// 流式下载 URL 到目标路径。非 2xx 或网络错误时不创建文件。
    pub async fn try_save_from_url(
        &self,
        url: &str,
        target: &SaveTarget,
    ) -> Result<SavedImage, ImageError> {
        self.download_to_file(url, target).await
    }

    /// 原样写入字节。
    pub fn try_save_from_bytes(
        &self,
        bytes: &[u8],
        target: &SaveTarget,
    ) -> Result<SavedImage, ImageError> {
        let bytes_written = Self::write_bytes(target, bytes)?;

        Ok(SavedImage {
            path: target.path.clone(),
            bytes_written,
            mime_type: sniff_mime(bytes),
            kind: PayloadKind::Bytes,
        })
    }

    /// 编码内存图像后写入；`format` 为空时按扩展名推断。
    pub fn try_save_decoded_image(
        &self,
        image: &DynamicImage,
        target: &SaveTarget,
        format: Option<ImageFormat>,
    ) -> Result<SavedImage, ImageError> {
        let (encoded, format) = Self::encode_decoded_image(image, &target.path, format)?;
        let bytes_written = Self::write_bytes(target, &encoded)?;

        Ok(SavedImage {
            path: target.path.clone(),
            bytes_written,
            mime_type: Some(format.to_mime_type()),
            kind: PayloadKind::Decoded,
        })
    }

    /// 解码 Base64（可带 Data URL 前缀）后写入。
    pub fn try_save_from_base64(
        &self,
        text: &str,
        target: &SaveTarget,
    ) -> Result<SavedImage, ImageError> {
        let bytes = Self::parse_base64(text)?;
        let bytes_written = Self::write_bytes(target, &bytes)?;

        Ok(SavedImage {
            path: target.path.clone(),
            bytes_written,
            mime_type: sniff_mime(&bytes),
            kind: PayloadKind::Base64,
        })
    }

    /// 按输入类型分派到对应入口。
    pub async fn persist(
        &self,
        payload: ImagePayload,
        target: &SaveTarget,
    ) -> Result<SavedImage, ImageError> {
        match payload {
            ImagePayload::Url(url) => self.try_save_from_url(&url, target).await,
            ImagePayload::Bytes(bytes) => self.try_save_from_bytes(&bytes, target),
            ImagePayload::Decoded { image, format } => {
                self.try_save_decoded_image(&image, target, format)
            }
            ImagePayload::Base64(text) => self.try_save_from_base64(&text, target),
        }
    }

    // ------------------------------------------------------------------------
    // 布尔入口（永不向调用方传播错误）
    // ------------------------------------------------------------------------

    pub async fn save_from_url(&self, url: &str, path: impl AsRef<Path>, create_dirs: bool) -> bool {
        let target = SaveTarget::new(path.as_ref()).create_dirs(create_dirs);
        let start = Instant::now();
        let result = self.try_save_from_url(url, &target).await;
        Self::report(PayloadKind::Url, &target, result, start)
    }

    pub fn save_from_bytes(&self, bytes: &[u8], path: impl AsRef<Path>, create_dirs: bool) -> bool {
        let target = SaveTarget::new(path.as_ref()).create_dirs(create_dirs);
        let start = Instant::now();
        let result = self.try_save_from_bytes(bytes, &target);
        Self::report(PayloadKind::Bytes, &target, result, start)
    }

    pub fn save_decoded_image(
        &self,
        image: &DynamicImage,
        path: impl AsRef<Path>,
        format: Option<ImageFormat>,
        create_dirs: bool,
    ) -> bool {
        let target = SaveTarget::new(path.as_ref()).create_dirs(create_dirs);
        let start = Instant::now();
        let result = self.try_save_decoded_image(image, &target, format);
        Self::report(PayloadKind::Decoded, &target, result, start)
    }

    pub fn save_from_base64(&self, text: &str, path: impl AsRef<Path>, create_dirs: bool) -> bool {
        let target = SaveTarget::new(path.as_ref()).create_dirs(create_dirs);
        let start = Instant::now();
        let result = self.try_save_from_base64(text, &target);
        Self::report(PayloadKind::Base64, &target, result, start)
    }

    /// 记录结果并折叠为布尔值。
    pub(crate) fn report(
        kind: PayloadKind,
        target: &SaveTarget,
        result: Result<SavedImage, ImageError>,
        start: Instant,
    ) -> bool {
        match result {
            Ok(saved) => {
                log::info!(
                    "✅ 图片保存成功 - 路径: {} 来源: {} 大小: {} bytes 类型: {} 耗时: {}ms",
                    saved.path.display(),
                    saved.kind.as_str(),
                    saved.bytes_written,
                    saved.mime_type.unwrap_or("unknown"),
                    start.elapsed().as_millis()
                );
                true
            }
            Err(err) => {
                log::error!(
                    "❌ 图片保存失败 - 路径: {} 来源: {} 阶段: {} 错误码: {} - {}",
                    target.path.display(),
                    kind.as_str(),
                    err.stage(),
                    err.code(),
                    err
                );
                false
            }
        }
    }
}
