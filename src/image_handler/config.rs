//! # 配置模块
//!
//! ## 设计思路
//!
//! 将所有“可调策略”集中到 `ImageConfig`，保证运行时行为可观测、可调整、可测试。
//! 缩放质量档位（quality / balanced / speed）作为高层语义，映射到底层滤镜。
//!
//! ## 实现思路
//!
//! - `Default` 提供与原始工具一致的行为（自动建目录、8 KiB 分块写入）。
//! - `validate` 在构建 `ImageSaver` 前拒绝明显错误的参数组合。
//! - `ResizeQuality` 负责档位字符串解析与反向输出；命令行通过 `clap::ValueEnum` 直接解析。

use image::imageops::FilterType;

use super::ImageError;

/// 流式下载写盘时的分块大小（字节）。
pub const DOWNLOAD_CHUNK_SIZE: usize = 8 * 1024;

/// 模拟常见浏览器的 UA，部分图床会拒绝默认 UA。
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36";

/// 图片保存配置。
#[derive(Debug, Clone)]
pub struct ImageConfig {
    /// 写入前是否递归创建父目录（各操作的默认值）。
    pub create_dirs: bool,
    /// 网络下载总超时（秒）。
    pub download_timeout: u64,
    /// 建立连接（TCP/TLS）超时（秒）。
    pub connect_timeout: u64,
    /// 流式写盘分块大小（字节）。
    pub chunk_size: usize,
    /// 请求使用的 User-Agent。
    pub user_agent: String,
    /// 批量下载时两次请求之间的最小间隔（毫秒）。
    pub request_delay_min_ms: u64,
    /// 批量下载时两次请求之间的最大间隔（毫秒）。
    pub request_delay_max_ms: u64,
    /// 缩放滤镜策略。
    pub resize_filter: FilterType,
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self {
            create_dirs: true,
            download_timeout: 30,
            connect_timeout: 8,
            chunk_size: DOWNLOAD_CHUNK_SIZE,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            request_delay_min_ms: 500,
            request_delay_max_ms: 1_500,
            resize_filter: FilterType::Triangle,
        }
    }
}

impl ImageConfig {
    /// 校验参数组合。
    pub fn validate(&self) -> Result<(), ImageError> {
        if self.chunk_size == 0 {
            return Err(ImageError::InvalidInput("chunk_size 不能为 0".to_string()));
        }
        if !(1..=600).contains(&self.download_timeout) {
            return Err(ImageError::InvalidInput(
                "download_timeout 必须在 1~600 秒之间".to_string(),
            ));
        }
        if !(1..=120).contains(&self.connect_timeout) {
            return Err(ImageError::InvalidInput(
                "connect_timeout 必须在 1~120 秒之间".to_string(),
            ));
        }
        if self.request_delay_min_ms > self.request_delay_max_ms {
            return Err(ImageError::InvalidInput(
                "request_delay_min_ms 不能大于 request_delay_max_ms".to_string(),
            ));
        }
        if self.user_agent.trim().is_empty() {
            return Err(ImageError::InvalidInput("user_agent 不能为空".to_string()));
        }
        Ok(())
    }

    /// 应用缩放质量档位。
    pub fn apply_resize_quality(&mut self, quality: ResizeQuality) {
        log::debug!("🎚️ 缩放档位：{}", quality.as_str());
        self.resize_filter = quality.filter();
    }
}

/// 缩放质量档位。
///
/// - `Quality`：尽量保真
/// - `Balanced`：质量与性能平衡
/// - `Speed`：优先速度
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ResizeQuality {
    Quality,
    Balanced,
    Speed,
}

impl ResizeQuality {
    /// 从外部字符串解析档位。
    pub fn parse(value: &str) -> Result<Self, ImageError> {
        match value.trim().to_lowercase().as_str() {
            "quality" => Ok(Self::Quality),
            "balanced" => Ok(Self::Balanced),
            "speed" => Ok(Self::Speed),
            other => Err(ImageError::InvalidInput(format!(
                "未知缩放档位：{}（可选：quality / balanced / speed）",
                other
            ))),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Quality => "quality",
            Self::Balanced => "balanced",
            Self::Speed => "speed",
        }
    }

    fn filter(self) -> FilterType {
        match self {
            Self::Quality => FilterType::CatmullRom,
            Self::Balanced => FilterType::Triangle,
            Self::Speed => FilterType::Nearest,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = ImageConfig::default();
        assert!(config.validate().is_ok());
        assert!(config.create_dirs);
        assert_eq!(config.chunk_size, 8192);
    }

    #[test]
    fn validate_rejects_inverted_delay_bounds() {
        let mut config = ImageConfig::default();
        config.request_delay_min_ms = 2_000;
        config.request_delay_max_ms = 1_000;

        assert!(matches!(config.validate(), Err(ImageError::InvalidInput(_))));
    }

    #[test]
    fn validate_rejects_zero_chunk_and_timeouts() {
        let mut config = ImageConfig::default();
        config.chunk_size = 0;
        assert!(matches!(config.validate(), Err(ImageError::InvalidInput(_))));

        let mut config = ImageConfig::default();
        config.connect_timeout = 0;
        assert!(matches!(config.validate(), Err(ImageError::InvalidInput(_))));
    }

    #[test]
    fn resize_quality_parse_roundtrip() {
        for name in ["quality", "balanced", "speed"] {
            let parsed = ResizeQuality::parse(name).expect("known profile");
            assert_eq!(parsed.as_str(), name);
        }
        assert!(ResizeQuality::parse(" SPEED ").is_ok());
        assert!(matches!(
            ResizeQuality::parse("ultra"),
            Err(ImageError::InvalidInput(_))
        ));
    }

    #[test]
    fn apply_resize_quality_maps_filters() {
        let mut config = ImageConfig::default();
        config.apply_resize_quality(ResizeQuality::Speed);
        assert_eq!(config.resize_filter, FilterType::Nearest);
        config.apply_resize_quality(ResizeQuality::Quality);
        assert_eq!(config.resize_filter, FilterType::CatmullRom);
    }
}
