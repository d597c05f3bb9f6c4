//! 保存器设置文件
//!
//! JSON 设置文件中的每个字段都是可选的，缺省项沿用 `ImageConfig::default()`。
//!
//! ```json
//! { "create_dirs": true, "download_timeout": 30, "resize_quality": "speed" }
//! ```

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::AppError;
use crate::image_handler::{ImageConfig, ResizeQuality};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SaverSettings {
    pub create_dirs: Option<bool>,
    pub download_timeout: Option<u64>,
    pub connect_timeout: Option<u64>,
    pub chunk_size: Option<usize>,
    pub user_agent: Option<String>,
    pub request_delay_min_ms: Option<u64>,
    pub request_delay_max_ms: Option<u64>,
    pub resize_quality: Option<String>,
}

impl SaverSettings {
    /// 将设置叠加到默认配置上并校验。
    pub fn into_config(self) -> Result<ImageConfig, AppError> {
        let mut config = ImageConfig::default();

        if let Some(value) = self.create_dirs {
            config.create_dirs = value;
        }
        if let Some(value) = self.download_timeout {
            config.download_timeout = value;
        }
        if let Some(value) = self.connect_timeout {
            config.connect_timeout = value;
        }
        if let Some(value) = self.chunk_size {
            config.chunk_size = value;
        }
        if let Some(value) = self.user_agent {
            config.user_agent = value;
        }
        if let Some(value) = self.request_delay_min_ms {
            config.request_delay_min_ms = value;
        }
        if let Some(value) = self.request_delay_max_ms {
            config.request_delay_max_ms = value;
        }
        if let Some(value) = self.resize_quality.as_deref() {
            config.apply_resize_quality(ResizeQuality::parse(value)?);
        }

        config.validate()?;
        Ok(config)
    }
}

/// 读取设置文件；未提供路径时使用默认配置。
pub fn load_config(path: Option<&Path>) -> Result<ImageConfig, AppError> {
    let Some(path) = path else {
        return Ok(ImageConfig::default());
    };

    let content = fs::read_to_string(path)
        .map_err(|e| AppError::Settings(format!("读取设置文件 '{}' 失败: {}", path.display(), e)))?;
    let settings = serde_json::from_str::<SaverSettings>(&content)
        .map_err(|e| AppError::Settings(format!("解析设置文件失败: {}", e)))?;

    log::debug!("⚙️ 已加载设置文件: {}", path.display());
    settings.into_config()
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::imageops::FilterType;

    #[test]
    fn missing_path_yields_defaults() {
        let config = load_config(None).expect("defaults");
        assert!(config.create_dirs);
        assert_eq!(config.chunk_size, 8192);
    }

    #[test]
    fn partial_file_overrides_only_given_fields() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("settings.json");
        fs::write(
            &path,
            r#"{ "create_dirs": false, "download_timeout": 12, "resize_quality": "speed" }"#,
        )
        .expect("write settings");

        let config = load_config(Some(path.as_path())).expect("load");

        assert!(!config.create_dirs);
        assert_eq!(config.download_timeout, 12);
        assert_eq!(config.connect_timeout, ImageConfig::default().connect_timeout);
        assert_eq!(config.resize_filter, FilterType::Nearest);
    }

    #[test]
    fn unknown_keys_and_invalid_values_are_rejected() {
        let dir = tempfile::tempdir().expect("tempdir");

        let unknown = dir.path().join("unknown.json");
        fs::write(&unknown, r#"{ "mystery": 1 }"#).expect("write");
        assert!(matches!(load_config(Some(unknown.as_path())), Err(AppError::Settings(_))));

        let invalid = dir.path().join("invalid.json");
        fs::write(&invalid, r#"{ "chunk_size": 0 }"#).expect("write");
        assert!(matches!(load_config(Some(invalid.as_path())), Err(AppError::Image(_))));
    }

    #[test]
    fn missing_file_is_settings_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let result = load_config(Some(dir.path().join("absent.json").as_path()));
        assert!(matches!(result, Err(AppError::Settings(_))));
    }
}
