//! # 错误模型模块
//!
//! ## 设计思路
//!
//! 使用单一错误枚举承载图片保存链路中的所有错误来源，避免字符串拼接式错误处理。
//! 通过 `thiserror` 保持人类可读错误，同时让调用侧可按分支匹配，
//! 并通过 `code()` / `stage()` / `is_transient()` 判断是否值得重试。

/// 图片保存统一错误类型。
///
/// 布尔接口（`save_*`）会吞掉该错误并记录日志；
/// 类型化接口（`try_save_*`）直接返回给调用方。
#[derive(Debug, thiserror::Error)]
pub enum ImageError {
    #[error("网络错误：{0}")]
    Network(String),

    #[error("HTTP {status}：{reason}")]
    HttpStatus { status: u16, reason: &'static str },

    #[error("文件错误：{0}")]
    FileSystem(String),

    #[error("解码错误：{0}")]
    Decode(String),

    #[error("编码错误：{0}")]
    Encode(String),

    #[error("输入无效：{0}")]
    InvalidInput(String),

    #[error("剪贴板错误：{0}")]
    Clipboard(String),
}

impl ImageError {
    /// 稳定错误码，便于脚本或上层按码分支。
    pub fn code(&self) -> &'static str {
        match self {
            Self::Network(_) => "E_NETWORK",
            Self::HttpStatus { .. } => "E_HTTP_STATUS",
            Self::FileSystem(_) => "E_FILESYSTEM",
            Self::Decode(_) => "E_DECODE",
            Self::Encode(_) => "E_ENCODE",
            Self::InvalidInput(_) => "E_INVALID_INPUT",
            Self::Clipboard(_) => "E_CLIPBOARD",
        }
    }

    /// 出错阶段。
    pub fn stage(&self) -> &'static str {
        match self {
            Self::Network(_) | Self::HttpStatus { .. } | Self::InvalidInput(_) => "load",
            Self::Decode(_) => "decode",
            Self::Encode(_) => "encode",
            Self::FileSystem(_) => "write",
            Self::Clipboard(_) => "clipboard",
        }
    }

    /// 是否属于瞬时故障（网络抖动、408/429、5xx）。
    ///
    /// 本模块自身不重试，由调用方决定是否再次发起。
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Network(_) => true,
            Self::HttpStatus { status, .. } => {
                *status == 408 || *status == 429 || (500..=599).contains(status)
            }
            _ => false,
        }
    }
}
