//! # 数据源与保存结果模型
//!
//! ## 设计思路
//!
//! 将“外部输入类型”“保存目标”和“保存结果”解耦：
//! - `ImagePayload` 表示四种图片输入形态
//! - `SaveTarget` 表示落盘路径与是否自动建目录
//! - `SavedImage` 表示一次成功保存的结果（用于日志与调用方诊断）

use std::path::PathBuf;

use bytes::Bytes;
use image::{DynamicImage, ImageFormat};

/// 图片输入来源。
pub enum ImagePayload {
    /// 网络地址，流式下载后写盘。
    Url(String),
    /// 原始字节，原样写盘。
    Bytes(Bytes),
    /// 已解码的内存图像，按 `format`（或扩展名）重新编码。
    Decoded {
        image: DynamicImage,
        format: Option<ImageFormat>,
    },
    /// Base64 文本（支持 Data URL 前缀）。
    Base64(String),
}

impl From<Vec<u8>> for ImagePayload {
    fn from(bytes: Vec<u8>) -> Self {
        Self::Bytes(Bytes::from(bytes))
    }
}

impl From<DynamicImage> for ImagePayload {
    fn from(image: DynamicImage) -> Self {
        Self::Decoded { image, format: None }
    }
}

/// 输入形态标签（日志与统计用）。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadKind {
    Url,
    Bytes,
    Decoded,
    Base64,
}

impl PayloadKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Url => "url",
            Self::Bytes => "bytes",
            Self::Decoded => "decoded",
            Self::Base64 => "base64",
        }
    }
}

/// 保存目标：路径 + 是否递归创建父目录。
#[derive(Debug, Clone)]
pub struct SaveTarget {
    pub path: PathBuf,
    pub create_dirs: bool,
}

impl SaveTarget {
    /// 默认自动创建父目录。
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            create_dirs: true,
        }
    }

    pub fn create_dirs(mut self, create_dirs: bool) -> Self {
        self.create_dirs = create_dirs;
        self
    }
}

/// 一次成功保存的结果。
#[derive(Debug, Clone)]
pub struct SavedImage {
    /// 实际写入的路径。
    pub path: PathBuf,
    /// 写入的字节数。
    pub bytes_written: u64,
    /// 通过文件签名识别出的 MIME（无法识别时为 `None`）。
    pub mime_type: Option<&'static str>,
    pub kind: PayloadKind,
}
