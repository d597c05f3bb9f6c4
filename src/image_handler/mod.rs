//! # 图片保存模块（image_handler）
//!
//! ## 设计思路
//!
//! 该模块把四种图片输入（URL / 原始字节 / 内存图像 / Base64）统一落盘，
//! 按职责拆分为多个子模块，避免单文件膨胀与耦合。
//!
//! - `handler`：`ImageSaver` 编排，提供 `try_save_*` 与 `save_*` 两套入口
//! - `download`：URL 流式下载写盘、页面抓取、HEAD 探测
//! - `codec`：Base64 解析、内存图像编码
//! - `writer`：目录创建、截断写入、签名识别
//! - `pipeline`：可选的缩放步骤
//! - `config/error/source`：配置、错误、输入与结果模型
//!
//! ## 调用链
//!
//! ```text
//! 调用方（CLI / web 批量下载 / 库使用者）
//!    ↓
//! handler.rs（save_* 吞错记日志 / try_save_* 返回类型化错误）
//!    ├─ download.rs（URL → 8 KiB 分块写盘）
//!    ├─ codec.rs（Base64 → 字节，图像 → 编码字节）
//!    └─ writer.rs（建目录 + 覆盖写入）
//!    ↓
//! SavedImage / ImageError
//! ```

mod codec;
mod config;
mod download;
mod error;
mod handler;
mod pipeline;
mod source;
mod writer;

pub use config::{DEFAULT_USER_AGENT, DOWNLOAD_CHUNK_SIZE, ImageConfig, ResizeQuality};
pub use error::ImageError;
pub use handler::ImageSaver;
pub use pipeline::Dimensions;
pub use source::{ImagePayload, PayloadKind, SaveTarget, SavedImage};

pub(crate) use download::redact_url_for_log;
pub(crate) use writer::{image_extension, looks_like_image};
