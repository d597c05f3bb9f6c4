//! 统一错误类型模块
//!
//! # 设计思路
//!
//! 定义应用层统一的 `AppError` 枚举，命令行各子命令统一返回 `Result<T, AppError>`，
//! 由 `main` 负责输出并以非零状态码退出。
//!
//! # 实现思路
//!
//! - 使用 `thiserror` 派生可读错误消息。
//! - 为 `ImageError`、`std::io::Error` 提供 `From` 转换，无需手动 map。

use crate::image_handler::ImageError;

/// 应用级统一错误类型
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// 图片保存链路错误（下载 / 解码 / 编码 / 写入 / 剪贴板）
    #[error("{0}")]
    Image(#[from] ImageError),

    /// 文件系统 I/O 错误
    #[error("文件系统错误: {0}")]
    Io(#[from] std::io::Error),

    /// 输出目录不可用
    #[error("输出目录不可用: {0}")]
    Storage(String),

    /// 设置文件读取或解析失败
    #[error("设置错误: {0}")]
    Settings(String),

    /// 命令行输入无效
    #[error("输入无效: {0}")]
    Input(String),
}
