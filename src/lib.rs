//! # 图片保存工具：库入口
//!
//! ## 架构总览
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                  命令行 (clap)                            │
//! │                                                          │
//! │  url ── clipboard ── file ── base64 ── web               │
//! │   │                                                      │
//! │  commands（输出目录 / 文件名决策）                        │
//! └───┼──────────────────────────────────────────────────────┘
//!     ↕ Result<Outcome, AppError>
//! ┌───┼──────────────────────────────────────────────────────┐
//! │   ↕                 核心 (Rust)                          │
//! │                                                          │
//! │  ┌─ error ────── AppError (统一错误类型)                  │
//! │  │                                                       │
//! │  ├─ image_handler  ImageSaver：URL/字节/图像/Base64 落盘  │
//! │  │   ├─ download      8 KiB 分块流式写盘                  │
//! │  │   ├─ codec         Base64 解析、图像编码               │
//! │  │   └─ pipeline      可选缩放                            │
//! │  │                                                       │
//! │  ├─ clipboard ── arboard 读取剪贴板图片                   │
//! │  ├─ web ──────── 网页 <img> 提取 + 批量下载               │
//! │  ├─ storage ──── 输出目录 / 时间戳文件名 / 目录统计       │
//! │  └─ settings ─── JSON 设置文件 → ImageConfig              │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! ## 模块职责
//!
//! | 模块 | 职责 |
//! |------|------|
//! | [`error`] | 统一错误类型 `AppError`，所有子命令的返回类型 |
//! | [`image_handler`] | 四种输入统一落盘，`save_*` 返回布尔，`try_save_*` 返回类型化结果 |
//! | [`clipboard`] | 读取剪贴板图片并保存为 PNG |
//! | [`web`] | 抓取网页图片地址、按体积过滤、限速批量下载 |
//! | [`storage`] | 输出目录的获取与自动创建、时间戳命名、目录统计 |
//! | [`settings`] | 读取 JSON 设置文件生成 `ImageConfig` |
//! | [`cli`] | clap 参数定义 |
//! | [`commands`] | 子命令执行逻辑 |

pub mod error;
pub mod cli;
pub mod clipboard;
pub mod commands;
pub mod image_handler;
pub mod settings;
pub mod storage;
pub mod web;
