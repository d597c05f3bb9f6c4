//! 命令行参数定义
//!
//! # 设计思路
//!
//! 五个子命令对应五种图片来源，参数只描述“从哪里来、存到哪里、是否缩放”，
//! 不含任何执行逻辑，执行统一交给 `commands` 模块。
//!
//! # 实现思路
//!
//! - `--config` / `--no-create-dirs` / `--quality` 为全局参数，可写在子命令之后。
//! - 输出目录与文件名通过 `#[command(flatten)]` 复用同一组参数。
//! - `Dimensions`（`FromStr`）与 `ResizeQuality`（`ValueEnum`）在解析阶段即校验，非法值直接报错。

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::image_handler::{Dimensions, ResizeQuality};

#[derive(Debug, Parser)]
#[command(
    name = "image-saver",
    version,
    about = "Save images from URLs, the clipboard, files, base64 text and web pages"
)]
pub struct Cli {
    /// JSON settings file overriding the defaults.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Do not create missing parent directories of the target file.
    #[arg(long, global = true)]
    pub no_create_dirs: bool,

    /// Resize filter profile.
    #[arg(long, global = true, value_enum)]
    pub quality: Option<ResizeQuality>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Save an image from a URL.
    Url(UrlArgs),
    /// Save the image currently on the clipboard.
    Clipboard(ClipboardArgs),
    /// Copy an image file into the output directory.
    File(FileArgs),
    /// Save a base64 (or data URL) encoded image.
    Base64(Base64Args),
    /// Download the images referenced by a web page.
    Web(WebArgs),
}

#[derive(Debug, Clone, Args)]
pub struct OutputArgs {
    /// Output directory (default: ./saved_images).
    #[arg(short = 'o', long)]
    pub output_dir: Option<PathBuf>,

    /// Output file name.
    #[arg(short = 'f', long)]
    pub filename: Option<String>,
}

#[derive(Debug, Args)]
pub struct UrlArgs {
    pub url: String,

    #[command(flatten)]
    pub output: OutputArgs,

    /// Resize to WxH before saving.
    #[arg(long)]
    pub resize: Option<Dimensions>,
}

#[derive(Debug, Args)]
pub struct ClipboardArgs {
    #[command(flatten)]
    pub output: OutputArgs,

    /// Resize to WxH before saving.
    #[arg(long)]
    pub resize: Option<Dimensions>,
}

#[derive(Debug, Args)]
pub struct FileArgs {
    /// Source image path.
    pub source: PathBuf,

    #[command(flatten)]
    pub output: OutputArgs,

    /// Resize to WxH before saving.
    #[arg(long)]
    pub resize: Option<Dimensions>,
}

#[derive(Debug, Args)]
pub struct Base64Args {
    /// Base64 text, or `@path` to read it from a file.
    pub data: String,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Debug, Args)]
pub struct WebArgs {
    /// Web page URL.
    pub url: String,

    /// Output directory (default: ./saved_images).
    #[arg(short = 'o', long)]
    pub output_dir: Option<PathBuf>,

    /// Maximum number of images to download (0 = unlimited).
    #[arg(short = 'm', long, default_value_t = 10)]
    pub max: usize,

    /// Skip images whose Content-Length is below this many bytes (0 = keep all).
    #[arg(short = 's', long, default_value_t = 10_000)]
    pub min_size: u64,
}
