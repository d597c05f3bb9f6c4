//! # 命令层
//!
//! ## 设计思路
//!
//! 命令层仅做参数适配与输出目录/文件名决策，不承载保存逻辑。
//! 所有实际读写交由 `ImageSaver`，保持命令函数薄、稳定、易测试。

use std::fs;
use std::path::{Path, PathBuf};

use crate::cli::{Base64Args, Cli, ClipboardArgs, Command, FileArgs, UrlArgs, WebArgs};
use crate::clipboard;
use crate::error::AppError;
use crate::image_handler::{ImageSaver, image_extension, looks_like_image};
use crate::settings::load_config;
use crate::storage::{StorageInfo, dir_info, resolve_output_dir, timestamped_dir_name, timestamped_name};
use crate::web::{self, HarvestSummary};

/// 命令执行结果。
#[derive(Debug)]
pub enum Outcome {
    /// 图片已保存到该路径。
    Saved(PathBuf),
    /// 没有可保存的内容（例如剪贴板为空）。
    Nothing(String),
    /// 网页批量下载完成。
    Harvest {
        summary: HarvestSummary,
        storage: StorageInfo,
    },
}

/// 根据全局参数构建保存器。
pub fn build_saver(cli: &Cli) -> Result<ImageSaver, AppError> {
    let mut config = load_config(cli.config.as_deref())?;

    if cli.no_create_dirs {
        config.create_dirs = false;
    }
    if let Some(quality) = cli.quality {
        config.apply_resize_quality(quality);
    }

    Ok(ImageSaver::new(config)?)
}

pub async fn run(cli: Cli) -> Result<Outcome, AppError> {
    let saver = build_saver(&cli)?;

    match cli.command {
        Command::Url(args) => save_from_url(&saver, args).await,
        Command::Clipboard(args) => save_from_clipboard(&saver, args),
        Command::File(args) => save_from_file(&saver, args),
        Command::Base64(args) => save_from_base64(&saver, args),
        Command::Web(args) => download_from_webpage(&saver, args).await,
    }
}

pub async fn save_from_url(saver: &ImageSaver, args: UrlArgs) -> Result<Outcome, AppError> {
    let output_dir = resolve_output_dir(args.output.output_dir.as_deref())?;
    let file_name = args
        .output
        .filename
        .unwrap_or_else(|| timestamped_name("from_url", "jpg"));
    let target = saver.target(output_dir.join(file_name));

    match args.resize {
        Some(dimensions) => {
            // 先在内存中解码缩放，成功后才写目标文件
            let bytes = saver.fetch_bytes(&args.url).await?;
            let resized = saver.decode_and_resize(&bytes, dimensions)?;
            saver.try_save_decoded_image(&resized, &target, None)?;
        }
        None => {
            saver.try_save_from_url(&args.url, &target).await?;
        }
    }

    Ok(Outcome::Saved(target.path))
}

pub fn save_from_clipboard(saver: &ImageSaver, args: ClipboardArgs) -> Result<Outcome, AppError> {
    let output_dir = resolve_output_dir(args.output.output_dir.as_deref())?;

    match clipboard::save::save_clipboard_image(
        saver,
        &output_dir,
        args.output.filename.as_deref(),
        args.resize,
    )? {
        Some(path) => Ok(Outcome::Saved(path)),
        None => Ok(Outcome::Nothing("剪贴板中没有图片".to_string())),
    }
}

pub fn save_from_file(saver: &ImageSaver, args: FileArgs) -> Result<Outcome, AppError> {
    if !args.source.is_file() {
        return Err(AppError::Input(format!(
            "源文件 '{}' 不存在",
            args.source.display()
        )));
    }

    let output_dir = resolve_output_dir(args.output.output_dir.as_deref())?;
    let file_name = match args.output.filename {
        Some(name) => name,
        None => source_file_name(&args.source)?,
    };
    let target = saver.target(output_dir.join(file_name));

    let bytes = fs::read(&args.source)?;
    if !looks_like_image(&bytes) {
        log::warn!("⚠️ 源文件签名不是已知图片类型：{}", args.source.display());
    }

    match args.resize {
        Some(dimensions) => {
            let resized = saver.decode_and_resize(&bytes, dimensions)?;
            saver.try_save_decoded_image(&resized, &target, None)?;
        }
        None => {
            saver.try_save_from_bytes(&bytes, &target)?;
        }
    }

    Ok(Outcome::Saved(target.path))
}

pub fn save_from_base64(saver: &ImageSaver, args: Base64Args) -> Result<Outcome, AppError> {
    let text = match args.data.strip_prefix('@') {
        Some(path) => fs::read_to_string(path)?,
        None => args.data,
    };

    let output_dir = resolve_output_dir(args.output.output_dir.as_deref())?;
    let file_name = match args.output.filename {
        Some(name) => name,
        None => {
            // 解码失败时沿用 png，错误由下面的保存调用报告
            let extension = ImageSaver::parse_base64(&text)
                .ok()
                .and_then(|bytes| image_extension(&bytes))
                .unwrap_or("png");
            timestamped_name("from_base64", extension)
        }
    };
    let target = saver.target(output_dir.join(file_name));

    saver.try_save_from_base64(&text, &target)?;
    Ok(Outcome::Saved(target.path))
}

pub async fn download_from_webpage(saver: &ImageSaver, args: WebArgs) -> Result<Outcome, AppError> {
    let base_dir = resolve_output_dir(args.output_dir.as_deref())?;
    let download_dir = base_dir.join(timestamped_dir_name("web_download"));
    let download_dir = resolve_output_dir(Some(download_dir.as_path()))?;

    let summary = web::download_images(saver, &args.url, &download_dir, args.max, args.min_size).await?;
    let storage = dir_info(&download_dir)?;

    Ok(Outcome::Harvest { summary, storage })
}

fn source_file_name(source: &Path) -> Result<String, AppError> {
    source
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .ok_or_else(|| AppError::Input(format!("无法从 '{}' 取得文件名", source.display())))
}
