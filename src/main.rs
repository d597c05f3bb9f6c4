//! # 图片保存工具：命令行入口
//!
//! 本文件仅负责日志初始化、参数解析与结果输出。
//! 业务逻辑分布在各子模块中，详见 `lib.rs` 架构文档。

use std::process::ExitCode;

use clap::Parser;
use image_saver::cli::Cli;
use image_saver::commands::{self, Outcome};

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match commands::run(cli).await {
        Ok(Outcome::Saved(path)) => {
            println!("Image saved to: {}", path.display());
            ExitCode::SUCCESS
        }
        Ok(Outcome::Nothing(reason)) => {
            println!("{}", reason);
            ExitCode::SUCCESS
        }
        Ok(Outcome::Harvest { summary, storage }) => {
            println!(
                "Downloaded {}/{} images ({} found) to: {}",
                summary.saved, summary.attempted, summary.found, storage.path
            );
            println!("{} files, {} bytes", storage.file_count, storage.total_size);
            ExitCode::SUCCESS
        }
        Err(err) => {
            log::error!("命令执行失败: {err}");
            eprintln!("Failed to save image: {err}");
            ExitCode::FAILURE
        }
    }
}
